//! Administrative handlers: review listing, approve/reject, limit policy.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};

use super::super::state::AppState;
use super::super::types::{PagedResponse, RejectTedRequest, TedResponse, fail, ok, ok_empty};
use crate::ted::{AdminTedQuery, TedLimit};

/// List TED requests for review. Without an explicit date range only
/// today's requests are shown.
///
/// GET /api/v1/admin/lista-ted
#[utoipa::path(
    get,
    operation_id = "admin_lista_ted",
    path = "/api/v1/admin/lista-ted",
    params(AdminTedQuery),
    responses(
        (status = 200, description = "Paginated TED list"),
        (status = 400, description = "Invalid filters")
    ),
    tag = "Admin"
)]
pub async fn lista_ted(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminTedQuery>,
) -> Response {
    match state.admin.list(&query).await {
        Ok(page) => {
            let items: Vec<TedResponse> = page.items.into_iter().map(TedResponse::from).collect();
            ok(
                PagedResponse::new(
                    items,
                    page.total_items,
                    query.numero_pagina,
                    query.quantidade_itens_pagina,
                ),
                "TED listed successfully",
            )
        }
        Err(err) => fail(&err, "An error occurred while listing the TED"),
    }
}

/// Approve a pending TED: submits it to the settlement system.
///
/// PUT /api/v1/admin/aprova-ted/{id}
#[utoipa::path(
    put,
    path = "/api/v1/admin/aprova-ted/{id}",
    params(("id" = i32, Path, description = "TED id")),
    responses(
        (status = 200, description = "TED approved"),
        (status = 400, description = "Unknown id, illegal transition, or settlement rejection")
    ),
    tag = "Admin"
)]
pub async fn aprova_ted(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    match state.admin.approve(id).await {
        Ok(()) => ok_empty("TED approved successfully"),
        Err(err) => fail(&err, "An error occurred while approving the TED"),
    }
}

/// Reject a pending TED with an optional reason (max 500 chars).
///
/// PUT /api/v1/admin/reprova-ted/{id}
#[utoipa::path(
    put,
    path = "/api/v1/admin/reprova-ted/{id}",
    params(("id" = i32, Path, description = "TED id")),
    request_body(content = RejectTedRequest, description = "Optional rejection reason"),
    responses(
        (status = 200, description = "TED rejected"),
        (status = 400, description = "Unknown id or illegal state transition")
    ),
    tag = "Admin"
)]
pub async fn reprova_ted(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    body: Option<Json<RejectTedRequest>>,
) -> Response {
    let reason = body.and_then(|Json(req)| req.motive_rejection);
    match state.admin.reject(id, reason.as_deref()).await {
        Ok(()) => ok_empty("TED rejected successfully"),
        Err(err) => fail(&err, "An error occurred while rejecting the TED"),
    }
}

/// Replace the global TED limit policy.
///
/// PUT /api/v1/admin/atualiza-limite-ted
#[utoipa::path(
    put,
    path = "/api/v1/admin/atualiza-limite-ted",
    request_body = TedLimit,
    responses(
        (status = 200, description = "Limit policy updated"),
        (status = 400, description = "Non-positive limit values")
    ),
    tag = "Admin"
)]
pub async fn atualiza_limite_ted(
    State(state): State<Arc<AppState>>,
    Json(limit): Json<TedLimit>,
) -> Response {
    match state.admin.update_limit(&limit).await {
        Ok(()) => ok_empty("TED limit updated successfully"),
        Err(err) => fail(&err, "An error occurred while updating the TED limit"),
    }
}

/// Read the current TED limit policy.
///
/// GET /api/v1/admin/obtem-limite-ted
#[utoipa::path(
    get,
    path = "/api/v1/admin/obtem-limite-ted",
    responses(
        (status = 200, description = "Current limit policy", body = TedLimit),
        (status = 400, description = "Limits not configured")
    ),
    tag = "Admin"
)]
pub async fn obtem_limite_ted(State(state): State<Arc<AppState>>) -> Response {
    match state.admin.limit().await {
        Ok(limit) => ok(limit, "TED limit retrieved successfully"),
        Err(err) => fail(&err, "An error occurred while retrieving the TED limit"),
    }
}
