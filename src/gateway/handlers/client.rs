//! Client-facing handlers: submit, list, cancel.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};

use super::super::state::AppState;
use super::super::types::{PagedResponse, TedResponse, fail, ok, ok_empty};
use crate::ted::{ClientTedQuery, SubmitTedRequest};

/// Submit a new TED request.
///
/// POST /api/v1/cliente/solicita-ted
///
/// A request held back by the daily limits or the operating window is not
/// an error: it is persisted `InProcess` and returned with HTTP 200.
#[utoipa::path(
    post,
    path = "/api/v1/cliente/solicita-ted",
    request_body = SubmitTedRequest,
    responses(
        (status = 200, description = "TED persisted (auto-approved or held in process)"),
        (status = 400, description = "Invalid request or settlement rejection")
    ),
    tag = "Cliente"
)]
pub async fn solicita_ted(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitTedRequest>,
) -> Response {
    match state.client.submit(req).await {
        Ok(ted) => ok(TedResponse::from(ted), "TED requested successfully"),
        Err(err) => fail(&err, "An error occurred while requesting the TED"),
    }
}

/// List a client's TED requests, paginated.
///
/// GET /api/v1/cliente/lista-ted/{clienteId}
#[utoipa::path(
    get,
    operation_id = "cliente_lista_ted",
    path = "/api/v1/cliente/lista-ted/{cliente_id}",
    params(
        ("cliente_id" = i32, Path, description = "Client id"),
        ClientTedQuery
    ),
    responses(
        (status = 200, description = "Paginated TED list"),
        (status = 400, description = "Invalid filters")
    ),
    tag = "Cliente"
)]
pub async fn lista_ted(
    State(state): State<Arc<AppState>>,
    Path(cliente_id): Path<i32>,
    Query(query): Query<ClientTedQuery>,
) -> Response {
    match state.client.list(cliente_id, &query).await {
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

/// Cancel a pending TED request.
///
/// PUT /api/v1/cliente/cancela-ted/{id}
#[utoipa::path(
    put,
    path = "/api/v1/cliente/cancela-ted/{id}",
    params(("id" = i32, Path, description = "TED id")),
    responses(
        (status = 200, description = "TED canceled"),
        (status = 400, description = "Unknown id or illegal state transition")
    ),
    tag = "Cliente"
)]
pub async fn cancela_ted(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    match state.client.cancel(id).await {
        Ok(()) => ok_empty("TED canceled successfully"),
        Err(err) => fail(&err, "An error occurred while canceling the TED"),
    }
}
