//! API wire types: the uniform response envelope, pagination wrapper, and
//! TED request/response DTOs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ted::{Ted, TedError, TedStatus};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Uniform envelope for every endpoint:
/// `{ isSuccess, message, data }`. On failure `data` carries a list of
/// [`Notification`]s and the HTTP status is 400.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
    pub message: String,
    pub data: T,
}

/// One keyed error message inside a failure envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct Notification {
    /// Opaque unique key for client-side correlation.
    pub key: String,
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Notification {
            key: uuid::Uuid::new_v4().to_string(),
            message: message.into(),
        }
    }
}

/// 200 envelope with a payload.
pub fn ok<T: Serialize>(data: T, message: &str) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            is_success: true,
            message: message.to_string(),
            data,
        }),
    )
        .into_response()
}

/// 200 envelope with `data: null` (actions that return no payload).
pub fn ok_empty(message: &str) -> Response {
    ok(serde_json::Value::Null, message)
}

/// 400 envelope. Validation errors keep their own message list (one
/// notification per rule); everything else is wrapped in the
/// endpoint-specific message with a single joined notification.
pub fn fail(err: &TedError, wrapper: &str) -> Response {
    tracing::error!(code = err.code(), "{}: {}", wrapper, err);

    let (message, notifications) = if err.is_validation() {
        (
            "Validation error".to_string(),
            err.messages().into_iter().map(Notification::new).collect(),
        )
    } else {
        (
            wrapper.to_string(),
            vec![Notification::new(err.messages().join("; "))],
        )
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            is_success: false,
            message,
            data: notifications,
        }),
    )
        .into_response()
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination wrapper: `totalPages = ceil(totalItems / pageSize)`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, total_items: i64, current_page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_items + page_size - 1) / page_size
        } else {
            0
        };
        PagedResponse {
            items,
            total_items,
            total_pages,
            current_page,
            page_size,
        }
    }
}

// ============================================================================
// TED DTOs
// ============================================================================

/// A TED record as returned by both the client and admin views.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TedResponse {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub scheduling_date: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub requested_value: Decimal,
    #[serde(rename = "numberAgency")]
    pub agency_number: String,
    pub account_number: String,
    pub account_digit: String,
    pub bank_number: String,
    pub bank_name: String,
    /// Numeric lifecycle state (0..=3).
    #[schema(value_type = i16)]
    pub status: TedStatus,
    pub created_at: NaiveDateTime,
    #[serde(rename = "sinacorConfirmationId")]
    pub confirmation_id: Option<String>,
    #[serde(rename = "motiveRejection")]
    pub rejection_reason: Option<String>,
}

impl From<Ted> for TedResponse {
    fn from(ted: Ted) -> Self {
        TedResponse {
            id: ted.id,
            client_id: ted.client_id,
            client_name: ted.client_name,
            scheduling_date: ted.scheduling_date,
            requested_value: ted.requested_value,
            agency_number: ted.agency_number,
            account_number: ted.account_number,
            account_digit: ted.account_digit,
            bank_number: ted.bank_number,
            bank_name: ted.bank_name,
            status: ted.status,
            created_at: ted.created_at,
            confirmation_id: ted.confirmation_id,
            rejection_reason: ted.rejection_reason,
        }
    }
}

/// Body of an administrative rejection; the reason is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RejectTedRequest {
    #[serde(rename = "motiveRejection")]
    pub motive_rejection: Option<String>,
}

/// Health probe payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
