//! TED entities and the daily limit record.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::TedStatus;

/// Current wall-clock time in the server's local timezone.
///
/// Business-day logic (scheduling dates, "today's transfers") is defined
/// over the local calendar date, not UTC.
pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A TED wire-transfer request and its lifecycle state.
///
/// `id` is assigned by storage on insert; a draft built from a client
/// submission carries `id = 0` until persisted. Destination routing fields
/// are free text and are not validated against any bank registry.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Ted {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub scheduling_date: NaiveDateTime,
    pub requested_value: Decimal,
    pub agency_number: String,
    pub account_number: String,
    pub account_digit: String,
    pub bank_number: String,
    pub bank_name: String,
    pub status: TedStatus,
    /// Settlement confirmation id; set only on `Approved`.
    pub confirmation_id: Option<String>,
    /// Administrator's rejection reason; set only on `Disapproved`.
    pub rejection_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Ted {
    /// Build an `InProcess` draft from a client submission.
    pub fn draft(req: SubmitTedRequest, now: NaiveDateTime) -> Self {
        Ted {
            id: 0,
            client_id: req.client_id,
            client_name: req.client_name,
            scheduling_date: req.scheduling_date,
            requested_value: req.requested_value,
            agency_number: req.agency_number,
            account_number: req.account_number,
            account_digit: req.account_digit,
            bank_number: req.bank_number,
            bank_name: req.bank_name,
            status: TedStatus::InProcess,
            confirmation_id: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Client submission payload.
///
/// Wire names follow the public API contract (`clientId`, `numberAgency`,
/// ...); all routing fields arrive as strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTedRequest {
    #[schema(example = 42)]
    pub client_id: i32,
    #[schema(example = "Maria Souza")]
    pub client_name: String,
    /// Requested execution date and time-of-day.
    pub scheduling_date: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1500.0)]
    pub requested_value: Decimal,
    #[serde(rename = "numberAgency")]
    #[schema(example = "1234")]
    pub agency_number: String,
    #[schema(example = "56789")]
    pub account_number: String,
    #[schema(example = "0")]
    pub account_digit: String,
    #[schema(example = "341")]
    pub bank_number: String,
    #[schema(example = "Itau")]
    pub bank_name: String,
}

/// Global daily limit policy: one row, applied to every client identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TedLimit {
    /// Maximum total value of transfers per day, per client.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 10000.0)]
    pub max_value_per_day: Decimal,
    /// Maximum count of transfers per day, per client.
    #[schema(example = 3)]
    pub max_count_per_day: i32,
    /// Maximum value of any single transfer.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5000.0)]
    pub max_value_per_single: Decimal,
}
