//! Request validation.
//!
//! Each validator collects every violated rule into one
//! `TedError::Validation`, so the API reports the full message list in a
//! single 400 response instead of failing on the first rule.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::TedError;
use super::model::{SubmitTedRequest, TedLimit};
use super::repository::{AdminTedQuery, ClientTedQuery};
use super::status::TedStatus;

/// Maximum length of an administrator's rejection reason.
pub const MAX_REJECTION_REASON_LEN: usize = 500;

fn is_positive_number(s: &str) -> bool {
    s.parse::<i64>().map(|n| n > 0).unwrap_or(false)
}

fn is_non_negative_number(s: &str) -> bool {
    s.parse::<i64>().map(|n| n >= 0).unwrap_or(false)
}

fn finish(errors: Vec<String>) -> Result<(), TedError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TedError::validation(errors))
    }
}

/// Validate a path id (TED lookup target).
pub fn validate_id(id: i32) -> Result<(), TedError> {
    if id <= 0 {
        return Err(TedError::validation(vec!["The id is not valid".to_string()]));
    }
    Ok(())
}

/// Validate the client scope of a listing request.
pub fn validate_client_id(client_id: i32) -> Result<(), TedError> {
    if client_id <= 0 {
        return Err(TedError::validation(vec![
            "The client id is not valid".to_string(),
        ]));
    }
    Ok(())
}

/// Validate a client submission. `today` anchors the no-past-scheduling
/// rule.
pub fn validate_submit(req: &SubmitTedRequest, today: NaiveDate) -> Result<(), TedError> {
    let mut errors = Vec::new();

    if req.client_id <= 0 {
        errors.push("Client id must be greater than 0".to_string());
    }
    if req.client_name.trim().is_empty() {
        errors.push("Client name must not be empty".to_string());
    }
    if req.scheduling_date.date() < today {
        errors.push("Scheduling date cannot be in the past".to_string());
    }
    if req.requested_value <= Decimal::ZERO {
        errors.push("Requested value must be greater than 0".to_string());
    }
    if !is_positive_number(&req.agency_number) {
        errors.push("Agency number must be a number greater than 0".to_string());
    }
    if !is_positive_number(&req.account_number) {
        errors.push("Account number must be a number greater than 0".to_string());
    }
    if !is_non_negative_number(&req.account_digit) {
        errors.push("Account digit must be a number greater than or equal to 0".to_string());
    }
    if !is_positive_number(&req.bank_number) {
        errors.push("Bank number must be a number greater than 0".to_string());
    }
    if req.bank_name.trim().is_empty() {
        errors.push("Bank name must not be empty".to_string());
    }

    finish(errors)
}

fn validate_common_query(
    status: Option<i16>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    page: i64,
    page_size: i64,
    errors: &mut Vec<String>,
) {
    if let Some(id) = status {
        if TedStatus::from_id(id).is_none() {
            errors.push("Invalid status filter".to_string());
        }
    }
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            errors.push("Start date must be earlier than or equal to end date".to_string());
        }
    }
    if page < 1 {
        errors.push("Page number must be greater than 0".to_string());
    }
    if page_size < 1 {
        errors.push("Page size must be greater than 0".to_string());
    }
}

/// Validate client-view listing filters.
pub fn validate_client_query(query: &ClientTedQuery) -> Result<(), TedError> {
    let mut errors = Vec::new();
    validate_common_query(
        query.status,
        query.data_inicio,
        query.data_fim,
        query.numero_pagina,
        query.quantidade_itens_pagina,
        &mut errors,
    );
    finish(errors)
}

/// Validate admin-view listing filters.
pub fn validate_admin_query(query: &AdminTedQuery) -> Result<(), TedError> {
    let mut errors = Vec::new();

    if let Some(id) = query.cliente_id {
        if id <= 0 {
            errors.push("Client id filter must be greater than 0".to_string());
        }
    }
    validate_common_query(
        query.status,
        query.data_inicio,
        query.data_fim,
        query.numero_pagina,
        query.quantidade_itens_pagina,
        &mut errors,
    );
    finish(errors)
}

/// Validate a limit-policy update: all three caps strictly positive.
pub fn validate_limit_update(limit: &TedLimit) -> Result<(), TedError> {
    let mut errors = Vec::new();

    if limit.max_value_per_day <= Decimal::ZERO {
        errors.push("Maximum daily value must be greater than 0".to_string());
    }
    if limit.max_count_per_day <= 0 {
        errors.push("Maximum daily count must be greater than 0".to_string());
    }
    if limit.max_value_per_single <= Decimal::ZERO {
        errors.push("Maximum value per transfer must be greater than 0".to_string());
    }

    finish(errors)
}

/// Validate an optional rejection reason.
pub fn validate_rejection_reason(reason: Option<&str>) -> Result<(), TedError> {
    if let Some(reason) = reason {
        if reason.chars().count() > MAX_REJECTION_REASON_LEN {
            return Err(TedError::validation(vec![format!(
                "Rejection reason must be at most {} characters",
                MAX_REJECTION_REASON_LEN
            )]));
        }
    }
    Ok(())
}
