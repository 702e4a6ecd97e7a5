//! Repository seam for TED storage.
//!
//! The services only see this trait; `pg.rs` backs it with PostgreSQL and
//! `memory.rs` with a HashMap for tests and local runs.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use utoipa::IntoParams;

use super::error::TedError;
use super::model::{Ted, TedLimit};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Client-view listing filters. Query keys match the public API contract
/// (`DataInicio`, `NumeroPagina`, ...). Dates compare against the
/// creation date, inclusive on both ends.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClientTedQuery {
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    /// Numeric status filter (0..=3), exact match.
    pub status: Option<i16>,
    /// 1-based page number.
    pub numero_pagina: i64,
    pub quantidade_itens_pagina: i64,
}

impl Default for ClientTedQuery {
    fn default() -> Self {
        ClientTedQuery {
            data_inicio: None,
            data_fim: None,
            status: None,
            numero_pagina: default_page(),
            quantidade_itens_pagina: default_page_size(),
        }
    }
}

/// Admin-view listing filters: the client-view set plus client/bank
/// filters. A missing date bound defaults to today, so a bare admin
/// listing shows only the current day.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "PascalCase", default)]
pub struct AdminTedQuery {
    pub cliente_id: Option<i32>,
    /// Substring match on the client name.
    pub nome_cliente: Option<String>,
    /// Substring match on the destination bank name.
    pub nome_banco: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub status: Option<i16>,
    pub numero_pagina: i64,
    pub quantidade_itens_pagina: i64,
}

impl Default for AdminTedQuery {
    fn default() -> Self {
        AdminTedQuery {
            cliente_id: None,
            nome_cliente: None,
            nome_banco: None,
            data_inicio: None,
            data_fim: None,
            status: None,
            numero_pagina: default_page(),
            quantidade_itens_pagina: default_page_size(),
        }
    }
}

impl AdminTedQuery {
    /// Effective creation-date range: each missing bound independently
    /// defaults to `today`.
    pub fn effective_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (
            self.data_inicio.unwrap_or(today),
            self.data_fim.unwrap_or(today),
        )
    }
}

/// One page of listing results plus the pre-paging total.
#[derive(Debug, Clone)]
pub struct TedPage {
    pub items: Vec<Ted>,
    pub total_items: i64,
}

/// Storage operations for TED records and the limit row.
///
/// Status transitions are conditional writes keyed on the current status
/// being `InProcess`; they return `false` when no row matched, and the
/// caller re-reads to classify the failure.
#[async_trait]
pub trait TedRepository: Send + Sync {
    /// Persist a new record (draft `id` ignored) and return it with the
    /// storage-assigned id.
    async fn insert(&self, ted: Ted) -> Result<Ted, TedError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ted>, TedError>;

    /// Client-facing listing: fixed client scope, optional date/status
    /// filters, no date defaulting.
    async fn list_for_client(
        &self,
        client_id: i32,
        query: &ClientTedQuery,
    ) -> Result<TedPage, TedError>;

    /// Admin-facing listing with client/bank filters and today-defaulted
    /// date bounds.
    async fn list_admin(&self, query: &AdminTedQuery) -> Result<TedPage, TedError>;

    /// All of a client's transfers scheduled for `day`, regardless of
    /// status. Feeds the daily-limit checks.
    async fn scheduled_for_day(&self, client_id: i32, day: NaiveDate)
    -> Result<Vec<Ted>, TedError>;

    /// Conditionally mark Approved and store the confirmation id.
    async fn approve(
        &self,
        id: i32,
        confirmation_id: &str,
        at: NaiveDateTime,
    ) -> Result<bool, TedError>;

    /// Conditionally mark Disapproved and store the optional reason.
    async fn disapprove(
        &self,
        id: i32,
        reason: Option<&str>,
        at: NaiveDateTime,
    ) -> Result<bool, TedError>;

    /// Conditionally mark Canceled.
    async fn cancel(&self, id: i32, at: NaiveDateTime) -> Result<bool, TedError>;

    /// Next settlement entry id from an atomic counter/sequence.
    async fn next_entry_id(&self) -> Result<i64, TedError>;

    async fn limit(&self) -> Result<Option<TedLimit>, TedError>;

    async fn update_limit(&self, limit: &TedLimit) -> Result<(), TedError>;
}
