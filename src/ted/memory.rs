//! In-memory `TedRepository` for tests and local runs without PostgreSQL.
//!
//! Mirrors the PostgreSQL implementation's semantics: conditional status
//! transitions, creation-date range filters, count-before-paging. Backed
//! by `Arc<RwLock<HashMap>>` with atomic id counters.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::error::TedError;
use super::model::{Ted, TedLimit, today};
use super::repository::{AdminTedQuery, ClientTedQuery, TedPage, TedRepository};
use super::status::TedStatus;

#[derive(Clone)]
pub struct InMemoryTedRepository {
    teds: Arc<RwLock<HashMap<i32, Ted>>>,
    limit: Arc<RwLock<Option<TedLimit>>>,
    next_id: Arc<AtomicI32>,
    next_entry_id: Arc<AtomicI64>,
}

impl InMemoryTedRepository {
    /// Empty repository seeded with a permissive default limit row, the
    /// counterpart of the seed row in `migrations/0001_init.sql`.
    pub fn new() -> Self {
        Self::with_limit(TedLimit {
            max_value_per_day: Decimal::from(10_000),
            max_count_per_day: 10,
            max_value_per_single: Decimal::from(5_000),
        })
    }

    /// Empty repository with an explicit limit row.
    pub fn with_limit(limit: TedLimit) -> Self {
        InMemoryTedRepository {
            teds: Arc::new(RwLock::new(HashMap::new())),
            limit: Arc::new(RwLock::new(Some(limit))),
            next_id: Arc::new(AtomicI32::new(1)),
            next_entry_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn page(mut items: Vec<Ted>, page_number: i64, page_size: i64) -> TedPage {
        items.sort_by_key(|t| t.id);
        let total_items = items.len() as i64;
        let skip = (page_number - 1).max(0) * page_size;
        let items = items
            .into_iter()
            .skip(skip as usize)
            .take(page_size.max(0) as usize)
            .collect();
        TedPage { items, total_items }
    }

    /// Apply `mutate` iff the record exists and is still `InProcess`.
    async fn transition<F>(&self, id: i32, mutate: F) -> Result<bool, TedError>
    where
        F: FnOnce(&mut Ted),
    {
        let mut teds = self.teds.write().await;
        match teds.get_mut(&id) {
            Some(ted) if ted.status == TedStatus::InProcess => {
                mutate(ted);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Default for InMemoryTedRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TedRepository for InMemoryTedRepository {
    async fn insert(&self, mut ted: Ted) -> Result<Ted, TedError> {
        ted.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut teds = self.teds.write().await;
        teds.insert(ted.id, ted.clone());
        Ok(ted)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ted>, TedError> {
        Ok(self.teds.read().await.get(&id).cloned())
    }

    async fn list_for_client(
        &self,
        client_id: i32,
        query: &ClientTedQuery,
    ) -> Result<TedPage, TedError> {
        let teds = self.teds.read().await;
        let items: Vec<Ted> = teds
            .values()
            .filter(|t| t.client_id == client_id)
            .filter(|t| {
                query
                    .data_inicio
                    .map_or(true, |start| t.created_at.date() >= start)
            })
            .filter(|t| query.data_fim.map_or(true, |end| t.created_at.date() <= end))
            .filter(|t| query.status.map_or(true, |s| t.status.id() == s))
            .cloned()
            .collect();
        Ok(Self::page(
            items,
            query.numero_pagina,
            query.quantidade_itens_pagina,
        ))
    }

    async fn list_admin(&self, query: &AdminTedQuery) -> Result<TedPage, TedError> {
        let (start, end) = query.effective_range(today());
        let teds = self.teds.read().await;
        let items: Vec<Ted> = teds
            .values()
            .filter(|t| query.cliente_id.map_or(true, |id| t.client_id == id))
            .filter(|t| {
                query
                    .nome_cliente
                    .as_deref()
                    .map_or(true, |name| t.client_name.contains(name))
            })
            .filter(|t| {
                query
                    .nome_banco
                    .as_deref()
                    .map_or(true, |bank| t.bank_name.contains(bank))
            })
            .filter(|t| t.created_at.date() >= start && t.created_at.date() <= end)
            .filter(|t| query.status.map_or(true, |s| t.status.id() == s))
            .cloned()
            .collect();
        Ok(Self::page(
            items,
            query.numero_pagina,
            query.quantidade_itens_pagina,
        ))
    }

    async fn scheduled_for_day(
        &self,
        client_id: i32,
        day: NaiveDate,
    ) -> Result<Vec<Ted>, TedError> {
        let teds = self.teds.read().await;
        Ok(teds
            .values()
            .filter(|t| t.client_id == client_id && t.scheduling_date.date() == day)
            .cloned()
            .collect())
    }

    async fn approve(
        &self,
        id: i32,
        confirmation_id: &str,
        at: NaiveDateTime,
    ) -> Result<bool, TedError> {
        self.transition(id, |ted| {
            ted.status = TedStatus::Approved;
            ted.confirmation_id = Some(confirmation_id.to_string());
            ted.updated_at = at;
        })
        .await
    }

    async fn disapprove(
        &self,
        id: i32,
        reason: Option<&str>,
        at: NaiveDateTime,
    ) -> Result<bool, TedError> {
        self.transition(id, |ted| {
            ted.status = TedStatus::Disapproved;
            ted.rejection_reason = reason.map(str::to_string);
            ted.updated_at = at;
        })
        .await
    }

    async fn cancel(&self, id: i32, at: NaiveDateTime) -> Result<bool, TedError> {
        self.transition(id, |ted| {
            ted.status = TedStatus::Canceled;
            ted.updated_at = at;
        })
        .await
    }

    async fn next_entry_id(&self) -> Result<i64, TedError> {
        Ok(self.next_entry_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn limit(&self) -> Result<Option<TedLimit>, TedError> {
        Ok(self.limit.read().await.clone())
    }

    async fn update_limit(&self, limit: &TedLimit) -> Result<(), TedError> {
        *self.limit.write().await = Some(limit.clone());
        Ok(())
    }
}
