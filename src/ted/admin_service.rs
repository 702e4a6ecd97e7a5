//! Administrative TED operations: review listing, approve/reject, limit
//! policy management.

use std::sync::Arc;

use crate::settlement::{SettlementBatch, SettlementEntry, SettlementGateway};

use super::error::TedError;
use super::model::{Ted, TedLimit, now_local};
use super::repository::{AdminTedQuery, TedPage, TedRepository};
use super::status::TedStatus;
use super::validate;

#[derive(Clone)]
pub struct AdminTedService {
    repo: Arc<dyn TedRepository>,
    settlement: Arc<dyn SettlementGateway>,
}

fn guard_approve(status: TedStatus) -> Result<(), TedError> {
    match status {
        TedStatus::InProcess => Ok(()),
        TedStatus::Approved => Err(TedError::AlreadyApproved),
        _ => Err(TedError::CannotApprove),
    }
}

fn guard_disapprove(status: TedStatus) -> Result<(), TedError> {
    match status {
        TedStatus::InProcess => Ok(()),
        TedStatus::Disapproved => Err(TedError::AlreadyDisapproved),
        _ => Err(TedError::CannotDisapprove),
    }
}

impl AdminTedService {
    pub fn new(repo: Arc<dyn TedRepository>, settlement: Arc<dyn SettlementGateway>) -> Self {
        Self { repo, settlement }
    }

    /// Paginated review listing. With no explicit date range this shows
    /// today's requests only.
    pub async fn list(&self, query: &AdminTedQuery) -> Result<TedPage, TedError> {
        validate::validate_admin_query(query)?;
        self.repo.list_admin(query).await
    }

    /// Approve a pending TED: submit it to the settlement system, then
    /// mark it `Approved` with the returned confirmation id.
    pub async fn approve(&self, id: i32) -> Result<(), TedError> {
        validate::validate_id(id)?;

        let ted = self.repo.find_by_id(id).await?.ok_or(TedError::NotFound)?;
        guard_approve(ted.status)?;

        let entry_id = self.repo.next_entry_id().await?;
        let batch = SettlementBatch::single(SettlementEntry::debit(entry_id, &ted));
        let confirmation = self.settlement.submit(batch).await?;

        if !self.repo.approve(id, &confirmation, now_local()).await? {
            let current = self.repo.find_by_id(id).await?.ok_or(TedError::NotFound)?;
            guard_approve(current.status)?;
            return Err(TedError::CannotApprove);
        }

        tracing::info!(id, entry_id, "TED approved by administrator");
        Ok(())
    }

    /// Reject a pending TED, storing the administrator's optional reason.
    pub async fn reject(&self, id: i32, reason: Option<&str>) -> Result<(), TedError> {
        validate::validate_id(id)?;
        validate::validate_rejection_reason(reason)?;

        let ted = self.repo.find_by_id(id).await?.ok_or(TedError::NotFound)?;
        guard_disapprove(ted.status)?;

        if !self.repo.disapprove(id, reason, now_local()).await? {
            let current = self.repo.find_by_id(id).await?.ok_or(TedError::NotFound)?;
            guard_disapprove(current.status)?;
            return Err(TedError::CannotDisapprove);
        }

        tracing::info!(id, "TED rejected by administrator");
        Ok(())
    }

    /// Replace the global limit policy.
    pub async fn update_limit(&self, limit: &TedLimit) -> Result<(), TedError> {
        validate::validate_limit_update(limit)?;
        self.repo.update_limit(limit).await?;
        tracing::info!(
            max_value_per_day = %limit.max_value_per_day,
            max_count_per_day = limit.max_count_per_day,
            max_value_per_single = %limit.max_value_per_single,
            "TED limit policy updated"
        );
        Ok(())
    }

    /// Read the current limit policy.
    pub async fn limit(&self) -> Result<TedLimit, TedError> {
        self.repo
            .limit()
            .await?
            .ok_or(TedError::LimitNotConfigured)
    }

    /// Lookup used by tests and diagnostics.
    pub async fn find(&self, id: i32) -> Result<Option<Ted>, TedError> {
        self.repo.find_by_id(id).await
    }
}
