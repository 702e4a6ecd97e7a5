//! Client-facing TED operations: submission (admission control), listing,
//! cancellation.

use std::sync::Arc;

use chrono::NaiveTime;

use crate::config::SettlementConfig;
use crate::settlement::{SettlementBatch, SettlementEntry, SettlementGateway};

use super::error::TedError;
use super::limit::{exceeds_daily_limit, within_operating_window};
use super::model::{SubmitTedRequest, Ted, now_local, today};
use super::repository::{ClientTedQuery, TedPage, TedRepository};
use super::status::TedStatus;
use super::validate;

#[derive(Clone)]
pub struct ClientTedService {
    repo: Arc<dyn TedRepository>,
    settlement: Arc<dyn SettlementGateway>,
    window_start: NaiveTime,
    window_end: NaiveTime,
}

fn guard_cancel(status: TedStatus) -> Result<(), TedError> {
    match status {
        TedStatus::InProcess => Ok(()),
        TedStatus::Canceled => Err(TedError::AlreadyCanceled),
        _ => Err(TedError::CannotCancel),
    }
}

impl ClientTedService {
    pub fn new(
        repo: Arc<dyn TedRepository>,
        settlement: Arc<dyn SettlementGateway>,
        config: &SettlementConfig,
    ) -> Self {
        Self {
            repo,
            settlement,
            window_start: config.window_start,
            window_end: config.window_end,
        }
    }

    /// Submit a new TED request.
    ///
    /// Admission control: when the daily limits are not exceeded and the
    /// scheduling time-of-day falls inside the operating window, the
    /// request goes straight to the settlement system and is persisted as
    /// `Approved`. A limit or window miss is not an error: the request is
    /// persisted `InProcess` for later administrative review. Settlement
    /// payload/rejection failures abort the submission entirely.
    pub async fn submit(&self, req: SubmitTedRequest) -> Result<Ted, TedError> {
        validate::validate_submit(&req, today())?;

        let mut ted = Ted::draft(req, now_local());

        let limit = self
            .repo
            .limit()
            .await?
            .ok_or(TedError::LimitNotConfigured)?;
        let todays = self.repo.scheduled_for_day(ted.client_id, today()).await?;

        let exceeded = exceeds_daily_limit(ted.requested_value, &todays, &limit);
        let in_window = within_operating_window(
            ted.scheduling_date.time(),
            self.window_start,
            self.window_end,
        );

        if !exceeded && in_window {
            let entry_id = self.repo.next_entry_id().await?;
            let batch = SettlementBatch::single(SettlementEntry::debit(entry_id, &ted));
            let confirmation = self.settlement.submit(batch).await?;

            ted.status = TedStatus::Approved;
            ted.confirmation_id = Some(confirmation);
            tracing::info!(
                client_id = ted.client_id,
                entry_id,
                "TED auto-approved by settlement system"
            );
        } else {
            tracing::info!(
                client_id = ted.client_id,
                exceeded,
                in_window,
                "TED held for administrative review"
            );
        }

        self.repo.insert(ted).await
    }

    /// List the client's TED requests, paginated.
    pub async fn list(&self, client_id: i32, query: &ClientTedQuery) -> Result<TedPage, TedError> {
        validate::validate_client_id(client_id)?;
        validate::validate_client_query(query)?;

        self.repo.list_for_client(client_id, query).await
    }

    /// Cancel an `InProcess` TED request.
    pub async fn cancel(&self, id: i32) -> Result<(), TedError> {
        validate::validate_id(id)?;

        let ted = self.repo.find_by_id(id).await?.ok_or(TedError::NotFound)?;
        guard_cancel(ted.status)?;

        if !self.repo.cancel(id, now_local()).await? {
            // Lost the race between the read and the conditional write;
            // re-read to report the state that actually won.
            let current = self.repo.find_by_id(id).await?.ok_or(TedError::NotFound)?;
            guard_cancel(current.status)?;
            return Err(TedError::CannotCancel);
        }

        tracing::info!(id, "TED canceled by client");
        Ok(())
    }
}
