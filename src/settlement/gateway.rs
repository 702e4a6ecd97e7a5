//! Settlement gateway: token exchange and batch submission.
//!
//! `HttpSettlementGateway` talks to the real backend; with the `is_local`
//! flag it skips the network and fabricates a confirmation id, for
//! environments without access to the settlement system. Either way the
//! outgoing payload is structurally validated first.

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

use crate::config::SettlementConfig;
use crate::ted::error::TedError;
use crate::ted::model::today;

use super::types::{
    COMPANY_ID_HEADER, ORIGIN_SYSTEM_HEADER, SettlementBatch, SettlementResponse, TokenResponse,
};

const TOKEN_PATH: &str = "/infra/api/v1/oauth/token";
const SUBMIT_PATH: &str = "/tesouraria/api/v2/LancamentosTES";

#[derive(Debug, Error)]
pub enum SettlementError {
    /// The outgoing payload failed structural validation; never sent.
    #[error("invalid settlement payload: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Client-credentials exchange failed; hard failure.
    #[error("failed to obtain settlement token: {0}")]
    Token(String),

    /// The backend rejected the batch; messages from its inconsistency
    /// lists.
    #[error("settlement rejected the batch: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("settlement transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SettlementError {
    fn from(e: reqwest::Error) -> Self {
        SettlementError::Transport(e.to_string())
    }
}

/// Payload and rejection problems surface as validation errors to the
/// caller; token and transport problems as upstream errors.
impl From<SettlementError> for TedError {
    fn from(e: SettlementError) -> Self {
        match e {
            SettlementError::Validation(msgs) | SettlementError::Rejected(msgs) => {
                TedError::Validation(msgs)
            }
            other => TedError::Upstream(other.to_string()),
        }
    }
}

/// Seam between the TED services and the settlement backend.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// Submit a batch; returns the backend's confirmation (protocol) id.
    async fn submit(&self, batch: SettlementBatch) -> Result<String, SettlementError>;
}

pub struct HttpSettlementGateway {
    client: reqwest::Client,
    config: SettlementConfig,
}

impl HttpSettlementGateway {
    pub fn new(config: SettlementConfig) -> Result<Self, SettlementError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                SettlementError::Transport(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn obtain_token(&self) -> Result<String, SettlementError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(self.url(TOKEN_PATH))
            .form(&params)
            .send()
            .await
            .map_err(|e| SettlementError::Token(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SettlementError::Token(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SettlementError::Token(format!("unparseable token response: {}", e)))?;

        Ok(token.access_token)
    }
}

fn trim_period(message: &str) -> String {
    message.trim_end_matches('.').to_string()
}

#[async_trait]
impl SettlementGateway for HttpSettlementGateway {
    async fn submit(&self, batch: SettlementBatch) -> Result<String, SettlementError> {
        let errors = batch.validate(today());
        if !errors.is_empty() {
            return Err(SettlementError::Validation(errors));
        }

        if self.config.is_local {
            let confirmation: u32 = rand::thread_rng().gen_range(111..=999);
            tracing::debug!(confirmation, "settlement stub mode, skipping network");
            return Ok(confirmation.to_string());
        }

        let token = self.obtain_token().await?;

        let response = self
            .client
            .post(self.url(SUBMIT_PATH))
            .bearer_auth(&token)
            .header(COMPANY_ID_HEADER.0, COMPANY_ID_HEADER.1)
            .header(ORIGIN_SYSTEM_HEADER.0, ORIGIN_SYSTEM_HEADER.1)
            .json(&batch)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: SettlementResponse = serde_json::from_str(&body).map_err(|e| {
            SettlementError::Transport(format!("unparseable settlement response: {}", e))
        })?;

        if !status.is_success() {
            // Per-entry inconsistencies are the more specific diagnosis;
            // fall back to request-level ones, then to a generic message.
            let mut messages: Vec<String> = parsed
                .inconsistencias_lancamentos
                .iter()
                .map(|i| trim_period(&i.descricao))
                .collect();
            if messages.is_empty() {
                messages = parsed
                    .inconsistencias_request
                    .iter()
                    .map(|i| trim_period(&i.descricao))
                    .collect();
            }
            if messages.is_empty() {
                messages.push(format!("settlement submission failed with status {}", status));
            }
            return Err(SettlementError::Rejected(messages));
        }

        Ok(parsed.protocolo.to_string())
    }
}
