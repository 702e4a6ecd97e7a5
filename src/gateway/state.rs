use std::sync::Arc;

use crate::config::SettlementConfig;
use crate::settlement::SettlementGateway;
use crate::ted::{AdminTedService, ClientTedService, TedRepository};

/// Shared gateway state: the two role-scoped services over one repository
/// and one settlement gateway.
#[derive(Clone)]
pub struct AppState {
    pub client: ClientTedService,
    pub admin: AdminTedService,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn TedRepository>,
        settlement: Arc<dyn SettlementGateway>,
        settlement_config: &SettlementConfig,
    ) -> Self {
        AppState {
            client: ClientTedService::new(repo.clone(), settlement.clone(), settlement_config),
            admin: AdminTedService::new(repo, settlement),
        }
    }
}
