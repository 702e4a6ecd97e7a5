//! TED API entry point.
//!
//! ```text
//! ┌──────────┐    ┌───────────────┐    ┌──────────────┐
//! │  Config  │───▶│  Repository   │───▶│   Gateway    │
//! │  (YAML)  │    │ (Postgres/mem)│    │ (axum + docs)│
//! └──────────┘    └───────────────┘    └──────────────┘
//! ```

use std::sync::Arc;

use ted_api::gateway::state::AppState;
use ted_api::settlement::{HttpSettlementGateway, SettlementGateway};
use ted_api::ted::{InMemoryTedRepository, PgTedRepository, TedRepository};
use ted_api::{AppConfig, Database};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = ted_api::logging::init_logging(&config);

    tracing::info!("Starting ted-api in {} mode", env);

    let repo: Arc<dyn TedRepository> = match &config.postgres_url {
        Some(url) => {
            let db = Database::connect(url).await?;
            Arc::new(PgTedRepository::new(db.pool().clone()))
        }
        None => {
            tracing::warn!("postgres_url not set, using in-memory repository (data is volatile)");
            Arc::new(InMemoryTedRepository::new())
        }
    };

    let settlement: Arc<dyn SettlementGateway> =
        Arc::new(HttpSettlementGateway::new(config.settlement.clone())?);
    if config.settlement.is_local {
        tracing::warn!("settlement gateway in stub mode, confirmations are fabricated");
    }

    let state = Arc::new(AppState::new(repo, settlement, &config.settlement));

    let port = get_port_override().unwrap_or(config.gateway.port);
    ted_api::gateway::run_server(&config.gateway.host, port, state).await;

    Ok(())
}
