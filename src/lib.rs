//! TED API - Wire-Transfer Back Office
//!
//! A back-office gateway for TED wire-transfer requests: clients submit
//! transfers, daily limits gate automatic settlement, administrators
//! review what was held back.
//!
//! # Modules
//!
//! - [`ted`] - Domain core: entities, lifecycle state machine, admission
//!   control, client/admin services, repositories
//! - [`settlement`] - Settlement Gateway Adapter (token exchange, batch
//!   submission, stub mode)
//! - [`gateway`] - HTTP surface (axum router, envelope types, handlers)
//! - [`config`] - YAML configuration
//! - [`db`] - PostgreSQL connection management
//! - [`logging`] - tracing setup

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod settlement;
pub mod ted;

// Convenient re-exports at crate root
pub use config::{AppConfig, SettlementConfig};
pub use db::Database;
pub use settlement::{HttpSettlementGateway, SettlementError, SettlementGateway};
pub use ted::{
    AdminTedQuery, AdminTedService, ClientTedQuery, ClientTedService, InMemoryTedRepository,
    PgTedRepository, SubmitTedRequest, Ted, TedError, TedLimit, TedRepository, TedStatus,
};
