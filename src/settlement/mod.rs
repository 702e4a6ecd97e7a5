//! Settlement Gateway Adapter.
//!
//! Translates approved TED requests into the settlement backend's wire
//! contract, handles the token exchange, and maps the backend's
//! inconsistency lists onto the local error taxonomy.

pub mod gateway;
pub mod types;

pub use gateway::{HttpSettlementGateway, SettlementError, SettlementGateway};
pub use types::{SettlementBatch, SettlementEntry, SettlementResponse};
