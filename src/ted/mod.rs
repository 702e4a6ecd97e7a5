//! TED domain: entities, lifecycle state machine, daily-limit admission
//! control, and the client/admin services on top of the repository seam.

pub mod admin_service;
pub mod client_service;
pub mod error;
pub mod limit;
pub mod memory;
pub mod model;
pub mod pg;
pub mod repository;
pub mod status;
pub mod validate;

pub use admin_service::AdminTedService;
pub use client_service::ClientTedService;
pub use error::TedError;
pub use limit::{exceeds_daily_limit, within_operating_window};
pub use memory::InMemoryTedRepository;
pub use model::{SubmitTedRequest, Ted, TedLimit, now_local, today};
pub use pg::PgTedRepository;
pub use repository::{AdminTedQuery, ClientTedQuery, TedPage, TedRepository};
pub use status::TedStatus;
