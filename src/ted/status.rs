//! TED lifecycle states.
//!
//! State IDs are stored as SMALLINT in PostgreSQL and travel as plain
//! integers on the API wire, matching the storage contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a TED request.
///
/// `InProcess` is the only non-terminal state. Terminal states:
/// `Approved` (1), `Canceled` (2), `Disapproved` (3).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum TedStatus {
    /// Awaiting approval (initial state)
    InProcess = 0,

    /// Terminal: confirmed by the settlement system
    Approved = 1,

    /// Terminal: withdrawn by the client
    Canceled = 2,

    /// Terminal: rejected by an administrator
    Disapproved = 3,
}

impl TedStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TedStatus::InProcess)
    }

    /// Get the numeric state ID for storage and the API wire
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from a storage/wire state ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TedStatus::InProcess),
            1 => Some(TedStatus::Approved),
            2 => Some(TedStatus::Canceled),
            3 => Some(TedStatus::Disapproved),
            _ => None,
        }
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            TedStatus::InProcess => "IN_PROCESS",
            TedStatus::Approved => "APPROVED",
            TedStatus::Canceled => "CANCELED",
            TedStatus::Disapproved => "DISAPPROVED",
        }
    }
}

impl fmt::Display for TedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<TedStatus> for i16 {
    fn from(status: TedStatus) -> i16 {
        status.id()
    }
}

impl TryFrom<i16> for TedStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        TedStatus::from_id(value).ok_or_else(|| format!("unknown TED status id: {}", value))
    }
}
