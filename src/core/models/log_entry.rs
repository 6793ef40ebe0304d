use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin recorded when the request address is not available.
pub const UNKNOWN_ORIGIN: &str = "Unknown";

/// Actor id that never belongs to a real user. Only ever used in filters.
pub const NO_ACTOR: u64 = 0;

/// A single row of the activity log.
///
/// Rows are immutable once written: the store assigns `id` and
/// `created_at`, and nothing updates or deletes them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub actor_id: u64,
    pub message: String,
    pub origin_address: String,
    pub created_at: DateTime<Utc>,
}
