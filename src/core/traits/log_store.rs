use crate::core::errors::Result;
use crate::core::models::filter::LogFilter;
use crate::core::models::log_entry::LogEntry;

/// Port for the append-only activity log.
pub trait LogStore: Send + Sync {
    /// Ensure the schema exists. Safe to call repeatedly; never drops data.
    fn install(&self) -> Result<()>;

    /// Append an entry stamped with the current time. Returns its id.
    fn insert(&self, actor_id: u64, message: &str, origin_address: &str) -> Result<u64>;

    /// Number of entries matching `filter`.
    fn count(&self, filter: &LogFilter) -> Result<u64>;

    /// Matching entries, newest first (ties broken by id, descending).
    fn query(&self, filter: &LogFilter, limit: u64, offset: u64) -> Result<Vec<LogEntry>>;
}

impl<T: LogStore + ?Sized> LogStore for Box<T> {
    fn install(&self) -> Result<()> {
        (**self).install()
    }

    fn insert(&self, actor_id: u64, message: &str, origin_address: &str) -> Result<u64> {
        (**self).insert(actor_id, message, origin_address)
    }

    fn count(&self, filter: &LogFilter) -> Result<u64> {
        (**self).count(filter)
    }

    fn query(&self, filter: &LogFilter, limit: u64, offset: u64) -> Result<Vec<LogEntry>> {
        (**self).query(filter, limit, offset)
    }
}
