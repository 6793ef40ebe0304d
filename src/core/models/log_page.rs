use crate::core::models::log_entry::LogEntry;

/// Filter values as the operator submitted them. Echoed back for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub username: Option<String>,
    pub page: Option<u64>,
}

/// A log row with its actor resolved to a display name.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub entry: LogEntry,
    pub actor_name: String,
}

/// One page of the log browser.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPage {
    pub query: LogQuery,
    pub rows: Vec<LogRow>,
    pub current_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl LogPage {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_more_pages(&self) -> bool {
        self.total_pages > 1
    }
}
