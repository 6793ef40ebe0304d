/// All domain errors for actlog.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum ActlogError {
    #[error(
        "Activity log storage error: {detail}\n\n  \
         The log store could not be read or written.\n  \
         Run 'actlog install' to (re)create the schema, or check the\n  \
         [store] section in .actlog/config.toml."
    )]
    Storage { detail: String },

    #[error(
        "Invalid filter: {detail}\n\n  \
         Dates must use ISO 8601 (YYYY-MM-DD), e.g. 2026-01-15"
    )]
    InvalidFilter { detail: String },

    #[error(
        "Invalid event payload: {detail}\n\n  \
         Expected a JSON object tagged with \"event\", e.g.\n    \
         {{\"event\":\"login\",\"login\":\"alice\"}}"
    )]
    InvalidEvent { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Host directory error: {detail}")]
    HostError { detail: String },

    /// Carries no detail: nothing about the log may leak to the caller.
    #[error("Sorry, you are not allowed to access this page.")]
    PermissionDenied,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for ActlogError {
    fn from(e: rusqlite::Error) -> Self {
        ActlogError::Storage {
            detail: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ActlogError>;
