use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{ActlogError, Result};

static ACTLOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global actlog directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `.actlog`.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".actlog"));
    let _ = ACTLOG_DIR.set(dir);
}

/// Get the current actlog directory path.
pub fn actlog_dir() -> &'static Path {
    ACTLOG_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".actlog"))
}

/// Reject anything but a plain file name inside the actlog directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        return Err(ActlogError::InvalidConfig {
            detail: format!("Invalid {what} name '{name}': must be a plain file name"),
        });
    }
    Ok(())
}
