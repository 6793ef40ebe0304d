use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::errors::{ActlogError, Result};
use crate::core::models::filter::LogFilter;
use crate::core::models::log_entry::LogEntry;
use crate::core::traits::log_store::LogStore;

/// Activity log that appends entries as JSON lines to a file.
///
/// Each line in the log file is a self-contained JSON object representing
/// one `LogEntry`. Ids continue from the last line of the file, so this
/// backend assumes a single writer at a time.
pub struct JsonLogStore {
    log_path: PathBuf,
}

impl JsonLogStore {
    /// Create a store that writes to `{dir}/{log_file}`.
    pub fn new(dir: &Path, log_file: &str) -> Self {
        Self {
            log_path: dir.join(log_file),
        }
    }

    /// Read every entry in insertion order.
    fn read_all(&self) -> Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.log_path).map_err(|e| ActlogError::Storage {
            detail: format!("Cannot read activity log: {e}"),
        })?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ActlogError::Storage {
                detail: format!("Error reading activity log line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let entry: LogEntry =
                serde_json::from_str(trimmed).map_err(|e| ActlogError::Storage {
                    detail: format!("Malformed activity entry at line {}: {e}", line_num + 1),
                })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Matching entries, newest first.
    fn matching(&self, filter: &LogFilter) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    /// Append with an explicit timestamp. `insert` stamps with now.
    pub(crate) fn append_at(
        &self,
        actor_id: u64,
        message: &str,
        origin_address: &str,
        created_at: DateTime<Utc>,
    ) -> Result<u64> {
        let id = self.read_all()?.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let entry = LogEntry {
            id,
            actor_id,
            message: message.to_string(),
            origin_address: origin_address.to_string(),
            created_at,
        };

        let line = serde_json::to_string(&entry).map_err(|e| ActlogError::Storage {
            detail: format!("Failed to serialize activity entry: {e}"),
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ActlogError::Storage {
                detail: format!(
                    "Cannot open activity log at {}: {e}",
                    self.log_path.display()
                ),
            })?;

        writeln!(file, "{line}").map_err(|e| ActlogError::Storage {
            detail: format!("Failed to write activity entry: {e}"),
        })?;

        Ok(id)
    }
}

impl LogStore for JsonLogStore {
    fn install(&self) -> Result<()> {
        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ActlogError::Storage {
                detail: format!(
                    "Cannot create activity log at {}: {e}",
                    self.log_path.display()
                ),
            })?;
        Ok(())
    }

    fn insert(&self, actor_id: u64, message: &str, origin_address: &str) -> Result<u64> {
        self.append_at(actor_id, message, origin_address, Utc::now())
    }

    fn count(&self, filter: &LogFilter) -> Result<u64> {
        Ok(self
            .read_all()?
            .iter()
            .filter(|e| filter.matches(e))
            .count() as u64)
    }

    fn query(&self, filter: &LogFilter, limit: u64, offset: u64) -> Result<Vec<LogEntry>> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .matching(filter)?
            .into_iter()
            .skip(skip)
            .take(take)
            .collect())
    }
}
