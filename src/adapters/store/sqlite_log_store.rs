use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, params, params_from_iter};

use crate::core::errors::{ActlogError, Result};
use crate::core::models::filter::{
    FilterClause, LogFilter, start_of_day, start_of_next_day,
};
use crate::core::models::log_entry::LogEntry;
use crate::core::traits::log_store::LogStore;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS activity_logs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL,
    activity    TEXT    NOT NULL,
    ip_address  TEXT    NOT NULL,
    created_at  TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS activity_logs_created_at ON activity_logs (created_at);
";

/// Fixed-width UTC timestamps so text order equals time order.
const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Activity log kept in a single SQLite table.
///
/// The autoincrement primary key gives strictly increasing ids; single-row
/// inserts are atomic in SQLite, so no extra locking is layered on top
/// beyond serializing access to the connection.
pub struct SqliteLogStore {
    conn: Mutex<Connection>,
}

impl SqliteLogStore {
    /// Open (or create) the database at `path`.
    ///
    /// `busy_timeout` bounds how long a write waits on a locked database
    /// before failing with a storage error.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|e| ActlogError::Storage {
            detail: format!("Cannot open activity log at {}: {e}", path.display()),
        })?;
        conn.busy_timeout(busy_timeout)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private, throwaway database.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ActlogError::Storage {
            detail: "activity log connection poisoned by an earlier panic".into(),
        })
    }

    /// Append with an explicit timestamp. `insert` stamps with now.
    pub(crate) fn append_at(
        &self,
        actor_id: u64,
        message: &str,
        origin_address: &str,
        created_at: DateTime<Utc>,
    ) -> Result<u64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO activity_logs (user_id, activity, ip_address, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                to_sql_int(actor_id),
                message,
                origin_address,
                created_at.format(WRITE_FORMAT).to_string(),
            ],
        )?;
        Ok(conn.last_insert_rowid() as u64)
    }

    /// Compile a filter into a `WHERE` clause and its bound parameters.
    fn where_clause(filter: &LogFilter) -> (String, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut values = Vec::new();

        for clause in filter.clauses() {
            match clause {
                FilterClause::CreatedOnOrAfter(day) => {
                    conditions.push("created_at >= ?");
                    values.push(Value::Text(
                        start_of_day(*day).format(WRITE_FORMAT).to_string(),
                    ));
                }
                FilterClause::CreatedOnOrBefore(day) => {
                    // The last representable day has no upper bound.
                    if let Some(next) = start_of_next_day(*day) {
                        conditions.push("created_at < ?");
                        values.push(Value::Text(next.format(WRITE_FORMAT).to_string()));
                    }
                }
                FilterClause::Actor(id) => {
                    conditions.push("user_id = ?");
                    values.push(Value::Integer(to_sql_int(*id)));
                }
            }
        }

        if conditions.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), values)
        }
    }

    fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogEntry> {
        let created_at: String = row.get(4)?;
        let created_at = NaiveDateTime::parse_from_str(&created_at, READ_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?
            .and_utc();

        Ok(LogEntry {
            id: row.get::<_, i64>(0)? as u64,
            actor_id: row.get::<_, i64>(1)? as u64,
            message: row.get(2)?,
            origin_address: row.get(3)?,
            created_at,
        })
    }
}

/// SQLite integers are signed; ids past `i64::MAX` saturate.
fn to_sql_int(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

impl LogStore for SqliteLogStore {
    fn install(&self) -> Result<()> {
        self.lock()?.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn insert(&self, actor_id: u64, message: &str, origin_address: &str) -> Result<u64> {
        self.append_at(actor_id, message, origin_address, Utc::now())
    }

    fn count(&self, filter: &LogFilter) -> Result<u64> {
        let (where_sql, values) = Self::where_clause(filter);
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM activity_logs{where_sql}"),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn query(&self, filter: &LogFilter, limit: u64, offset: u64) -> Result<Vec<LogEntry>> {
        let (where_sql, mut values) = Self::where_clause(filter);
        values.push(Value::Integer(to_sql_int(limit)));
        values.push(Value::Integer(to_sql_int(offset)));

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, user_id, activity, ip_address, created_at
             FROM activity_logs{where_sql}
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        ))?;

        let entries = stmt
            .query_map(params_from_iter(values), Self::row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::TempDir;

    fn store() -> SqliteLogStore {
        let store = SqliteLogStore::in_memory().unwrap();
        store.install().unwrap();
        store
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ids_increase_and_query_is_newest_first() {
        let store = store();
        let ids: Vec<u64> = (0..5)
            .map(|i| store.insert(1, &format!("m{i}"), "Unknown").unwrap())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let rows = store.query(&LogFilter::all(), 100, 0).unwrap();
        let got: Vec<u64> = rows.iter().map(|r| r.id).collect();
        let expected: Vec<u64> = ids.into_iter().rev().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn same_timestamp_breaks_ties_by_id() {
        let store = store();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let a = store.append_at(1, "a", "x", at).unwrap();
        let b = store.append_at(1, "b", "x", at).unwrap();

        let rows = store.query(&LogFilter::all(), 10, 0).unwrap();
        assert_eq!(rows[0].id, b);
        assert_eq!(rows[1].id, a);
    }

    #[test]
    fn count_matches_query_length() {
        let store = store();
        for i in 0..7 {
            store.insert(i % 3, "m", "x").unwrap();
        }
        let filter = LogFilter::all().and(FilterClause::Actor(1));

        let count = store.count(&filter).unwrap();
        let rows = store.query(&filter, u64::MAX, 0).unwrap();
        assert_eq!(count, rows.len() as u64);
        assert_eq!(count, 2);
    }

    #[test]
    fn day_range_is_inclusive() {
        let store = store();
        let times = [
            Utc.with_ymd_and_hms(2026, 2, 28, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 3, 0, 0, 0).unwrap(),
        ];
        for (i, t) in times.iter().enumerate() {
            store.append_at(1, &format!("t{i}"), "x", *t).unwrap();
        }

        let filter = LogFilter::all()
            .and(FilterClause::CreatedOnOrAfter(day(2026, 3, 1)))
            .and(FilterClause::CreatedOnOrBefore(day(2026, 3, 2)));
        let rows = store.query(&filter, 10, 0).unwrap();
        let messages: Vec<&str> = rows.iter().map(|r| r.message.as_str()).collect();

        assert_eq!(messages, vec!["t2", "t1"]);
        assert_eq!(store.count(&filter).unwrap(), 2);
    }

    #[test]
    fn timestamps_round_trip_through_text() {
        let store = store();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 15).unwrap();
        store.append_at(3, "m", "x", at).unwrap();

        let rows = store.query(&LogFilter::all(), 1, 0).unwrap();
        assert_eq!(rows[0].created_at, at);
    }

    #[test]
    fn install_is_idempotent_and_keeps_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("activity.db");

        let store = SqliteLogStore::open(&path, Duration::ZERO).unwrap();
        store.install().unwrap();
        store.insert(1, "kept", "x").unwrap();
        drop(store);

        let store = SqliteLogStore::open(&path, Duration::ZERO).unwrap();
        store.install().unwrap();
        assert_eq!(store.count(&LogFilter::all()).unwrap(), 1);
    }

    #[test]
    fn insert_before_install_is_a_storage_error() {
        let store = SqliteLogStore::in_memory().unwrap();
        let err = store.insert(1, "m", "x").unwrap_err();
        assert!(matches!(err, ActlogError::Storage { .. }));
    }

    #[test]
    fn offset_skips_newest() {
        let store = store();
        for i in 0..5 {
            store.insert(1, &format!("m{i}"), "x").unwrap();
        }
        let rows = store.query(&LogFilter::all(), 2, 2).unwrap();
        let messages: Vec<&str> = rows.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["m2", "m1"]);
    }
}
