pub mod json_log_store;
pub mod sqlite_log_store;
