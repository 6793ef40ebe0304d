pub mod host;
pub mod log_store;
