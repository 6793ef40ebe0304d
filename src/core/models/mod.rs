pub mod event;
pub mod filter;
pub mod host;
pub mod log_entry;
pub mod log_page;
