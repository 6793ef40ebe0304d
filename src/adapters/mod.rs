pub mod host;
pub mod store;
