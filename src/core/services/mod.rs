pub mod activity_service;
pub mod query_service;
pub mod recorder;
pub mod translator;
