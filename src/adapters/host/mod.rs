pub mod snapshot_host;
