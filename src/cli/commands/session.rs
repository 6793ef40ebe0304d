use std::path::Path;

use crate::adapters::host::snapshot_host::SnapshotHost;
use crate::adapters::store::json_log_store::JsonLogStore;
use crate::adapters::store::sqlite_log_store::SqliteLogStore;
use crate::config::app_config::{AppConfig, StoreBackend};
use crate::core::errors::{ActlogError, Result};
use crate::core::models::host::RequestContext;
use crate::core::traits::host::HostDirectory;
use crate::core::traits::log_store::LogStore;

/// Everything a command needs: config, store, host and request context.
pub struct Session {
    pub config: AppConfig,
    pub store: Box<dyn LogStore>,
    pub host: SnapshotHost,
    pub ctx: RequestContext,
}

impl Session {
    /// Load config, open the store and host snapshot, and resolve the actor.
    pub fn open(actor: Option<&str>, origin: Option<&str>) -> Result<Self> {
        let dir = crate::cli::context::actlog_dir();
        if !dir.exists() {
            return Err(ActlogError::InvalidConfig {
                detail: "actlog not installed. Run 'actlog install' first.".into(),
            });
        }

        let config = AppConfig::load(dir)?;
        let store = open_store(dir, &config)?;
        let host = SnapshotHost::load(&dir.join(&config.host.snapshot))?;
        let ctx = request_context(&host, actor, origin);

        Ok(Self {
            config,
            store,
            host,
            ctx,
        })
    }
}

/// Open the configured `LogStore` backend inside `dir`.
pub fn open_store(dir: &Path, config: &AppConfig) -> Result<Box<dyn LogStore>> {
    let store: Box<dyn LogStore> = match config.store.backend {
        StoreBackend::Sqlite => Box::new(SqliteLogStore::open(
            &dir.join(&config.store.file),
            config.store.busy_timeout(),
        )?),
        StoreBackend::Jsonl => Box::new(JsonLogStore::new(dir, &config.store.file)),
    };
    Ok(store)
}

/// Build the request context. An unknown login counts as not logged in.
pub fn request_context<H: HostDirectory + ?Sized>(
    host: &H,
    actor: Option<&str>,
    origin: Option<&str>,
) -> RequestContext {
    let actor = actor.and_then(|login| {
        let found = host.user_by_login(login);
        if found.is_none() {
            log::warn!("'{login}' is not a known user; treating request as anonymous");
        }
        found
    });
    RequestContext::new(actor, origin.map(str::to_string))
}
