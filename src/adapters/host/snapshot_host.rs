use std::path::Path;

use serde::Deserialize;

use crate::core::errors::{ActlogError, Result};
use crate::core::models::host::{Actor, Post};
use crate::core::traits::host::{HostDirectory, plugin_basename};

/// Host state exported by the integration, read from `host.toml`.
///
/// Example:
/// ```toml
/// [site]
/// home_url = "https://example.test"
///
/// [[users]]
/// id = 1
/// login = "admin"
/// capabilities = ["manage_options"]
///
/// [[posts]]
/// id = 12
/// title = "Hello world"
/// status = "publish"
/// permalink = "https://example.test/hello-world/"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HostSnapshot {
    pub site: SiteSection,
    #[serde(default)]
    pub users: Vec<Actor>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// The `[site]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    pub home_url: String,
    /// Absolute plugin directory, used to shorten plugin paths.
    pub plugin_dir: Option<String>,
}

/// `HostDirectory` answering from a static snapshot of the host.
pub struct SnapshotHost {
    snapshot: HostSnapshot,
}

impl SnapshotHost {
    pub fn new(snapshot: HostSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ActlogError::HostError {
            detail: format!("Cannot read host snapshot {}: {e}", path.display()),
        })?;
        let snapshot: HostSnapshot =
            toml::from_str(&content).map_err(|e| ActlogError::HostError {
                detail: format!("Failed to parse {}: {e}", path.display()),
            })?;
        Ok(Self::new(snapshot))
    }
}

impl HostDirectory for SnapshotHost {
    fn user_by_login(&self, login: &str) -> Option<Actor> {
        self.snapshot
            .users
            .iter()
            .find(|u| u.login == login)
            .cloned()
    }

    fn user_by_id(&self, id: u64) -> Option<Actor> {
        self.snapshot.users.iter().find(|u| u.id == id).cloned()
    }

    fn post(&self, id: u64) -> Option<Post> {
        self.snapshot.posts.iter().find(|p| p.id == id).cloned()
    }

    fn permalink(&self, id: u64) -> Option<String> {
        self.post(id).and_then(|p| p.permalink)
    }

    fn home_url(&self) -> String {
        self.snapshot.site.home_url.trim_end_matches('/').to_string()
    }

    fn plugin_basename(&self, plugin: &str) -> String {
        plugin_basename(plugin, self.snapshot.site.plugin_dir.as_deref())
    }
}
