use crate::core::models::host::{Actor, Post};

/// Port for the lookups actlog makes into the host application.
///
/// The current actor and request origin are not here: they travel in
/// `RequestContext` so handlers never read ambient state.
pub trait HostDirectory: Send + Sync {
    /// Resolve a user by login name.
    fn user_by_login(&self, login: &str) -> Option<Actor>;

    /// Resolve a user by id.
    fn user_by_id(&self, id: u64) -> Option<Actor>;

    /// Resolve a content item by id. `None` once it is gone.
    fn post(&self, id: u64) -> Option<Post>;

    /// Canonical permalink of a content item, if the host can build one.
    fn permalink(&self, id: u64) -> Option<String>;

    /// Base URL of the site, without a trailing slash.
    fn home_url(&self) -> String;

    /// Plugin identifier relative to the host's plugin directory.
    fn plugin_basename(&self, plugin: &str) -> String {
        plugin_basename(plugin, None)
    }
}

/// Strip the plugin directory from a plugin path.
///
/// With no known directory, everything up to and including the last
/// `plugins/` segment is dropped. Already-relative identifiers such as
/// `akismet/akismet.php` come back unchanged.
pub fn plugin_basename(plugin: &str, plugin_dir: Option<&str>) -> String {
    let normalized = plugin.replace('\\', "/");

    if let Some(dir) = plugin_dir {
        let dir = dir.replace('\\', "/");
        let dir = dir.trim_end_matches('/');
        if !dir.is_empty()
            && let Some(rest) = normalized.strip_prefix(dir)
            && rest.starts_with('/')
        {
            return rest.trim_start_matches('/').to_string();
        }
    }

    match normalized.rfind("/plugins/") {
        Some(idx) => normalized[idx + "/plugins/".len()..].to_string(),
        None => normalized.trim_start_matches('/').to_string(),
    }
}
