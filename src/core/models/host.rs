use serde::{Deserialize, Serialize};

/// Capabilities the host can grant to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Allowed to change site configuration; gates the log browser.
    ManageOptions,
    EditPosts,
    ActivatePlugins,
    DeletePlugins,
}

/// An authenticated user of the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl Actor {
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// A content item as the host sees it at the time of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub permalink: Option<String>,
}

fn default_status() -> String {
    "publish".to_string()
}

impl Post {
    pub fn is_trashed(&self) -> bool {
        self.status == "trash"
    }
}

/// Title and body of a post before or after an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSnapshot {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Per-request state the host would otherwise keep in globals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub actor: Option<Actor>,
    pub origin: Option<String>,
}

impl RequestContext {
    pub fn new(actor: Option<Actor>, origin: Option<String>) -> Self {
        Self { actor, origin }
    }

    /// Login of the current actor, or an empty string when anonymous.
    pub fn actor_login(&self) -> &str {
        self.actor.as_ref().map(|a| a.login.as_str()).unwrap_or("")
    }
}
