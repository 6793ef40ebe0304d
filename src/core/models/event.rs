use serde::{Deserialize, Serialize};

use crate::core::errors::{ActlogError, Result};
use crate::core::models::host::PostSnapshot;

/// Lifecycle events the host dispatches to actlog.
///
/// Serialized as a JSON object tagged by `event`, e.g.
/// `{"event":"post_trashed","post_id":42}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Login {
        login: String,
    },
    Logout,
    PostInserted {
        post_id: u64,
        post: PostSnapshot,
        #[serde(default)]
        update: bool,
    },
    PostUpdated {
        post_id: u64,
        post_after: PostSnapshot,
        post_before: PostSnapshot,
    },
    PostTrashed {
        post_id: u64,
    },
    PostDeleted {
        post_id: u64,
    },
    PluginActivated {
        plugin: String,
    },
    PluginDeactivated {
        plugin: String,
    },
    UpgraderProcessComplete {
        options: UpgradeOptions,
    },
}

/// Descriptor of a finished batch operation (install, update, delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    #[serde(default)]
    pub plugins: Option<Vec<String>>,
}

impl HostEvent {
    /// Parse an event from its JSON wire form.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw.trim()).map_err(|e| ActlogError::InvalidEvent {
            detail: e.to_string(),
        })
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Login { .. } => "login",
            HostEvent::Logout => "logout",
            HostEvent::PostInserted { .. } => "post_inserted",
            HostEvent::PostUpdated { .. } => "post_updated",
            HostEvent::PostTrashed { .. } => "post_trashed",
            HostEvent::PostDeleted { .. } => "post_deleted",
            HostEvent::PluginActivated { .. } => "plugin_activated",
            HostEvent::PluginDeactivated { .. } => "plugin_deactivated",
            HostEvent::UpgraderProcessComplete { .. } => "upgrader_process_complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login() {
        let event = HostEvent::from_json(r#"{"event":"login","login":"alice"}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::Login {
                login: "alice".into()
            }
        );
    }

    #[test]
    fn parses_unit_variant() {
        let event = HostEvent::from_json(r#"{"event":"logout"}"#).unwrap();
        assert_eq!(event, HostEvent::Logout);
    }

    #[test]
    fn update_flag_defaults_to_false() {
        let event = HostEvent::from_json(
            r#"{"event":"post_inserted","post_id":3,"post":{"title":"Hi"}}"#,
        )
        .unwrap();
        match event {
            HostEvent::PostInserted { update, post, .. } => {
                assert!(!update);
                assert_eq!(post.content, "");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn upgrader_options_use_type_key() {
        let event = HostEvent::from_json(
            r#"{"event":"upgrader_process_complete","options":{"type":"plugin","action":"delete"}}"#,
        )
        .unwrap();
        match event {
            HostEvent::UpgraderProcessComplete { options } => {
                assert_eq!(options.kind, "plugin");
                assert_eq!(options.action, "delete");
                assert!(options.plugins.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_event() {
        let err = HostEvent::from_json(r#"{"event":"comment_posted"}"#).unwrap_err();
        assert!(matches!(err, ActlogError::InvalidEvent { .. }));
    }

    #[test]
    fn rejects_missing_required_field() {
        let err = HostEvent::from_json(r#"{"event":"post_trashed"}"#).unwrap_err();
        assert!(matches!(err, ActlogError::InvalidEvent { .. }));
    }
}
