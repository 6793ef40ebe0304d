use crate::core::models::event::{HostEvent, UpgradeOptions};
use crate::core::models::host::{PostSnapshot, RequestContext};
use crate::core::traits::host::HostDirectory;

/// Turns host events into human-readable activity messages.
///
/// Translation is pure: it only reads from the host. `None` means the
/// event is not worth logging (an update disguised as an insert, an edit
/// that touched no tracked field, a post that no longer exists...).
pub struct EventTranslator<'a, H: HostDirectory + ?Sized> {
    host: &'a H,
}

impl<'a, H: HostDirectory + ?Sized> EventTranslator<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host }
    }

    pub fn translate(&self, ctx: &RequestContext, event: &HostEvent) -> Option<String> {
        let actor = ctx.actor_login();

        match event {
            HostEvent::Login { login } => Some(format!("User '{login}' logged in.")),
            HostEvent::Logout => Some(format!("User '{actor}' logged out.")),
            HostEvent::PostInserted {
                post_id,
                post,
                update,
            } => {
                if *update {
                    return None;
                }
                Some(format!(
                    "User '{actor}' created a new post ID {post_id} ({}) with the title '{}'.",
                    self.permalink(*post_id),
                    post.title
                ))
            }
            HostEvent::PostUpdated {
                post_id,
                post_after,
                post_before,
            } => {
                let changes = describe_changes(post_before, post_after)?;
                Some(format!(
                    "User '{actor}' updated post ID {post_id} ({}). Changes: {changes}",
                    self.permalink(*post_id)
                ))
            }
            HostEvent::PostTrashed { post_id } => {
                let post = self.host.post(*post_id)?;
                Some(format!(
                    "User '{actor}' moved post ID {post_id} with the title '{}' to the trash.",
                    post.title
                ))
            }
            HostEvent::PostDeleted { post_id } => {
                let post = self.host.post(*post_id)?;
                // Trashed posts were already logged when they were trashed.
                if post.is_trashed() {
                    return None;
                }
                Some(format!(
                    "User '{actor}' permanently deleted post ID {post_id} ({}) with the title '{}'.",
                    self.permalink(*post_id),
                    post.title
                ))
            }
            HostEvent::PluginActivated { plugin } => Some(format!(
                "User '{actor}' activated the plugin '{}'.",
                self.host.plugin_basename(plugin)
            )),
            HostEvent::PluginDeactivated { plugin } => Some(format!(
                "User '{actor}' deactivated the plugin '{}'.",
                self.host.plugin_basename(plugin)
            )),
            HostEvent::UpgraderProcessComplete { options } => {
                let deleted = deleted_plugins(options)?;
                Some(format!("User '{actor}' deleted the plugin(s): '{deleted}'."))
            }
        }
    }

    /// Canonical permalink, or `<home>/?p=<id>` when the host has none.
    fn permalink(&self, post_id: u64) -> String {
        self.host
            .permalink(post_id)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| {
                format!("{}/?p={post_id}", self.host.home_url().trim_end_matches('/'))
            })
    }
}

/// Summarize tracked field changes, or `None` if nothing tracked changed.
fn describe_changes(before: &PostSnapshot, after: &PostSnapshot) -> Option<String> {
    let mut changes = Vec::new();

    if before.title != after.title {
        changes.push(format!(
            "Title changed from '{}' to '{}'",
            before.title, after.title
        ));
    }
    if before.content != after.content {
        changes.push("Content updated.".to_string());
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Comma-joined plugin list for a batch plugin deletion, `None` otherwise.
fn deleted_plugins(options: &UpgradeOptions) -> Option<String> {
    if options.kind != "plugin" || options.action != "delete" {
        return None;
    }
    Some(match &options.plugins {
        Some(plugins) => plugins.join(", "),
        None => "Unknown plugins".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::snapshot_host::{HostSnapshot, SiteSection, SnapshotHost};
    use crate::core::models::host::{Actor, Post};

    fn host() -> SnapshotHost {
        SnapshotHost::new(HostSnapshot {
            site: SiteSection {
                home_url: "https://example.test/".into(),
                plugin_dir: None,
            },
            users: vec![],
            posts: vec![
                Post {
                    id: 1,
                    title: "Hello".into(),
                    content: "body".into(),
                    status: "publish".into(),
                    permalink: Some("https://example.test/hello/".into()),
                },
                Post {
                    id: 2,
                    title: "Draft".into(),
                    content: String::new(),
                    status: "draft".into(),
                    permalink: None,
                },
                Post {
                    id: 3,
                    title: "Old".into(),
                    content: String::new(),
                    status: "trash".into(),
                    permalink: None,
                },
            ],
        })
    }

    fn ctx() -> RequestContext {
        RequestContext::new(
            Some(Actor {
                id: 1,
                login: "admin".into(),
                capabilities: vec![],
            }),
            None,
        )
    }

    fn snap(title: &str, content: &str) -> PostSnapshot {
        PostSnapshot {
            title: title.into(),
            content: content.into(),
        }
    }

    fn translate(event: HostEvent) -> Option<String> {
        let host = host();
        EventTranslator::new(&host).translate(&ctx(), &event)
    }

    #[test]
    fn login_uses_event_login() {
        let msg = translate(HostEvent::Login {
            login: "bob".into(),
        });
        assert_eq!(msg.as_deref(), Some("User 'bob' logged in."));
    }

    #[test]
    fn logout_uses_current_actor() {
        let msg = translate(HostEvent::Logout);
        assert_eq!(msg.as_deref(), Some("User 'admin' logged out."));
    }

    #[test]
    fn creation_with_permalink() {
        let msg = translate(HostEvent::PostInserted {
            post_id: 1,
            post: snap("Hello", "body"),
            update: false,
        });
        assert_eq!(
            msg.as_deref(),
            Some(
                "User 'admin' created a new post ID 1 (https://example.test/hello/) with the title 'Hello'."
            )
        );
    }

    #[test]
    fn creation_suppressed_when_update() {
        let msg = translate(HostEvent::PostInserted {
            post_id: 1,
            post: snap("Hello", "body"),
            update: true,
        });
        assert!(msg.is_none());
    }

    #[test]
    fn update_title_only() {
        let msg = translate(HostEvent::PostUpdated {
            post_id: 1,
            post_after: snap("B", "same"),
            post_before: snap("A", "same"),
        })
        .unwrap();

        assert!(msg.contains("Title changed from 'A' to 'B'"));
        assert!(!msg.contains("Content updated."));
    }

    #[test]
    fn update_title_and_content_joined() {
        let msg = translate(HostEvent::PostUpdated {
            post_id: 1,
            post_after: snap("B", "new"),
            post_before: snap("A", "old"),
        })
        .unwrap();

        assert!(msg.ends_with("Changes: Title changed from 'A' to 'B', Content updated."));
    }

    #[test]
    fn update_without_changes_suppressed() {
        let msg = translate(HostEvent::PostUpdated {
            post_id: 1,
            post_after: snap("A", "x"),
            post_before: snap("A", "x"),
        });
        assert!(msg.is_none());
    }

    #[test]
    fn trash_of_missing_post_suppressed() {
        assert!(translate(HostEvent::PostTrashed { post_id: 99 }).is_none());
    }

    #[test]
    fn trash_message() {
        let msg = translate(HostEvent::PostTrashed { post_id: 2 });
        assert_eq!(
            msg.as_deref(),
            Some("User 'admin' moved post ID 2 with the title 'Draft' to the trash.")
        );
    }

    #[test]
    fn deletion_falls_back_to_query_url() {
        let msg = translate(HostEvent::PostDeleted { post_id: 2 });
        assert_eq!(
            msg.as_deref(),
            Some(
                "User 'admin' permanently deleted post ID 2 (https://example.test/?p=2) with the title 'Draft'."
            )
        );
    }

    #[test]
    fn deletion_of_trashed_post_is_not_logged() {
        assert!(translate(HostEvent::PostDeleted { post_id: 3 }).is_none());
    }

    #[test]
    fn deletion_of_missing_post_suppressed() {
        assert!(translate(HostEvent::PostDeleted { post_id: 99 }).is_none());
    }

    #[test]
    fn plugin_activation_and_deactivation() {
        let on = translate(HostEvent::PluginActivated {
            plugin: "hello/hello.php".into(),
        });
        let off = translate(HostEvent::PluginDeactivated {
            plugin: "hello/hello.php".into(),
        });
        assert_eq!(
            on.as_deref(),
            Some("User 'admin' activated the plugin 'hello/hello.php'.")
        );
        assert_eq!(
            off.as_deref(),
            Some("User 'admin' deactivated the plugin 'hello/hello.php'.")
        );
    }

    #[test]
    fn batch_delete_lists_plugins() {
        let msg = translate(HostEvent::UpgraderProcessComplete {
            options: UpgradeOptions {
                kind: "plugin".into(),
                action: "delete".into(),
                plugins: Some(vec!["x".into(), "y".into()]),
            },
        })
        .unwrap();
        assert!(msg.contains("'x, y'"));
    }

    #[test]
    fn batch_delete_without_list() {
        let msg = translate(HostEvent::UpgraderProcessComplete {
            options: UpgradeOptions {
                kind: "plugin".into(),
                action: "delete".into(),
                plugins: None,
            },
        });
        assert_eq!(
            msg.as_deref(),
            Some("User 'admin' deleted the plugin(s): 'Unknown plugins'.")
        );
    }

    #[test]
    fn batch_other_than_plugin_delete_ignored() {
        for (kind, action) in [("theme", "delete"), ("plugin", "update")] {
            let msg = translate(HostEvent::UpgraderProcessComplete {
                options: UpgradeOptions {
                    kind: kind.into(),
                    action: action.into(),
                    plugins: Some(vec!["x".into()]),
                },
            });
            assert!(msg.is_none(), "{kind}/{action} should be ignored");
        }
    }
}
