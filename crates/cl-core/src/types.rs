//! Core type definitions for CleanLink
//!
//! These types mirror the shapes the extension host hands us (tabs,
//! context-menu clicks) and the two stored preferences.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Host tab identifier.
pub type TabId = i32;
/// Host window identifier.
pub type WindowId = i32;
/// Host tab-group identifier.
pub type GroupId = i32;

/// Sentinel the host uses for "not in a group".
pub const GROUP_ID_NONE: GroupId = -1;

/// Title given to the group created by the "open all" import action.
pub const IMPORT_GROUP_TITLE: &str = "Imported Links";

/// Context-menu entry registered on links and media.
pub const CONTEXT_MENU_ID: &str = "copyCleanLinkContext";
pub const CONTEXT_MENU_TITLE: &str = "Copy Clean Link";
pub const CONTEXT_MENU_CONTEXTS: [&str; 4] = ["link", "image", "video", "audio"];

/// Keyboard shortcut command name.
pub const COPY_COMMAND: &str = "copy_clean_link";

// =============================================================================
// Scope
// =============================================================================

/// Which tabs take part in an export action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
pub enum Scope {
    /// Only the active tab
    #[default]
    #[serde(rename = "thisTab")]
    CurrentTab,
    /// Tabs highlighted in the current window
    #[serde(rename = "selectedTabs")]
    HighlightedTabs,
    /// Tabs in the active tab's group
    #[serde(rename = "thisGroup")]
    TabGroup,
    /// Tabs in the active tab's window
    #[serde(rename = "thisWindow")]
    Window,
    /// Every tab in every window
    #[serde(rename = "allWindows")]
    AllWindows,
    /// Anchor hrefs scraped from the active tab's document
    #[serde(rename = "allLinksInPage")]
    PageLinks,
}

impl Scope {
    pub const ALL: [Scope; 6] = [
        Scope::CurrentTab,
        Scope::HighlightedTabs,
        Scope::TabGroup,
        Scope::Window,
        Scope::AllWindows,
        Scope::PageLinks,
    ];

    /// Stored preference string.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::CurrentTab => "thisTab",
            Scope::HighlightedTabs => "selectedTabs",
            Scope::TabGroup => "thisGroup",
            Scope::Window => "thisWindow",
            Scope::AllWindows => "allWindows",
            Scope::PageLinks => "allLinksInPage",
        }
    }

    /// Parse a stored preference string. Anything unknown is the current tab.
    pub fn from_str(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Scope::from_str).unwrap_or_default())
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// The two user preferences, as stored by the host's settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Preferences {
    #[serde(rename = "cleanUrlEnabled", deserialize_with = "bool_default_true")]
    pub clean_enabled: bool,
    #[serde(rename = "applyScope")]
    pub scope: Scope,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            clean_enabled: true,
            scope: Scope::CurrentTab,
        }
    }
}

impl Preferences {
    /// Label for the popup's primary button.
    pub fn action_label(&self) -> String {
        let base = if self.clean_enabled { "Copy Clean" } else { "Copy" };
        let suffix = if self.scope == Scope::CurrentTab { "Link" } else { "Links" };
        format!("{base} {suffix}")
    }
}

// Only an explicit `false` disables cleaning; `null` keeps the default.
fn bool_default_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

// =============================================================================
// Tabs
// =============================================================================

/// A browser tab as reported by the host. Read-only for the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
    pub window_id: WindowId,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub highlighted: bool,
}

impl Tab {
    /// Group id, if the tab actually belongs to a group.
    pub fn group(&self) -> Option<GroupId> {
        self.group_id.filter(|&id| id != GROUP_ID_NONE)
    }
}

/// Tab filters the host can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabQuery {
    /// Highlighted tabs in the current window
    HighlightedInCurrentWindow,
    /// Tabs in a group
    Group(GroupId),
    /// Tabs in a window
    Window(WindowId),
    /// Every tab
    All,
}

// =============================================================================
// Context menu
// =============================================================================

/// Click on the context-menu entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuClick {
    pub menu_item_id: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub src_url: Option<String>,
}

impl ContextMenuClick {
    /// Link target first, then the media source.
    pub fn target_url(&self) -> Option<&str> {
        self.link_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.src_url.as_deref().filter(|u| !u.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_wire_names() {
        for scope in Scope::ALL {
            assert_eq!(Scope::from_str(scope.as_str()), scope);
        }
        assert_eq!(Scope::from_str("bogus"), Scope::CurrentTab);
        assert_eq!(Scope::from_str(""), Scope::CurrentTab);
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());

        let prefs: Preferences =
            serde_json::from_str(r#"{"cleanUrlEnabled": null, "applyScope": "nope"}"#).unwrap();
        assert!(prefs.clean_enabled);
        assert_eq!(prefs.scope, Scope::CurrentTab);

        let prefs: Preferences =
            serde_json::from_str(r#"{"cleanUrlEnabled": false, "applyScope": "thisWindow"}"#).unwrap();
        assert!(!prefs.clean_enabled);
        assert_eq!(prefs.scope, Scope::Window);
    }

    #[test]
    fn test_preferences_serialize_keys() {
        let json = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(json["cleanUrlEnabled"], true);
        assert_eq!(json["applyScope"], "thisTab");
    }

    #[test]
    fn test_action_label() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.action_label(), "Copy Clean Link");
        prefs.scope = Scope::AllWindows;
        assert_eq!(prefs.action_label(), "Copy Clean Links");
        prefs.clean_enabled = false;
        assert_eq!(prefs.action_label(), "Copy Links");
    }

    #[test]
    fn test_tab_group_sentinel() {
        let tab: Tab = serde_json::from_str(r#"{"id": 1, "windowId": 2, "groupId": -1}"#).unwrap();
        assert_eq!(tab.group(), None);
        assert!(tab.url.is_none());
        let tab: Tab = serde_json::from_str(r#"{"id": 1, "windowId": 2, "groupId": 7}"#).unwrap();
        assert_eq!(tab.group(), Some(7));
    }

    #[test]
    fn test_context_menu_target() {
        let click = ContextMenuClick {
            menu_item_id: CONTEXT_MENU_ID.to_string(),
            link_url: None,
            src_url: Some("https://cdn.example.com/a.png".to_string()),
        };
        assert_eq!(click.target_url(), Some("https://cdn.example.com/a.png"));
    }
}
