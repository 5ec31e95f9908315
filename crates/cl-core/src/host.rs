//! Host platform interfaces
//!
//! The core never talks to the browser directly. Everything it needs (tabs,
//! page-context clipboard access, preference storage) comes through these
//! traits. They are `?Send` because the extension host wraps JS promises.

use async_trait::async_trait;

use crate::error::HostError;
use crate::sink::ClipboardMechanism;
use crate::types::{GroupId, Preferences, Tab, TabId, TabQuery};

/// Tab and window access.
#[async_trait(?Send)]
pub trait TabHost {
    /// Active tab of the current window, if any.
    async fn active_tab(&self) -> Result<Option<Tab>, HostError>;

    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, HostError>;

    /// Hrefs of every anchor in the tab's rendered document.
    /// Returns `HostError::Restricted` if script injection is refused.
    async fn scrape_links(&self, tab_id: TabId) -> Result<Vec<String>, HostError>;

    async fn create_tab(&self, url: &str, active: bool) -> Result<Tab, HostError>;

    async fn group_tabs(&self, tab_ids: &[TabId]) -> Result<GroupId, HostError>;

    async fn set_group_title(&self, group_id: GroupId, title: &str) -> Result<(), HostError>;
}

/// Page-context clipboard access.
#[async_trait(?Send)]
pub trait PageClipboard {
    /// Run one clipboard mechanism inside the tab's page.
    ///
    /// `Ok(false)` means the mechanism ran but did not succeed. An `Err` with
    /// `HostError::Restricted` means no page-context access is possible at all.
    async fn write_text(
        &self,
        tab_id: TabId,
        mechanism: ClipboardMechanism,
        text: &str,
    ) -> Result<bool, HostError>;
}

/// External key-value store holding the preferences.
#[async_trait(?Send)]
pub trait PreferenceStore {
    async fn load(&self) -> Result<Preferences, HostError>;

    async fn save(&self, prefs: &Preferences) -> Result<(), HostError>;
}
