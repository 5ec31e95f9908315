//! In-memory host used by the unit tests.

use std::cell::RefCell;
use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::HostError;
use crate::host::{PageClipboard, PreferenceStore, TabHost};
use crate::sink::ClipboardMechanism;
use crate::types::{GroupId, Preferences, Tab, TabId, TabQuery, WindowId};

const DEFAULT_WINDOW: WindowId = 1;

#[derive(Debug, Clone)]
pub struct FakeGroup {
    pub id: GroupId,
    pub tab_ids: Vec<TabId>,
    pub title: Option<String>,
}

#[derive(Default)]
struct HostState {
    tabs: Vec<Tab>,
    active: Option<usize>,
    page_links: Option<Result<Vec<String>, HostError>>,
    failing_urls: HashSet<String>,
    pending_create: bool,
    created: Vec<(String, bool)>,
    groups: Vec<FakeGroup>,
    next_id: i32,
}

#[derive(Default)]
pub struct FakeHost {
    state: RefCell<HostState>,
}

impl FakeHost {
    pub fn with_active(url: &str) -> Self {
        let host = Self::default();
        host.add_tab(DEFAULT_WINDOW, None, false, Some(url));
        host.state.borrow_mut().active = Some(0);
        host
    }

    pub fn add_tab(
        &self,
        window_id: WindowId,
        group_id: Option<GroupId>,
        highlighted: bool,
        url: Option<&str>,
    ) -> TabId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.tabs.push(Tab {
            id,
            url: url.map(str::to_string),
            window_id,
            group_id,
            highlighted,
        });
        id
    }

    pub fn active(&self) -> Option<Tab> {
        let state = self.state.borrow();
        state.active.map(|idx| state.tabs[idx].clone())
    }

    pub fn active_window(&self) -> WindowId {
        self.active().map(|tab| tab.window_id).unwrap_or(DEFAULT_WINDOW)
    }

    pub fn set_active_highlighted(&self, highlighted: bool) {
        self.with_active_tab(|tab| tab.highlighted = highlighted);
    }

    pub fn set_active_group(&self, group_id: Option<GroupId>) {
        self.with_active_tab(|tab| tab.group_id = group_id);
    }

    pub fn set_page_links(&self, links: Result<Vec<String>, HostError>) {
        self.state.borrow_mut().page_links = Some(links);
    }

    pub fn fail_create_for(&self, url: &str) {
        self.state.borrow_mut().failing_urls.insert(url.to_string());
    }

    /// Created tabs come back without a committed `url`, like a navigation
    /// that has not started yet.
    pub fn create_pending_tabs(&self) {
        self.state.borrow_mut().pending_create = true;
    }

    pub fn groups(&self) -> Vec<FakeGroup> {
        self.state.borrow().groups.clone()
    }

    pub fn created(&self) -> Vec<(String, bool)> {
        self.state.borrow().created.clone()
    }

    fn with_active_tab(&self, f: impl FnOnce(&mut Tab)) {
        let mut state = self.state.borrow_mut();
        if let Some(idx) = state.active {
            f(&mut state.tabs[idx]);
        }
    }
}

#[async_trait(?Send)]
impl TabHost for FakeHost {
    async fn active_tab(&self) -> Result<Option<Tab>, HostError> {
        Ok(self.active())
    }

    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, HostError> {
        let current_window = self.active_window();
        let state = self.state.borrow();
        let tabs = state
            .tabs
            .iter()
            .filter(|tab| match query {
                TabQuery::HighlightedInCurrentWindow => {
                    tab.highlighted && tab.window_id == current_window
                }
                TabQuery::Group(group_id) => tab.group() == Some(group_id),
                TabQuery::Window(window_id) => tab.window_id == window_id,
                TabQuery::All => true,
            })
            .cloned()
            .collect();
        Ok(tabs)
    }

    async fn scrape_links(&self, _tab_id: TabId) -> Result<Vec<String>, HostError> {
        self.state
            .borrow()
            .page_links
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<Tab, HostError> {
        if self.state.borrow().failing_urls.contains(url) {
            return Err(HostError::Failed(format!("cannot open {url}")));
        }
        let window_id = self.active_window();
        let committed = (!self.state.borrow().pending_create).then_some(url);
        let id = self.add_tab(window_id, None, false, committed);
        let mut state = self.state.borrow_mut();
        state.created.push((url.to_string(), active));
        Ok(state.tabs.iter().find(|tab| tab.id == id).cloned().unwrap())
    }

    async fn group_tabs(&self, tab_ids: &[TabId]) -> Result<GroupId, HostError> {
        let mut state = self.state.borrow_mut();
        let id = 100 + state.groups.len() as GroupId;
        for tab in state.tabs.iter_mut().filter(|tab| tab_ids.contains(&tab.id)) {
            tab.group_id = Some(id);
        }
        state.groups.push(FakeGroup {
            id,
            tab_ids: tab_ids.to_vec(),
            title: None,
        });
        Ok(id)
    }

    async fn set_group_title(&self, group_id: GroupId, title: &str) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        let group = state
            .groups
            .iter_mut()
            .find(|group| group.id == group_id)
            .ok_or_else(|| HostError::Failed(format!("no group {group_id}")))?;
        group.title = Some(title.to_string());
        Ok(())
    }
}

/// Clipboard that replays scripted outcomes, one per attempt.
pub struct ScriptedClipboard {
    outcomes: RefCell<Vec<Result<bool, HostError>>>,
    repeat: Option<bool>,
    attempts: RefCell<Vec<ClipboardMechanism>>,
    written: RefCell<Option<String>>,
}

impl ScriptedClipboard {
    pub fn new(outcomes: Vec<Result<bool, HostError>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into_iter().rev().collect()),
            repeat: None,
            attempts: RefCell::new(Vec::new()),
            written: RefCell::new(None),
        }
    }

    pub fn always(success: bool) -> Self {
        Self {
            repeat: Some(success),
            ..Self::new(Vec::new())
        }
    }

    pub fn attempts(&self) -> Vec<ClipboardMechanism> {
        self.attempts.borrow().clone()
    }

    pub fn written(&self) -> Option<String> {
        self.written.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PageClipboard for ScriptedClipboard {
    async fn write_text(
        &self,
        _tab_id: TabId,
        mechanism: ClipboardMechanism,
        text: &str,
    ) -> Result<bool, HostError> {
        self.attempts.borrow_mut().push(mechanism);
        let outcome = self
            .outcomes
            .borrow_mut()
            .pop()
            .unwrap_or(Ok(self.repeat.unwrap_or(false)));
        if let Ok(true) = outcome {
            *self.written.borrow_mut() = Some(text.to_string());
        }
        outcome
    }
}

#[derive(Default)]
pub struct MemoryPrefs {
    prefs: RefCell<Preferences>,
}

impl MemoryPrefs {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs: RefCell::new(prefs),
        }
    }
}

#[async_trait(?Send)]
impl PreferenceStore for MemoryPrefs {
    async fn load(&self) -> Result<Preferences, HostError> {
        Ok(*self.prefs.borrow())
    }

    async fn save(&self, prefs: &Preferences) -> Result<(), HostError> {
        *self.prefs.borrow_mut() = *prefs;
        Ok(())
    }
}
