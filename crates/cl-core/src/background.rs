//! Background dispatcher
//!
//! Entry points for every trigger: popup messages, the keyboard command and
//! the context-menu entry. Preferences are read fresh on every call.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::host::{PageClipboard, PreferenceStore, TabHost};
use crate::message::{Request, Response};
use crate::scope::{dedupe, resolve_scope};
use crate::sink::{join_lines, open_as_tabs, ClipboardSink};
use crate::types::{
    ContextMenuClick, Preferences, Scope, Tab, CONTEXT_MENU_ID, COPY_COMMAND, IMPORT_GROUP_TITLE,
};
use crate::url::clean;

/// Background logic wired to a host.
pub struct Background<'a> {
    tabs: &'a dyn TabHost,
    clipboard: &'a dyn PageClipboard,
    prefs: &'a dyn PreferenceStore,
    sink: ClipboardSink,
}

impl<'a> Background<'a> {
    pub fn new(
        tabs: &'a dyn TabHost,
        clipboard: &'a dyn PageClipboard,
        prefs: &'a dyn PreferenceStore,
    ) -> Self {
        Self {
            tabs,
            clipboard,
            prefs,
            sink: ClipboardSink::default(),
        }
    }

    pub fn with_sink(mut self, sink: ClipboardSink) -> Self {
        self.sink = sink;
        self
    }

    /// Answer a popup message. Always produces a response.
    pub async fn handle(&self, request: Request) -> Response {
        debug!("handling {request:?}");
        match request {
            Request::GetUrlsForPreview => self.preview().await.into(),
            Request::CopyCleanLink => self.copy_scope().await.into(),
            Request::OpenUrlsInNewTabs {
                urls,
                open_in_new_group,
            } => self.open_urls(&urls, open_in_new_group).await.into(),
            Request::CleanAndCopyUrls { urls } => self.clean_and_copy(&urls).await.into(),
        }
    }

    /// Keyboard shortcut handler.
    pub async fn on_command(&self, command: &str) -> Result<()> {
        if command != COPY_COMMAND {
            debug!("ignoring command {command}");
            return Ok(());
        }
        self.copy_scope().await.map(|_| ())
    }

    /// Context-menu handler: copy the cleaned link or media URL.
    pub async fn on_context_menu(&self, click: &ContextMenuClick, tab: Option<&Tab>) -> Result<()> {
        if click.menu_item_id != CONTEXT_MENU_ID {
            return Ok(());
        }
        let Some(target) = click.target_url() else {
            return Ok(());
        };
        let tab = tab.ok_or(Error::NoActiveTab)?;
        let cleaned = clean(target);
        self.sink.copy_text(self.clipboard, tab.id, &cleaned).await?;
        Ok(())
    }

    pub async fn preferences(&self) -> Preferences {
        match self.prefs.load().await {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!("failed to load preferences, using defaults: {err}");
                Preferences::default()
            }
        }
    }

    pub async fn set_clean_enabled(&self, enabled: bool) -> Result<Preferences> {
        let mut prefs = self.preferences().await;
        prefs.clean_enabled = enabled;
        self.prefs.save(&prefs).await?;
        Ok(prefs)
    }

    pub async fn set_scope(&self, scope: Scope) -> Result<Preferences> {
        let mut prefs = self.preferences().await;
        prefs.scope = scope;
        self.prefs.save(&prefs).await?;
        Ok(prefs)
    }

    async fn preview(&self) -> Result<Vec<String>> {
        let prefs = self.preferences().await;
        resolve_scope(self.tabs, prefs.scope, prefs.clean_enabled)
            .await
            .into_result()
    }

    async fn copy_scope(&self) -> Result<Vec<String>> {
        let urls = self.preview().await?;
        if urls.is_empty() {
            return Err(Error::NoUrlsToCopy);
        }
        self.copy_to_active_tab(&urls).await?;
        Ok(urls)
    }

    async fn open_urls(&self, urls: &[String], open_in_new_group: bool) -> Result<Vec<String>> {
        if urls.is_empty() {
            return Err(Error::NoUrlsProvided);
        }
        let title = open_in_new_group.then_some(IMPORT_GROUP_TITLE);
        let opened = open_as_tabs(self.tabs, urls, false, title).await?;
        Ok(opened.urls)
    }

    async fn clean_and_copy(&self, urls: &[String]) -> Result<Vec<String>> {
        if urls.is_empty() {
            return Err(Error::NoUrlsProvided);
        }
        let cleaned: Vec<String> = dedupe(urls.iter().map(|url| clean(url)))
            .into_iter()
            .filter(|url| !url.is_empty())
            .collect();
        if cleaned.is_empty() {
            return Err(Error::NoValidUrls);
        }
        self.copy_to_active_tab(&cleaned).await?;
        Ok(cleaned)
    }

    async fn copy_to_active_tab(&self, urls: &[String]) -> Result<()> {
        let tab = self.tabs.active_tab().await?.ok_or(Error::NoActiveTab)?;
        self.sink
            .copy_text(self.clipboard, tab.id, &join_lines(urls))
            .await?;
        Ok(())
    }
}
