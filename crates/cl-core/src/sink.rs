//! Clipboard and tab sinks
//!
//! Final stage of every action: put text on the clipboard, or open URLs as
//! background tabs.

use log::{debug, warn};

use crate::error::{Error, HostError, Result};
use crate::host::{PageClipboard, TabHost};
use crate::types::{GroupId, Tab, TabId};

// =============================================================================
// Clipboard
// =============================================================================

/// One way of writing plain text to the clipboard from a page context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardMechanism {
    /// `navigator.clipboard.write` with an explicit `text/plain` item
    StructuredWrite,
    /// `navigator.clipboard.writeText`
    PlainWrite,
    /// Hidden `white-space: pre` textarea, select, `execCommand("copy")`
    SelectionCopy,
}

impl ClipboardMechanism {
    pub fn name(self) -> &'static str {
        match self {
            ClipboardMechanism::StructuredWrite => "structured-write",
            ClipboardMechanism::PlainWrite => "plain-write",
            ClipboardMechanism::SelectionCopy => "selection-copy",
        }
    }
}

/// Ordered clipboard strategies; the first one that succeeds wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSink {
    strategies: Vec<ClipboardMechanism>,
}

impl Default for ClipboardSink {
    fn default() -> Self {
        Self::new(vec![
            ClipboardMechanism::StructuredWrite,
            ClipboardMechanism::PlainWrite,
            ClipboardMechanism::SelectionCopy,
        ])
    }
}

impl ClipboardSink {
    pub fn new(strategies: Vec<ClipboardMechanism>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[ClipboardMechanism] {
        &self.strategies
    }

    /// Write `text` to the clipboard through `tab_id`'s page.
    ///
    /// A restricted page stops the chain immediately with `CopyDenied`.
    pub async fn copy_text<C>(
        &self,
        clipboard: &C,
        tab_id: TabId,
        text: &str,
    ) -> Result<ClipboardMechanism>
    where
        C: PageClipboard + ?Sized,
    {
        for &mechanism in &self.strategies {
            match clipboard.write_text(tab_id, mechanism, text).await {
                Ok(true) => {
                    debug!("copied {} bytes via {}", text.len(), mechanism.name());
                    return Ok(mechanism);
                }
                Ok(false) => {
                    debug!("clipboard strategy {} unavailable", mechanism.name());
                }
                Err(HostError::Restricted(reason)) => {
                    warn!("clipboard access refused for tab {tab_id}: {reason}");
                    return Err(Error::CopyDenied);
                }
                Err(HostError::Failed(reason)) => {
                    warn!("clipboard strategy {} failed: {reason}", mechanism.name());
                }
            }
        }
        Err(Error::CopyFailed)
    }
}

/// Join URLs one per line, no trailing newline.
pub fn join_lines(urls: &[String]) -> String {
    urls.join("\n")
}

// =============================================================================
// Tabs
// =============================================================================

/// Result of opening a batch of URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedTabs {
    /// Created tabs, in input order
    pub tabs: Vec<Tab>,
    /// Requested URL of each created tab. A fresh tab's own `url` is often
    /// still empty while its navigation is pending.
    pub urls: Vec<String>,
    /// URLs whose tab could not be created
    pub failed: Vec<String>,
    /// Group holding the created tabs, if one was requested and made
    pub group: Option<GroupId>,
}

/// Open each URL as a new tab and optionally collect them into a titled group.
///
/// Individual failures are tolerated. Only zero created tabs is an error.
pub async fn open_as_tabs<H>(
    host: &H,
    urls: &[String],
    active: bool,
    group_title: Option<&str>,
) -> Result<OpenedTabs>
where
    H: TabHost + ?Sized,
{
    let mut opened = OpenedTabs::default();

    for url in urls {
        match host.create_tab(url, active).await {
            Ok(tab) => {
                opened.tabs.push(tab);
                opened.urls.push(url.clone());
            }
            Err(err) => {
                warn!("failed to open {url}: {err}");
                opened.failed.push(url.clone());
            }
        }
    }

    if opened.tabs.is_empty() {
        return Err(Error::NoTabsOpened);
    }

    if let Some(title) = group_title {
        let tab_ids: Vec<TabId> = opened.tabs.iter().map(|tab| tab.id).collect();
        opened.group = group_with_title(host, &tab_ids, title).await;
    }

    debug!(
        "opened {} of {} urls ({} failed)",
        opened.tabs.len(),
        urls.len(),
        opened.failed.len()
    );
    Ok(opened)
}

async fn group_with_title<H>(host: &H, tab_ids: &[TabId], title: &str) -> Option<GroupId>
where
    H: TabHost + ?Sized,
{
    let group_id = match host.group_tabs(tab_ids).await {
        Ok(id) => id,
        Err(err) => {
            warn!("failed to create tab group: {err}");
            return None;
        }
    };
    if let Err(err) = host.set_group_title(group_id, title).await {
        warn!("failed to title group {group_id}: {err}");
    }
    Some(group_id)
}
