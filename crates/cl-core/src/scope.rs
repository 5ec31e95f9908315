//! Scope resolution
//!
//! Turns a `Scope` plus the host's current state into the ordered list of
//! URLs an export action works on.

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::Error;
use crate::host::TabHost;
use crate::types::{Scope, Tab, TabQuery};
use crate::url::{clean, is_web_url};

/// Outcome of resolving a scope. Errors are reported, not raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeResult {
    pub urls: Vec<String>,
    pub error: Option<Error>,
}

impl ScopeResult {
    fn ok(urls: Vec<String>) -> Self {
        Self { urls, error: None }
    }

    fn err(error: Error) -> Self {
        Self {
            urls: Vec::new(),
            error: Some(error),
        }
    }

    pub fn into_result(self) -> Result<Vec<String>, Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.urls),
        }
    }
}

/// Drop repeated entries, keeping the first occurrence of each.
pub fn dedupe<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for url in urls {
        if seen.insert(url.clone()) {
            out.push(url);
        }
    }
    out
}

/// Map, clean, dedupe and keep only web URLs.
pub fn post_process<I>(raw: I, should_clean: bool) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let processed = raw
        .into_iter()
        .map(|url| if should_clean { clean(&url) } else { url });
    dedupe(processed)
        .into_iter()
        .filter(|url| is_web_url(url))
        .collect()
}

/// Resolve `scope` against the host's active tab.
pub async fn resolve_scope<H>(host: &H, scope: Scope, should_clean: bool) -> ScopeResult
where
    H: TabHost + ?Sized,
{
    let active = match host.active_tab().await {
        Ok(Some(tab)) => tab,
        Ok(None) => return ScopeResult::err(Error::NoActiveTab),
        Err(err) => {
            warn!("active tab query failed: {err}");
            return ScopeResult::err(Error::NoActiveTab);
        }
    };

    let raw = match source_urls(host, scope, &active, should_clean).await {
        Ok(Source::Urls(raw)) => raw,
        Ok(Source::Final(urls)) => return ScopeResult::ok(urls),
        Err(err) => return ScopeResult::err(err),
    };

    let urls = post_process(raw, should_clean);
    debug!("scope {} resolved to {} urls", scope.as_str(), urls.len());
    ScopeResult::ok(urls)
}

enum Source {
    /// Raw URLs still to be post-processed
    Urls(Vec<String>),
    /// Already final, skip post-processing
    Final(Vec<String>),
}

async fn source_urls<H>(
    host: &H,
    scope: Scope,
    active: &Tab,
    should_clean: bool,
) -> Result<Source, Error>
where
    H: TabHost + ?Sized,
{
    let query = match scope {
        Scope::CurrentTab => return Ok(Source::Urls(tab_urls(std::slice::from_ref(active)))),
        Scope::PageLinks => {
            return match host.scrape_links(active.id).await {
                Ok(links) => Ok(Source::Urls(links)),
                Err(err) => {
                    warn!("failed to scrape links from tab {}: {err}", active.id);
                    Err(Error::ScrapeDenied)
                }
            };
        }
        Scope::HighlightedTabs => TabQuery::HighlightedInCurrentWindow,
        Scope::TabGroup => match active.group() {
            Some(group_id) => TabQuery::Group(group_id),
            // Ungrouped: the active tab alone, never an empty result.
            None => {
                let urls = active
                    .url
                    .iter()
                    .map(|url| if should_clean { clean(url) } else { url.clone() })
                    .collect();
                return Ok(Source::Final(urls));
            }
        },
        Scope::Window => TabQuery::Window(active.window_id),
        Scope::AllWindows => TabQuery::All,
    };

    let tabs = host.query_tabs(query).await?;
    Ok(Source::Urls(tab_urls(&tabs)))
}

fn tab_urls(tabs: &[Tab]) -> Vec<String> {
    tabs.iter()
        .filter_map(|tab| tab.url.clone())
        .filter(|url| !url.is_empty())
        .collect()
}
