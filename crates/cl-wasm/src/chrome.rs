//! Chrome extension host
//!
//! Implements the core host traits on top of `chrome.tabs`,
//! `chrome.tabGroups`, `chrome.scripting` and `chrome.storage.sync`.

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use cl_core::host::{PageClipboard, PreferenceStore, TabHost};
use cl_core::types::{GroupId, Preferences, Tab, TabId, TabQuery};
use cl_core::{ClipboardMechanism, HostError};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = create)]
    fn tabs_create(props: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = group)]
    fn tabs_group(options: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabGroups"], js_name = update)]
    fn tab_groups_update(group_id: i32, props: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "scripting"], js_name = executeScript)]
    fn execute_script(injection: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = get)]
    fn storage_get(keys: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = set)]
    fn storage_set(items: &JsValue) -> Result<Promise, JsValue>;
}

// =============================================================================
// Injected page functions
// =============================================================================

#[wasm_bindgen(module = "/js/page.js")]
extern "C" {
    #[wasm_bindgen(js_name = scrapeLinksFunction)]
    fn scrape_links_function() -> Function;

    #[wasm_bindgen(js_name = structuredWriteFunction)]
    fn structured_write_function() -> Function;

    #[wasm_bindgen(js_name = plainWriteFunction)]
    fn plain_write_function() -> Function;

    #[wasm_bindgen(js_name = selectionCopyFunction)]
    fn selection_copy_function() -> Function;
}

fn mechanism_function(mechanism: ClipboardMechanism) -> Function {
    match mechanism {
        ClipboardMechanism::StructuredWrite => structured_write_function(),
        ClipboardMechanism::PlainWrite => plain_write_function(),
        ClipboardMechanism::SelectionCopy => selection_copy_function(),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn set(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &key.into(), value);
}

fn js_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    Reflect::get(err, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| "Unknown host error".to_string())
}

fn failed(err: JsValue) -> HostError {
    HostError::Failed(js_message(&err))
}

fn restricted(err: JsValue) -> HostError {
    HostError::Restricted(js_message(&err))
}

async fn call(promise: Result<Promise, JsValue>) -> Result<JsValue, HostError> {
    let promise = promise.map_err(failed)?;
    JsFuture::from(promise).await.map_err(failed)
}

fn decode<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError::Failed(e.to_string()))
}

fn query_object(query: TabQuery) -> Object {
    let obj = Object::new();
    match query {
        TabQuery::HighlightedInCurrentWindow => {
            set(&obj, "highlighted", &JsValue::TRUE);
            set(&obj, "currentWindow", &JsValue::TRUE);
        }
        TabQuery::Group(group_id) => set(&obj, "groupId", &JsValue::from(group_id)),
        TabQuery::Window(window_id) => set(&obj, "windowId", &JsValue::from(window_id)),
        TabQuery::All => {}
    }
    obj
}

/// Run `func` in the tab and return the first frame's result.
/// A refused injection is `HostError::Restricted`.
async fn inject(tab_id: TabId, func: &Function, text: Option<&str>) -> Result<JsValue, HostError> {
    let target = Object::new();
    set(&target, "tabId", &JsValue::from(tab_id));

    let injection = Object::new();
    set(&injection, "target", &target);
    set(&injection, "func", func);
    if let Some(text) = text {
        let args = Array::of1(&JsValue::from_str(text));
        set(&injection, "args", &args);
    }

    let promise = execute_script(&injection).map_err(restricted)?;
    let results = JsFuture::from(promise).await.map_err(restricted)?;

    let first = Array::from(&results).get(0);
    if first.is_undefined() {
        return Ok(JsValue::UNDEFINED);
    }
    Reflect::get(&first, &"result".into()).map_err(failed)
}

// =============================================================================
// Host
// =============================================================================

/// Host backed by the extension APIs of the running browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeHost;

#[async_trait(?Send)]
impl TabHost for ChromeHost {
    async fn active_tab(&self) -> Result<Option<Tab>, HostError> {
        let obj = Object::new();
        set(&obj, "active", &JsValue::TRUE);
        set(&obj, "currentWindow", &JsValue::TRUE);
        let tabs: Vec<Tab> = decode(call(tabs_query(&obj)).await?)?;
        Ok(tabs.into_iter().next())
    }

    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, HostError> {
        decode(call(tabs_query(&query_object(query))).await?)
    }

    async fn scrape_links(&self, tab_id: TabId) -> Result<Vec<String>, HostError> {
        let result = inject(tab_id, &scrape_links_function(), None).await?;
        if result.is_undefined() || result.is_null() {
            return Ok(Vec::new());
        }
        decode(result)
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<Tab, HostError> {
        let props = Object::new();
        set(&props, "url", &JsValue::from_str(url));
        set(&props, "active", &JsValue::from_bool(active));
        decode(call(tabs_create(&props)).await?)
    }

    async fn group_tabs(&self, tab_ids: &[TabId]) -> Result<GroupId, HostError> {
        let ids = Array::new();
        for &id in tab_ids {
            ids.push(&JsValue::from(id));
        }
        let options = Object::new();
        set(&options, "tabIds", &ids);
        let group = call(tabs_group(&options)).await?;
        group
            .as_f64()
            .map(|id| id as GroupId)
            .ok_or_else(|| HostError::Failed("tabs.group returned no id".to_string()))
    }

    async fn set_group_title(&self, group_id: GroupId, title: &str) -> Result<(), HostError> {
        let props = Object::new();
        set(&props, "title", &JsValue::from_str(title));
        call(tab_groups_update(group_id, &props)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl PageClipboard for ChromeHost {
    async fn write_text(
        &self,
        tab_id: TabId,
        mechanism: ClipboardMechanism,
        text: &str,
    ) -> Result<bool, HostError> {
        let result = inject(tab_id, &mechanism_function(mechanism), Some(text)).await?;
        Ok(result.as_bool().unwrap_or(false))
    }
}

#[async_trait(?Send)]
impl PreferenceStore for ChromeHost {
    async fn load(&self) -> Result<Preferences, HostError> {
        let keys = Array::of2(&"cleanUrlEnabled".into(), &"applyScope".into());
        decode(call(storage_get(&keys)).await?)
    }

    async fn save(&self, prefs: &Preferences) -> Result<(), HostError> {
        let items = Object::new();
        set(&items, "cleanUrlEnabled", &JsValue::from_bool(prefs.clean_enabled));
        set(&items, "applyScope", &JsValue::from_str(prefs.scope.as_str()));
        call(storage_set(&items)).await?;
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn page_functions_are_module_functions() {
        let scrape = scrape_links_function();
        assert_eq!(String::from(scrape.name()), "scrapeLinks");
        assert_eq!(scrape.length(), 0);

        for mechanism in [
            ClipboardMechanism::StructuredWrite,
            ClipboardMechanism::PlainWrite,
            ClipboardMechanism::SelectionCopy,
        ] {
            assert_eq!(mechanism_function(mechanism).length(), 1);
        }
        assert_eq!(
            String::from(mechanism_function(ClipboardMechanism::SelectionCopy).name()),
            "selectionCopy"
        );
    }
}
