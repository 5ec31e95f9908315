//! WebAssembly bindings for CleanLink
//!
//! The extension's service worker forwards popup messages, the keyboard
//! command and context-menu clicks here; the popup calls the extraction
//! exports directly for its import panel.

mod chrome;

use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use cl_core::types::{
    CONTEXT_MENU_CONTEXTS, CONTEXT_MENU_ID, CONTEXT_MENU_TITLE, IMPORT_GROUP_TITLE,
};
use cl_core::{Background, ContextMenuClick, Preferences, Request, Response, Scope, Tab};
use cl_extract::{extract_urls, import_for_copy};

pub use chrome::ChromeHost;

#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn string_array(values: &[String]) -> Array {
    values.iter().map(|v| JsValue::from_str(v)).collect()
}

fn unit_result(result: cl_core::error::Result<()>) -> Result<JsValue, JsValue> {
    let response = match result {
        Ok(()) => Response::ok(),
        Err(err) => Response::error(&err),
    };
    to_js(&response)
}

/// `{ok: false, error}` for input the host sent in an unexpected shape.
fn invalid_input(message: String) -> Result<JsValue, JsValue> {
    to_js(&Response {
        ok: false,
        urls: None,
        error: Some(message),
    })
}

// =============================================================================
// Pure exports
// =============================================================================

#[wasm_bindgen(js_name = cleanUrl)]
pub fn clean_url(url: &str) -> String {
    cl_core::clean(url)
}

#[wasm_bindgen(js_name = extractUrls)]
pub fn extract_urls_js(text: &str) -> Array {
    string_array(&extract_urls(text))
}

/// Extracted, cleaned and deduplicated URLs, joined one per line.
#[wasm_bindgen(js_name = importForCopy)]
pub fn import_for_copy_js(text: &str) -> String {
    import_for_copy(text).join("\n")
}

#[wasm_bindgen(js_name = actionLabel)]
pub fn action_label(clean_enabled: bool, scope: &str) -> String {
    Preferences {
        clean_enabled,
        scope: Scope::from_str(scope),
    }
    .action_label()
}

#[wasm_bindgen(js_name = importGroupTitle)]
pub fn import_group_title() -> String {
    IMPORT_GROUP_TITLE.to_string()
}

/// `chrome.contextMenus.create` properties for the copy entry.
#[wasm_bindgen(js_name = contextMenuProperties)]
pub fn context_menu_properties() -> JsValue {
    let props = Object::new();
    let _ = Reflect::set(&props, &"id".into(), &JsValue::from_str(CONTEXT_MENU_ID));
    let _ = Reflect::set(&props, &"title".into(), &JsValue::from_str(CONTEXT_MENU_TITLE));
    let contexts: Array = CONTEXT_MENU_CONTEXTS
        .iter()
        .map(|c| JsValue::from_str(c))
        .collect();
    let _ = Reflect::set(&props, &"contexts".into(), &contexts);
    props.into()
}

// =============================================================================
// Background entry points
// =============================================================================

/// Answer a popup message. The promise always resolves to `{ok, urls?, error?}`.
#[wasm_bindgen(js_name = handleMessage)]
pub fn handle_message(message: JsValue) -> Promise {
    future_to_promise(async move {
        let request: Request = match serde_wasm_bindgen::from_value(message) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("unrecognized message: {err}");
                return invalid_input(format!("Unrecognized message: {err}"));
            }
        };
        let host = ChromeHost;
        let background = Background::new(&host, &host, &host);
        let response = background.handle(request).await;
        to_js(&response)
    })
}

#[wasm_bindgen(js_name = onCommand)]
pub fn on_command(command: String) -> Promise {
    future_to_promise(async move {
        let host = ChromeHost;
        let background = Background::new(&host, &host, &host);
        let result = background.on_command(&command).await;
        if let Err(err) = &result {
            log::error!("{command} failed: {err}");
        }
        unit_result(result)
    })
}

#[wasm_bindgen(js_name = onContextMenu)]
pub fn on_context_menu(info: JsValue, tab: JsValue) -> Promise {
    future_to_promise(async move {
        let click: ContextMenuClick = match serde_wasm_bindgen::from_value(info) {
            Ok(click) => click,
            Err(err) => {
                log::warn!("invalid click info: {err}");
                return invalid_input(format!("Invalid click info: {err}"));
            }
        };
        let tab: Option<Tab> = serde_wasm_bindgen::from_value(tab).unwrap_or(None);

        let host = ChromeHost;
        let background = Background::new(&host, &host, &host);
        let result = background.on_context_menu(&click, tab.as_ref()).await;
        if let Err(err) = &result {
            log::error!("context menu copy failed: {err}");
        }
        unit_result(result)
    })
}

/// Stored preferences, with defaults filled in.
#[wasm_bindgen(js_name = getPreferences)]
pub fn get_preferences() -> Promise {
    future_to_promise(async move {
        let host = ChromeHost;
        let prefs = Background::new(&host, &host, &host).preferences().await;
        to_js(&prefs)
    })
}

#[wasm_bindgen(js_name = setCleanEnabled)]
pub fn set_clean_enabled(enabled: bool) -> Promise {
    future_to_promise(async move {
        let host = ChromeHost;
        let result = Background::new(&host, &host, &host)
            .set_clean_enabled(enabled)
            .await
            .map(|_| ());
        unit_result(result)
    })
}

#[wasm_bindgen(js_name = setScope)]
pub fn set_scope(scope: String) -> Promise {
    future_to_promise(async move {
        let host = ChromeHost;
        let result = Background::new(&host, &host, &host)
            .set_scope(Scope::from_str(&scope))
            .await
            .map(|_| ());
        unit_result(result)
    })
}
