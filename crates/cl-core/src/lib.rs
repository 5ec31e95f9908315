//! CleanLink Core Library
//!
//! This crate provides the platform-independent logic behind the CleanLink
//! browser extension: URL cleaning, tab-scope resolution and the final
//! clipboard / tab sinks.
//!
//! # Architecture
//!
//! The core never calls the browser directly. The host platform is injected
//! through the traits in [`host`] (tabs, page clipboard, preference store),
//! so the same logic runs against the Chrome host in `cl-wasm` and against
//! in-memory fakes in tests.
//!
//! # Modules
//!
//! - `url`: Query/fragment stripping and scheme checks
//! - `scope`: Scope resolution, dedupe and post-processing
//! - `sink`: Clipboard strategy chain and tab opening/grouping
//! - `background`: Dispatcher for popup messages, commands and context menus
//! - `message`: Popup <-> background wire types
//! - `host`: Host platform traits
//! - `types`: Shared type definitions
//! - `error`: Error types

pub mod background;
pub mod error;
pub mod host;
pub mod message;
pub mod scope;
pub mod sink;
pub mod types;
pub mod url;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use background::Background;
pub use error::{Error, HostError};
pub use host::{PageClipboard, PreferenceStore, TabHost};
pub use message::{Request, Response};
pub use scope::{dedupe, resolve_scope, ScopeResult};
pub use sink::{open_as_tabs, ClipboardMechanism, ClipboardSink, OpenedTabs};
pub use types::{ContextMenuClick, Preferences, Scope, Tab, TabQuery};
pub use crate::url::clean;
