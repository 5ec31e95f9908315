//! Popup <-> background message contract

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::Error;

/// Request sent by the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Request {
    /// Resolve the stored scope and return the URLs without copying
    GetUrlsForPreview,
    /// Resolve the stored scope and copy the URLs
    CopyCleanLink,
    /// Open URLs as background tabs
    OpenUrlsInNewTabs {
        #[serde(default)]
        urls: Vec<String>,
        #[serde(default, rename = "openInNewGroup")]
        open_in_new_group: bool,
    },
    /// Clean, dedupe and copy the given URLs
    CleanAndCopyUrls {
        #[serde(default)]
        urls: Vec<String>,
    },
}

/// Response to every `Request`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    pub fn with_urls(urls: Vec<String>) -> Self {
        Self {
            ok: true,
            urls: Some(urls),
            error: None,
        }
    }

    pub fn error(err: &Error) -> Self {
        Self {
            ok: false,
            urls: None,
            error: Some(err.to_string()),
        }
    }
}

impl From<Result<Vec<String>, Error>> for Response {
    fn from(result: Result<Vec<String>, Error>) -> Self {
        match result {
            Ok(urls) => Response::with_urls(urls),
            Err(err) => Response::error(&err),
        }
    }
}
