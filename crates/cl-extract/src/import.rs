//! Import actions on pasted text

use cl_core::{clean, dedupe};

use crate::extractor::extract_urls;

/// URLs the "Clean & Copy" import action puts on the clipboard: every
/// extracted URL cleaned, then deduplicated.
pub fn import_for_copy(text: &str) -> Vec<String> {
    dedupe(extract_urls(text).iter().map(|url| clean(url)))
}
