//! CleanLink URL Extractor
//!
//! This crate pulls candidate URLs out of free-form pasted text for the
//! extension's import panel.

pub mod extractor;
pub mod import;

pub use extractor::{extract_urls, repair_boundaries, strip_trailing_punctuation};
pub use import::import_for_copy;
