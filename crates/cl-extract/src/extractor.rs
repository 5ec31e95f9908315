//! Free-text URL extraction
//!
//! Three tiers, most explicit first:
//!
//! 1. `http://` / `https://` tokens
//! 2. `www.`-prefixed hosts
//! 3. bare dotted domains (`example.com/path`)
//!
//! Later tiers skip anything an earlier candidate already contains, and every
//! candidate must parse as an absolute URL to be kept.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use url::Url;

use cl_core::dedupe;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://").expect("scheme pattern"));

static HTTP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s"'<>]+"#).expect("http pattern"));

static WWW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|[\s,;])(www\.[a-zA-Z0-9][-a-zA-Z0-9.]*\.[a-zA-Z]{2,}[^\s"'<>]*)"#)
        .expect("www pattern")
});

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s,;])((?:[a-zA-Z0-9][-a-zA-Z0-9]*\.)+[a-zA-Z]{2,}(?:/[^\s"'<>]*)?)"#)
        .expect("domain pattern")
});

static TLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[a-zA-Z]{2,}").expect("tld pattern"));

/// Characters dropped from the end of a candidate.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '>'];

/// Extract candidate URLs from pasted text.
///
/// Output keeps discovery order, has no duplicates, and every entry parses
/// as an absolute URL. Scheme-less matches get an `https://` prefix.
pub fn extract_urls(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let repaired = repair_boundaries(text);
    let mut candidates = scheme_matches(&repaired);
    let explicit = candidates.len();

    for token in www_matches(&repaired) {
        if !is_covered(&candidates, &token) {
            candidates.push(format!("https://{token}"));
        }
    }
    let with_www = candidates.len();

    for token in domain_matches(&repaired) {
        if !is_covered(&candidates, &token) {
            candidates.push(format!("https://{token}"));
        }
    }

    debug!(
        "extracted {} explicit, {} www, {} bare candidates",
        explicit,
        with_www - explicit,
        candidates.len() - with_www
    );

    let valid = candidates
        .into_iter()
        .filter(|candidate| Url::parse(candidate).is_ok());
    dedupe(valid)
}

/// Put a space in front of every scheme token glued to preceding text.
///
/// `"searchhttps://a.com"` becomes `"search https://a.com"`.
pub fn repair_boundaries(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for m in SCHEME_RE.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        if !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Strip trailing punctuation such as a sentence-ending period.
pub fn strip_trailing_punctuation(token: &str) -> &str {
    token.trim_end_matches(TRAILING_PUNCTUATION)
}

fn scheme_matches(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for m in HTTP_RE.find_iter(text) {
        let token = strip_trailing_punctuation(m.as_str());
        out.extend(split_embedded_schemes(token));
    }
    out
}

/// Split a token holding several glued URLs into one URL per scheme.
/// A scheme with nothing after it is dropped.
fn split_embedded_schemes(token: &str) -> Vec<String> {
    let starts: Vec<usize> = SCHEME_RE.find_iter(token).map(|m| m.start()).collect();
    let mut out = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(token.len());
        let piece = &token[start..end];
        if SCHEME_RE.find(piece).is_some_and(|m| m.end() < piece.len()) {
            out.push(piece.to_string());
        }
    }
    out
}

fn www_matches(text: &str) -> Vec<String> {
    WWW_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| strip_trailing_punctuation(m.as_str().trim()).to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn domain_matches(text: &str) -> Vec<String> {
    DOMAIN_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| strip_trailing_punctuation(m.as_str().trim()).to_string())
        .filter(|token| looks_like_bare_domain(token))
        .collect()
}

fn looks_like_bare_domain(token: &str) -> bool {
    if token.starts_with("http") || token.starts_with("www.") {
        return false;
    }
    token.contains('.') && TLD_RE.is_match(token)
}

fn is_covered(candidates: &[String], token: &str) -> bool {
    candidates.iter().any(|candidate| candidate.contains(token))
}
