//! URL normalization
//!
//! `clean` keeps scheme, authority and path and drops everything after them.
//! Strict parsing goes through the `url` crate; input it rejects is truncated
//! lexically instead, so the function is total.

use url::Url;

const QUERY_OR_FRAGMENT: &[char] = &['?', '#'];

// =============================================================================
// Scheme Check
// =============================================================================

/// True if the URL starts with `http://` or `https://` (any case).
/// Fast prefix check, no URL parsing.
#[inline]
pub fn is_web_url(url: &str) -> bool {
    let bytes = url.as_bytes();
    (bytes.len() >= 8 && bytes[..8].eq_ignore_ascii_case(b"https://"))
        || (bytes.len() >= 7 && bytes[..7].eq_ignore_ascii_case(b"http://"))
}

// =============================================================================
// Cleaning
// =============================================================================

/// Strip the query string and fragment from a URL.
///
/// Parsed URLs with a tuple origin come back as `origin + path`. Opaque
/// origins (`mailto:`, `file:`, `data:` ...) keep their serialization minus
/// query and fragment. Unparseable input is cut at the first `?` or `#`,
/// and the cut is normalized again if it parses on its own.
pub fn clean(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => clean_parsed(parsed),
        Err(_) => {
            let cut = truncate_query_and_fragment(url);
            match Url::parse(cut) {
                Ok(parsed) => clean_parsed(parsed),
                Err(_) => cut.to_string(),
            }
        }
    }
}

fn clean_parsed(mut parsed: Url) -> String {
    let origin = parsed.origin();
    if origin.is_tuple() {
        let mut out = origin.ascii_serialization();
        out.push_str(parsed.path());
        return out;
    }
    parsed.set_query(None);
    parsed.set_fragment(None);
    parsed.into()
}

/// Lexical fallback: everything before the first `?` or `#`.
#[inline]
pub fn truncate_query_and_fragment(url: &str) -> &str {
    match url.find(QUERY_OR_FRAGMENT) {
        Some(pos) => &url[..pos],
        None => url,
    }
}
