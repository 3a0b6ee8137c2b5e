//! URL ↔ query parameter synchronization.
//!
//! Both directions are pure. Parsing uses WHATWG URL semantics through the
//! `url` crate; URLs that do not parse as absolute (for example ones that
//! start with a `{{baseUrl}}` reference) fall back to plain text handling.

use crate::models::KeyValueEntry;
use std::collections::HashSet;
use url::form_urlencoded;
use url::Url;

/// Derives the editable query parameter rows from a URL.
///
/// Parameters keep their first-occurrence order and are deduplicated by key
/// (the first value wins). A URL without parameters, or one that fails to
/// parse, yields a single placeholder row.
pub fn derive_params_from_url(url: &str) -> Vec<KeyValueEntry> {
    let Ok(parsed) = Url::parse(url) else {
        return vec![KeyValueEntry::placeholder()];
    };

    let mut seen = HashSet::new();
    let params: Vec<KeyValueEntry> = parsed
        .query_pairs()
        .filter(|(key, _)| seen.insert(key.to_string()))
        .map(|(key, value)| KeyValueEntry::new(key, value))
        .collect();

    if params.is_empty() {
        vec![KeyValueEntry::placeholder()]
    } else {
        params
    }
}

/// Removes the query string from a URL.
///
/// Absolute URLs are re-serialized without their query (fragment kept);
/// anything else is truncated at the first `?`.
pub fn strip_query(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.to_string()
        }
        Err(_) => match url.find('?') {
            Some(pos) => url[..pos].to_string(),
            None => url.to_string(),
        },
    }
}

/// Builds an `application/x-www-form-urlencoded` query from rows with a
/// non-empty key, in order. Returns an empty string if there are none.
pub fn build_query(params: &[KeyValueEntry]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for param in params.iter().filter(|p| !p.key.is_empty()) {
        serializer.append_pair(&param.key, &param.value);
    }
    serializer.finish()
}

/// Replaces the query string of `url` with one built from `params`.
///
/// Rows with an empty key are skipped. If no row remains, the URL is
/// returned without a trailing `?`. A fragment stays after the query.
///
/// # Examples
///
/// ```
/// use rest_workbench::models::KeyValueEntry;
/// use rest_workbench::sync::rebuild_url_from_params;
///
/// let params = vec![KeyValueEntry::new("q", "rust lang"), KeyValueEntry::placeholder()];
/// assert_eq!(
///     rebuild_url_from_params("https://example.com/search?old=1", &params),
///     "https://example.com/search?q=rust+lang"
/// );
/// ```
pub fn rebuild_url_from_params(url: &str, params: &[KeyValueEntry]) -> String {
    let query = build_query(params);

    if let Ok(mut parsed) = Url::parse(url) {
        parsed.set_query((!query.is_empty()).then_some(query.as_str()));
        return parsed.to_string();
    }

    // Plain text: the query goes between the path and any fragment.
    let (rest, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let base = strip_query(rest);
    if query.is_empty() {
        format!("{}{}", base, fragment)
    } else {
        format!("{}?{}{}", base, query, fragment)
    }
}
