//! URL helpers shared by the target reader and the resolver.

use url::Url;

/// Check if a string is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// Resolve `reference` against `base` the way a browser resolves an href.
///
/// Absolute references come back unchanged (modulo URL normalization),
/// relative ones are joined onto the base.
///
/// # Errors
///
/// Returns an error if the base is not a valid URL or the join fails.
pub fn join_url(base: &str, reference: &str) -> Result<String, url::ParseError> {
    let base = Url::parse(base)?;
    Ok(base.join(reference)?.to_string())
}
