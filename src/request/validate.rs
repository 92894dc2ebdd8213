//! URL validation.

use url::Url;

use crate::error_handling::ClientError;

/// Validates that `url` is an absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// Returns [`ClientError::InvalidArgument`] naming the offending URL.
pub(crate) fn validate_url(url: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| {
        ClientError::InvalidArgument(format!("{url} is not a valid URL: {reason}"))
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(format!("unsupported scheme '{scheme}'"))),
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(parsed)
}

/// Appends an encoded query to `url`, joining with `?` or `&` as needed. A
/// fragment stays at the end.
pub(crate) fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    let mut joined = format!("{base}{separator}{query}");
    if let Some(fragment) = fragment {
        joined.push('#');
        joined.push_str(fragment);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://fakesite.dk").is_ok());
        assert!(validate_url("https://example.com/path?q=1").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_malformed() {
        for url in ["invalidurl::dk", "", "not a url", "/relative/path"] {
            assert!(
                matches!(validate_url(url), Err(ClientError::InvalidArgument(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        let err = validate_url("ftp://example.com/file").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
        assert!(validate_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_append_query() {
        assert_eq!(append_query("http://x/", "a=1"), "http://x/?a=1");
        assert_eq!(append_query("http://x/?a=1", "b=2"), "http://x/?a=1&b=2");
        assert_eq!(append_query("http://x/", ""), "http://x/");
    }

    #[test]
    fn test_append_query_keeps_fragment_last() {
        assert_eq!(append_query("http://x/#f", "a=1"), "http://x/?a=1#f");
        assert_eq!(append_query("http://x/?b=2#top", "a=1"), "http://x/?b=2&a=1#top");
        assert_eq!(append_query("http://x/#f?not-a-query", "a=1"), "http://x/?a=1#f?not-a-query");
    }
}
