//! Redirect hop decisions.
//!
//! The client never redirects on its own; the transport follows each hop here so
//! that every intermediate response head ends up in the raw buffer.

use log::warn;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::config::REDIRECT_STATUS_CODES;

/// Returns `true` for the status codes that are followed.
pub(crate) fn is_redirect(status: StatusCode) -> bool {
    REDIRECT_STATUS_CODES.contains(&status.as_u16())
}

/// Resolves the `Location` header of a redirect response against `current`.
///
/// Returns `None` (and logs) when the header is missing or unusable; the
/// response is then treated as final.
pub(crate) fn next_location(status: StatusCode, headers: &HeaderMap, current: &Url) -> Option<Url> {
    let Some(location) = headers.get(LOCATION) else {
        warn!(
            "Redirect status {} for {} but no Location header",
            status.as_u16(),
            current
        );
        return None;
    };

    let location = match location.to_str() {
        Ok(location) => location,
        Err(_) => {
            warn!("Non-ASCII Location header from {current}, not following");
            return None;
        }
    };

    // Absolute locations parse on their own, relative ones join the current URL
    match current.join(location) {
        Ok(next) => Some(next),
        Err(e) => {
            warn!("Unusable Location `{location}` from {current}: {e}");
            None
        }
    }
}

/// Method and body handling for the next hop.
///
/// `303` always switches to `GET` (except for `HEAD`), `301`/`302` switch
/// non-`GET`/`HEAD` requests to `GET`, and `307`/`308` replay the request
/// unchanged. Returns the next method and whether the body is kept.
pub(crate) fn method_after_redirect(status: StatusCode, method: &Method) -> (Method, bool) {
    let switch_to_get = match status.as_u16() {
        303 => *method != Method::HEAD,
        301 | 302 => *method != Method::GET && *method != Method::HEAD,
        _ => false,
    };

    if switch_to_get {
        (Method::GET, false)
    } else {
        (method.clone(), true)
    }
}

/// Returns `true` if `next` is on the same scheme, host and port as `origin`.
///
/// Credentials are only replayed to the origin the caller addressed.
pub(crate) fn same_origin(origin: &Url, next: &Url) -> bool {
    origin.scheme() == next.scheme()
        && origin.host_str() == next.host_str()
        && origin.port_or_known_default() == next.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_is_redirect() {
        for code in [301u16, 302, 303, 307, 308] {
            assert!(is_redirect(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [200u16, 304, 305, 400, 500] {
            assert!(!is_redirect(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[test]
    fn test_next_location_relative_and_absolute() {
        let current = url("http://example.com/a/b");
        let mut headers = HeaderMap::new();

        headers.insert(LOCATION, HeaderValue::from_static("/c"));
        assert_eq!(
            next_location(StatusCode::FOUND, &headers, &current),
            Some(url("http://example.com/c"))
        );

        headers.insert(LOCATION, HeaderValue::from_static("d"));
        assert_eq!(
            next_location(StatusCode::FOUND, &headers, &current),
            Some(url("http://example.com/a/d"))
        );

        headers.insert(LOCATION, HeaderValue::from_static("https://other.org/"));
        assert_eq!(
            next_location(StatusCode::FOUND, &headers, &current),
            Some(url("https://other.org/"))
        );
    }

    #[test]
    fn test_next_location_missing_header() {
        let current = url("http://example.com/");
        assert_eq!(
            next_location(StatusCode::MOVED_PERMANENTLY, &HeaderMap::new(), &current),
            None
        );
    }

    #[test]
    fn test_method_after_redirect() {
        assert_eq!(
            method_after_redirect(StatusCode::SEE_OTHER, &Method::POST),
            (Method::GET, false)
        );
        assert_eq!(
            method_after_redirect(StatusCode::SEE_OTHER, &Method::HEAD),
            (Method::HEAD, true)
        );
        assert_eq!(
            method_after_redirect(StatusCode::FOUND, &Method::PUT),
            (Method::GET, false)
        );
        assert_eq!(
            method_after_redirect(StatusCode::MOVED_PERMANENTLY, &Method::GET),
            (Method::GET, true)
        );
        assert_eq!(
            method_after_redirect(StatusCode::TEMPORARY_REDIRECT, &Method::POST),
            (Method::POST, true)
        );
        assert_eq!(
            method_after_redirect(StatusCode::PERMANENT_REDIRECT, &Method::DELETE),
            (Method::DELETE, true)
        );
    }

    #[test]
    fn test_same_origin() {
        let origin = url("http://example.com/login");
        assert!(same_origin(&origin, &url("http://example.com:80/home")));
        assert!(!same_origin(&origin, &url("https://example.com/home")));
        assert!(!same_origin(&origin, &url("http://evil.com/")));
        assert!(!same_origin(&origin, &url("http://example.com:8080/")));
    }
}
