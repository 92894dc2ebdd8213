//! Configuration constants.
//!
//! Defaults for the HTTP client and request issuer.

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag or
/// [`RequestOption::UserAgent`](crate::RequestOption::UserAgent).
pub const DEFAULT_USER_AGENT: &str = concat!("httpchain/", env!("CARGO_PKG_VERSION"), " reqwest");

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Status codes that are followed when they carry a `Location` header.
pub const REDIRECT_STATUS_CODES: &[u16] = &[301, 302, 303, 307, 308];

// Request body content types
/// Content type set for raw bodies that are a JSON object or array
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type set for form-encoded bodies
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Prefix accepted (and ignored) in front of textual option names.
pub const OPTION_NAME_PREFIX: &str = "CURLOPT_";
