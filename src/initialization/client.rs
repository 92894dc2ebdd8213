//! HTTP client initialization.
//!
//! The transport follows redirects itself so it can record every hop, so the
//! underlying client never redirects on its own.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used by [`ReqwestTransport`](crate::ReqwestTransport).
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Request timeout from the config
/// - Redirect following disabled (hops are followed and recorded manually)
/// - An in-process cookie store shared by every request made with the client
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()
}
