//! reqwest-backed transport.
//!
//! Follows redirect chains hop by hop and renders each hop's head into the raw
//! buffer, the same shape a header-echoing transfer library produces.

use hyper::ext::ReasonPhrase;
use log::debug;
use reqwest::header::{HeaderMap, REFERER, USER_AGENT};
use reqwest::{Method, StatusCode, Version};
use url::Url;

use super::redirects::{is_redirect, method_after_redirect, next_location, same_origin};
use super::{PreparedRequest, Transport};
use crate::config::Config;
use crate::error_handling::{ClientError, InitializationError};
use crate::initialization::init_client;

/// Production transport over a shared `reqwest::Client`.
///
/// Cookies set by any hop are kept in the client's cookie store and replayed on
/// later hops and later requests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with a client configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`InitializationError::HttpClientError`] if the client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self {
            client: init_client(config)?,
        })
    }

    /// Wraps an existing client. It must not follow redirects on its own,
    /// otherwise intermediate hops are lost.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build_hop(
        &self,
        request: &PreparedRequest,
        method: &Method,
        url: &Url,
        body: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let settings = &request.settings;
        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .header(USER_AGENT, settings.user_agent.as_str());

        if let Some(referer) = &settings.referer {
            builder = builder.header(REFERER, referer.as_str());
        }

        for (name, value) in &request.headers {
            // Body-describing headers go away together with a dropped body
            if body.is_none() && is_body_header(name) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some((username, password)) = &settings.basic_auth {
            if same_origin(&request.url, url) {
                builder = builder.basic_auth(username, password.as_ref());
            } else {
                debug!("Not sending credentials to {url} (different origin)");
            }
        }

        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        builder
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: &PreparedRequest) -> Result<String, ClientError> {
        let settings = &request.settings;
        let mut raw = String::new();
        let mut method = request.method.clone();
        let mut body = request.body.clone();
        let mut current = request.url.clone();
        let mut hops = 0usize;

        loop {
            debug!("{method} {current} (hop {hops})");
            let response = self
                .build_hop(request, &method, &current, body.as_deref())
                .send()
                .await?;

            let status = response.status();
            // hyper only records the phrase when it differs from the canonical one
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
            raw.push_str(&render_head(
                response.version(),
                status,
                reason.as_deref(),
                response.headers(),
            ));

            let next = if settings.follow_redirects && is_redirect(status) {
                next_location(status, response.headers(), &current)
            } else {
                None
            };

            let Some(next) = next else {
                if method != Method::HEAD {
                    raw.push_str(&response.text().await?);
                }
                debug!(
                    "Final response {} from {current} after {hops} redirect(s)",
                    status.as_u16()
                );
                return Ok(raw);
            };

            if hops >= settings.max_redirects {
                return Err(ClientError::TooManyRedirects {
                    limit: settings.max_redirects,
                });
            }
            hops += 1;

            let (next_method, keep_body) = method_after_redirect(status, &method);
            debug!(
                "Following {} redirect from {current} to {next}",
                status.as_u16()
            );
            method = next_method;
            if !keep_body {
                body = None;
            }
            current = next;
        }
    }
}

fn is_body_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("content-length") || name.eq_ignore_ascii_case("content-type")
}

/// Renders a response head: status line, one line per header value, blank line.
///
/// `reason` is the phrase the server sent; the canonical phrase for `status`
/// stands in when it is absent.
pub(crate) fn render_head(
    version: Version,
    status: StatusCode,
    reason: Option<&str>,
    headers: &HeaderMap,
) -> String {
    let mut head = format!("{version:?} {}", status.as_u16());
    if let Some(reason) = reason
        .or(status.canonical_reason())
        .filter(|reason| !reason.is_empty())
    {
        head.push(' ');
        head.push_str(reason);
    }
    head.push_str("\r\n");

    for (name, value) in headers {
        head.push_str(&canonical_header_name(name.as_str()));
        head.push_str(": ");
        head.push_str(&String::from_utf8_lossy(value.as_bytes()));
        head.push_str("\r\n");
    }

    head.push_str("\r\n");
    head
}

/// Restores conventional casing (`content-type` -> `Content-Type`); the HTTP
/// stack hands header names over lowercased.
pub(crate) fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
