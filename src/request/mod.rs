//! Request issuing.
//!
//! [`Request`] collects per-request state (headers, data, options), validates
//! the URL, hands a [`PreparedRequest`] to its [`Transport`] and parses whatever
//! comes back into a [`Response`]. Per-request state resets after every call,
//! so one `Request` can issue many independent requests.

mod data;
mod options;
mod validate;

use log::debug;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;

use crate::config::Config;
use crate::error_handling::{ClientError, InitializationError};
use crate::response::Response;
use crate::transport::{PreparedRequest, ReqwestTransport, Transport};

pub use data::RequestData;
pub use options::{RequestOption, TransferSettings};

use validate::{append_query, validate_url};

/// HTTP request issuer.
///
/// # Examples
///
/// ```no_run
/// use httpchain::{Config, Request};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut request = Request::new(&Config::default())?;
/// request.set_header("Accept", "text/html");
///
/// let response = request.get("https://example.com/", [("q", "rust")]).await?;
/// println!("{} after {} redirect(s)", response.code(), response.count_redirects());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Request<T = ReqwestTransport> {
    transport: T,
    defaults: TransferSettings,
    settings: TransferSettings,
    headers: Vec<(String, String)>,
}

impl Request<ReqwestTransport> {
    /// Creates an issuer backed by a reqwest client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`InitializationError::HttpClientError`] if the client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self::with_transport(config, ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> Request<T> {
    /// Creates an issuer over any transport.
    pub fn with_transport(config: &Config, transport: T) -> Self {
        let defaults = TransferSettings::from_config(config);
        Self {
            transport,
            settings: defaults.clone(),
            defaults,
            headers: Vec::new(),
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Settings that the next request will use.
    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    /// Headers that the next request will send.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Sends a `GET`, appending `query` to the URL.
    pub async fn get(
        &mut self,
        url: &str,
        query: impl Into<RequestData>,
    ) -> Result<Response, ClientError> {
        let query: RequestData = query.into();
        let url = append_query(url, &query.to_query());
        self.request("GET", &url, RequestData::Empty).await
    }

    /// Sends a `POST` with `data` as the body.
    pub async fn post(
        &mut self,
        url: &str,
        data: impl Into<RequestData>,
    ) -> Result<Response, ClientError> {
        self.request("POST", url, data).await
    }

    /// Sends a `PUT` with `data` as the body.
    pub async fn put(
        &mut self,
        url: &str,
        data: impl Into<RequestData>,
    ) -> Result<Response, ClientError> {
        self.request("PUT", url, data).await
    }

    /// Sends a `HEAD`; the response has headers but no body.
    pub async fn head(
        &mut self,
        url: &str,
        data: impl Into<RequestData>,
    ) -> Result<Response, ClientError> {
        self.request("HEAD", url, data).await
    }

    /// Sends a `DELETE` with `data` as the body.
    pub async fn delete(
        &mut self,
        url: &str,
        data: impl Into<RequestData>,
    ) -> Result<Response, ClientError> {
        self.request("DELETE", url, data).await
    }

    /// Sends a request with any method token (uppercased before sending).
    ///
    /// Per-request headers and options reset to their defaults afterwards,
    /// whether or not the request succeeded.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidArgument`] for an invalid method, URL or header;
    ///   the transport is not called in that case
    /// - whatever the transport reports
    pub async fn request(
        &mut self,
        method: &str,
        url: &str,
        data: impl Into<RequestData>,
    ) -> Result<Response, ClientError> {
        let result = self.dispatch(method, url, data.into()).await;
        self.reset();
        result
    }

    async fn dispatch(
        &mut self,
        method: &str,
        url: &str,
        data: RequestData,
    ) -> Result<Response, ClientError> {
        let method = parse_method(method)?;
        let body = self.set_postdata(data);
        let url = validate_url(url)?;
        validate_headers(&self.headers)?;

        let prepared = PreparedRequest {
            method,
            url,
            headers: self.headers.clone(),
            body,
            settings: self.settings.clone(),
        };
        debug!(
            "Issuing {} {} ({} header(s), follow redirects: {})",
            prepared.method,
            prepared.url,
            prepared.headers.len(),
            prepared.settings.follow_redirects
        );

        let raw = self.transport.execute(&prepared).await?;
        Ok(Response::new(raw))
    }

    /// Encodes `data`, labelling it with `Content-Type` and `Content-Length`.
    fn set_postdata(&mut self, data: RequestData) -> Option<String> {
        let (body, content_type) = data.encode()?;
        if let Some(content_type) = content_type {
            self.set_header("Content-Type", content_type);
        }
        self.set_header("Content-Length", body.len().to_string());
        Some(body)
    }

    /// Sets a header for the next request, replacing an earlier value of the
    /// same name (compared case-insensitively).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some((_, existing)) => *existing = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Sets several headers at once.
    pub fn set_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.set_header(name, value);
        }
    }

    /// Applies a typed option to the next request.
    pub fn set_option(&mut self, option: RequestOption) {
        self.settings.apply(option);
    }

    /// Applies an option given by name, e.g. `("CURLOPT_MAXREDIRS", "3")`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for unknown names or bad values.
    pub fn set_option_by_name(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        self.set_option(RequestOption::from_name(name, value)?);
        Ok(())
    }

    /// Turns redirect following on or off for the next request.
    pub fn follow_redirects(&mut self, follow: bool) {
        self.set_option(RequestOption::FollowLocation(follow));
    }

    /// Sets the `Referer` header for the next request.
    pub fn set_referer(&mut self, referer: impl Into<String>) {
        self.set_option(RequestOption::Referer(referer.into()));
    }

    /// Sets basic authentication credentials for the next request.
    pub fn set_basic_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.set_option(RequestOption::BasicAuth {
            username: username.into(),
            password: Some(password.into()),
        });
    }

    fn reset(&mut self) {
        self.settings = self.defaults.clone();
        self.headers.clear();
    }
}

fn parse_method(method: &str) -> Result<Method, ClientError> {
    Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| ClientError::InvalidArgument(format!("`{method}` is not a valid HTTP method")))
}

fn validate_headers(headers: &[(String, String)]) -> Result<(), ClientError> {
    for (name, value) in headers {
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ClientError::InvalidArgument(format!("`{name}` is not a valid header name"))
        })?;
        HeaderValue::from_str(value).map_err(|_| {
            ClientError::InvalidArgument(format!("invalid value for header `{name}`"))
        })?;
    }
    Ok(())
}
