//! Transport seam between the request issuer and the network.
//!
//! A [`Transport`] executes a [`PreparedRequest`] and returns the raw response
//! text in the shape [`Response::new`](crate::Response::new) expects: every
//! hop's status line and headers, each closed by a blank line, followed by the
//! final body.

mod http;
mod redirects;

use std::future::Future;

use reqwest::Method;
use url::Url;

use crate::error_handling::ClientError;
use crate::request::TransferSettings;

pub use http::ReqwestTransport;

/// A fully validated request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Request method.
    pub method: Method,
    /// Absolute `http`/`https` URL.
    pub url: Url,
    /// Custom headers, in the order they were set.
    pub headers: Vec<(String, String)>,
    /// Encoded body, if any.
    pub body: Option<String>,
    /// Transfer settings in effect for this request.
    pub settings: TransferSettings,
}

/// Executes prepared requests.
pub trait Transport {
    /// Sends `request` and returns the raw response text.
    ///
    /// # Errors
    ///
    /// Implementations return [`ClientError::TransportFailure`] when the exchange
    /// fails outright and [`ClientError::TooManyRedirects`] when the hop limit is
    /// exceeded.
    fn execute(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}
