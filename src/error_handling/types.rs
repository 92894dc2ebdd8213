//! Error type definitions.
//!
//! This module defines the errors surfaced by request issuing, transport and
//! response accessors, plus initialization failures.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while issuing a request or inspecting its response.
///
/// A response without a recognizable status line is deliberately absent here:
/// it parses to code `0` instead of failing.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The caller passed something unusable: a malformed URL, an unknown or
    /// malformed request option, an invalid method, or a negative redirect index.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport failed outright (connect, timeout, TLS, body read...).
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] ReqwestError),

    /// The redirect chain was longer than the configured hop limit.
    #[error("Too many redirects (limit {limit})")]
    TooManyRedirects {
        /// Maximum number of hops that were allowed.
        limit: usize,
    },
}
