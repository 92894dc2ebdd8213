//! httpchain library: HTTP requests with a parsed redirect chain
//!
//! This library issues HTTP requests and parses the raw transport response,
//! every redirect hop included, into structured records: status code, status
//! line, reason phrase, multi-valued headers and body.
//!
//! # Example
//!
//! ```
//! use httpchain::Response;
//!
//! let raw = "HTTP/1.1 303 See other\r\nLocation: http://x/\r\n\r\n\
//!            HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n<html></html>";
//! let response = Response::new(raw);
//!
//! assert_eq!(response.code(), 200);
//! assert_eq!(response.status_message(), Some("OK"));
//! assert_eq!(response.body(), "<html></html>");
//! assert_eq!(response.count_redirects(), 1);
//! assert_eq!(response.redirect(0)?.map(|hop| hop.code()), Some(303));
//! # Ok::<(), httpchain::ClientError>(())
//! ```
//!
//! # Requirements
//!
//! Parsing is synchronous. Issuing requests through [`Request`] requires a
//! Tokio runtime.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
mod request;
mod response;
pub mod transport;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ClientError, InitializationError};
pub use request::{Request, RequestData, RequestOption, TransferSettings};
pub use response::{Headers, Response, StatusRecord};
pub use transport::{PreparedRequest, ReqwestTransport, Transport};
