//! Raw HTTP response parsing.
//!
//! A transport that follows redirects while echoing response heads returns one
//! buffer holding every hop:
//!
//! ```text
//! HTTP/1.1 303 See other      <- redirect hop 0
//! Location: http://x/
//!
//! HTTP/1.1 200 OK             <- terminal response
//! Server: nginx
//!
//! <html></html>               <- body
//! ```
//!
//! [`Response`] splits such a buffer into message blocks, parses each block into
//! a [`StatusRecord`] once, and exposes the last one as the response proper and
//! the earlier ones as redirect hops.

mod headers;
mod split;
mod status;

use std::fmt;

use log::debug;
use serde::de::DeserializeOwned;

use crate::error_handling::ClientError;

pub use headers::Headers;
pub use status::StatusRecord;

/// A parsed transport response: terminal status, headers and body plus the
/// redirect hops that led to it.
///
/// Built once from an immutable raw buffer. A buffer without a recognizable
/// status line is not an error: it yields code `0`, no headers, and a body equal
/// to the whole buffer. Callers should read `code() == 0` as "not an HTTP
/// response".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    raw: String,
    http_message: String,
    body: String,
    terminal: StatusRecord,
    redirects: Vec<StatusRecord>,
}

impl Response {
    /// Parses a raw transport buffer.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let blocks = split::split_message_blocks(&raw);
        let http_message = blocks.concat();
        let body = split::extract_body(&raw, &http_message).to_string();
        let (terminal, redirects) = assemble(&blocks);

        debug!(
            "Parsed response: {} message block(s), terminal code {}, body {} bytes",
            blocks.len(),
            terminal.code(),
            body.len()
        );

        Self {
            raw,
            http_message,
            body,
            terminal,
            redirects,
        }
    }

    /// Wraps one stored redirect record. The result has no body and no redirects.
    fn from_record(record: &StatusRecord) -> Self {
        Self {
            raw: record.block().to_string(),
            http_message: record.block().to_string(),
            body: String::new(),
            terminal: record.clone(),
            redirects: Vec::new(),
        }
    }

    /// Status code of the terminal response, `0` if there was no status line.
    pub fn code(&self) -> u16 {
        self.terminal.code()
    }

    /// Status line of the terminal response without the protocol, e.g. `"200 OK"`.
    pub fn status(&self) -> Option<&str> {
        self.terminal.status_line()
    }

    /// Reason phrase of the terminal response, e.g. `"OK"`.
    pub fn status_message(&self) -> Option<&str> {
        self.terminal.status_message()
    }

    /// Headers of the terminal response.
    pub fn headers(&self) -> &Headers {
        self.terminal.headers()
    }

    /// Message body: everything after the last message block.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The buffer this response was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All message blocks, redirects included, without the body.
    pub fn raw_http_message(&self) -> &str {
        &self.http_message
    }

    /// Returns the redirect hop at `index` (oldest first) as its own response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if `index` is negative or does not
    /// fit in a `usize`. An index past the last hop is not an error and yields
    /// `Ok(None)`.
    pub fn redirect<I>(&self, index: I) -> Result<Option<Response>, ClientError>
    where
        I: TryInto<usize>,
    {
        let index = index.try_into().map_err(|_| {
            ClientError::InvalidArgument("redirect index must be a non-negative integer".into())
        })?;

        Ok(self.redirects.get(index).map(Response::from_record))
    }

    /// Redirect hop records, oldest first.
    pub fn redirect_records(&self) -> &[StatusRecord] {
        &self.redirects
    }

    /// Number of redirect hops that preceded the terminal response.
    pub fn count_redirects(&self) -> usize {
        self.redirects.len()
    }

    /// Number of header lines on the terminal response; a repeated name counts
    /// once per value.
    pub fn count_headers(&self) -> usize {
        self.terminal.headers().value_count()
    }

    /// `true` for any 2xx status code.
    pub fn is_ok(&self) -> bool {
        (200..=299).contains(&self.code())
    }

    /// Decodes the body as JSON, returning `None` if it does not deserialize into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_str(&self.body) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Response body is not valid JSON: {e}");
                None
            }
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// Splits parsed blocks into the terminal record and the redirect records before it.
fn assemble(blocks: &[&str]) -> (StatusRecord, Vec<StatusRecord>) {
    match blocks.split_last() {
        Some((last, earlier)) => (
            StatusRecord::parse(last),
            earlier.iter().map(|block| StatusRecord::parse(block)).collect(),
        ),
        None => (StatusRecord::default(), Vec::new()),
    }
}
