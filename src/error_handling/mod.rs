//! Error handling.
//!
//! Library errors are `thiserror` enums:
//! - [`ClientError`] for request issuing, transport and response accessors
//! - [`InitializationError`] for logger and HTTP client setup
//!
//! Unparseable responses are not errors; they degrade to code `0`.

mod types;

// Re-export public API
pub use types::{ClientError, InitializationError};
