//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Client configuration.
///
/// Parsed from the command line by the `httpchain` binary, or built
/// programmatically with struct update syntax over [`Default`].
///
/// # Examples
///
/// ```
/// use httpchain::Config;
///
/// let config = Config {
///     timeout_seconds: 5,
///     max_redirects: 3,
///     ..Default::default()
/// };
/// assert!(config.follow_redirects());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "httpchain",
    version,
    about = "Issue an HTTP request and print the parsed response, redirect hops included"
)]
pub struct Config {
    /// URL to request
    pub url: String,

    /// HTTP method (GET, POST, PUT, HEAD, DELETE or any custom token)
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request body; a JSON object or array is sent as application/json
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Extra request header, `Name: value` (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header_arg)]
    pub headers: Vec<(String, String)>,

    /// Do not follow redirects
    #[arg(long)]
    pub no_follow: bool,

    /// Maximum number of redirect hops to follow
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_redirects: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Print every redirect hop before the final response
    #[arg(long)]
    pub show_redirects: bool,

    /// Print the parsed response as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Whether redirects are followed by default.
    pub fn follow_redirects(&self) -> bool {
        !self.no_follow
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: "GET".to_string(),
            data: None,
            headers: Vec::new(),
            no_follow: false,
            max_redirects: MAX_REDIRECT_HOPS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            show_redirects: false,
            json: false,
        }
    }
}

/// Parses a `Name: value` header argument.
fn parse_header_arg(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in `{s}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
