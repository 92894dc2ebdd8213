//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `httpchain` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process;

use httpchain::initialization::init_logger_with;
use httpchain::{Config, Headers, Request, RequestData, Response, StatusRecord};

/// One hop of the printed chain.
#[derive(Serialize)]
struct HopReport<'a> {
    code: u16,
    status: Option<&'a str>,
    headers: &'a Headers,
}

impl<'a> From<&'a StatusRecord> for HopReport<'a> {
    fn from(record: &'a StatusRecord) -> Self {
        Self {
            code: record.code(),
            status: record.status_line(),
            headers: record.headers(),
        }
    }
}

/// JSON rendering of a parsed response.
#[derive(Serialize)]
struct ResponseReport<'a> {
    code: u16,
    status: Option<&'a str>,
    headers: &'a Headers,
    redirects: Vec<HopReport<'a>>,
    body: &'a str,
}

impl<'a> From<&'a Response> for ResponseReport<'a> {
    fn from(response: &'a Response) -> Self {
        Self {
            code: response.code(),
            status: response.status(),
            headers: response.headers(),
            redirects: response
                .redirect_records()
                .iter()
                .map(HopReport::from)
                .collect(),
            body: response.body(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let mut request = Request::new(&config).context("Failed to initialize HTTP client")?;
    request.set_headers(config.headers.iter().cloned());

    let data = config.data.clone().map(RequestData::from).unwrap_or_default();

    match request.request(&config.method, &config.url, data).await {
        Ok(response) => {
            if config.json {
                let report = ResponseReport::from(&response);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to render JSON")?
                );
            } else {
                print_response(&response, config.show_redirects);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("httpchain error: {:#}", e);
            process::exit(1);
        }
    }
}

fn print_response(response: &Response, show_redirects: bool) {
    if show_redirects {
        for (i, hop) in response.redirect_records().iter().enumerate() {
            println!("# redirect {i}: {}", hop.status_line().unwrap_or("-"));
            print_headers(hop.headers());
            println!();
        }
    }

    println!("{}", response.status().unwrap_or("(no status line)"));
    print_headers(response.headers());
    println!();
    print!("{response}");
}

fn print_headers(headers: &Headers) {
    for (name, values) in headers.iter() {
        for value in values {
            println!("{name}: {value}");
        }
    }
}
