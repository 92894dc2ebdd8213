//! Status-line and header extraction for a single message block.

use std::sync::LazyLock;

use regex::Regex;

use super::headers::Headers;

/// Text after `HTTP/<d>.<d>` and one separating space, up to the line terminator.
static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\AHTTP/[0-9]\.[0-9][ \t]([^\r\n]*)").expect("status line pattern is valid")
});

/// Three-digit status code at the start of the status line, plus the reason phrase.
static STATUS_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A([0-9]{3})(?:[ \t]([^\r\n]*))?").expect("status code pattern is valid")
});

/// `<token>:<optional space><value>` where token is letters, digits, `-` or `_`.
static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A([A-Za-z0-9_-]+):[ \t]?(.*)\z").expect("header line pattern is valid")
});

/// Status and headers parsed from one message block.
///
/// The terminal response and every redirect hop are described by one of these.
/// The default value stands for a buffer that carried no status line at all:
/// code `0`, no status text and no headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRecord {
    block: String,
    status_line: Option<String>,
    code: u16,
    status_message: Option<String>,
    headers: Headers,
}

impl StatusRecord {
    /// Parses one message block. Never fails; missing parts fall back to defaults.
    pub(crate) fn parse(block: &str) -> Self {
        let status_line = parse_status_line(block);
        let (code, status_message) = status_line
            .as_deref()
            .map(parse_code_and_message)
            .unwrap_or((0, None));

        Self {
            block: block.to_string(),
            status_line,
            code,
            status_message,
            headers: parse_headers(block),
        }
    }

    /// The block this record was parsed from, blank-line terminator included.
    pub fn block(&self) -> &str {
        &self.block
    }

    /// Status line without the protocol token, e.g. `"200 OK"`.
    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    /// Numeric status code, `0` when none could be read.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Reason phrase following the code, e.g. `"OK"`.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Headers of this block.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

fn parse_status_line(block: &str) -> Option<String> {
    STATUS_LINE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|line| line.as_str().to_string())
}

fn parse_code_and_message(status_line: &str) -> (u16, Option<String>) {
    let Some(caps) = STATUS_CODE.captures(status_line) else {
        return (0, None);
    };

    let code = caps[1].parse().unwrap_or(0);
    let message = caps
        .get(2)
        .map(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    (code, message)
}

fn parse_headers(block: &str) -> Headers {
    // `lines` strips the trailing `\r` of CRLF terminators
    block
        .lines()
        .skip(1)
        .filter_map(|line| HEADER_LINE.captures(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_fields() {
        let record = StatusRecord::parse("HTTP/1.1 303 See other\r\nLocation: /x\r\n\r\n");
        assert_eq!(record.code(), 303);
        assert_eq!(record.status_line(), Some("303 See other"));
        assert_eq!(record.status_message(), Some("See other"));
        assert_eq!(record.headers().first("Location"), Some("/x"));
    }

    #[test]
    fn test_parse_code_without_reason_phrase() {
        let record = StatusRecord::parse("HTTP/1.1 204\r\n\r\n");
        assert_eq!(record.code(), 204);
        assert_eq!(record.status_line(), Some("204"));
        assert_eq!(record.status_message(), None);
    }

    #[test]
    fn test_parse_non_numeric_status() {
        let record = StatusRecord::parse("HTTP/1.1 OK\r\n\r\n");
        assert_eq!(record.code(), 0);
        assert_eq!(record.status_line(), Some("OK"));
        assert_eq!(record.status_message(), None);
    }

    #[test]
    fn test_parse_header_values_exclude_carriage_return() {
        let record = StatusRecord::parse("HTTP/1.1 200 OK\r\nServer: nginx\r\nX-Empty:\r\n\r\n");
        assert_eq!(record.headers().first("Server"), Some("nginx"));
        assert_eq!(record.headers().first("X-Empty"), Some(""));
    }

    #[test]
    fn test_parse_header_keeps_colons_in_value() {
        let record =
            StatusRecord::parse("HTTP/1.1 200 OK\nDate: Tue, 17 Feb 2015 20:20:48 GMT\n\n");
        assert_eq!(
            record.headers().first("Date"),
            Some("Tue, 17 Feb 2015 20:20:48 GMT")
        );
    }

    #[test]
    fn test_parse_header_without_space_after_colon() {
        let record = StatusRecord::parse("HTTP/1.1 200 OK\nX_Token:abc\n\n");
        assert_eq!(record.headers().first("X_Token"), Some("abc"));
    }

    #[test]
    fn test_parse_skips_lines_that_are_not_headers() {
        let record = StatusRecord::parse("HTTP/1.1 200 Note: fine\r\n  folded line\r\n\r\n");
        assert!(record.headers().is_empty());
        assert_eq!(record.status_message(), Some("Note: fine"));
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = StatusRecord::default();
        assert_eq!(record.code(), 0);
        assert_eq!(record.status_line(), None);
        assert_eq!(record.status_message(), None);
        assert!(record.headers().is_empty());
        assert_eq!(record.block(), "");
    }
}
