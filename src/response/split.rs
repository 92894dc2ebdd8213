//! Message-block splitting and body extraction.
//!
//! A transport that echoes response heads while following redirects hands back
//! every hop's status line and headers, each closed by a blank line, followed by
//! the final body. Blocks are matched back to back from the start of the buffer,
//! so nothing after the last blank line is ever scanned.

use std::sync::LazyLock;

use regex::Regex;

/// One message block: `HTTP/<d>.<d>` up to and including the first blank line.
static MESSAGE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\AHTTP/[0-9]\.[0-9](?s:.*?)\r?\n\r?\n").expect("message block pattern is valid")
});

/// Splits a raw transport buffer into its message blocks, earliest hop first.
///
/// Each block must start exactly where the previous one ended. The first block
/// must start at the beginning of the buffer; a buffer that does not open with a
/// status line yields no blocks at all.
///
/// The returned slices borrow from `raw` and keep their line terminators, so
/// concatenating them reproduces the head of the buffer byte for byte.
pub(crate) fn split_message_blocks(raw: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut offset = 0;

    while let Some(found) = MESSAGE_BLOCK.find(&raw[offset..]) {
        blocks.push(found.as_str());
        offset += found.end();
    }

    blocks
}

/// Returns everything in `raw` after the concatenated message blocks.
///
/// `http_message` is always a prefix of `raw` that ends on a `\n`, so the split
/// never lands inside a multi-byte character. When no blocks were found the body
/// is the whole buffer.
pub(crate) fn extract_body<'a>(raw: &'a str, http_message: &str) -> &'a str {
    raw.strip_prefix(http_message).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single_block_with_body() {
        let raw = "HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n<html></html>";
        let blocks = split_message_blocks(raw);
        assert_eq!(blocks, vec!["HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n"]);
    }

    #[test]
    fn test_split_redirect_chain_in_order() {
        let raw = "HTTP/1.1 301 Moved\r\nLocation: /a\r\n\r\n\
                   HTTP/1.1 302 Found\r\nLocation: /b\r\n\r\n\
                   HTTP/1.1 200 OK\r\n\r\nbody";
        let blocks = split_message_blocks(raw);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("HTTP/1.1 301"));
        assert!(blocks[1].starts_with("HTTP/1.1 302"));
        assert!(blocks[2].starts_with("HTTP/1.1 200"));
    }

    #[test]
    fn test_split_block_without_headers() {
        let blocks = split_message_blocks("HTTP/1.0 204 No Content\n\n");
        assert_eq!(blocks, vec!["HTTP/1.0 204 No Content\n\n"]);
    }

    #[test]
    fn test_split_bare_lf_terminators() {
        let raw = "HTTP/1.1 200 OK\nDate: today\nServer: Apache\n\nhello";
        let blocks = split_message_blocks(raw);
        assert_eq!(blocks, vec!["HTTP/1.1 200 OK\nDate: today\nServer: Apache\n\n"]);
    }

    #[test]
    fn test_split_ignores_status_line_inside_body() {
        let raw = "HTTP/1.1 200 OK\r\n\r\nsee: HTTP/1.1 500 Oops\r\n\r\n";
        let blocks = split_message_blocks(raw);
        assert_eq!(blocks, vec!["HTTP/1.1 200 OK\r\n\r\n"]);
    }

    #[test]
    fn test_split_requires_leading_status_line() {
        assert!(split_message_blocks("just a body").is_empty());
        assert!(split_message_blocks("").is_empty());
        assert!(split_message_blocks("prefix HTTP/1.1 200 OK\r\n\r\n").is_empty());
        assert!(split_message_blocks("\r\nHTTP/1.1 200 OK\r\nServer: x\r\n\r\nbody").is_empty());
        // Header block never closed by a blank line
        assert!(split_message_blocks("HTTP/1.1 200 OK\r\nServer: x\r\n").is_empty());
    }

    #[test]
    fn test_split_is_case_sensitive_on_protocol_token() {
        assert!(split_message_blocks("http/1.1 200 OK\r\n\r\n").is_empty());
    }

    #[test]
    fn test_extract_body_after_blocks() {
        let raw = "HTTP/1.1 200 OK\r\n\r\nhéllo wörld";
        let head: String = split_message_blocks(raw).concat();
        assert_eq!(extract_body(raw, &head), "héllo wörld");
    }

    #[test]
    fn test_extract_body_without_blocks() {
        assert_eq!(extract_body("plain", ""), "plain");
    }
}
