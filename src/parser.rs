//! Raw request parsing.
//!
//! The whole request arrives as one buffer. It is split on the first CRLF
//! (request line), then on the first blank line (header block / body block).

use crate::error::{Failure, Reason};
use crate::request::Request;

const CRLF: &str = "\r\n";
const BLANK_LINE: &str = "\r\n\r\n";

/// Parses one complete request.
///
/// Invalid UTF-8 is replaced rather than rejected; the pieces that matter
/// for routing are ASCII anyway.
pub fn parse_request(buf: &[u8]) -> Result<Request, Failure> {
    let text = String::from_utf8_lossy(buf);
    parse_str(&text)
}

fn parse_str(text: &str) -> Result<Request, Failure> {
    let line_end = text.find(CRLF).ok_or(Reason::MissingBoundary)?;
    let head_end = text.find(BLANK_LINE).ok_or(Reason::MissingBoundary)?;

    let mut req = parse_request_line(&text[..line_end])?;

    // The header block sits between the request line's CRLF and the blank
    // line; it is empty when the blank line directly follows the request line.
    let header_block = text.get(line_end + CRLF.len()..head_end).unwrap_or("");
    for line in header_block.split(CRLF).filter(|l| !l.is_empty()) {
        let (name, value) = line.split_once(": ").ok_or(Reason::MalformedHeader)?;
        req.set_header(name, value);
    }

    req.body = text[head_end + BLANK_LINE.len()..]
        .split(CRLF)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect();

    Ok(req)
}

fn parse_request_line(line: &str) -> Result<Request, Failure> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(path), Some(version), None) => {
            Ok(Request::new(method.to_owned(), path.to_owned(), version.to_owned()))
        }
        _ => Err(Reason::MalformedRequestLine.into()),
    }
}

/// The first token of a raw request, without parsing anything else.
///
/// Used to decide whether an error response carries a page body even when
/// the request could not be parsed.
pub fn leading_method(buf: &[u8]) -> &str {
    let end = buf.iter().position(|b| b.is_ascii_whitespace()).unwrap_or(buf.len());
    std::str::from_utf8(&buf[..end]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_headers_and_body() {
        let raw = "POST /login.html HTTP/1.1\r\nHost: x\r\nCookie: a=b\r\n\r\nusername=admin&password=admin";
        let req = parse_request(raw.as_bytes()).unwrap();
        assert_eq!(req.method(), "POST");
        assert_eq!(req.path(), "/login.html");
        assert_eq!(req.version(), "HTTP/1.1");
        assert_eq!(req.header("Host"), Some("x"));
        assert_eq!(req.header("Cookie"), Some("a=b"));
        assert_eq!(req.body(), ["username=admin&password=admin"]);
    }

    #[test]
    fn request_without_headers() {
        let req = parse_request(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(req.headers().is_empty());
        assert!(req.body().is_empty());
    }

    #[test]
    fn header_value_keeps_later_separators() {
        let req = parse_request(b"GET / HTTP/1.1\r\nX-Note: a: b\r\n\r\n").unwrap();
        assert_eq!(req.header("X-Note"), Some("a: b"));
    }

    #[test]
    fn duplicate_header_last_wins() {
        let req = parse_request(b"GET / HTTP/1.1\r\nCookie: one\r\nCookie: two\r\n\r\n").unwrap();
        assert_eq!(req.header("Cookie"), Some("two"));
        assert_eq!(req.headers().len(), 1);
    }

    #[test]
    fn blank_body_lines_are_dropped() {
        let req = parse_request(b"PUT /x HTTP/1.1\r\n\r\na\r\n\r\nb\r\n").unwrap();
        assert_eq!(req.body(), ["a", "b"]);
    }

    #[test]
    fn request_line_needs_exactly_three_tokens() {
        let err = parse_request(b"GET /\r\n\r\n").unwrap_err();
        assert_eq!(err, Failure::BadRequest(Reason::MalformedRequestLine));
        let err = parse_request(b"GET / HTTP/1.1 extra\r\n\r\n").unwrap_err();
        assert_eq!(err, Failure::BadRequest(Reason::MalformedRequestLine));
    }

    #[test]
    fn missing_blank_line_is_rejected() {
        let err = parse_request(b"GET / HTTP/1.1\r\nHost: x\r\n").unwrap_err();
        assert_eq!(err, Failure::BadRequest(Reason::MissingBoundary));
    }

    #[test]
    fn header_without_separator_is_rejected() {
        let err = parse_request(b"GET / HTTP/1.1\r\nHost x\r\n\r\n").unwrap_err();
        assert_eq!(err, Failure::BadRequest(Reason::MalformedHeader));
    }

    #[test]
    fn leading_method_reads_first_token() {
        assert_eq!(leading_method(b"HEAD / HTTP/1.0\r\n"), "HEAD");
        assert_eq!(leading_method(b"GET"), "GET");
        assert_eq!(leading_method(b""), "");
    }
}
