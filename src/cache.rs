//! Conditional-GET validators.
//!
//! Validators are recomputed from disk on every request; nothing is kept
//! between requests. A request is fresh only when both `If-None-Match` and
//! `If-Modified-Since` equal the current values byte for byte. There is no
//! "older than" comparison on the date.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::request::Request;

/// Validators for one file, as they stand right now.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Validators {
    /// Quoted hex SHA-256 of the file content.
    pub etag: String,
    /// Modification time as an HTTP date.
    pub last_modified: String,
}

impl Validators {
    /// Reads `path` and returns its content together with its validators.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<(String, Self)> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let modified = std::fs::metadata(path)?.modified()?;
        let validators = Self {
            etag: etag(&content),
            last_modified: httpdate::fmt_http_date(modified),
        };
        Ok((content, validators))
    }

    /// `true` when the client's cached copy is current.
    pub fn is_fresh(&self, req: &Request) -> bool {
        req.header("If-None-Match").unwrap_or("") == self.etag
            && req.header("If-Modified-Since").unwrap_or("") == self.last_modified
    }

    /// Headers attached to every successful page response.
    pub fn headers(&self, max_age: u64) -> [(&'static str, String); 3] {
        [
            ("Cache-Control", format!("max-age={max_age}")),
            ("ETag", self.etag.clone()),
            ("Last-Modified", self.last_modified.clone()),
        ]
    }
}

/// Quoted hex digest of `content`.
pub fn etag(content: &str) -> String {
    format!("\"{}\"", hex::encode(Sha256::digest(content.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_request;

    #[test]
    fn etag_is_quoted_sha256_hex() {
        assert_eq!(
            etag(""),
            "\"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\""
        );
        assert_ne!(etag("a"), etag("b"));
    }

    #[test]
    fn loads_content_and_validators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("about.html");
        std::fs::write(&path, "<p>about</p>").unwrap();
        let (content, v) = Validators::load(&path).unwrap();
        assert_eq!(content, "<p>about</p>");
        assert_eq!(v.etag, etag("<p>about</p>"));
        assert!(v.last_modified.ends_with(" GMT"));
    }

    #[test]
    fn fresh_only_when_both_validators_match_exactly() {
        let v = Validators { etag: "\"e\"".into(), last_modified: "Sun, 06 Nov 1994 08:49:37 GMT".into() };
        let both = parse_request(
            b"GET / HTTP/1.1\r\nIf-None-Match: \"e\"\r\nIf-Modified-Since: Sun, 06 Nov 1994 08:49:37 GMT\r\n\r\n",
        )
        .unwrap();
        assert!(v.is_fresh(&both));

        let etag_only = parse_request(b"GET / HTTP/1.1\r\nIf-None-Match: \"e\"\r\n\r\n").unwrap();
        assert!(!v.is_fresh(&etag_only));

        let later_date = parse_request(
            b"GET / HTTP/1.1\r\nIf-None-Match: \"e\"\r\nIf-Modified-Since: Mon, 07 Nov 1994 08:49:37 GMT\r\n\r\n",
        )
        .unwrap();
        assert!(!v.is_fresh(&later_date));
    }

    #[test]
    fn cache_headers_in_order() {
        let v = Validators { etag: "\"e\"".into(), last_modified: "d".into() };
        let h = v.headers(30);
        assert_eq!(h[0], ("Cache-Control", "max-age=30".to_owned()));
        assert_eq!(h[1].0, "ETag");
        assert_eq!(h[2], ("Last-Modified", "d".to_owned()));
    }
}
