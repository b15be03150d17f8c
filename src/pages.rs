//! Static error pages.
//!
//! Read from disk only when an error response to a GET or HEAD needs a body.

use std::path::PathBuf;

use tracing::warn;

use crate::status::Status;

pub const BAD_REQUEST_PAGE: &str = "__bad-request.html";
pub const NOT_FOUND_PAGE: &str = "__not-found.html";
pub const VERSION_PAGE: &str = "__http-version-not-supported.html";

#[derive(Clone, Debug)]
pub struct ErrorPages {
    dir: PathBuf,
}

impl ErrorPages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Page body for an error status. A page that cannot be read yields an
    /// empty body so the response still goes out.
    pub fn body_for(&self, status: Status) -> String {
        let name = match status {
            Status::HttpVersionNotSupported => VERSION_PAGE,
            Status::NotFound                => NOT_FOUND_PAGE,
            _                               => BAD_REQUEST_PAGE,
        };
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), "error page unreadable: {e}");
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_page_by_status() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(NOT_FOUND_PAGE), "nf").unwrap();
        std::fs::write(dir.path().join(BAD_REQUEST_PAGE), "br").unwrap();
        std::fs::write(dir.path().join(VERSION_PAGE), "v").unwrap();
        let pages = ErrorPages::new(dir.path());
        assert_eq!(pages.body_for(Status::NotFound), "nf");
        assert_eq!(pages.body_for(Status::BadRequest), "br");
        assert_eq!(pages.body_for(Status::HttpVersionNotSupported), "v");
    }

    #[test]
    fn missing_page_is_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ErrorPages::new(dir.path()).body_for(Status::NotFound), "");
    }
}
