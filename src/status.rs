//! HTTP status codes as a typed enum.
//!
//! The site only ever answers with six statuses, so the enum is closed over
//! exactly those. Every [`Response`](crate::Response) carries one.
//!
//! ```rust
//! use docserve::{Response, Status};
//!
//! let res = Response::builder()
//!     .status(Status::MovedPermanently)
//!     .header("Location", "/login.html")
//!     .no_body();
//! assert_eq!(res.status(), Status::MovedPermanently);
//! ```

/// The statuses a response can carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                      // 200

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    MovedPermanently,        // 301
    NotModified,             // 304

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,              // 400
    NotFound,                // 404

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    HttpVersionNotSupported, // 505
}

impl Status {
    /// Numeric status code.
    pub fn code(self) -> u16 {
        self.into()
    }

    /// Reason phrase written after the code on the status line.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                      => "OK",
            Self::MovedPermanently        => "Moved Permanently",
            Self::NotModified             => "Not Modified",
            Self::BadRequest              => "Bad Request",
            Self::NotFound                => "Not Found",
            Self::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                      => 200,
            Status::MovedPermanently        => 301,
            Status::NotModified             => 304,
            Status::BadRequest              => 400,
            Status::NotFound                => 404,
            Status::HttpVersionNotSupported => 505,
        }
    }
}
