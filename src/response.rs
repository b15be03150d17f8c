//! Outgoing HTTP response type.
//!
//! A response is a status, an ordered list of headers and a text body. The
//! `Date` header is not stored: it is stamped first in the header block at
//! the moment the response is rendered. No `Content-Length` is written; the
//! connection is closed after every response, which frames the body.

use std::time::SystemTime;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::status::Status;

/// The only protocol version the site speaks.
pub const HTTP_VERSION: &str = "HTTP/1.1";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use docserve::{Response, Status};
///
/// let res = Response::builder()
///     .status(Status::Ok)
///     .header("Cache-Control", "max-age=30")
///     .body("<p>hi</p>");
/// assert_eq!(res.header("cache-control"), Some("max-age=30"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub(crate) body: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// Response with no headers and no body.
    pub fn status_only(status: Status) -> Self {
        Self { body: String::new(), headers: Vec::new(), status }
    }

    /// Builder for responses that need headers or a body. Defaults to `200 OK`.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok }
    }

    pub fn status(&self) -> Status { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &str { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Renders the full wire form with `Date` set to the current time.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.render_at(SystemTime::now()).into_bytes()
    }

    /// Renders the full wire form with `Date` set to `now`.
    pub fn render_at(&self, now: SystemTime) -> String {
        let mut out = format!("{HTTP_VERSION} {} {}\r\n", self.status.code(), self.status.reason());
        out.push_str(&format!("Date: {}\r\n", httpdate::fmt_http_date(now)));
        for (name, value) in &self.headers {
            out.push_str(&format!("{name}: {value}\r\n"));
        }
        out.push_str("\r\n");
        out.push_str(&self.body);
        out
    }

    pub(crate) async fn write_to<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes()).await?;
        writer.flush().await
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Terminated by [`body`](Self::body) or
/// [`no_body`](Self::no_body).
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a text body, written verbatim.
    pub fn body(self, body: impl Into<String>) -> Response {
        Response { body: body.into(), headers: self.headers, status: self.status }
    }

    /// Terminate with no body (e.g. `Status::NotModified`, `Status::MovedPermanently`).
    pub fn no_body(self) -> Response {
        self.body(String::new())
    }
}
