//! Failure taxonomy and infrastructure errors.
//!
//! Two families live here:
//!
//! - [`Failure`] is what a request-handling step returns when it cannot go
//!   on. The handler maps it to exactly one of three responses (400, 404,
//!   505) and never lets it escape.
//! - [`Error`] surfaces infrastructure failures outside that boundary:
//!   binding the listener, listing the asset directory at startup.

use crate::status::Status;
use crate::store::StoreError;

/// Why a request ended in `400 Bad Request`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reason {
    /// No blank line separating the head from the body.
    MissingBoundary,
    /// Request line is not exactly `METHOD PATH VERSION`.
    MalformedRequestLine,
    /// A header line without a `": "` separator.
    MalformedHeader,
    /// Method other than GET, HEAD, POST, PUT or DELETE.
    UnknownMethod,
    /// Login body is not `username=..&password=..`.
    MalformedLogin,
    /// Login credentials did not match.
    BadCredentials,
    /// Cookie missing or not equal to the shared token.
    Unauthorized,
    /// POST/PUT/DELETE on a path that accepts none of them.
    Unroutable,
    /// Create on a key that already exists.
    DuplicateKey,
    /// Update or delete on a key that does not exist.
    MissingKey,
    /// The document has no anchor to insert a new item after.
    UnknownStructure,
    /// Reading or writing a file failed mid-request.
    Io,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingBoundary      => "missing header/body boundary",
            Self::MalformedRequestLine => "malformed request line",
            Self::MalformedHeader      => "malformed header",
            Self::UnknownMethod        => "unknown method",
            Self::MalformedLogin       => "malformed login body",
            Self::BadCredentials       => "bad credentials",
            Self::Unauthorized         => "missing or incorrect cookie",
            Self::Unroutable           => "no route for mutation",
            Self::DuplicateKey         => "item already exists",
            Self::MissingKey           => "item key not found",
            Self::UnknownStructure     => "unknown document structure",
            Self::Io                   => "file i/o failed",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure signal raised by one step of the request pipeline.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Failure {
    #[error("unsupported protocol version `{version}`")]
    VersionMismatch { version: String },

    #[error("no such page `{path}`")]
    NotFound { path: String },

    #[error("bad request: {0}")]
    BadRequest(Reason),
}

impl Failure {
    /// The response status this failure maps to.
    pub fn status(&self) -> Status {
        match self {
            Self::VersionMismatch { .. } => Status::HttpVersionNotSupported,
            Self::NotFound { .. }        => Status::NotFound,
            Self::BadRequest(_)          => Status::BadRequest,
        }
    }
}

impl From<Reason> for Failure {
    fn from(r: Reason) -> Self {
        Self::BadRequest(r)
    }
}

impl From<StoreError> for Failure {
    fn from(e: StoreError) -> Self {
        Self::BadRequest(match e {
            StoreError::Duplicate { .. } => Reason::DuplicateKey,
            StoreError::Missing { .. }   => Reason::MissingKey,
            StoreError::Structure        => Reason::UnknownStructure,
            StoreError::Io(_)            => Reason::Io,
        })
    }
}

impl From<std::io::Error> for Failure {
    fn from(_: std::io::Error) -> Self {
        Self::BadRequest(Reason::Io)
    }
}

/// The error type returned by docserve's fallible setup operations.
///
/// Request-level problems are expressed as [`Failure`]s and turned into
/// responses; this type never reaches a client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{0}`")]
    Addr(String),
}
