//! # docserve
//!
//! A tiny HTTP/1.1 page server whose only database is one HTML page.
//!
//! ## What it does
//!
//! - Serves the pages in one directory, with `.html` added to bare paths via
//!   a `301` redirect and `/` sent to the login page.
//! - Answers conditional GETs: `ETag` (SHA-256 of the file) and
//!   `Last-Modified` are recomputed per request, and a request carrying both
//!   unchanged gets `304 Not Modified`.
//! - Hands out one shared cookie on `POST /login.html` and requires it for
//!   the index page and for item edits.
//! - Keeps key/value items as `<p>Item {key} = {value}</p>` lines inside the
//!   index page: `POST`/`PUT /index/items/{key}/{value}` create and update,
//!   `DELETE /index/items/{key}` removes.
//! - Maps every failure to `400`, `404` or `505`; GET and HEAD get a static
//!   error page as the body.
//!
//! ## What it does not do
//!
//! - **Concurrency** — one connection at a time, by construction
//! - **TLS, chunked bodies, MIME types** — not spoken at all
//! - **Sessions** — the cookie is a single shared token
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use docserve::{Config, Server, Site};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), docserve::Error> {
//!     docserve::logging::init_logging();
//!
//!     let config = Config::from_env();
//!     let site = Site::from_config(&config)?;
//!     Server::bind(&config.addr)?
//!         .read_buffer(config.read_buffer)
//!         .serve(site)
//!         .await
//! }
//! ```
//!
//! [`Site::handle`] is synchronous and can be driven without a socket:
//!
//! ```rust,no_run
//! # use docserve::{Config, Site, Status};
//! # let site = Site::from_config(&Config::default()).unwrap();
//! let res = site.handle(b"GET / HTTP/1.1\r\n\r\n");
//! assert_eq!(res.status(), Status::MovedPermanently);
//! assert_eq!(res.header("Location"), Some("/login.html"));
//! ```

mod auth;
mod cache;
mod config;
mod error;
mod handler;
mod method;
mod pages;
mod parser;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;

pub mod logging;

pub use auth::AuthGate;
pub use cache::{Validators, etag};
pub use config::Config;
pub use error::{Error, Failure, Reason};
pub use handler::Site;
pub use method::Method;
pub use pages::ErrorPages;
pub use parser::parse_request;
pub use request::Request;
pub use response::{HTTP_VERSION, Response, ResponseBuilder};
pub use router::{
    INDEX_PATH, ItemAction, ItemRoute, ItemRoutes, LOGIN_PATH, Normalized, ValidPathSet, normalize,
};
pub use server::{Server, run};
pub use status::Status;
pub use store::{Document, Item, ItemStore, StoreError};
