//! The request pipeline.
//!
//! ```text
//! raw bytes
//!   → parse            (400 on malformed input)
//!   → version check    (505)
//!   → method           (400 on unknown)
//!   → normalize        (301 short-circuit, any method)
//!   → GET/HEAD: page   (404, cookie gate on the index, 200/304)
//!     POST/PUT/DELETE: login or item edit (400 on any refusal)
//!   → Response
//! ```
//!
//! Every step returns `Result<_, Failure>`. [`Site::handle`] is the one place
//! a [`Failure`] turns into a response, so callers always get a [`Response`]
//! back and never an error.

use std::path::PathBuf;
use std::time::SystemTime;

use tracing::{debug, info, warn};

use crate::auth::AuthGate;
use crate::cache::Validators;
use crate::config::Config;
use crate::error::{Error, Failure, Reason};
use crate::method::Method;
use crate::pages::ErrorPages;
use crate::parser::{leading_method, parse_request};
use crate::request::Request;
use crate::response::{HTTP_VERSION, Response};
use crate::router::{
    INDEX_PATH, ITEMS_PREFIX, ItemAction, ItemRoutes, LOGIN_PATH, Normalized, ValidPathSet,
    normalize,
};
use crate::status::Status;
use crate::store::ItemStore;

const LOGIN_OK_BODY: &str = "Authentication Success";

/// Everything needed to answer a request. Built once at startup.
pub struct Site {
    valid: ValidPathSet,
    public_dir: PathBuf,
    store: ItemStore,
    auth: AuthGate,
    pages: ErrorPages,
    items: ItemRoutes,
    max_age: u64,
}

impl Site {
    /// Builds the site, listing `config.public_dir` for the servable paths.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let valid = ValidPathSet::from_dir(&config.public_dir)?;
        info!(dir = %config.public_dir.display(), pages = valid.len(), "servable paths loaded");
        Ok(Self::new(config, valid))
    }

    /// Builds the site around an already computed path set.
    pub fn new(config: &Config, valid: ValidPathSet) -> Self {
        Self {
            valid,
            public_dir: config.public_dir.clone(),
            store: ItemStore::new(config.document_path()),
            auth: AuthGate::new(
                config.username.clone(),
                config.password.clone(),
                config.token.clone(),
                config.cookie_ttl,
            ),
            pages: ErrorPages::new(&config.private_dir),
            items: ItemRoutes::new(),
            max_age: config.max_age,
        }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Answers one raw request. Never fails.
    ///
    /// Logs one line per request; `path` is `-` when the request could not
    /// be parsed.
    pub fn handle(&self, raw: &[u8]) -> Response {
        let method = leading_method(raw);
        let (path, outcome) = match parse_request(raw) {
            Ok(req) => {
                let outcome = self.dispatch(&req);
                (req.path, outcome)
            }
            Err(failure) => (String::from("-"), Err(failure)),
        };
        let res = match outcome {
            Ok(res) => res,
            Err(failure) => self.fail(&failure, method),
        };
        info!(method, path = %path, status = res.status().code(), "request handled");
        res
    }

    fn dispatch(&self, req: &Request) -> Result<Response, Failure> {
        debug!(method = req.method(), path = req.path(), "request parsed");

        if req.version() != HTTP_VERSION {
            return Err(Failure::VersionMismatch { version: req.version().to_owned() });
        }
        let method = req.method_kind().ok_or(Reason::UnknownMethod)?;

        let Normalized { target, redirect } = normalize(req.path(), &self.valid);
        if redirect {
            return Ok(Response::builder()
                .status(Status::MovedPermanently)
                .header("Location", &target)
                .no_body());
        }

        match method {
            Method::Get | Method::Head => self.serve_page(req, method, &target),
            Method::Post | Method::Put | Method::Delete => self.mutate(req, method),
        }
    }

    fn serve_page(&self, req: &Request, method: Method, target: &str) -> Result<Response, Failure> {
        if !self.valid.contains(target) {
            return Err(Failure::NotFound { path: target.to_owned() });
        }
        if target == INDEX_PATH {
            self.auth.require(req)?;
        }

        let file = self.public_dir.join(target.trim_start_matches('/'));
        let (content, validators) = Validators::load(&file)?;
        let status = if validators.is_fresh(req) { Status::NotModified } else { Status::Ok };

        let mut builder = Response::builder().status(status);
        for (name, value) in validators.headers(self.max_age) {
            builder = builder.header(name, &value);
        }
        if method == Method::Get && status == Status::Ok {
            Ok(builder.body(content))
        } else {
            Ok(builder.no_body())
        }
    }

    fn mutate(&self, req: &Request, method: Method) -> Result<Response, Failure> {
        let path = req.path();

        if method == Method::Post && path == LOGIN_PATH {
            let cookie = self.auth.login(req.body(), SystemTime::now())?;
            return Ok(Response::builder().header("Set-Cookie", &cookie).body(LOGIN_OK_BODY));
        }

        if !path.starts_with(ITEMS_PREFIX) {
            return Err(Reason::Unroutable.into());
        }
        self.auth.require(req)?;
        let route = self.items.lookup(method, path).ok_or(Reason::Unroutable)?;

        match (route.action, route.value.as_deref()) {
            (ItemAction::Create, Some(value)) => self.store.create(&route.key, value)?,
            (ItemAction::Update, Some(value)) => self.store.update(&route.key, value)?,
            (ItemAction::Delete, _)           => self.store.delete(&route.key)?,
            _ => return Err(Reason::Unroutable.into()),
        }
        Ok(Response::status_only(Status::Ok))
    }

    /// Maps a failure to its response. Only GET and HEAD get a page body.
    fn fail(&self, failure: &Failure, method: &str) -> Response {
        match failure {
            Failure::BadRequest(Reason::Io | Reason::UnknownStructure) => {
                warn!(%failure, "request failed");
            }
            _ => debug!(%failure, "request failed"),
        }

        let status = failure.status();
        match method.parse::<Method>() {
            Ok(m) if m.is_read() => Response::builder().status(status).body(self.pages.body_for(status)),
            _ => Response::status_only(status),
        }
    }
}
