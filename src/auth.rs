//! Login and cookie gate.
//!
//! There is one shared token. A successful login hands it out in a
//! `Set-Cookie` header; gated requests must echo it back verbatim in
//! `Cookie`. The `Expires` attribute is advisory for the client, the server
//! keeps no session state and never checks expiry.

use std::time::{Duration, SystemTime};

use crate::error::{Failure, Reason};
use crate::request::Request;

/// Fixed credentials and the token they unlock.
#[derive(Clone)]
pub struct AuthGate {
    username: String,
    password: String,
    token: String,
    cookie_ttl: Duration,
}

impl AuthGate {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
        cookie_ttl: Duration,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: token.into(),
            cookie_ttl,
        }
    }

    /// Checks a login body and returns the `Set-Cookie` value on success.
    ///
    /// The body lines are joined and must split on `&` into exactly two
    /// `name=value` fields: username first, password second.
    pub fn login(&self, body: &[String], now: SystemTime) -> Result<String, Failure> {
        let joined = body.concat();
        let mut fields = joined.split('&');
        let (Some(user), Some(pass), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(Reason::MalformedLogin.into());
        };
        let user = field_value(user)?;
        let pass = field_value(pass)?;

        if user != self.username || pass != self.password {
            return Err(Reason::BadCredentials.into());
        }
        let expires = httpdate::fmt_http_date(now + self.cookie_ttl);
        Ok(format!("{}; Expires={expires};", self.token))
    }

    /// Passes when the request's `Cookie` header is exactly the shared token.
    pub fn require(&self, req: &Request) -> Result<(), Failure> {
        match req.header("Cookie") {
            Some(cookie) if token_matches(cookie, &self.token) => Ok(()),
            _ => Err(Reason::Unauthorized.into()),
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .field("cookie_ttl", &self.cookie_ttl)
            .finish()
    }
}

fn field_value(field: &str) -> Result<&str, Failure> {
    field
        .split_once('=')
        .map(|(_, value)| value)
        .ok_or_else(|| Reason::MalformedLogin.into())
}

/// Constant-time comparison over equal-length inputs.
fn token_matches(presented: &str, expected: &str) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
