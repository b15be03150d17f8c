//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Settings read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Listen address (default: 0.0.0.0:80)
    pub addr: String,

    /// Directory whose listing defines the servable pages (default: ./public).
    /// Its `index.html` is the item document.
    pub public_dir: PathBuf,

    /// Directory holding the 400/404/505 pages (default: ./private)
    pub private_dir: PathBuf,

    /// Login username (default: admin)
    pub username: String,

    /// Login password (default: admin)
    pub password: String,

    /// Shared cookie value handed out on login and required on gated routes
    pub token: String,

    /// Advisory cookie lifetime sent in `Expires` (default: 600 s)
    pub cookie_ttl: Duration,

    /// `Cache-Control: max-age` for pages (default: 30 s)
    pub max_age: u64,

    /// Bytes read from a connection as the whole request (default: 1024)
    pub read_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:80".to_string(),
            public_dir: PathBuf::from("public"),
            private_dir: PathBuf::from("private"),
            username: "admin".to_string(),
            password: "admin".to_string(),
            token: "token=coooooooooooooooooooooooooooooooookieeeeeee".to_string(),
            cookie_ttl: Duration::from_secs(600),
            max_age: 30,
            read_buffer: 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (with .env support).
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let num = |name: &str| var(name).and_then(|v| v.parse::<u64>().ok());
        Self {
            addr: var("DOCSERVE_ADDR").unwrap_or(d.addr),
            public_dir: var("DOCSERVE_PUBLIC_DIR").map(PathBuf::from).unwrap_or(d.public_dir),
            private_dir: var("DOCSERVE_PRIVATE_DIR").map(PathBuf::from).unwrap_or(d.private_dir),
            username: var("DOCSERVE_USERNAME").unwrap_or(d.username),
            password: var("DOCSERVE_PASSWORD").unwrap_or(d.password),
            token: var("DOCSERVE_TOKEN").unwrap_or(d.token),
            cookie_ttl: num("DOCSERVE_COOKIE_TTL_SECS").map(Duration::from_secs).unwrap_or(d.cookie_ttl),
            max_age: num("DOCSERVE_MAX_AGE_SECS").unwrap_or(d.max_age),
            read_buffer: num("DOCSERVE_READ_BUFFER")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(d.read_buffer),
        }
    }

    /// The item document.
    pub fn document_path(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg.addr, "0.0.0.0:80");
        assert_eq!(cfg.cookie_ttl, Duration::from_secs(600));
        assert_eq!(cfg.max_age, 30);
        assert_eq!(cfg.document_path(), PathBuf::from("public/index.html"));
    }

    #[test]
    fn env_values_override_and_bad_numbers_fall_back() {
        let vars: HashMap<&str, &str> = [
            ("DOCSERVE_ADDR", "127.0.0.1:8080"),
            ("DOCSERVE_PUBLIC_DIR", "/srv/site"),
            ("DOCSERVE_MAX_AGE_SECS", "60"),
            ("DOCSERVE_READ_BUFFER", "lots"),
        ]
        .into_iter()
        .collect();
        let cfg = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.addr, "127.0.0.1:8080");
        assert_eq!(cfg.document_path(), PathBuf::from("/srv/site/index.html"));
        assert_eq!(cfg.max_age, 60);
        assert_eq!(cfg.read_buffer, 1024);
    }
}
