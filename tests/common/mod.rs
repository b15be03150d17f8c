#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use docserve::{Config, Site};
use tempfile::TempDir;

pub const TOKEN: &str = "token=test-cookie";

pub const INDEX: &str = "<html>\n    <body>\n        <h1>Items</h1><br>\n        <p>Item 1 = one</p>\n    </body>\n</html>\n";
pub const LOGIN: &str = "<html><body><form>login</form></body></html>\n";
pub const ABOUT: &str = "<html><body>about</body></html>\n";

pub const BAD_REQUEST_PAGE: &str = "<h1>400 bad request</h1>";
pub const NOT_FOUND_PAGE: &str = "<h1>404 not found</h1>";
pub const VERSION_PAGE: &str = "<h1>505 unsupported version</h1>";

/// A site rooted in a temporary directory. The directory lives as long as
/// the fixture.
pub struct Fixture {
    pub dir: TempDir,
    pub config: Config,
    pub site: Site,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        let private = dir.path().join("private");
        fs::create_dir(&public).unwrap();
        fs::create_dir(&private).unwrap();

        fs::write(public.join("index.html"), INDEX).unwrap();
        fs::write(public.join("login.html"), LOGIN).unwrap();
        fs::write(public.join("about.html"), ABOUT).unwrap();
        fs::write(private.join("__bad-request.html"), BAD_REQUEST_PAGE).unwrap();
        fs::write(private.join("__not-found.html"), NOT_FOUND_PAGE).unwrap();
        fs::write(private.join("__http-version-not-supported.html"), VERSION_PAGE).unwrap();

        let config = Config {
            public_dir: public,
            private_dir: private,
            token: TOKEN.to_owned(),
            ..Config::default()
        };
        let site = Site::from_config(&config).unwrap();
        Self { dir, config, site }
    }

    pub fn document(&self) -> String {
        fs::read_to_string(self.document_path()).unwrap()
    }

    pub fn document_path(&self) -> PathBuf {
        self.config.document_path()
    }
}

pub fn get(path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n")
}

pub fn with_cookie(method: &str, path: &str) -> String {
    format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nCookie: {TOKEN}\r\n\r\n")
}
