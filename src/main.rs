//! docserve binary.
//!
//! Run from the directory holding `public/` and `private/`, or point at them:
//!
//!   DOCSERVE_ADDR=127.0.0.1:8080 DOCSERVE_PUBLIC_DIR=./site RUST_LOG=debug docserve
//!
//! Try:
//!   curl -i http://localhost:8080/
//!   curl -i -X POST http://localhost:8080/login.html -d 'username=admin&password=admin'
//!   curl -i -X POST http://localhost:8080/index/items/7/foo -H 'Cookie: <token>'

use docserve::{Config, Server, Site};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), docserve::Error> {
    docserve::logging::init_logging();

    let config = Config::from_env();
    let site = Site::from_config(&config)?;

    Server::bind(&config.addr)?
        .read_buffer(config.read_buffer)
        .serve(site)
        .await
}
