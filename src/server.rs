//! TCP listener and graceful shutdown.
//!
//! # One connection at a time
//!
//! Connections are accepted and answered strictly in sequence: accept,
//! read one chunk as the whole request, write the response, close. No task
//! is spawned per connection. The item store rewrites its document without
//! a lock and relies on this.
//!
//! # Shutdown
//!
//! **SIGTERM** or **SIGINT** (Ctrl-C) stops the accept loop. Since at most one
//! request is ever in flight and it is handled inline, there is nothing to
//! drain: the loop finishes the current connection and returns.

use std::future::Future;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::error::Error;
use crate::handler::Site;

const DEFAULT_READ_BUFFER: usize = 1024;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    read_buffer: usize,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust
    /// use docserve::Server;
    /// let server = Server::bind("0.0.0.0:8080").unwrap();
    /// assert!(Server::bind("not an address").is_err());
    /// ```
    pub fn bind(addr: &str) -> Result<Self, Error> {
        let addr: SocketAddr = addr.parse().map_err(|_| Error::Addr(addr.to_owned()))?;
        Ok(Self { addr, read_buffer: DEFAULT_READ_BUFFER })
    }

    /// Bytes read from each connection as the complete request.
    pub fn read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer = bytes.max(1);
        self
    }

    /// Starts accepting connections and answering them through `site`.
    ///
    /// Returns after SIGTERM or Ctrl-C.
    pub async fn serve(self, site: Site) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "docserve listening");
        run(listener, &site, self.read_buffer, shutdown_signal()).await;
        info!("docserve stopped");
        Ok(())
    }
}

/// Accept loop over an already bound listener, until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    site: &Site,
    read_buffer: usize,
    shutdown: impl Future<Output = ()>,
) {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Check shutdown first so a signal stops accepting even if more
            // connections are queued.
            biased;

            () = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }

            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };
                serve_connection(site, stream, peer, read_buffer).await;
            }
        }
    }
}

// ── Connection handling ───────────────────────────────────────────────────────

/// Reads one chunk, answers it, closes the connection.
async fn serve_connection(site: &Site, mut stream: TcpStream, peer: SocketAddr, read_buffer: usize) {
    debug!(%peer, "connection accepted");

    let mut buf = vec![0u8; read_buffer];
    let n = match stream.read(&mut buf).await {
        Ok(0) => {
            debug!(%peer, "connection closed before sending a request");
            return;
        }
        Ok(n) => n,
        Err(e) => {
            error!(%peer, "read error: {e}");
            return;
        }
    };

    let response = site.handle(&buf[..n]);
    if let Err(e) = response.write_to(&mut stream).await {
        error!(%peer, "write error: {e}");
        return;
    }
    if let Err(e) = stream.shutdown().await {
        debug!(%peer, "shutdown error: {e}");
    }
    debug!(%peer, "connection closed");
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available. A handler that cannot be installed
/// is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    // `pending()` is a future that never resolves — on non-Unix platforms
    // the SIGTERM arm is effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
