//! Logging initialisation.
//!
//! The level is controlled by `RUST_LOG`:
//!
//! ```bash
//! # per-request lines and connection events
//! RUST_LOG=docserve=debug docserve
//!
//! # only failures worth looking at
//! RUST_LOG=warn docserve
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Call once at startup. A second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
