//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` in debug mode
/// and `info` otherwise. Returns `false` if a global subscriber was already
/// installed.
pub fn init_logging(debug_mode: bool) -> bool {
    let fallback = if debug_mode { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .try_init()
        .is_ok()
}
