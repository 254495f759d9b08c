//! Logging setup.
//!
//! Library code only emits `tracing` events. Binaries, benches and tests
//! that want to see them call [`init_tracing`] once.

use crate::config::TraversalConfig;
use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_filter`. Returns false if a
/// global subscriber was already installed.
pub fn init_tracing(config: &TraversalConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true);

    if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
