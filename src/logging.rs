//! Logging setup.
//!
//! The library only emits `tracing` events; a binary installs a subscriber
//! once at startup. Levels come from `RUST_LOG`, falling back to the level
//! passed in. Output goes to stderr so stdout stays clean for JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g. a second
/// call from tests).
///
/// # Example
///
/// ```no_run
/// u_fixture::logging::init(u_fixture::logging::DEFAULT_FILTER);
/// tracing::info!("scheduler starting");
/// ```
pub fn init(default_filter: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init("debug");
        assert!(!init("debug"));
    }
}
