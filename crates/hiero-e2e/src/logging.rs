//! Test logging setup
//!
//! Output goes through the test writer so `cargo test` captures it per test.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber with the default filter.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install the global subscriber, falling back to `default_filter` when
/// `RUST_LOG` is unset or invalid. Returns `false` if a subscriber was
/// already installed.
pub fn init_with_filter(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer().with_target(true))
        .with(filter)
        .try_init()
        .is_ok()
}
