//! Logging bootstrap for unit tests: compact output, quiet by default,
//! RUST_LOG overrides. Safe to call more than once.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer().with_target(false).with_test_writer();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
