//! Diagnostic tracing for the command line front end.
//!
//! Reads `RUST_LOG`, defaulting to `warn`. Output goes to stderr so that stdout
//! only carries the machine's results.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=utm=trace utm-cli --builtin binary-increment
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
