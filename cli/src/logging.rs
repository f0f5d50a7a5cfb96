//! Diagnostic logging setup for the `dem` entrypoint.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Initialize tracing.
///
/// Diagnostics go to stderr without timestamps so they interleave cleanly
/// with command output. `--debug` forces the `debug` level for this crate;
/// otherwise `RUST_LOG` applies, defaulting to `warn`.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("warn,dem_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let format = tracing_subscriber::fmt::format()
        .without_time()
        .with_target(false)
        .compact();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
