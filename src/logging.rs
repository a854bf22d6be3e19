use std::io;

use tracing_subscriber::{self, fmt, prelude::*, EnvFilter};

/// Initialize stderr logging.
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log level (otherwise uses RUST_LOG or defaults to "info")
///
/// Safe to call more than once; later calls return an error and leave the
/// first subscriber installed, which is what tests want.
pub fn init_logger(no_color: bool, log_level: Option<&str>) -> io::Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .map_err(io::Error::other)
}
