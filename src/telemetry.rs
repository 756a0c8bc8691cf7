//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry, util::TryInitError};

/// Maps a `-v` count to the default log level.
#[must_use]
pub const fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Builds the log filter. `RUST_LOG` takes precedence over `verbosity`.
#[must_use]
pub fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("diesel=warn,{}", level_for(verbosity))))
}

/// Installs a stderr subscriber as the global default.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init_tracing(verbosity: u8) -> Result<(), TryInitError> {
    registry()
        .with(filter_for(verbosity))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
