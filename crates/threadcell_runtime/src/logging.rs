//! `tracing` subscriber setup.

use threadcell_foundation::{Error, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Installs a global subscriber writing to stderr at `level`.
///
/// # Errors
///
/// Returns an `Internal` error if a global subscriber is already set.
pub fn init(level: LevelFilter) -> Result<()> {
    let filter = Targets::new().with_default(level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()
        .map_err(|e| Error::internal(format!("logging: {e}")))
}
