//! Tracing subscriber setup
//!
//! The terminal is in raw mode on the alternate screen while the pager runs,
//! so diagnostics go to a file instead of stderr.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log location: `<temp dir>/fpage.log`
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("fpage.log")
}

/// Initialize the global tracing subscriber writing to `log_file_path`.
///
/// Filtering follows `RUST_LOG`, defaulting to INFO.
pub fn init_global(log_file_path: &Path) -> anyhow::Result<()> {
    let log_file = File::create(log_file_path)?;
    build_subscriber(log_file, default_filter()).try_init()?;
    Ok(())
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build a subscriber that writes to `log_file`.
///
/// This is the subscriber configuration shared between production and tests.
pub fn build_subscriber(
    log_file: File,
    env_filter: EnvFilter,
) -> impl tracing::Subscriber + Send + Sync {
    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
}
