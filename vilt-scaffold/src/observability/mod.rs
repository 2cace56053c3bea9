//! Observability (logging, tracing)
//!
//! Diagnostics go to stderr through `tracing`; user-facing progress lines are
//! printed by the CLI and are not part of this stack.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines (default)
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Initialize the logging stack
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Without it the level is
/// derived from the number of `-v` flags: warn, info, debug, then trace.
///
/// # Example
///
/// ```rust,no_run
/// use vilt_scaffold::observability::{self, LogFormat};
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(1, LogFormat::Compact)?;
/// tracing::info!("generator started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8, format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

/// Filter directive for a `-v` count
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
