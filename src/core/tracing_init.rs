use crate::core::config::{LogFormat, LoggingConfig};
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level applied to dependencies when `RUST_LOG` is unset
const DEPENDENCY_LEVEL: &str = "warn";

/// Filter used when `RUST_LOG` is unset: the gateway at the configured
/// level, everything else at `DEPENDENCY_LEVEL`.
pub fn default_directives(config: &LoggingConfig) -> String {
    format!(
        "{},{}={}",
        DEPENDENCY_LEVEL,
        env!("CARGO_CRATE_NAME"),
        config.level
    )
}

/// Console output is chosen by either `console = true` or `format = "console"`
pub fn effective_format(config: &LoggingConfig) -> LogFormat {
    if config.console {
        LogFormat::Console
    } else {
        config.format
    }
}

/// Install the global subscriber for a host embedding the gateway.
/// Fails if one is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(config)))
        .context("Failed to build log filter")?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match effective_format(config) {
        LogFormat::Console => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true),
            )
            .try_init(),
    }
    .context("Failed to install tracing subscriber")
}
