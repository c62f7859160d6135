//! Tracing subscriber setup

use tg_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter built from `RUST_LOG` when set, otherwise from the configured level
///
/// A bare level such as `debug` applies to the workspace crates only and
/// keeps dependencies at `warn`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.level.trim();
        let directives = if level.contains('=') || level.contains(',') {
            level.to_string()
        } else {
            format!(
                "warn,tg_api={level},tg_core={level},tg_infra={level},tg_shared={level},tracing_actix_web={level}"
            )
        };
        EnvFilter::new(directives)
    })
}

/// Install the global subscriber
///
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().compact().with_target(true))
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_scopes_workspace_crates() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
        };

        let filter = env_filter(&config).to_string();
        if std::env::var("RUST_LOG").is_err() {
            assert!(filter.contains("tg_core=debug"));
            assert!(filter.contains("warn"));
        }
    }

    #[test]
    fn test_full_directive_is_kept() {
        let config = LoggingConfig {
            level: "info,tg_infra=trace".to_string(),
            format: LogFormat::Json,
        };

        let filter = env_filter(&config).to_string();
        if std::env::var("RUST_LOG").is_err() {
            assert!(filter.contains("tg_infra=trace"));
        }
    }
}
