use crate::config::{Config, LOG_ENV};
use anyhow::{Context, Result};
use std::env::VarError;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `CANCELFLOW_LOG` wins over the config file.
pub fn init_tracing(config: &Config) -> Result<()> {
    let from_env = match std::env::var(LOG_ENV) {
        Ok(directives) => Some(directives),
        Err(VarError::NotPresent) => None,
        Err(err) => return Err(err).with_context(|| format!("Invalid {LOG_ENV}")),
    };
    let filter = build_filter(from_env.as_deref(), config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// An unset variable falls back to the config; a malformed one is an error.
fn build_filter(from_env: Option<&str>, config: &Config) -> Result<EnvFilter> {
    match from_env {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid {LOG_ENV}: {directives}")),
        None => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("Invalid log filter: {}", config.log_filter)),
    }
}
