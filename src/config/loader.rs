//! Configuration loading from disk and environment.
//!
//! Precedence, lowest first: built-in defaults, TOML file, environment
//! variables. Command-line flags are applied by the binary on top.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{AppConfig, Environment};
use crate::config::validation::ValidationError;

/// Port to listen on.
pub const ENV_PORT: &str = "APP_PORT";
/// Application secret.
pub const ENV_SECRET_KEY: &str = "SECRET_KEY";
/// development | production | test
pub const ENV_ENVIRONMENT: &str = "APP_ENV";
pub const ENV_UPSTREAM_BASE_URL: &str = "UPSTREAM_BASE_URL";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file and the process environment.
///
/// The result is not validated; call
/// [`validate_config`](crate::config::validation::validate_config) once every
/// override has been applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Like [`load_config`], with an explicit variable lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    Ok(config)
}

/// Overlay environment variables onto `config`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_PORT) {
        let port = value.trim().parse::<u16>().map_err(|e| ConfigError::Env {
            var: ENV_PORT,
            value: value.clone(),
            reason: e.to_string(),
        })?;
        config.listener.set_port(port);
    }

    if let Some(value) = lookup(ENV_SECRET_KEY) {
        config.secret_key = Some(value);
    }

    if let Some(value) = lookup(ENV_ENVIRONMENT) {
        config.environment = value.parse::<Environment>().map_err(|reason| ConfigError::Env {
            var: ENV_ENVIRONMENT,
            value: value.clone(),
            reason,
        })?;
    }

    if let Some(value) = lookup(ENV_UPSTREAM_BASE_URL) {
        config.upstream.base_url = value;
    }

    if let Some(value) = lookup(ENV_UPSTREAM_TIMEOUT_SECS) {
        config.upstream.timeout_secs =
            value.trim().parse::<u64>().map_err(|e| ConfigError::Env {
                var: ENV_UPSTREAM_TIMEOUT_SECS,
                value: value.clone(),
                reason: e.to_string(),
            })?;
    }

    if let Some(value) = lookup(ENV_STATIC_DIR) {
        config.static_files.dir = value;
    }

    if let Some(value) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = value;
    }

    Ok(())
}
