//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::PhonebookConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_LOG_LEVEL: &str = "PHONEBOOK_LOG";
pub const ENV_CONFIG_PATH: &str = "PHONEBOOK_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {name} value `{value}`")]
    Env { name: &'static str, value: String },

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

/// Parse a TOML file without validating it.
pub fn read_config_file(path: &Path) -> Result<PhonebookConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment values onto a configuration.
///
/// `lookup` abstracts `std::env::var` so the overlay can be tested without
/// touching the process environment.
pub fn apply_env_overrides<F>(config: &mut PhonebookConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_PORT) {
        let port = raw.trim().parse::<u16>().map_err(|_| ConfigError::Env {
            name: ENV_PORT,
            value: raw.clone(),
        })?;
        config.listener.port = Some(port);
    }
    if let Some(url) = lookup(ENV_DATABASE_URL).filter(|u| !u.is_empty()) {
        config.store.url = Some(url);
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|l| !l.is_empty()) {
        config.observability.log_level = level;
    }
    Ok(())
}

/// Build the runtime configuration: defaults, optional file, environment, validation.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<PhonebookConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => PhonebookConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// `load_config` against the real process environment.
pub fn load_from_env(path: Option<&Path>) -> Result<PhonebookConfig, ConfigError> {
    load_config(path, |name| std::env::var(name).ok())
}
