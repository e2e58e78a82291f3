//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require a listening port
//! - Validate value ranges (timeouts > 0, limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PhonebookConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::IpAddr;
use thiserror::Error;

use crate::config::schema::PhonebookConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listening port is not set (set PORT or listener.port)")]
    MissingPort,

    #[error("listener.host `{0}` is not an IP address")]
    InvalidHost(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("store.url `{0}` has an unsupported scheme (expected sqlite: or memory://)")]
    UnsupportedStore(String),
}

/// Check a configuration, collecting every problem.
pub fn validate_config(config: &PhonebookConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port.is_none() {
        errors.push(ValidationError::MissingPort);
    }
    if config.listener.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.store.timeout_ms == 0 {
        errors.push(ValidationError::Zero("store.timeout_ms"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }
    if let Some(url) = &config.store.url {
        if !(url.starts_with("sqlite:") || url.starts_with("memory:")) {
            errors.push(ValidationError::UnsupportedStore(url.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
