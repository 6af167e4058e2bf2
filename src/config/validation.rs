//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Keep the inbound timeout longer than the upstream timeout, so a slow
//!   upstream ends as an upstream failure rather than an inbound timeout
//! - Check the upstream base URL is an absolute http(s) URL
//! - Refuse to run in production without a secret
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BindAddress(String),

    #[error("upstream.base_url '{0}' is not a valid http(s) URL")]
    UpstreamUrl(String),

    #[error("upstream.timeout_secs must be greater than zero")]
    UpstreamTimeout,

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error(
        "timeouts.request_secs ({request_secs}) must be greater than \
         upstream.timeout_secs ({upstream_secs})"
    )]
    RequestTimeoutTooShort { request_secs: u64, upstream_secs: u64 },

    #[error("secret_key must be defined for production")]
    MissingSecret,
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let url_ok = Url::parse(&config.upstream.base_url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !url_ok {
        errors.push(ValidationError::UpstreamUrl(config.upstream.base_url.clone()));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::UpstreamTimeout);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    let request_secs = config.timeouts.request_secs;
    let upstream_secs = config.upstream.timeout_secs;
    if request_secs > 0 && upstream_secs > 0 && request_secs <= upstream_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs,
            upstream_secs,
        });
    }

    let has_secret = config
        .secret_key
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());
    if config.environment.is_production() && !has_secret {
        errors.push(ValidationError::MissingSecret);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
