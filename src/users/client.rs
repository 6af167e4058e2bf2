//! Upstream user API client.
//!
//! # Responsibilities
//! - Issue exactly one GET per lookup to `{base_url}/users/{id}`
//! - Treat any non-2xx status as a failure
//! - Decode the body as JSON and hand it back untouched
//!
//! # Design Decisions
//! - No retries and no circuit breaking
//! - Timeout comes from config; there is no unbounded call
//! - Callers see one error type; the variants only exist for logging

use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::users::id::UserId;

/// Failure while fetching a user from the upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status { status: StatusCode },

    /// Connection, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl UpstreamError {
    /// True if the request never produced a response in time.
    pub fn is_timeout(&self) -> bool {
        match self {
            UpstreamError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Something that can resolve a user id into a user document.
pub trait UserSource: Send + Sync {
    fn fetch_user<'a>(&'a self, id: &'a UserId) -> BoxFuture<'a, Result<Value, UpstreamError>>;
}

/// [`UserSource`] backed by the third-party REST API.
#[derive(Debug, Clone)]
pub struct HttpUserSource {
    client: Client,
    base_url: String,
}

impl HttpUserSource {
    /// Build a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL a given user is fetched from.
    pub fn user_url(&self, id: &UserId) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    async fn get_user(&self, id: &UserId) -> Result<Value, UpstreamError> {
        let url = self.user_url(id);
        tracing::debug!(url = %url, "Fetching user from upstream");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { status });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                UpstreamError::Decode(e)
            } else {
                UpstreamError::Transport(e)
            }
        })
    }
}

impl UserSource for HttpUserSource {
    fn fetch_user<'a>(&'a self, id: &'a UserId) -> BoxFuture<'a, Result<Value, UpstreamError>> {
        Box::pin(self.get_user(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_url_trims_trailing_slash() {
        let config = UpstreamConfig {
            base_url: "http://users.internal/api/".into(),
            ..UpstreamConfig::default()
        };
        let source = HttpUserSource::new(&config).unwrap();
        let id = UserId::parse("12").unwrap();
        assert_eq!(source.user_url(&id), "http://users.internal/api/users/12");
    }

    #[test]
    fn test_status_error_message() {
        let err = UpstreamError::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "HTTP error! status: 404 Not Found");
        assert!(!err.is_timeout());
    }
}
