//! API error taxonomy and its JSON rendering.
//!
//! Every error leaves the server as `{"error": "<message>"}` with a fixed
//! message per kind. Underlying causes are logged where they happen and are
//! never serialized.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::users::{InvalidUserId, UpstreamError};

pub const INVALID_USER_ID_MESSAGE: &str = "Invalid user ID. Must be a positive integer.";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch user data";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors a request can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidUserId(#[from] InvalidUserId),

    #[error("Failed to fetch user data")]
    UpstreamFailure(#[source] UpstreamError),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Internal server error")]
    Internal,

    #[error("Request timed out")]
    RequestTimeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Client-facing message. Never includes the underlying cause.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidUserId(_) => INVALID_USER_ID_MESSAGE,
            ApiError::UpstreamFailure(_) => UPSTREAM_FAILURE_MESSAGE,
            ApiError::RouteNotFound => ROUTE_NOT_FOUND_MESSAGE,
            ApiError::Internal => INTERNAL_ERROR_MESSAGE,
            ApiError::RequestTimeout => REQUEST_TIMEOUT_MESSAGE,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::UpstreamFailure(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Fallback for requests no route or static file matched.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_id_renders_400() {
        let (status, body) = body_of(ApiError::from(InvalidUserId)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            r#"{"error":"Invalid user ID. Must be a positive integer."}"#
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_hides_cause() {
        let err = ApiError::from(UpstreamError::Status {
            status: StatusCode::NOT_FOUND,
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Failed to fetch user data"}"#);
    }

    #[tokio::test]
    async fn test_not_found_and_internal() {
        let (status, body) = body_of(ApiError::RouteNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Route not found"}"#);

        let (status, body) = body_of(ApiError::Internal).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Internal server error"}"#);

        let (status, body) = body_of(ApiError::RequestTimeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body, r#"{"error":"Request timed out"}"#);
    }

    #[test]
    fn test_display_matches_message() {
        assert_eq!(ApiError::RouteNotFound.to_string(), ApiError::RouteNotFound.message());
        assert_eq!(
            ApiError::from(InvalidUserId).to_string(),
            INVALID_USER_ID_MESSAGE
        );
    }
}
