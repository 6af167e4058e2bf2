//! Response hardening and the panic boundary.
//!
//! # Responsibilities
//! - Add security response headers
//! - Turn a panicking handler into a JSON 500
//! - Give the inbound timeout's bare 408 a JSON body
//!
//! # Design Decisions
//! - No `x-powered-by` or `server` banner is ever emitted
//! - The panic payload is logged, never returned

use std::any::Any;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::http::error::ApiError;

pub fn nosniff_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    )
}

pub fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("DENY"),
    )
}

/// Handler for `CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Unhandled error");
    ApiError::Internal.into_response()
}

/// Response mapper for the inbound timeout, which answers with an empty 408.
pub async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request exceeded the inbound timeout");
        return ApiError::RequestTimeout.into_response();
    }
    response
}
