//! Liveness endpoint.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
}

/// Returns `{"status":"ok","timestamp":...}` while the process can answer.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
