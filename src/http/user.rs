//! `GET /user/{id}`: validate, fetch upstream, reshape.
//!
//! ```text
//! ReceivedRequest ─▶ Validated ─▶ Fetched ─▶ Responded (200)
//!        │                │
//!        ▼                ▼
//!  RejectedInvalidId  RejectedUpstreamFailure
//!       (400)               (500)
//! ```

use axum::extract::{rejection::PathRejection, Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::users::{InvalidUserId, UserId};

/// Successful lookup body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub user: Value,
}

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    // A segment that doesn't even decode is just another invalid id.
    let Path(raw) = path.map_err(|_| InvalidUserId)?;
    let id = UserId::parse(raw)?;

    let user = state.users.fetch_user(&id).await.map_err(|err| {
        tracing::error!(
            user_id = %id,
            error = %err,
            timeout = err.is_timeout(),
            "Error fetching user"
        );
        ApiError::from(err)
    })?;

    Ok(Json(UserResponse {
        user_id: id.as_str().to_string(),
        user,
    }))
}
