//! User lookup subsystem.
//!
//! # Data Flow
//! ```text
//! route parameter
//!     → id.rs (digits-only gate, UserId)
//!     → client.rs (one GET to the upstream, UpstreamError on any failure)
//!     → serde_json::Value handed back to the HTTP layer
//! ```

pub mod client;
pub mod id;

pub use client::{HttpUserSource, UpstreamError, UserSource};
pub use id::{is_valid_user_id, InvalidUserId, UserId};
