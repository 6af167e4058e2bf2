//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → user.rs | health.rs | static files | 404 fallback
//!     → error.rs (ApiError → JSON body + status)
//!     → response.rs (security headers, panic boundary)
//!     → Send to client
//! ```

pub mod error;
pub mod health;
pub mod request;
pub mod response;
pub mod server;
pub mod user;

pub use error::{ApiError, ErrorBody};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{create_router, AppState, HttpServer};
