//! User gateway library.
//!
//! A small HTTP service in front of a third-party user API:
//!
//! ```text
//! GET /user/{id}
//!     → users::id      (digits-only gate)          ─ 400 on reject
//!     → users::client  (one GET to the upstream)   ─ 500 on any failure
//!     → {"userId": id, "user": <upstream document>}
//!
//! GET /health          → {"status":"ok","timestamp":...}
//! other GET/HEAD       → static files, else 404 JSON
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod users;

pub use config::AppConfig;
pub use http::{create_router, HttpServer};
pub use lifecycle::Shutdown;
