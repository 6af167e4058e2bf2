//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → per-request spans (http::request) carrying the request ID
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
