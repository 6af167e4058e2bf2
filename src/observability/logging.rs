//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Honour `RUST_LOG`, falling back to the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Default filter covers this crate and tower_http (request/response lines)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    let level = config.log_level.trim();
    let level = if level.is_empty() { "info" } else { level };
    format!("user_gateway={level},tower_http={level}")
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let mut config = ObservabilityConfig::default();
        assert_eq!(default_directives(&config), "user_gateway=info,tower_http=info");

        config.log_level = "debug".into();
        assert_eq!(default_directives(&config), "user_gateway=debug,tower_http=debug");

        config.log_level = "  ".into();
        assert_eq!(default_directives(&config), "user_gateway=info,tower_http=info");
    }
}
