//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, security headers, timeout, panic boundary)
//! - Serve static files for unmatched GET/HEAD requests
//! - Answer everything else with a JSON 404
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware::map_response,
    routing::{any, get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::error::route_not_found;
use crate::http::health::health_check;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::response::{frame_options_layer, handle_panic, nosniff_layer, timeout_as_json};
use crate::http::user::get_user;
use crate::users::{HttpUserSource, UserSource};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserSource>,
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn create_router(config: &AppConfig, users: Arc<dyn UserSource>) -> Router {
    let state = AppState { users };

    let router = Router::new()
        .route("/user/{id}", get(get_user))
        .route("/health", get(health_check))
        .method_not_allowed_fallback(route_not_found);

    let router = if config.static_files.enabled {
        let not_found: MethodRouter = any(route_not_found);
        let files = ServeDir::new(&config.static_files.dir)
            .call_fallback_on_method_not_allowed(true)
            .fallback(not_found);
        router.fallback_service(files)
    } else {
        router.fallback(route_not_found)
    };

    let mut router = router
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(map_response(timeout_as_json));

    if config.security.enable_headers {
        router = router.layer(nosniff_layer()).layer(frame_options_layer());
    }

    router
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(set_request_id_layer())
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server that resolves users through the configured upstream.
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let users = Arc::new(HttpUserSource::new(&config.upstream)?);
        Ok(Self::with_user_source(config, users))
    }

    /// Create a server with an explicit user source.
    pub fn with_user_source(config: AppConfig, users: Arc<dyn UserSource>) -> Self {
        let router = create_router(&config, users);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            "Server successfully started"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
