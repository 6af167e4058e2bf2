//! Stop signal shared by the signal handler and the HTTP server.
//!
//! SIGINT/SIGTERM call [`Shutdown::trigger`]. `HttpServer::run` holds a
//! receiver, stops accepting connections when it fires, and lets in-flight
//! `/user` lookups finish (each is bounded by the upstream timeout).

use tokio::sync::broadcast;

/// Handle used to stop a running gateway.
///
/// Cloning shares the channel, so the signal task and tests can each hold one.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. A no-op when nobody is listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
