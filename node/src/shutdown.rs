//! Graceful shutdown coordination.
//!
//! The node runs its sweepers and the HTTP server as background tasks;
//! each of them holds a receiver from this controller and exits its loop
//! when the shutdown signal arrives.

use tokio::signal;
use tokio::sync::broadcast;

/// Broadcasts a single shutdown signal to every subsystem.
///
/// Subsystems call [`subscribe`](Self::subscribe) to get a receiver, then
/// `select!` on it alongside their main loop. Shutdown can come from an OS
/// signal (via [`wait_for_signal`](Self::wait_for_signal)) or be triggered
/// programmatically.
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver that resolves once shutdown begins.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Begin shutdown. Safe to call with no subscribers and safe to call
    /// more than once.
    pub fn shutdown(&self) {
        let _ = self.tx.send(());
    }

    /// Block until the process receives SIGINT or SIGTERM, then begin
    /// shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("SIGINT received, beginning shutdown"); }
            _ = terminate => { tracing::info!("SIGTERM received, beginning shutdown"); }
        }

        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
