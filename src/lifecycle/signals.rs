//! OS signal handling.

use tokio::signal;

use crate::lifecycle::Shutdown;

/// Spawn a background task that translates SIGTERM/SIGINT into a shutdown
/// trigger. The first signal starts the drain; the task then exits.
pub fn spawn(shutdown: Shutdown) {
    tokio::spawn(async move {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install SIGINT handler");
        };

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
            _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
            _ = terminate => tracing::info!("received SIGTERM, shutting down"),
        }

        shutdown.trigger();
    });
}
