//! Cancellation triggers
//!
//! Interrupts (Ctrl-C, SIGTERM) and the optional run timeout all collapse
//! into a single [`CancellationToken`] that the crawler and checker observe.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why a run was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
    Timeout,
}

/// Spawns a task that cancels `token` on interrupt, termination or timeout
///
/// The task exits quietly if the token is cancelled by someone else first.
/// It resolves to the reason it fired, or `None` in that case.
pub fn spawn_watcher(
    token: CancellationToken,
    timeout: Option<Duration>,
) -> JoinHandle<Option<ShutdownReason>> {
    tokio::spawn(async move {
        let reason = tokio::select! {
            _ = token.cancelled() => return None,
            _ = interrupt() => ShutdownReason::Interrupt,
            _ = terminate() => ShutdownReason::Terminate,
            _ = deadline(timeout) => ShutdownReason::Timeout,
        };

        match reason {
            ShutdownReason::Timeout => {
                tracing::warn!("Timeout reached, stopping and returning partial results")
            }
            _ => tracing::warn!("Received {:?} signal, shutting down", reason),
        }

        token.cancel();
        Some(reason)
    })
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::debug!("Could not install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::debug!("Could not install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
