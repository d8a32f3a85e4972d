// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM both request a graceful stop: the accept
// loop exits, in-flight connections finish in their own tasks, and the
// process exits 0.

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the shutdown signal listener (Unix)
///
/// Returns a `Notify` that receives a permit when a shutdown signal
/// arrives, so the accept loop observes it even between `select!` polls.
#[cfg(unix)]
#[must_use]
pub fn start_signal_handler() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
        notify.notify_one();
    });

    shutdown
}

/// Windows fallback: only Ctrl+C is supported
#[cfg(not(unix))]
#[must_use]
pub fn start_signal_handler() -> Arc<Notify> {
    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            notify.notify_one();
        }
    });

    shutdown
}
