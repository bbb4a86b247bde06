//! Interrupt handling
//!
//! Turns SIGINT (Ctrl-C) and, on Unix, SIGTERM into cancellation of the
//! wait. Cancellation is not an error: the process exits zero.

use tokio_util::sync::CancellationToken;

/// Cancel `token` when the process is interrupted
///
/// Handlers are registered before this returns, so a signal arriving during
/// the first provider request already cancels instead of killing the process.
#[cfg(unix)]
pub fn cancel_on_signal(token: &CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let token = token.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => tracing::info!("Received SIGINT"),
            _ = sigterm.recv() => tracing::info!("Received SIGTERM"),
        }
        token.cancel();
    });

    Ok(())
}

/// Cancel `token` when the process is interrupted
#[cfg(not(unix))]
pub fn cancel_on_signal(token: &CancellationToken) -> std::io::Result<()> {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C");
            token.cancel();
        }
    });
    Ok(())
}
