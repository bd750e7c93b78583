use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

const REQUEST_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Spawns a task that waits for Ctrl-C (or SIGTERM on unix) and then sends
/// a shutdown signal via a watch.
///
/// Returns the join handle, the sender (for programmatic shutdown), and the receiver.
pub fn graceful_shutdown_blocker() -> (JoinHandle<()>, watch::Sender<()>, watch::Receiver<()>) {
    let (tx, rx) = watch::channel(());
    let signal_tx = tx.clone();
    let mut closed_rx = rx.clone();

    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = wait_for_signal() => {}
            // Programmatic shutdown
            _ = closed_rx.changed() => return,
        }
        let _ = signal_tx.send(());
    });

    (handle, tx, rx)
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "could not install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("gracefully exiting immediately on SIGINT");
        }
        _ = sigterm.recv() => {
            tokio::time::sleep(REQUEST_GRACE_PERIOD).await;
            tracing::debug!("initiating graceful shutdown with delay on SIGTERM");
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::debug!("gracefully exiting on Ctrl-C");
}

/// Registers a panic hook that logs panics using the `tracing` crate
pub fn register_panic_logger() {
    std::panic::set_hook(Box::new(|panic| match panic.location() {
        Some(loc) => {
            tracing::error!(
                message = %panic,
                panic.file = loc.file(),
                panic.line = loc.line(),
                panic.column = loc.column(),
            );
        }
        None => tracing::error!(message = %panic),
    }));
}

pub fn report_build_info() {
    let build = common::build_info!();

    tracing::info!(
        build_profile = build.build_profile,
        features = build.build_features,
        version = build.version,
        "dashboard starting up"
    );
}
