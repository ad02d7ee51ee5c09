use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time;
use tracing::{info, warn};

use configs::HakoConfig;
use store::{scheduler, snapshot, Storage};

use crate::routes::build_router;
use crate::state::AppState;

/// How long shutdown waits for in-flight requests and the final snapshot
/// flush before proceeding regardless.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Build the store, restore the snapshot, start the scheduler and serve
/// HTTP until a shutdown signal arrives.
pub async fn run(config: HakoConfig) -> anyhow::Result<()> {
    let storage = Arc::new(Storage::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler_task = match config.snapshot_path() {
        Some(path) => {
            info!(path = %path.display(), "snapshots enabled, loading snapshot");
            match snapshot::load_from_file(&path).await {
                Ok(snap) => storage.load(snap).await,
                Err(err) => {
                    warn!(error = %err, "failed to load snapshot, starting with an empty store");
                }
            }
            Some(tokio::spawn(scheduler::run(
                storage.clone(),
                path,
                shutdown_rx.clone(),
            )))
        }
        None => None,
    };

    let state = AppState {
        storage,
        config: Arc::new(config.clone()),
    };
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, version = env!("CARGO_PKG_VERSION"), "hako server listening");

    let mut graceful = shutdown_rx;
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = graceful.changed().await;
    });
    let mut server_task = tokio::spawn(server.into_future());

    let serve_result: anyhow::Result<()> = tokio::select! {
        res = &mut server_task => {
            // The listener died on its own; still give the scheduler its
            // final flush below.
            let _ = shutdown_tx.send(true);
            match res {
                Ok(inner) => inner.map_err(anyhow::Error::from),
                Err(join) => Err(join.into()),
            }
        }
        _ = shutdown_signal() => {
            info!("shutdown signal received, draining connections");
            let _ = shutdown_tx.send(true);
            match time::timeout(SHUTDOWN_GRACE, &mut server_task).await {
                Ok(Ok(inner)) => inner.map_err(anyhow::Error::from),
                Ok(Err(join)) => Err(join.into()),
                Err(_) => {
                    warn!("server did not drain within the grace period");
                    Ok(())
                }
            }
        }
    };

    if let Some(task) = scheduler_task {
        if time::timeout(SHUTDOWN_GRACE, task).await.is_err() {
            warn!("final snapshot flush did not finish within the grace period");
        }
    }

    serve_result
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
