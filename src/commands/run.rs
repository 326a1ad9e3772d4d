use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;

use nsx_collector::config::{Config, Manager};
use nsx_collector::metrics::{self, CollectorMetrics};

use super::{build_scheduler, build_writer};

/// Collect until SIGINT or SIGTERM
pub async fn run(config: Config, managers: Vec<Manager>) -> Result<()> {
    let metrics = CollectorMetrics::new().context("Failed to register metrics")?;
    let writer = build_writer(&config)?;
    let scheduler = build_scheduler(&config, &managers, writer, Arc::new(metrics.clone()))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let telemetry = if config.telemetry.enabled {
        let addr = config.telemetry_address()?;
        let rx = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = metrics::serve(addr, metrics, rx).await {
                tracing::error!(address = %addr, error = %e, "Telemetry server failed");
            }
        }))
    } else {
        None
    };

    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    tracing::info!(
        managers = managers.len(),
        interval_secs = config.intervals.default_secs,
        slow_interval_secs = config.intervals.slow_secs,
        "nsx-collector running"
    );

    scheduler.run(shutdown_rx).await;

    if let Some(handle) = telemetry {
        let _ = handle.await;
    }

    tracing::info!("nsx-collector stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
