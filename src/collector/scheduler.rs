//! Tick loop driving every worker concurrently
//!
//! Each tick spawns one task per worker and waits for all of them before
//! the next tick is considered. Ticks missed while waiting are skipped,
//! not replayed. Cancellation stops the waiting, not the workers: join
//! handles are dropped, which detaches in-flight cycles so they finish
//! their own calls.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use super::report::CycleReport;
use super::worker::Worker;

/// Owns the worker set and the collection interval
pub struct Scheduler {
    workers: Vec<Arc<Worker>>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(workers: Vec<Worker>, interval: Duration) -> Self {
        Self {
            workers: workers.into_iter().map(Arc::new).collect(),
            interval,
        }
    }

    pub fn workers(&self) -> &[Arc<Worker>] {
        &self.workers
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one tick across all workers and return their reports
    ///
    /// A worker task that panics is logged and contributes no report.
    pub async fn run_once(&self) -> Vec<CycleReport> {
        let sites: Vec<String> = self.workers.iter().map(|w| w.site().to_string()).collect();
        let handles: Vec<_> = self
            .workers
            .iter()
            .map(|worker| {
                let worker = Arc::clone(worker);
                tokio::spawn(async move { worker.collect().await })
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (site, result) in sites.iter().zip(join_all(handles).await) {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!(site = %site, error = %e, "Worker task failed"),
            }
        }
        reports
    }

    /// Run ticks until `shutdown` becomes true
    ///
    /// The first tick starts immediately.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            workers = self.workers.len(),
            interval_secs = self.interval.as_secs(),
            "Scheduler started"
        );

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancelled(&mut shutdown) => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = cancelled(&mut shutdown) => {
                    tracing::info!("Shutdown during tick, leaving in-flight cycles to finish");
                    break;
                }
                reports = self.run_once() => {
                    let written = reports.iter().filter(|r| r.is_written()).count();
                    tracing::debug!(sites = reports.len(), written, "Tick complete");
                }
            }
        }

        tracing::info!("Scheduler stopped");
    }
}

/// Resolves once the flag is true or its sender is gone
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
