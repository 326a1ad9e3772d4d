use anyhow::Result;
use std::sync::Arc;

use nsx_collector::collector::{CycleReport, WriteOutcome};
use nsx_collector::config::{Config, Manager};
use nsx_collector::error::CollectorErrorTrait;
use nsx_collector::metrics::NoopMetrics;

use super::{build_scheduler, build_writer};

/// Run a single tick and print what each site produced
///
/// Fails when no site managed to write its batch.
pub async fn once(config: Config, managers: Vec<Manager>) -> Result<()> {
    let writer = build_writer(&config)?;
    let scheduler = build_scheduler(&config, &managers, writer, Arc::new(NoopMetrics))?;

    let reports = scheduler.run_once().await;
    for report in &reports {
        print_report(report);
    }

    if !reports.iter().any(CycleReport::is_written) {
        anyhow::bail!("No site wrote any points");
    }
    Ok(())
}

fn print_report(report: &CycleReport) {
    let write = match &report.write {
        WriteOutcome::Skipped => "skipped".to_string(),
        WriteOutcome::Written(count) => format!("{count} points written"),
        WriteOutcome::Failed(e) => format!("write failed ({}): {e}", e.category()),
    };
    println!("{}: {write}", report.site);

    for failure in &report.failures {
        println!(
            "  {} {} [{}]: {}",
            failure.domain,
            failure.item.as_deref().unwrap_or("-"),
            failure.error.category(),
            failure.error
        );
    }
}
