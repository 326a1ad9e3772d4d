pub mod check;
pub mod once;
pub mod run;

use std::sync::Arc;

use nsx_collector::collector::{Scheduler, Worker};
use nsx_collector::config::{Config, Manager};
use nsx_collector::error::{Error, Result};
use nsx_collector::influx::{InfluxWriter, PointWriter};
use nsx_collector::metrics::MetricsSink;
use nsx_collector::nsx::{NsxApi, NsxClient};

pub use check::check;
pub use once::once;
pub use run::run;

/// InfluxDB writer with the resolved token
pub fn build_writer(config: &Config) -> Result<Arc<dyn PointWriter>> {
    let token = config
        .influx_token()
        .map_err(|e| Error::config(format!("{e:#}")))?;
    Ok(Arc::new(InfluxWriter::new(&config.influxdb, &token)?))
}

/// One worker per manager, all sharing the writer and metrics sink
pub fn build_scheduler(
    config: &Config,
    managers: &[Manager],
    writer: Arc<dyn PointWriter>,
    metrics: Arc<dyn MetricsSink>,
) -> Result<Scheduler> {
    let mut workers = Vec::with_capacity(managers.len());
    for manager in managers {
        let client =
            NsxClient::with_page_size(manager, config.request_timeout(), config.nsx.page_size)?;
        let api: Arc<dyn NsxApi> = Arc::new(client);

        workers.push(Worker::new(
            manager.site.clone(),
            api,
            Arc::clone(&writer),
            Arc::clone(&metrics),
            config.slow_interval(),
        ));
        tracing::info!(site = %manager.site, url = %manager.url, "Worker configured");
    }

    Ok(Scheduler::new(workers, config.default_interval()))
}
