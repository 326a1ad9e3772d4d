use anyhow::Result;

use nsx_collector::config::{Config, Manager};

/// Print the resolved configuration without touching the network
pub fn check(config: &Config, managers: &[Manager]) -> Result<()> {
    let token = config.influx_token()?;

    println!("nsx-collector configuration");
    println!("{:-<40}", "");
    println!("InfluxDB:        {}", config.influxdb.url);
    println!("  org/bucket:    {}/{}", config.influxdb.org, config.influxdb.bucket);
    println!("  token:         {} chars", token.len());
    println!("  timeout:       {}s", config.influxdb.timeout_secs);
    println!(
        "Intervals:       {}s fast, {}s slow",
        config.intervals.default_secs, config.intervals.slow_secs
    );
    println!(
        "NSX requests:    {}s timeout, page size {}",
        config.nsx.request_timeout_secs, config.nsx.page_size
    );
    println!(
        "Telemetry:       {}",
        if config.telemetry.enabled {
            config.telemetry.address.as_str()
        } else {
            "disabled"
        }
    );
    println!("Logging:         {} ({})", config.logging.level, config.logging.format);
    println!("Managers:        {}", managers.len());
    for manager in managers {
        println!(
            "  {:<12} {} (user {}{})",
            manager.site,
            manager.url,
            manager.username,
            if manager.tls_skip_verify {
                ", TLS verification off"
            } else {
                ""
            }
        );
    }

    Ok(())
}
