mod background_service;
mod collector;
mod config;
mod infrastructure;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;

use self::background_service::prelude::*;
use self::collector::Registry;
use self::config::{build_config, ExporterConfig};
use self::infrastructure::command::{CommandSource, SshConfig};
use self::infrastructure::http::{self, Snapshot};
use self::infrastructure::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = build_config().with_context(|| "Failed to build config".red())?;
    let exporter_config: ExporterConfig =
        config.try_deserialize().with_context(|| "Invalid config".red())?;

    init_telemetry(&exporter_config.log_level)
        .with_context(|| "Failed to initialize logger".red())?;

    let registry = Registry::builtin();
    for name in registry.unknown(&exporter_config.collectors) {
        tracing::warn!(collector = name, "Ignoring override for unknown collector");
    }
    let collectors = registry.enabled(&exporter_config.collectors);
    let names: Vec<_> = collectors.iter().map(|c| c.name).collect();

    let ssh = exporter_config.ssh_proxy.as_ref().map(SshConfig::new);
    let source = CommandSource::new(ssh, Duration::from_secs(exporter_config.command_timeout));
    let cycle = CollectionCycle::new(
        Arc::new(source),
        collectors,
        exporter_config.gres_dialect,
        chrono::Duration::hours(exporter_config.job_window_hours.into()),
    );

    if exporter_config.once {
        let report = cycle.run_once().await;
        return cycle.publish(&report).with_context(|| "Cannot publish snapshot".red());
    }

    let interval = Duration::from_secs(exporter_config.collect_interval_secs());
    tracing::info!(?names, ?interval, "Slurm exporter started");

    let snapshot = Snapshot::default();
    tokio::select! {
        () = cycle.run(interval, &snapshot) => Ok(()),
        result = http::serve(exporter_config.listen_address, snapshot.clone()) => {
            result.with_context(|| "Metrics endpoint stopped".red())
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Stopping exporter (ctrl-c handling).");
            Ok(())
        }
    }
}
