use std::collections::HashMap;
use std::net::SocketAddr;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use service::gres::GresDialect;

/// Base name of the optional configuration file, any format `config` knows.
const CONFIG_FILE: &str = "config";
const ENV_PREFIX: &str = "SLURM_EXPORTER";

#[derive(Debug, Clone, Deserialize)]
pub struct ExporterConfig {
    #[serde(default = "ExporterConfig::default_log_level")]
    pub log_level: String,

    /// Seconds between two collection cycles.
    #[serde(default = "ExporterConfig::default_collect_interval")]
    pub collect_interval: u64,

    /// Seconds a single query may run before it is abandoned.
    #[serde(default = "ExporterConfig::default_command_timeout")]
    pub command_timeout: u64,

    /// Address of the `/metrics` scrape endpoint.
    #[serde(default = "ExporterConfig::default_listen_address")]
    pub listen_address: SocketAddr,

    /// Run one cycle, print it and exit.
    #[serde(default)]
    pub once: bool,

    #[serde(default)]
    pub gres_dialect: GresDialect,

    #[serde(default = "ExporterConfig::default_job_window_hours")]
    pub job_window_hours: u32,

    #[serde(default = "Default::default")]
    pub ssh_proxy: Option<SshProxyConfig>,

    /// Collector name to enabled, over the built-in defaults.
    #[serde(default)]
    pub collectors: HashMap<String, bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SshProxyConfig {
    pub host: String,

    pub username: String,

    #[serde(default = "SshProxyConfig::default_port")]
    pub port: u16,
}

impl ExporterConfig {
    pub const MIN_COLLECT_INTERVAL: u64 = 5;

    pub fn default_log_level() -> String {
        "info".to_owned()
    }

    pub fn default_listen_address() -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], 8080))
    }

    pub fn default_collect_interval() -> u64 {
        30
    }

    pub fn default_command_timeout() -> u64 {
        10
    }

    pub fn default_job_window_hours() -> u32 {
        30
    }

    pub fn collect_interval_secs(&self) -> u64 {
        self.collect_interval.max(Self::MIN_COLLECT_INTERVAL)
    }
}

impl SshProxyConfig {
    pub fn default_port() -> u16 {
        22
    }
}

/// `config.yaml` in the working directory, then `SLURM_EXPORTER__*`
/// environment variables, e.g. `SLURM_EXPORTER__COLLECTORS__JOB=true`.
pub fn build_config() -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
}
