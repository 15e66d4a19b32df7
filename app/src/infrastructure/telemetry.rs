use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout only carries exposition text.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_telemetry(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
}
