use std::time::Duration;

use anyhow::Context;
use domain::model::vo::Query;
use domain::service::TextSource;

use super::{MaybeSsh, SshConfig};

/// Runs queries as child processes, locally or through the ssh proxy.
#[derive(Debug, Clone)]
pub struct CommandSource {
    ssh: Option<SshConfig>,
    timeout: Duration,
}

impl CommandSource {
    pub fn new(ssh: Option<SshConfig>, timeout: Duration) -> Self {
        Self { ssh, timeout }
    }
}

impl AsRef<Option<SshConfig>> for CommandSource {
    fn as_ref(&self) -> &Option<SshConfig> {
        &self.ssh
    }
}

#[async_trait::async_trait]
impl TextSource for CommandSource {
    async fn fetch(&self, query: &Query) -> anyhow::Result<String> {
        tracing::debug!(ssh = self.is_ssh(), "running `{query}`");
        let mut command = self.command(query);
        command.kill_on_drop(true);

        let out = tokio::time::timeout(self.timeout, command.output())
            .await
            .with_context(|| format!("`{query}` timed out after {:?}", self.timeout))?
            .with_context(|| format!("Failed to run `{query}`"))?;
        if !out.status.success() {
            anyhow::bail!(
                "Exit Status not 0 for `{query}`. real: {}, stderr: {}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
