use domain::model::vo::Query;
use tokio::process::Command;

use crate::config::SshProxyConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshConfig {
    pub port: String,
    pub username_host: String,
}

/// An ssh proxy for queries. It's transparent if not using ssh.
pub trait MaybeSsh {
    fn command(&self, query: &Query) -> Command;
    fn is_ssh(&self) -> bool;
}

impl<Ctx> MaybeSsh for Ctx
where
    Ctx: AsRef<Option<SshConfig>>,
{
    fn command(&self, query: &Query) -> Command {
        let Some(ssh) = self.as_ref() else {
            let mut command = Command::new(query.program);
            command.args(&query.args);
            return command;
        };

        let mut command = Command::new("ssh");
        command.args(["-p", &ssh.port, &ssh.username_host, "--", &remote_command(query)]);
        command
    }

    fn is_ssh(&self) -> bool {
        self.as_ref().is_some()
    }
}

impl SshConfig {
    pub fn new(config: &SshProxyConfig) -> Self {
        let SshProxyConfig {
            host,
            username,
            port,
        } = config;

        Self {
            port: port.to_string(),
            username_host: format!("{username}@{host}"),
        }
    }
}

/// The remote shell sees one string, so every argument is single quoted.
/// Format strings like `%A|%a|%T|%C` would otherwise become pipelines.
fn remote_command(query: &Query) -> String {
    let mut line = query.program.to_owned();
    for arg in &query.args {
        line.push_str(" '");
        line.push_str(&arg.replace('\'', r"'\''"));
        line.push('\'');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_quoted_for_the_remote_shell() {
        let query = Query::new("squeue", ["-h", "-o", "%A|%a|%T|%C"]);
        assert_eq!(remote_command(&query), "squeue '-h' '-o' '%A|%a|%T|%C'");

        let query = Query::new("echo", ["it's"]);
        assert_eq!(remote_command(&query), r"echo 'it'\''s'");
    }

    #[test]
    fn from_config() {
        let ssh = SshConfig::new(&SshProxyConfig {
            host: "login01".to_owned(),
            username: "monitor".to_owned(),
            port: 2222,
        });
        assert_eq!(ssh.port, "2222");
        assert_eq!(ssh.username_host, "monitor@login01");
    }
}
