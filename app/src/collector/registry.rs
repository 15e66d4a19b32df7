use std::collections::HashMap;

use domain::model::vo::{IntoSamples, Query, Sample};
use service::prelude::*;

use super::CollectContext;

pub type QueriesFn = fn(&CollectContext) -> Vec<Query>;
pub type BuildFn = fn(&[String], &CollectContext) -> anyhow::Result<Vec<Sample>>;

/// A named collector: the queries it needs and how their outputs become samples.
#[derive(Debug, Clone, Copy)]
pub struct CollectorDescriptor {
    pub name: &'static str,
    pub default_enabled: bool,
    pub queries: QueriesFn,
    /// Receives one output per query, in query order.
    pub build: BuildFn,
}

#[derive(Debug, Clone)]
pub struct Registry {
    collectors: Vec<CollectorDescriptor>,
}

impl Registry {
    pub fn new(collectors: Vec<CollectorDescriptor>) -> Self {
        Self { collectors }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            CollectorDescriptor {
                name: "account",
                default_enabled: true,
                queries: |_| vec![squeue(["-a", "-r", "-h", "-o", "%A|%a|%T|%C"])],
                build: |outputs, _| {
                    let [accounts] = outputs_of::<1>(outputs)?;
                    Ok(parse_account_metrics(accounts).into_samples())
                },
            },
            CollectorDescriptor {
                name: "cpus",
                default_enabled: true,
                queries: |_| vec![sinfo(["-h", "-a", "-o", "%C"])],
                build: |outputs, _| {
                    let [cpus] = outputs_of::<1>(outputs)?;
                    Ok(parse_cpus_metrics(cpus).into_samples())
                },
            },
            CollectorDescriptor {
                name: "fairshare",
                default_enabled: false,
                queries: |_| vec![Query::new("sshare", ["-n", "-P", "-o", "account,fairshare"])],
                build: |outputs, _| {
                    let [shares] = outputs_of::<1>(outputs)?;
                    Ok(parse_fairshare_metrics(shares).into_samples())
                },
            },
            CollectorDescriptor {
                name: "gpus",
                default_enabled: true,
                queries: |_| {
                    vec![
                        sinfo(["-a", "-h", "--Format=Nodes: ,Gres: "]),
                        sinfo(["-a", "-h", "--Format=Nodes: ,GresUsed: ", "--state=allocated"]),
                        sinfo([
                            "-a",
                            "-h",
                            "--Format=Nodes: ,Gres: ,GresUsed: ",
                            "--state=idle,allocated",
                        ]),
                    ]
                },
                build: |outputs, ctx| {
                    let [total, allocated, idle] = outputs_of::<3>(outputs)?;
                    Ok(parse_gpus_metrics(total, allocated, idle, ctx.dialect).into_samples())
                },
            },
            CollectorDescriptor {
                name: "job",
                default_enabled: false,
                queries: |ctx| {
                    let (start, end) = ctx.job_window_bounds();
                    vec![Query::new(
                        "sacct",
                        [
                            "--state=COMPLETED".to_owned(),
                            format!("-S{start}"),
                            format!("-E{end}"),
                            "-X".to_owned(),
                            "-n".to_owned(),
                            "-a".to_owned(),
                            "--format=JobID,JobName,User,Elapsed".to_owned(),
                        ],
                    )]
                },
                build: |outputs, _| {
                    let [jobs] = outputs_of::<1>(outputs)?;
                    Ok(parse_job_metrics(jobs).into_samples())
                },
            },
            CollectorDescriptor {
                name: "node",
                default_enabled: true,
                queries: |_| {
                    vec![sinfo([
                        "-h",
                        "-a",
                        "-N",
                        "-O",
                        "NodeList: ,AllocMem: ,Memory: ,CPUsState: ,StateLong: ,Gres: ,GresUsed:",
                    ])]
                },
                build: |outputs, ctx| {
                    let [nodes] = outputs_of::<1>(outputs)?;
                    Ok(parse_node_metrics(nodes, ctx.dialect).into_samples())
                },
            },
            CollectorDescriptor {
                name: "nodes",
                default_enabled: true,
                queries: |_| vec![sinfo(["-h", "-a", "-o", "%D,%T"])],
                build: |outputs, _| {
                    let [nodes] = outputs_of::<1>(outputs)?;
                    Ok(parse_nodes_metrics(nodes).into_samples())
                },
            },
            CollectorDescriptor {
                name: "partition",
                default_enabled: true,
                queries: |_| {
                    vec![
                        sinfo(["-h", "-o%R,%C"]),
                        squeue(["-a", "-r", "-h", "-o%P", "--states=RUNNING"]),
                        squeue(["-a", "-r", "-h", "-o%P", "--states=PENDING"]),
                    ]
                },
                build: |outputs, _| {
                    let [sinfo, running, pending] = outputs_of::<3>(outputs)?;
                    Ok(parse_partition_metrics(sinfo, running, pending).into_samples())
                },
            },
            CollectorDescriptor {
                name: "queue",
                default_enabled: true,
                queries: |_| vec![squeue(["-a", "-r", "-h", "-o", "%A,%T,%r", "--states=all"])],
                build: |outputs, _| {
                    let [queue] = outputs_of::<1>(outputs)?;
                    Ok(parse_queue_metrics(queue).into_samples())
                },
            },
            CollectorDescriptor {
                name: "scheduler",
                default_enabled: true,
                queries: |_| vec![Query::new("sdiag", Vec::<String>::new())],
                build: |outputs, _| {
                    let [sdiag] = outputs_of::<1>(outputs)?;
                    Ok(parse_scheduler_metrics(sdiag).into_samples())
                },
            },
            CollectorDescriptor {
                name: "user",
                default_enabled: true,
                queries: |_| vec![squeue(["-a", "-r", "-h", "-o", "%A|%u|%T|%C|%m"])],
                build: |outputs, _| {
                    let [users] = outputs_of::<1>(outputs)?;
                    Ok(parse_user_metrics(users).into_samples())
                },
            },
        ])
    }

    pub fn get(&self, name: &str) -> Option<&CollectorDescriptor> {
        self.collectors.iter().find(|c| c.name == name)
    }

    /// Collectors enabled by default or switched on in `overrides`, in registry order.
    pub fn enabled(&self, overrides: &HashMap<String, bool>) -> Vec<CollectorDescriptor> {
        self.collectors
            .iter()
            .filter(|c| overrides.get(c.name).copied().unwrap_or(c.default_enabled))
            .copied()
            .collect()
    }

    /// Override keys that name no collector.
    pub fn unknown<'a>(&self, overrides: &'a HashMap<String, bool>) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = overrides
            .keys()
            .map(String::as_str)
            .filter(|name| self.get(name).is_none())
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

fn sinfo<const N: usize>(args: [&str; N]) -> Query {
    Query::new("sinfo", args)
}

fn squeue<const N: usize>(args: [&str; N]) -> Query {
    Query::new("squeue", args)
}

fn outputs_of<const N: usize>(outputs: &[String]) -> anyhow::Result<[&str; N]> {
    let outputs: Vec<&str> = outputs.iter().map(String::as_str).collect();
    outputs
        .try_into()
        .map_err(|outputs: Vec<&str>| anyhow::anyhow!("Expected {N} outputs, got {}", outputs.len()))
}
