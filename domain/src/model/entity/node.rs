use indexmap::IndexMap;

use super::{CpuState, GenericResource};
use crate::model::vo::{IntoSamples, Sample};

/// Per-node capacity and usage as listed by `sinfo -N`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMetrics {
    /// Allocated memory in MB.
    pub mem_alloc: u64,
    /// Configured memory in MB.
    pub mem_total: u64,
    pub cpu: CpuState,
    pub gres: Vec<GenericResource>,
    pub gres_used: Vec<GenericResource>,
    /// Idle gpus by model name.
    pub gres_idle: IndexMap<String, u64>,
    /// Long state string, e.g. `mixed` or `drained*`.
    pub status: String,
}

impl IntoSamples for IndexMap<String, NodeMetrics> {
    fn into_samples(self) -> Vec<Sample> {
        let mut samples = Vec::new();
        for (node, m) in self {
            let base = [
                ("slurm_node_cpu_alloc", "Allocated CPUs per node", m.cpu.allocated),
                ("slurm_node_cpu_idle", "Idle CPUs per node", m.cpu.idle),
                ("slurm_node_cpu_other", "Other CPUs per node", m.cpu.other),
                ("slurm_node_cpu_total", "Total CPUs per node", m.cpu.total),
                ("slurm_node_mem_alloc", "Allocated memory per node", m.mem_alloc),
                ("slurm_node_mem_total", "Total memory per node", m.mem_total),
            ];
            for (name, help, value) in base {
                samples.push(
                    Sample::new(name, help, value as f64)
                        .label("node", node.as_str())
                        .label("status", m.status.as_str()),
                );
            }

            let gpu = |name, help, gputype: &str, count: u64| {
                Sample::new(name, help, count as f64)
                    .label("node", node.as_str())
                    .label("status", m.status.as_str())
                    .label("gputype", gputype)
            };
            for (gputype, count) in gpus_by_name(&m.gres_used) {
                samples.push(gpu("slurm_node_gpu_alloc", "Allocated GPUs per node", gputype, count));
            }
            for (gputype, count) in gpus_by_name(&m.gres) {
                samples.push(gpu("slurm_node_gpu_total", "Total GPUs per node", gputype, count));
            }
            for (gputype, idle) in &m.gres_idle {
                samples.push(gpu("slurm_node_gpu_idle", "Idle GPUs per node", gputype.as_str(), *idle));
            }
        }
        samples
    }
}

/// Gpu counts summed per model, since sinfo lists one entry per socket group.
fn gpus_by_name(resources: &[GenericResource]) -> IndexMap<&str, u64> {
    let mut counts = IndexMap::new();
    for resource in resources.iter().filter(|r| r.is_gpu()) {
        *counts.entry(resource.name.as_str()).or_default() += resource.count;
    }
    counts
}
