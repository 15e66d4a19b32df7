use indexmap::IndexMap;

use super::CpuState;
use crate::model::vo::{push_positive, IntoSamples, Sample};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionMetrics {
    pub cpu: CpuState,
    pub jobs_pending: u64,
    pub jobs_running: u64,
}

impl IntoSamples for IndexMap<String, PartitionMetrics> {
    fn into_samples(self) -> Vec<Sample> {
        let mut samples = Vec::new();
        for (partition, m) in self {
            let fields = [
                ("slurm_partition_cpus_allocated", "Allocated CPUs for partition", m.cpu.allocated),
                ("slurm_partition_cpus_idle", "Idle CPUs for partition", m.cpu.idle),
                ("slurm_partition_cpus_other", "Other CPUs for partition", m.cpu.other),
                ("slurm_partition_cpus_total", "Total CPUs for partition", m.cpu.total),
                ("slurm_partition_jobs_pending", "Pending jobs for partition", m.jobs_pending),
                ("slurm_partition_jobs_running", "Running jobs for partition", m.jobs_running),
            ];
            for (name, help, value) in fields {
                push_positive(
                    &mut samples,
                    Sample::new(name, help, value as f64).label("partition", partition.as_str()),
                );
            }
        }
        samples
    }
}
