use crate::model::vo::{IntoSamples, Sample};

/// One resource allocation out of a GRES expression, e.g. `gpu:A30:4`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericResource {
    pub kind: String,
    /// Model name, empty when unnamed.
    pub name: String,
    pub count: u64,
}

impl GenericResource {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, count: u64) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            count,
        }
    }

    #[inline]
    pub fn is_gpu(&self) -> bool {
        self.kind == "gpu"
    }
}

/// `allocated/idle/other/total` CPU tuple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuState {
    pub allocated: u64,
    pub idle: u64,
    pub other: u64,
    pub total: u64,
}

impl CpuState {
    /// Whether the parts add up to the total. Not checked while parsing.
    pub fn is_consistent(&self) -> bool {
        self.allocated + self.idle + self.other == self.total
    }
}

impl IntoSamples for CpuState {
    fn into_samples(self) -> Vec<Sample> {
        vec![
            Sample::new("slurm_cpus_alloc", "Allocated CPUs", self.allocated as f64),
            Sample::new("slurm_cpus_idle", "Idle CPUs", self.idle as f64),
            Sample::new("slurm_cpus_other", "Mix CPUs", self.other as f64),
            Sample::new("slurm_cpus_total", "Total CPUs", self.total as f64),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_state_consistency() {
        let cpu = CpuState {
            allocated: 64,
            idle: 0,
            other: 64,
            total: 128,
        };
        assert!(cpu.is_consistent());
        assert!(!CpuState { total: 1, ..cpu }.is_consistent());
    }

    #[test]
    fn cpu_state_samples() {
        let samples = CpuState {
            allocated: 5725,
            idle: 877,
            other: 34,
            total: 6636,
        }
        .into_samples();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[3].name, "slurm_cpus_total");
        assert_eq!(samples[3].value, 6636.0);
    }
}
