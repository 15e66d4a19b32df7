use crate::model::vo::{IntoSamples, Sample};

/// Cluster-wide gpu counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpusMetrics {
    pub alloc: u64,
    pub idle: u64,
    /// `total - alloc - idle`, negative when the captures disagree.
    pub other: i64,
    pub total: u64,
    pub utilization: f64,
}

impl GpusMetrics {
    pub fn new(total: u64, alloc: u64, idle: u64) -> Self {
        let utilization = if total == 0 {
            0.0
        } else {
            alloc as f64 / total as f64
        };
        Self {
            alloc,
            idle,
            other: total as i64 - alloc as i64 - idle as i64,
            total,
            utilization,
        }
    }
}

impl IntoSamples for GpusMetrics {
    fn into_samples(self) -> Vec<Sample> {
        vec![
            Sample::new("slurm_gpus_alloc", "Allocated GPUs", self.alloc as f64),
            Sample::new("slurm_gpus_idle", "Idle GPUs", self.idle as f64),
            Sample::new("slurm_gpus_other", "Other GPUs", self.other as f64),
            Sample::new("slurm_gpus_total", "Total GPUs", self.total as f64),
            Sample::new("slurm_gpus_utilization", "Total GPU utilization", self.utilization),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::GpusMetrics;

    #[test]
    fn derived_fields() {
        let gpus = GpusMetrics::new(48, 7, 41);
        assert_eq!(gpus.other, 0);
        assert!((gpus.utilization - 7.0 / 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_cluster_has_zero_utilization() {
        let gpus = GpusMetrics::new(0, 0, 0);
        assert_eq!(gpus.utilization, 0.0);
    }
}
