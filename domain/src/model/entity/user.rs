use indexmap::IndexMap;

use crate::model::vo::{push_positive, IntoSamples, Sample};

/// Job tallies of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMetrics {
    pub jobs_pending: u64,
    pub cpus_pending: u64,
    pub jobs_running: u64,
    pub cpus_running: u64,
    /// Bytes requested by running jobs.
    pub mem_running: u64,
    pub jobs_suspended: u64,
}

impl IntoSamples for IndexMap<String, UserMetrics> {
    fn into_samples(self) -> Vec<Sample> {
        let mut samples = Vec::new();
        for (user, m) in self {
            let fields = [
                ("slurm_user_jobs_pending", "Pending jobs for user", m.jobs_pending),
                ("slurm_user_cpus_pending", "Pending cpus for user", m.cpus_pending),
                ("slurm_user_jobs_running", "Running jobs for user", m.jobs_running),
                ("slurm_user_cpus_running", "Running cpus for user", m.cpus_running),
                ("slurm_user_mem_running", "Running mem for user", m.mem_running),
                ("slurm_user_jobs_suspended", "Suspended jobs for user", m.jobs_suspended),
            ];
            for (name, help, value) in fields {
                push_positive(
                    &mut samples,
                    Sample::new(name, help, value as f64).label("user", user.as_str()),
                );
            }
        }
        samples
    }
}
