use indexmap::IndexMap;

use crate::model::vo::{push_positive, IntoSamples, Sample};

/// Job tallies of one account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountMetrics {
    pub pending: u64,
    pub pending_cpus: u64,
    pub running: u64,
    pub running_cpus: u64,
    pub suspended: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FairShareMetrics {
    pub fairshare: f64,
}

impl IntoSamples for IndexMap<String, AccountMetrics> {
    fn into_samples(self) -> Vec<Sample> {
        let mut samples = Vec::new();
        for (account, m) in self {
            let fields = [
                ("slurm_account_jobs_pending", "Pending jobs for account", m.pending),
                ("slurm_account_cpus_pending", "Pending cpus for account", m.pending_cpus),
                ("slurm_account_jobs_running", "Running jobs for account", m.running),
                ("slurm_account_cpus_running", "Running cpus for account", m.running_cpus),
                ("slurm_account_jobs_suspended", "Suspended jobs for account", m.suspended),
            ];
            for (name, help, value) in fields {
                push_positive(
                    &mut samples,
                    Sample::new(name, help, value as f64).label("account", account.as_str()),
                );
            }
        }
        samples
    }
}

impl IntoSamples for IndexMap<String, FairShareMetrics> {
    fn into_samples(self) -> Vec<Sample> {
        self.into_iter()
            .map(|(account, m)| {
                Sample::new("slurm_account_fairshare", "FairShare for account", m.fairshare)
                    .label("account", account)
            })
            .collect()
    }
}
