use crate::model::vo::{IntoSamples, Sample};

/// Wall time of one finished job as listed by sacct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDuration {
    pub job_id: String,
    pub job_name: String,
    pub user: String,
    /// Elapsed seconds.
    pub elapsed: i64,
}

impl IntoSamples for Vec<JobDuration> {
    fn into_samples(self) -> Vec<Sample> {
        self.into_iter()
            .map(|job| {
                Sample::new("slurm_job_info", "Slurm Job Information", job.elapsed as f64)
                    .label("JobID", job.job_id)
                    .label("JobName", job.job_name)
                    .label("User", job.user)
            })
            .collect()
    }
}
