use crate::model::vo::{IntoSamples, Sample};

/// Scheduler diagnostics reported by `sdiag`. Cycle times are in microseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulerMetrics {
    pub threads: f64,
    pub queue_size: f64,
    pub dbd_queue_size: f64,
    pub last_cycle: f64,
    pub mean_cycle: f64,
    pub cycle_per_minute: f64,
    pub backfill_last_cycle: f64,
    pub backfill_mean_cycle: f64,
    pub backfill_depth_mean: f64,
    pub total_backfilled_jobs_since_start: f64,
    pub total_backfilled_jobs_since_cycle: f64,
    pub total_backfilled_heterogeneous: f64,
}

impl IntoSamples for SchedulerMetrics {
    fn into_samples(self) -> Vec<Sample> {
        [
            ("slurm_scheduler_threads", "Number of scheduler threads", self.threads),
            ("slurm_scheduler_queue_size", "Length of the scheduler queue", self.queue_size),
            ("slurm_scheduler_dbd_queue_size", "Length of the DBD agent queue", self.dbd_queue_size),
            ("slurm_scheduler_last_cycle", "Scheduler last cycle time in microseconds", self.last_cycle),
            ("slurm_scheduler_mean_cycle", "Scheduler mean cycle time in microseconds", self.mean_cycle),
            ("slurm_scheduler_cycle_per_minute", "Number of scheduler cycles per minute", self.cycle_per_minute),
            ("slurm_scheduler_backfill_last_cycle", "Backfill last cycle time in microseconds", self.backfill_last_cycle),
            ("slurm_scheduler_backfill_mean_cycle", "Backfill mean cycle time in microseconds", self.backfill_mean_cycle),
            ("slurm_scheduler_backfill_depth_mean", "Backfill mean depth", self.backfill_depth_mean),
            (
                "slurm_scheduler_backfilled_jobs_since_start_total",
                "Jobs started thanks to backfilling since last slurm start",
                self.total_backfilled_jobs_since_start,
            ),
            (
                "slurm_scheduler_backfilled_jobs_since_cycle_total",
                "Jobs started thanks to backfilling since last stats reset",
                self.total_backfilled_jobs_since_cycle,
            ),
            (
                "slurm_scheduler_backfilled_heterogeneous_total",
                "Heterogeneous job components started thanks to backfilling since last slurm start",
                self.total_backfilled_heterogeneous,
            ),
        ]
        .into_iter()
        .map(|(name, help, value)| Sample::new(name, help, value))
        .collect()
    }
}
