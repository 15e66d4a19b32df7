use enum_map::EnumMap;

use super::JobState;
use crate::model::vo::{IntoSamples, Sample};

/// Cluster-wide job counts by canonical state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueMetrics {
    pub states: EnumMap<JobState, u64>,
    /// Pending jobs whose reason is `Dependency`.
    pub pending_dependency: u64,
}

impl QueueMetrics {
    #[inline]
    pub fn get(&self, state: JobState) -> u64 {
        self.states[state]
    }
}

impl IntoSamples for QueueMetrics {
    fn into_samples(self) -> Vec<Sample> {
        let mut samples: Vec<_> = self
            .states
            .into_iter()
            .map(|(state, count)| {
                Sample::new(state.queue_metric_name(), state.queue_help(), count as f64)
            })
            .collect();
        samples.insert(
            1,
            Sample::new(
                "slurm_queue_pending_dependency",
                "Pending jobs because of dependency in queue",
                self.pending_dependency as f64,
            ),
        );
        samples
    }
}
