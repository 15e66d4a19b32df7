use enum_map::EnumMap;

use super::NodeState;
use crate::model::vo::{IntoSamples, Sample};

/// Cluster-wide node counts by canonical state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodesMetrics {
    pub states: EnumMap<NodeState, u64>,
}

impl NodesMetrics {
    #[inline]
    pub fn get(&self, state: NodeState) -> u64 {
        self.states[state]
    }
}

impl IntoSamples for NodesMetrics {
    fn into_samples(self) -> Vec<Sample> {
        self.states
            .into_iter()
            .map(|(state, count)| Sample::new(state.metric_name(), state.help(), count as f64))
            .collect()
    }
}
