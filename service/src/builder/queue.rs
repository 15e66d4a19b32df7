use domain::model::entity::{JobState, QueueMetrics};

use crate::aggregate::{split_lines, Delimiter};
use crate::classifier::JOB_STATES;

const DEPENDENCY_REASON: &str = "Dependency";

/// Queue counts per job state from `squeue -a -r -h -o %A,%T,%r --states=all`.
pub fn parse_queue_metrics(input: &str) -> QueueMetrics {
    let mut queue = QueueMetrics::default();
    for line in split_lines(input) {
        let fields = Delimiter::Char(',').split(line);
        let Some(&state) = fields.get(1) else {
            continue;
        };
        let Some(state) = JOB_STATES.classify(state) else {
            tracing::debug!(state, "Ignoring unknown job state");
            continue;
        };

        queue.states[state] += 1;
        let reason = fields.get(2).map(|reason| reason.trim());
        if state == JobState::Pending && reason == Some(DEPENDENCY_REASON) {
            queue.pending_dependency += 1;
        }
    }
    queue
}
