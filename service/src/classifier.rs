use domain::model::entity::{JobState, NodeState};

/// Maps a free-text state token onto a closed set of states by anchored,
/// case-insensitive prefix. The first matching prefix wins.
#[derive(Debug, Clone, Copy)]
pub struct StateClassifier<S: 'static> {
    table: &'static [(&'static str, S)],
}

impl<S: Copy + 'static> StateClassifier<S> {
    /// `table` prefixes must be lowercase.
    pub const fn new(table: &'static [(&'static str, S)]) -> Self {
        Self { table }
    }

    /// `None` for tokens outside the table; callers leave those out of tallies.
    pub fn classify(&self, token: &str) -> Option<S> {
        let token = token.trim().to_lowercase();
        self.table
            .iter()
            .find(|(prefix, _)| token.starts_with(prefix))
            .map(|&(_, state)| state)
    }
}

pub const JOB_STATES: StateClassifier<JobState> = StateClassifier::new(&[
    ("pending", JobState::Pending),
    ("running", JobState::Running),
    ("suspended", JobState::Suspended),
    ("cancelled", JobState::Cancelled),
    ("completing", JobState::Completing),
    ("completed", JobState::Completed),
    ("configuring", JobState::Configuring),
    ("failed", JobState::Failed),
    ("timeout", JobState::Timeout),
    ("preempted", JobState::Preempted),
    ("node_fail", JobState::NodeFail),
    ("out_of_memory", JobState::OutOfMemory),
]);

pub const NODE_STATES: StateClassifier<NodeState> = StateClassifier::new(&[
    ("alloc", NodeState::Alloc),
    ("comp", NodeState::Completing),
    ("down", NodeState::Down),
    ("drain", NodeState::Drain),
    ("fail", NodeState::Fail),
    ("err", NodeState::Error),
    ("idle", NodeState::Idle),
    ("maint", NodeState::Maint),
    ("mix", NodeState::Mix),
    ("res", NodeState::Reserved),
    ("plan", NodeState::Planned),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_states_ignore_case_and_decoration() {
        for token in ["RUNNING", "running", "Running+"] {
            assert_eq!(JOB_STATES.classify(token), Some(JobState::Running), "{token}");
        }
        assert_eq!(JOB_STATES.classify("CANCELLED by 1000"), Some(JobState::Cancelled));
        assert_eq!(JOB_STATES.classify("COMPLETING"), Some(JobState::Completing));
        assert_eq!(JOB_STATES.classify("COMPLETED"), Some(JobState::Completed));
        assert_eq!(JOB_STATES.classify("OUT_OF_MEMORY"), Some(JobState::OutOfMemory));
    }

    #[test]
    fn unknown_tokens_are_unclassified() {
        assert_eq!(JOB_STATES.classify("REQUEUED"), None);
        assert_eq!(JOB_STATES.classify(""), None);
        assert_eq!(NODE_STATES.classify("unknown"), None);
    }

    #[test]
    fn node_states() {
        assert_eq!(NODE_STATES.classify("allocated"), Some(NodeState::Alloc));
        assert_eq!(NODE_STATES.classify("mixed"), Some(NodeState::Mix));
        assert_eq!(NODE_STATES.classify("drained*"), Some(NodeState::Drain));
        assert_eq!(NODE_STATES.classify("draining"), Some(NodeState::Drain));
        assert_eq!(NODE_STATES.classify("down~"), Some(NodeState::Down));
        assert_eq!(NODE_STATES.classify("reserved"), Some(NodeState::Reserved));
        assert_eq!(NODE_STATES.classify("planned"), Some(NodeState::Planned));
        assert_eq!(NODE_STATES.classify("IDLE+CLOUD"), Some(NodeState::Idle));
    }
}
