/// Canonical job state as reported by squeue/sacct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_map::Enum, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum JobState {
    Pending,
    Running,
    Suspended,
    Cancelled,
    Completing,
    Completed,
    Configuring,
    Failed,
    Timeout,
    Preempted,
    NodeFail,
    OutOfMemory,
}

impl JobState {
    pub fn queue_metric_name(self) -> &'static str {
        match self {
            Self::Pending => "slurm_queue_pending",
            Self::Running => "slurm_queue_running",
            Self::Suspended => "slurm_queue_suspended",
            Self::Cancelled => "slurm_queue_cancelled",
            Self::Completing => "slurm_queue_completing",
            Self::Completed => "slurm_queue_completed",
            Self::Configuring => "slurm_queue_configuring",
            Self::Failed => "slurm_queue_failed",
            Self::Timeout => "slurm_queue_timeout",
            Self::Preempted => "slurm_queue_preempted",
            Self::NodeFail => "slurm_queue_node_fail",
            Self::OutOfMemory => "slurm_queue_out_of_memory",
        }
    }

    pub fn queue_help(self) -> &'static str {
        match self {
            Self::Pending => "Pending jobs in queue",
            Self::Running => "Running jobs in the cluster",
            Self::Suspended => "Suspended jobs in the cluster",
            Self::Cancelled => "Cancelled jobs in the cluster",
            Self::Completing => "Completing jobs in the cluster",
            Self::Completed => "Completed jobs in the cluster",
            Self::Configuring => "Configuring jobs in the cluster",
            Self::Failed => "Number of failed jobs",
            Self::Timeout => "Jobs stopped by timeout",
            Self::Preempted => "Number of preempted jobs",
            Self::NodeFail => "Number of jobs stopped due to node fail",
            Self::OutOfMemory => "Number of jobs stopped by oomkiller",
        }
    }
}

/// Canonical node state as reported by sinfo.
///
/// The string form is the short suffix used in metric names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_map::Enum, strum::AsRefStr, strum::Display)]
pub enum NodeState {
    #[strum(serialize = "alloc")]
    Alloc,
    #[strum(serialize = "comp")]
    Completing,
    #[strum(serialize = "down")]
    Down,
    #[strum(serialize = "drain")]
    Drain,
    #[strum(serialize = "fail")]
    Fail,
    #[strum(serialize = "err")]
    Error,
    #[strum(serialize = "idle")]
    Idle,
    #[strum(serialize = "maint")]
    Maint,
    #[strum(serialize = "mix")]
    Mix,
    #[strum(serialize = "resv")]
    Reserved,
    #[strum(serialize = "plnd")]
    Planned,
}

impl NodeState {
    pub fn metric_name(self) -> &'static str {
        match self {
            Self::Alloc => "slurm_nodes_alloc",
            Self::Completing => "slurm_nodes_comp",
            Self::Down => "slurm_nodes_down",
            Self::Drain => "slurm_nodes_drain",
            Self::Fail => "slurm_nodes_fail",
            Self::Error => "slurm_nodes_err",
            Self::Idle => "slurm_nodes_idle",
            Self::Maint => "slurm_nodes_maint",
            Self::Mix => "slurm_nodes_mix",
            Self::Reserved => "slurm_nodes_resv",
            Self::Planned => "slurm_nodes_plnd",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::Alloc => "Allocated nodes",
            Self::Completing => "Completing nodes",
            Self::Down => "Down nodes",
            Self::Drain => "Drain nodes",
            Self::Fail => "Fail nodes",
            Self::Error => "Error nodes",
            Self::Idle => "Idle nodes",
            Self::Maint => "Maint nodes",
            Self::Mix => "Mix nodes",
            Self::Reserved => "Reserved nodes",
            Self::Planned => "Planned nodes",
        }
    }
}
