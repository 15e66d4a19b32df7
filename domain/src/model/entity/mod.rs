pub mod account;
pub mod gpus;
pub mod job;
pub mod node;
pub mod nodes;
pub mod partition;
pub mod queue;
pub mod resource;
pub mod scheduler;
pub mod state;
pub mod user;

#[rustfmt::skip]
pub use self::{
    account::{AccountMetrics, FairShareMetrics},
    gpus::GpusMetrics,
    job::JobDuration,
    node::NodeMetrics,
    nodes::NodesMetrics,
    partition::PartitionMetrics,
    queue::QueueMetrics,
    resource::{CpuState, GenericResource},
    scheduler::SchedulerMetrics,
    state::{JobState, NodeState},
    user::UserMetrics,
};
