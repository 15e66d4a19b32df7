//! Entity builders: captured tool output in, plain records out.
//!
//! Every builder is a pure function over the text it is given. Process
//! invocation belongs to the caller.

mod account;
mod cpus;
mod fairshare;
mod gpus;
mod job;
mod node;
mod nodes;
mod partition;
mod queue;
mod scheduler;
mod user;

#[rustfmt::skip]
pub use self::{
    account::parse_account_metrics,
    cpus::parse_cpus_metrics,
    fairshare::parse_fairshare_metrics,
    gpus::{parse_allocated_gpus, parse_gpus_metrics, parse_idle_gpus, parse_total_gpus},
    job::{parse_job_line, parse_job_metrics},
    node::parse_node_metrics,
    nodes::parse_nodes_metrics,
    partition::parse_partition_metrics,
    queue::parse_queue_metrics,
    scheduler::parse_scheduler_metrics,
    user::parse_user_metrics,
};

/// Pipe separated rows without header or quoting, as squeue and sshare `-P` print them.
fn pipe_records(input: &str) -> impl Iterator<Item = csv::StringRecord> + '_ {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'|')
        .quoting(false)
        .flexible(true)
        .from_reader(input.as_bytes())
        .into_records()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Skipping unreadable row: {e}");
                None
            }
        })
}
