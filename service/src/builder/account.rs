use domain::model::entity::{AccountMetrics, JobState};
use indexmap::IndexMap;

use super::pipe_records;
use crate::aggregate::Aggregator;
use crate::classifier::JOB_STATES;
use crate::primitive::number_or_zero;

/// Per-account job tallies from `squeue -a -r -h -o %A|%a|%T|%C`.
pub fn parse_account_metrics(input: &str) -> IndexMap<String, AccountMetrics> {
    let mut accounts = Aggregator::<AccountMetrics>::new();
    for record in pipe_records(input) {
        let (Some(account), Some(state)) = (record.get(1), record.get(2)) else {
            continue;
        };
        let cpus: u64 = record.get(3).map(number_or_zero).unwrap_or_default();

        let account = accounts.bucket(account);
        match JOB_STATES.classify(state) {
            Some(JobState::Pending) => {
                account.pending += 1;
                account.pending_cpus += cpus;
            }
            Some(JobState::Running) => {
                account.running += 1;
                account.running_cpus += cpus;
            }
            Some(JobState::Suspended) => account.suspended += 1,
            _ => {}
        }
    }
    accounts.into_inner()
}
