use domain::model::entity::{JobState, UserMetrics};
use indexmap::IndexMap;

use super::pipe_records;
use crate::aggregate::Aggregator;
use crate::classifier::JOB_STATES;
use crate::primitive::{number_or_zero, parse_byte_count};

/// Per-user job tallies from `squeue -a -r -h -o %A|%u|%T|%C|%m`.
///
/// Memory is only accumulated for running jobs. A row whose memory column
/// cannot be read is dropped.
pub fn parse_user_metrics(input: &str) -> IndexMap<String, UserMetrics> {
    let mut users = Aggregator::<UserMetrics>::new();
    for record in pipe_records(input) {
        let (Some(user), Some(state)) = (record.get(1), record.get(2)) else {
            continue;
        };
        let cpus: u64 = record.get(3).map(number_or_zero).unwrap_or_default();
        let mem = match parse_byte_count(record.get(4).unwrap_or_default()) {
            Ok(mem) => mem,
            Err(e) => {
                tracing::warn!(user, "Skipping squeue row: {e}");
                continue;
            }
        };

        let user = users.bucket(user);
        match JOB_STATES.classify(state) {
            Some(JobState::Pending) => {
                user.jobs_pending += 1;
                user.cpus_pending += cpus;
            }
            Some(JobState::Running) => {
                user.jobs_running += 1;
                user.cpus_running += cpus;
                user.mem_running += mem;
            }
            Some(JobState::Suspended) => user.jobs_suspended += 1,
            _ => {}
        }
    }
    users.into_inner()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn tallies_by_user() {
        let input = indoc! {"
            1001|alice|RUNNING|8|2G
            1002|alice|RUNNING|8|512M
            1003|alice|PENDING|4|1G
            1004|bob|SUSPENDED|1|0
        "};
        let users = parse_user_metrics(input);

        assert_eq!(
            users["alice"],
            UserMetrics {
                jobs_pending: 1,
                cpus_pending: 4,
                jobs_running: 2,
                cpus_running: 16,
                mem_running: 2 * 1024 * 1024 * 1024 + 512 * 1024 * 1024,
                jobs_suspended: 0,
            }
        );
        assert_eq!(users["bob"].jobs_suspended, 1);
    }

    #[test]
    fn pending_memory_is_not_counted() {
        let users = parse_user_metrics("1003|carol|PENDING|4|64G\n");
        assert_eq!(users["carol"].mem_running, 0);
        assert_eq!(users["carol"].cpus_pending, 4);
    }

    #[test]
    fn unreadable_memory_drops_the_row() {
        let input = indoc! {"
            1001|dave|RUNNING|8|lots
            1002|dave|RUNNING|2|1K
        "};
        let users = parse_user_metrics(input);
        assert_eq!(users["dave"].jobs_running, 1);
        assert_eq!(users["dave"].mem_running, 1024);
    }

    #[test]
    fn missing_memory_column_is_zero() {
        let users = parse_user_metrics("1001|erin|RUNNING|8\n5|x\n");
        assert_eq!(users.len(), 1);
        assert_eq!(users["erin"].mem_running, 0);
    }
}
