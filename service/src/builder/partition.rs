use domain::model::entity::PartitionMetrics;
use indexmap::IndexMap;

use crate::aggregate::{split_lines, Aggregator, Delimiter};
use crate::join::Joiner;
use crate::primitive::parse_cpu_state;

/// Per-partition cpu states from `sinfo -h -o %R,%C`, joined with the
/// partition listings `squeue -a -r -h -o %P` prints for running and pending jobs.
///
/// Jobs in partitions sinfo does not report are left out.
pub fn parse_partition_metrics(
    sinfo: &str,
    running: &str,
    pending: &str,
) -> IndexMap<String, PartitionMetrics> {
    let mut partitions = Aggregator::new();
    for line in split_lines(sinfo) {
        let fields = Delimiter::Char(',').split(line);
        let &[partition, cpu, ..] = fields.as_slice() else {
            continue;
        };
        partitions.first_write(partition.trim(), || PartitionMetrics {
            cpu: parse_cpu_state(cpu),
            ..Default::default()
        });
    }

    Joiner::new(partitions.into_inner())
        .count_presence(running, |p| &mut p.jobs_running)
        .count_presence(pending, |p| &mut p.jobs_pending)
        .finish()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    const SINFO: &str = indoc! {"
        batch,5725/877/34/6636
        gpu,64/0/0/64
        debug,0/32/0/32
    "};

    #[test]
    fn cpus_and_jobs_per_partition() {
        let running = "batch\nbatch\ngpu\n";
        let pending = "batch\ndebug\ndebug\ndebug\n";
        let partitions = parse_partition_metrics(SINFO, running, pending);

        assert_eq!(partitions.keys().collect::<Vec<_>>(), ["batch", "gpu", "debug"]);
        let batch = &partitions["batch"];
        assert_eq!(batch.cpu.allocated, 5725);
        assert_eq!(batch.cpu.total, 6636);
        assert_eq!(batch.jobs_running, 2);
        assert_eq!(batch.jobs_pending, 1);
        assert_eq!(partitions["gpu"].jobs_running, 1);
        assert_eq!(partitions["debug"].jobs_pending, 3);
    }

    #[test]
    fn jobs_in_unknown_partitions_are_dropped() {
        let partitions = parse_partition_metrics(SINFO, "scavenger\n", "scavenger\n");
        assert_eq!(partitions.len(), 3);
        assert!(partitions.values().all(|p| p.jobs_running == 0 && p.jobs_pending == 0));
    }

    #[test]
    fn empty_job_listings() {
        let partitions = parse_partition_metrics(SINFO, "", "");
        assert_eq!(partitions["debug"].cpu.idle, 32);
        assert_eq!(partitions["debug"].jobs_pending, 0);
    }
}
