use domain::model::entity::SchedulerMetrics;

use crate::aggregate::split_lines;
use crate::primitive::number_or_zero;

/// Scheduler statistics from `sdiag`.
///
/// `Last cycle` and `Mean cycle` appear twice, first for the main scheduler
/// and then for the backfill scheduler. Indented statistics are matched on
/// their whole key so `Last cycle when` or `Depth Mean (try depth)` never
/// shadow the values they resemble.
pub fn parse_scheduler_metrics(input: &str) -> SchedulerMetrics {
    let mut sched = SchedulerMetrics::default();
    let mut last_cycles = 0;
    let mut mean_cycles = 0;

    for line in split_lines(input) {
        let mut parts = line.split(':');
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let value: f64 = number_or_zero(value);
        let indented = key.starts_with(char::is_whitespace);
        let stat = key.trim_start();

        if key.starts_with("Server thread") {
            sched.threads = value;
        } else if key.starts_with("Agent queue") {
            sched.queue_size = value;
        } else if key.starts_with("DBD Agent") {
            sched.dbd_queue_size = value;
        } else if !indented {
            continue;
        } else if stat == "Last cycle" {
            last_cycles += 1;
            match last_cycles {
                1 => sched.last_cycle = value,
                2 => sched.backfill_last_cycle = value,
                _ => {}
            }
        } else if stat == "Mean cycle" {
            mean_cycles += 1;
            match mean_cycles {
                1 => sched.mean_cycle = value,
                2 => sched.backfill_mean_cycle = value,
                _ => {}
            }
        } else if stat.starts_with("Cycles per") {
            sched.cycle_per_minute = value;
        } else if stat == "Depth Mean" {
            sched.backfill_depth_mean = value;
        } else if stat.starts_with("Total backfilled jobs (since last slurm start)") {
            sched.total_backfilled_jobs_since_start = value;
        } else if stat.starts_with("Total backfilled jobs (since last stats cycle start)") {
            sched.total_backfilled_jobs_since_cycle = value;
        } else if stat.starts_with("Total backfilled heterogeneous job components") {
            sched.total_backfilled_heterogeneous = value;
        }
    }
    sched
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    const SDIAG: &str = indoc! {"
        *******************************************************
        sdiag output at Thu Jan 16 10:21:11 2024 (1705396871)
        Data since      Thu Jan 16 00:00:00 2024 (1705356000)
        *******************************************************
        Server thread count:  3
        Agent queue size:     0
        Agent count:          0
        Agent thread count:   0
        DBD Agent queue size: 0

        Jobs submitted: 1240
        Jobs started:   1198

        Main schedule statistics (microseconds):
        \tLast cycle:   97209
        \tMax cycle:    1068905
        \tTotal cycles: 2181
        \tMean cycle:   54684
        \tMean depth cycle:  172
        \tCycles per minute: 1
        \tLast queue length: 123

        Backfilling stats
        \tTotal backfilled jobs (since last slurm start): 111544
        \tTotal backfilled jobs (since last stats cycle start): 793
        \tTotal backfilled heterogeneous job components: 10
        \tTotal cycles: 67
        \tLast cycle when: Thu Jan 16 10:20:46 2024 (1705396846)
        \tLast cycle: 1942890
        \tMax cycle:  3081422
        \tMean cycle: 1486438
        \tLast depth cycle: 300
        \tLast depth cycle (try sched): 251
        \tDepth Mean: 287
        \tDepth Mean (try depth): 234
        \tLast queue length: 123
        \tMean queue length: 120
    "};

    #[test]
    fn reads_both_schedulers() {
        let sched = parse_scheduler_metrics(SDIAG);
        assert_eq!(
            sched,
            SchedulerMetrics {
                threads: 3.0,
                queue_size: 0.0,
                dbd_queue_size: 0.0,
                last_cycle: 97209.0,
                mean_cycle: 54684.0,
                cycle_per_minute: 1.0,
                backfill_last_cycle: 1942890.0,
                backfill_mean_cycle: 1486438.0,
                backfill_depth_mean: 287.0,
                total_backfilled_jobs_since_start: 111544.0,
                total_backfilled_jobs_since_cycle: 793.0,
                total_backfilled_heterogeneous: 10.0,
            }
        );
    }

    #[test]
    fn missing_backfill_section_leaves_zeros() {
        let input = indoc! {"
            Server thread count: 5
            \tLast cycle: 10
            \tMean cycle: 20
        "};
        let sched = parse_scheduler_metrics(input);
        assert_eq!(sched.threads, 5.0);
        assert_eq!(sched.last_cycle, 10.0);
        assert_eq!(sched.mean_cycle, 20.0);
        assert_eq!(sched.backfill_last_cycle, 0.0);
        assert_eq!(sched.backfill_mean_cycle, 0.0);
    }

    #[test]
    fn unindented_lookalikes_are_ignored() {
        let sched = parse_scheduler_metrics("Last cycle: 10\nDepth Mean: 3\n");
        assert_eq!(sched, SchedulerMetrics::default());
    }
}
