use domain::model::entity::CpuState;

use crate::aggregate::split_lines;
use crate::primitive::parse_cpu_state;

/// Cluster-wide cpu states from `sinfo -h -o %C`.
pub fn parse_cpus_metrics(input: &str) -> CpuState {
    split_lines(input)
        .into_iter()
        .find(|line| !line.trim().is_empty())
        .map(parse_cpu_state)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_summary_line() {
        let cpus = parse_cpus_metrics("5725/877/34/6636\n");
        assert_eq!(cpus.allocated, 5725);
        assert_eq!(cpus.idle, 877);
        assert_eq!(cpus.other, 34);
        assert_eq!(cpus.total, 6636);
    }

    #[test]
    fn empty_output_is_zero() {
        assert_eq!(parse_cpus_metrics(""), CpuState::default());
        assert_eq!(parse_cpus_metrics("\n\n"), CpuState::default());
    }
}
