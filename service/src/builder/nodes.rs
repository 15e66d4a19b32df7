use domain::model::entity::NodesMetrics;

use crate::aggregate::{unique_lines, Delimiter};
use crate::classifier::NODE_STATES;
use crate::primitive::number_or_zero;

/// Node counts per state from `sinfo -h -o %D,%T`.
pub fn parse_nodes_metrics(input: &str) -> NodesMetrics {
    let mut nodes = NodesMetrics::default();
    for line in unique_lines(input) {
        let fields = Delimiter::Char(',').split(line);
        let &[count, state, ..] = fields.as_slice() else {
            continue;
        };
        match NODE_STATES.classify(state) {
            Some(state) => nodes.states[state] += number_or_zero::<u64>(count),
            None => tracing::debug!(state, "Ignoring unknown node state"),
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use domain::model::entity::NodeState;
    use indoc::indoc;

    use super::*;

    #[test]
    fn counts_by_state() {
        let input = indoc! {"
            12,allocated
            4,mixed
            2,drained*
            1,draining
            3,idle
            1,down~
            5,reserved
            1,planned
        "};
        let nodes = parse_nodes_metrics(input);
        assert_eq!(nodes.get(NodeState::Alloc), 12);
        assert_eq!(nodes.get(NodeState::Mix), 4);
        assert_eq!(nodes.get(NodeState::Drain), 3);
        assert_eq!(nodes.get(NodeState::Idle), 3);
        assert_eq!(nodes.get(NodeState::Down), 1);
        assert_eq!(nodes.get(NodeState::Reserved), 5);
        assert_eq!(nodes.get(NodeState::Planned), 1);
        assert_eq!(nodes.get(NodeState::Maint), 0);
    }

    #[test]
    fn identical_rows_count_once() {
        let nodes = parse_nodes_metrics("2,idle\n2,idle\n3,idle\n");
        assert_eq!(nodes.get(NodeState::Idle), 5);
    }

    #[test]
    fn unknown_and_short_rows_are_ignored() {
        let nodes = parse_nodes_metrics("7,future\n7\n\n");
        assert_eq!(nodes, NodesMetrics::default());
    }
}
