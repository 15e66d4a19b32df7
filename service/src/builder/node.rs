use domain::model::entity::{GenericResource, NodeMetrics};
use domain::FormatError;
use indexmap::IndexMap;

use crate::aggregate::{unique_lines, Aggregator, Delimiter};
use crate::gres::{idle_by_name, GresDialect};
use crate::primitive::{number_or_zero, parse_cpu_state};

const NULL_COLUMN: &str = "(null)";

/// Per-node attributes from
/// `sinfo -h -N -O NodeList,AllocMem,Memory,CPUsState,StateLong[,Gres,GresUsed]`.
///
/// The first row seen for a node wins. A row with an unreadable GRES column
/// is dropped as a whole.
pub fn parse_node_metrics(input: &str, dialect: GresDialect) -> IndexMap<String, NodeMetrics> {
    let mut nodes = Aggregator::<NodeMetrics>::new();
    for line in unique_lines(input) {
        let fields = Delimiter::Whitespace.split(line);
        let &[name, mem_alloc, mem_total, cpu, status, ref gres_columns @ ..] = fields.as_slice()
        else {
            if !fields.is_empty() {
                tracing::debug!(line, "Skipping short sinfo row");
            }
            continue;
        };

        let (gres, gres_used) = match node_resources(gres_columns, dialect) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(node = name, "Skipping sinfo row: {e}");
                continue;
            }
        };

        let stored = nodes.first_write(name, || NodeMetrics {
            mem_alloc: number_or_zero(mem_alloc),
            mem_total: number_or_zero(mem_total),
            cpu: parse_cpu_state(cpu),
            gres_idle: idle_by_name(&gres, &gres_used),
            gres,
            gres_used,
            status: status.to_owned(),
        });
        if !stored {
            tracing::debug!(node = name, "Keeping first sinfo row for node");
        }
    }
    nodes.into_inner()
}

/// Configured and used GRES. The used column only counts when the node has
/// GRES configured.
fn node_resources(
    columns: &[&str],
    dialect: GresDialect,
) -> Result<(Vec<GenericResource>, Vec<GenericResource>), FormatError> {
    match *columns {
        [gres, ref rest @ ..] if !gres.is_empty() && gres != NULL_COLUMN => {
            let used = match rest.first() {
                Some(&used) if used != NULL_COLUMN => dialect.parse(used)?,
                _ => Vec::new(),
            };
            Ok((dialect.parse(gres)?, used))
        }
        _ => Ok((Vec::new(), Vec::new())),
    }
}
