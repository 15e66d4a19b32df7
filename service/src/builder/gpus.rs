//! Cluster-wide gpu accounting from node-grouped `sinfo` captures.
//!
//! Each capture has the node count first, followed by GRES columns:
//!
//! * total: `sinfo -a -h --Format=Nodes: ,Gres: `
//! * allocated: `sinfo -a -h --Format=Nodes: ,GresUsed: --state=allocated`
//! * idle: `sinfo -a -h --Format=Nodes: ,Gres: ,GresUsed: --state=idle,allocated`

use domain::model::entity::GpusMetrics;
use domain::FormatError;

use crate::aggregate::{split_lines, Delimiter};
use crate::gres::{gpu_count, GresDialect};
use crate::primitive::number_or_zero;

/// Calls `per_row` with the node count and GRES columns of every gpu row, and
/// sums the results. Rows with unreadable GRES are skipped.
fn sum_rows<F>(input: &str, per_row: F) -> u64
where
    F: Fn(u64, &[&str]) -> Result<u64, FormatError>,
{
    split_lines(input)
        .into_iter()
        .filter(|line| line.contains("gpu:"))
        .filter_map(|line| {
            let fields = Delimiter::Whitespace.split(line);
            let (nodes, columns) = fields.split_first()?;
            match per_row(number_or_zero(nodes), columns) {
                Ok(gpus) => Some(gpus),
                Err(e) => {
                    tracing::warn!("Skipping sinfo gpu row: {e}");
                    None
                }
            }
        })
        .sum()
}

fn column_gpus(columns: &[&str], index: usize, dialect: GresDialect) -> Result<u64, FormatError> {
    match columns.get(index) {
        Some(column) => Ok(gpu_count(&dialect.parse(column)?)),
        None => Ok(0),
    }
}

fn first_column_gpus(input: &str, dialect: GresDialect) -> u64 {
    sum_rows(input, |nodes, columns| Ok(nodes * column_gpus(columns, 0, dialect)?))
}

/// Configured gpus over all nodes.
#[inline]
pub fn parse_total_gpus(input: &str, dialect: GresDialect) -> u64 {
    first_column_gpus(input, dialect)
}

/// Gpus in use on allocated nodes.
#[inline]
pub fn parse_allocated_gpus(input: &str, dialect: GresDialect) -> u64 {
    first_column_gpus(input, dialect)
}

/// Configured minus used gpus on idle and allocated nodes.
pub fn parse_idle_gpus(input: &str, dialect: GresDialect) -> u64 {
    sum_rows(input, |nodes, columns| {
        let gres = column_gpus(columns, 0, dialect)?;
        let used = column_gpus(columns, 1, dialect)?;
        Ok(nodes * gres.saturating_sub(used))
    })
}

/// Combines the three captures into the cluster summary.
pub fn parse_gpus_metrics(
    total: &str,
    allocated: &str,
    idle: &str,
    dialect: GresDialect,
) -> GpusMetrics {
    GpusMetrics::new(
        parse_total_gpus(total, dialect),
        parse_allocated_gpus(allocated, dialect),
        parse_idle_gpus(idle, dialect),
    )
}
