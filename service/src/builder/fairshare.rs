use domain::model::entity::FairShareMetrics;
use indexmap::IndexMap;

use super::pipe_records;
use crate::aggregate::Aggregator;
use crate::primitive::number_or_zero;

/// Per-account fair-share factors from `sshare -n -P -o account,fairshare`.
///
/// User associations are nested two spaces below their account and are
/// skipped. The first row for an account wins.
pub fn parse_fairshare_metrics(input: &str) -> IndexMap<String, FairShareMetrics> {
    let mut accounts = Aggregator::new();
    for record in pipe_records(input) {
        let (Some(account), Some(fairshare)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if account.starts_with("  ") {
            continue;
        }
        accounts.first_write(account.trim(), || FairShareMetrics {
            fairshare: number_or_zero(fairshare),
        });
    }
    accounts.into_inner()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn account_rows_only() {
        let input = indoc! {"
            root|0.500000
             root|1.000000
             physics|0.250000
              physics|0.125000
             chemistry|0.750000
              chemistry|0.100000
        "};
        let accounts = parse_fairshare_metrics(input);

        assert_eq!(accounts.keys().collect::<Vec<_>>(), ["root", "physics", "chemistry"]);
        assert_eq!(accounts["root"].fairshare, 0.5);
        assert_eq!(accounts["physics"].fairshare, 0.25);
        assert_eq!(accounts["chemistry"].fairshare, 0.75);
    }

    #[test]
    fn unreadable_factor_is_zero() {
        let accounts = parse_fairshare_metrics("bio|inf?\nnopipe\n");
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts["bio"].fairshare, 0.0);
    }
}
