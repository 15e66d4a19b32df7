//! Prometheus text format.

use std::collections::HashSet;

use anyhow::{bail, Context};
use domain::model::vo::Sample;
use indexmap::map::Entry;
use indexmap::IndexMap;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

/// Renders one snapshot. Every metric name becomes a gauge family on a fresh
/// registry, so nothing survives from the previous cycle.
///
/// Two samples with the same name and label values are an error, as are
/// samples of one family with different label names.
pub fn render(samples: &[Sample]) -> anyhow::Result<String> {
    let registry = Registry::new();
    let mut families = IndexMap::<&str, (Vec<&str>, GaugeVec)>::new();
    let mut series = HashSet::new();

    for sample in samples {
        let names: Vec<&str> = sample.labels.iter().map(|(key, _)| *key).collect();
        let values: Vec<&str> = sample.labels.iter().map(|(_, value)| value.as_str()).collect();
        if !series.insert((sample.name, values.clone())) {
            bail!("Duplicate series {} {:?}", sample.name, sample.labels);
        }

        let (family_labels, gauge) = match families.entry(sample.name) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let gauge = GaugeVec::new(Opts::new(sample.name, sample.help), &names)
                    .with_context(|| format!("Invalid metric {}", sample.name))?;
                registry.register(Box::new(gauge.clone()))?;
                entry.insert((names.clone(), gauge))
            }
        };
        if *family_labels != names {
            bail!("Labels {names:?} of {} differ from {family_labels:?}", sample.name);
        }
        gauge.get_metric_with_label_values(&values)?.set(sample.value);
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).context("Snapshot is not UTF-8")
}

/// Value of the series line starting with `series`, e.g. `slurm_cpus_alloc`
/// or `slurm_account_jobs_running{account="physics"}`.
#[cfg(test)]
pub(crate) fn series_value(text: &str, series: &str) -> Option<f64> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| line.strip_prefix(series)?.strip_prefix(' '))
        .and_then(|value| value.parse().ok())
}
