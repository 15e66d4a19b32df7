//! Generic resource (GRES) expressions, e.g. `gpu:A30:4(IDX:0-3),mps:400`.
//!
//! Slurm 20.11 and 21.08+ print these differently, so the grammar is
//! selected through [`GresDialect`].

use std::sync::LazyLock;

use domain::model::entity::GenericResource;
use domain::FormatError;
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use crate::primitive::number_or_zero;

const NULL_NAME: &str = "(null)";

static LEGACY_GPU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gpu:(?:(\(null\)|[^:(]*):)?([0-9]+)(\([^)]*\))?").unwrap());

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GresDialect {
    /// `kind[:name]:count[(annotation)]`, any kind. Slurm 21.08 and later.
    #[default]
    Structured,
    /// Per-token gpu scan tolerant of the Slurm 20.11 shapes. Never fails,
    /// tokens it cannot read are skipped.
    Legacy,
}

impl GresDialect {
    pub fn parse(self, s: &str) -> Result<Vec<GenericResource>, FormatError> {
        match self {
            Self::Structured => parse_generic_resources(s),
            Self::Legacy => Ok(parse_legacy(s)),
        }
    }
}

/// Cuts every parenthesised annotation out of `s`.
///
/// Annotations do not nest, so each `(` is paired with the first `)` after it.
/// An unbalanced `(` is left in place.
pub fn strip_annotations(s: &str) -> String {
    let mut out = s.to_owned();
    while let Some(open) = out.find('(') {
        let Some(close) = out[open..].find(')') else {
            break;
        };
        out.replace_range(open..=open + close, "");
    }
    out
}

/// Parses a structured GRES list. Entries keep input order and are not merged.
pub fn parse_generic_resources(s: &str) -> Result<Vec<GenericResource>, FormatError> {
    let stripped = strip_annotations(s.trim());
    stripped
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let fields: Vec<&str> = piece.split(':').collect();
            let (kind, name, count) = match fields.as_slice() {
                &[kind, count] => (kind, "", count),
                &[kind, name, count] => (kind, name, count),
                _ => {
                    return Err(FormatError::GresFields {
                        input: piece.to_owned(),
                        found: fields.len(),
                    })
                }
            };
            let name = if name == NULL_NAME { "" } else { name };
            Ok(GenericResource::new(kind, name, number_or_zero(count)))
        })
        .collect()
}

fn parse_legacy(s: &str) -> Vec<GenericResource> {
    s.split(',')
        .filter(|token| token.contains("gpu:"))
        .filter_map(|token| {
            let Some(caps) = LEGACY_GPU.captures(token) else {
                tracing::debug!(token, "Skipping unreadable gres token");
                return None;
            };
            let name = match caps.get(1).map_or("", |m| m.as_str()) {
                NULL_NAME => "",
                name => name,
            };
            Some(GenericResource::new("gpu", name, number_or_zero(&caps[2])))
        })
        .collect()
}

/// Sum of all gpu counts.
pub fn gpu_count(resources: &[GenericResource]) -> u64 {
    resources.iter().filter(|r| r.is_gpu()).map(|r| r.count).sum()
}

/// Idle gpus per model name: configured minus used, never below zero.
///
/// Names only present in `used` do not appear.
pub fn idle_by_name(gres: &[GenericResource], used: &[GenericResource]) -> IndexMap<String, u64> {
    let mut idle = IndexMap::<String, u64>::new();
    for resource in gres.iter().filter(|r| r.is_gpu()) {
        *idle.entry(resource.name.clone()).or_default() += resource.count;
    }
    for resource in used.iter().filter(|r| r.is_gpu()) {
        if let Some(count) = idle.get_mut(&resource.name) {
            *count = count.saturating_sub(resource.count);
        }
    }
    idle
}
