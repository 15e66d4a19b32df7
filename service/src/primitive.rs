//! Atomic value grammars.
//!
//! Error policy: a field that is merely unparsable as a number becomes zero
//! through [`number_or_zero`]. Only shape mismatches that cannot be read as
//! "absent" are reported, as a [`FormatError`].

use std::str::FromStr;
use std::sync::LazyLock;

use domain::model::entity::CpuState;
use domain::FormatError;
use regex::Regex;

static BYTE_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)([KMGT]?)$").unwrap());

/// Parses `s` leniently, falling back to the default (zero) value.
#[inline]
pub fn number_or_zero<T>(s: &str) -> T
where
    T: FromStr + Default,
{
    s.trim().parse().unwrap_or_default()
}

/// `2K` -> 2048. Empty and `0` are zero, a bare number is already bytes.
pub fn parse_byte_count(s: &str) -> Result<u64, FormatError> {
    let s = s.trim();
    if s.is_empty() || s == "0" {
        return Ok(0);
    }

    let caps = BYTE_COUNT.captures(s).ok_or_else(|| FormatError::ByteCount {
        input: s.to_owned(),
    })?;
    let num: u64 = number_or_zero(&caps[1]);
    let exponent = match &caps[2] {
        "K" => 1,
        "M" => 2,
        "G" => 3,
        "T" => 4,
        _ => 0,
    };
    Ok((0..exponent).fold(num, |bytes, _| bytes.saturating_mul(1024)))
}

/// `HH:MM:SS` -> seconds, with an optional sacct `D-` day prefix.
///
/// Components are not range checked.
pub fn parse_duration(s: &str) -> Result<i64, FormatError> {
    let s = s.trim();
    let component = |part: &str| {
        part.parse::<i64>().map_err(|_| FormatError::DurationComponent {
            input: s.to_owned(),
        })
    };

    let (days, clock) = match s.split_once('-') {
        Some((days, clock)) if !days.is_empty() => (component(days)?, clock),
        _ => (0, s),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    let &[hours, minutes, seconds] = parts.as_slice() else {
        return Err(FormatError::DurationFields {
            input: s.to_owned(),
            found: parts.len(),
        });
    };

    let overflow = || FormatError::DurationComponent {
        input: s.to_owned(),
    };
    [(days, 86_400), (component(hours)?, 3600), (component(minutes)?, 60), (component(seconds)?, 1)]
        .into_iter()
        .try_fold(0i64, |total, (value, unit)| {
            value.checked_mul(unit).and_then(|secs| total.checked_add(secs))
        })
        .ok_or_else(overflow)
}

/// Reads an `allocated/idle/other/total` tuple.
///
/// `None` means the input carried no tuple at all. Missing or unparsable
/// fields are zero.
pub fn try_parse_cpu_state(s: &str) -> Option<CpuState> {
    let s = s.trim();
    if !s.contains('/') {
        return None;
    }

    let mut fields = s.split('/').map(number_or_zero::<u64>);
    let mut next = || fields.next().unwrap_or_default();
    Some(CpuState {
        allocated: next(),
        idle: next(),
        other: next(),
        total: next(),
    })
}

/// Like [`try_parse_cpu_state`], with "no data" read as the zero tuple.
#[inline]
pub fn parse_cpu_state(s: &str) -> CpuState {
    try_parse_cpu_state(s).unwrap_or_default()
}
