/// Hard failures of the atomic grammars.
///
/// Everything not listed here degrades silently: unparsable numbers become
/// zero and unknown state tokens are left out of the tallies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("duration `{input}` must be HH:MM:SS, found {found} colon-separated fields")]
    DurationFields { input: String, found: usize },

    #[error("duration `{input}` has a non-integer component")]
    DurationComponent { input: String },

    #[error("generic resource `{input}` must be kind[:name]:count, found {found} fields")]
    GresFields { input: String, found: usize },

    #[error("byte count `{input}` does not match <digits>[KMGT]")]
    ByteCount { input: String },
}
