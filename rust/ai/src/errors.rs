use thiserror::Error;

use crate::ranges::RangeTier;

/// Errors from loading or validating policy configuration.
#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("{field}[{position}] must be a finite, non-negative number (got {value})")]
    InvalidThreshold {
        field: &'static str,
        position: usize,
        value: f64,
    },
    #[error("call threshold {call} is above the {field} threshold {other} at position {position}")]
    CallAboveRaise {
        field: &'static str,
        position: usize,
        call: f64,
        other: f64,
    },
    #[error("{tier} ranges: {source}")]
    Tier {
        tier: RangeTier,
        #[source]
        source: Box<RangeError>,
    },
    #[error("Unknown range tier: {0} (expected loose, standard or tight)")]
    UnknownTier(String),
    #[error("Unknown persona: {0} (expected NIT, TAG or LAG)")]
    UnknownPersona(String),
}
