/// Errors produced by temporal value constructors, mutators and parsers.
///
/// Every variant is recoverable at the call boundary: operations never
/// panic or abort the process on bad input, they return one of these.
#[derive(Debug, thiserror::Error)]
pub enum TemporalError {
    /// Timestamps were not strictly increasing, or sequences were not
    /// disjointly ordered.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// Two inputs to a constructor or operator declare incompatible
    /// interpolations.
    #[error("interpolation mismatch: expected {expected}, found {found}")]
    InterpolationMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Mixing temporal types in a constructor or operator.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Adjoining inputs carry different values at a shared inclusive
    /// instant.
    #[error("value mismatch at join at timestamp {at}")]
    ValueMismatchAtJoin { at: crate::collections::datetime::Timestamp },

    /// A restriction or intersection produced no instants. Most APIs
    /// prefer `Option::None` over this variant; it exists for call sites
    /// that must distinguish "empty" from "malformed".
    #[error("operation produced an empty result")]
    EmptyResult,

    /// A cast would lose information (e.g. linear temporal float to
    /// temporal int) and is explicitly forbidden.
    #[error("lossy cast from {from} to {to}")]
    CastLossy { from: &'static str, to: &'static str },

    /// Textual input was rejected.
    #[error("parse error at position {position}: {reason}")]
    ParseError { position: usize, reason: String },

    /// An `n`-th accessor index fell outside `[1, total_instants]`.
    #[error("index {index} out of range [1, {len}]")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, TemporalError>;
