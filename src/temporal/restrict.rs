//! Selector vocabulary shared by [`super::sequence::TSequence::restrict`]
//! and [`super::sequence_set::TSequenceSet::restrict`].

use crate::collections::datetime::{TsTzSpan, TsTzSpanSet};
use crate::collections::number::FloatSpanSet;
use crate::value::BaseValue;

/// What to keep (`at`) or discard (`minus`) from a temporal value.
/// Numeric-only selectors (span, span set, min, max) live on
/// [`NumericSelector`] since they require [`crate::value::NumericValue`].
#[derive(Clone, Debug)]
pub enum Selector<V> {
    Value(V),
    ValueSet(Vec<V>),
    Timestamp(crate::collections::datetime::Timestamp),
    TimestampSet(Vec<crate::collections::datetime::Timestamp>),
    Period(TsTzSpan),
    PeriodSet(TsTzSpanSet),
}

/// Restriction against the numeric bounding span of the base value,
/// available only for [`crate::value::NumericValue`] base types.
#[derive(Clone, Debug)]
pub enum NumericSelector {
    Span(crate::collections::number::FloatSpan),
    SpanSet(FloatSpanSet),
    Min,
    Max,
}

/// Whether a restriction keeps the matching part (`At`) or the rest (`Minus`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    At,
    Minus,
}

impl<V: BaseValue> From<V> for Selector<V> {
    fn from(v: V) -> Self {
        Selector::Value(v)
    }
}
