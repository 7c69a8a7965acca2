//! Shared numeric behavior for `tint` and `tfloat`: the numeric
//! aggregation and span/min/max selectors, as inherent methods on the
//! generic [`Temporal`] dispatcher rather than a trait every concrete
//! type re-implements by hand.

use crate::boxes::TBox;
use crate::value::{LinearInterpolable, NumericValue};

use crate::temporal::dispatch::Temporal;
use crate::temporal::instant::TInstant;
use crate::temporal::interpolation::Interpolation;
use crate::temporal::restrict::{Mode, NumericSelector};
use crate::temporal::sequence::TSequence;
use crate::temporal::sequence_set::TSequenceSet;

impl<V: NumericValue + LinearInterpolable> Temporal<V> {
    /// Numeric span/min/max selectors — only meaningful for
    /// [`NumericValue`] base types, unlike the general [`Selector`]
    /// vocabulary on [`Temporal::restrict`].
    ///
    /// [`Selector`]: crate::temporal::restrict::Selector
    pub fn restrict_numeric(&self, selector: &NumericSelector, mode: Mode) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        let pieces: Vec<TSequence<V>> = match self {
            Temporal::Instant(i) => {
                TSequence::new(vec![i.clone()], true, true, Interpolation::Discrete)
                    .expect("a single instant is always a valid discrete sequence")
                    .restrict_numeric(selector, mode)
            }
            Temporal::Sequence(s) => s.restrict_numeric(selector, mode),
            Temporal::SequenceSet(ss) => return ss.restrict_numeric(selector, mode).map(Temporal::SequenceSet),
        };
        wrap(pieces)
    }

    /// The numeric bounding box: period plus value span.
    pub fn bbox(&self) -> TBox {
        match self {
            Temporal::Instant(i) => TBox::new(
                Some(crate::collections::datetime::TsTzSpan::at(i.timestamp())),
                Some(crate::collections::number::FloatSpan::new(i.value().to_f64(), i.value().to_f64(), true, true)),
            ),
            Temporal::Sequence(s) => s.bbox(),
            Temporal::SequenceSet(ss) => ss.bbox(),
        }
    }

    pub fn integral(&self) -> f64 {
        match self {
            Temporal::Instant(_) => 0.0,
            Temporal::Sequence(s) => s.integral(),
            Temporal::SequenceSet(ss) => ss.integral(),
        }
    }

    pub fn time_weighted_average(&self) -> Option<f64> {
        match self {
            Temporal::Instant(_) => None,
            Temporal::Sequence(s) => s.time_weighted_average(),
            Temporal::SequenceSet(ss) => ss.time_weighted_average(),
        }
    }
}

/// Re-wraps restriction pieces in the smallest subtype that holds them,
/// the same collapsing rule [`Temporal::restrict`] applies.
fn wrap<V: NumericValue + LinearInterpolable + Clone>(mut pieces: Vec<TSequence<V>>) -> Option<Temporal<V>> {
    match pieces.len() {
        0 => None,
        1 => {
            let seq = pieces.pop().expect("checked len == 1");
            if seq.num_instants() == 1 {
                Some(Temporal::Instant(TInstant::new(seq.start_instant().timestamp(), seq.start_value().clone())))
            } else {
                Some(Temporal::Sequence(seq))
            }
        }
        _ => TSequenceSet::new(pieces, true).ok().map(Temporal::SequenceSet),
    }
}
