//! `tfloat`: a temporal value over the floating-point base domain.
//! Unlike `tint`, `f64` is continuous, so a `TFloat` may use `Linear`
//! interpolation.

use crate::error::{Result, TemporalError};
use crate::value::NumericValue;

use super::super::dispatch::Temporal;
use super::super::instant::TInstant;
use super::super::interpolation::Interpolation;
use super::super::sequence::TSequence;
use super::super::sequence_set::TSequenceSet;
use super::tint::TInt;

pub type TFloatInst = TInstant<f64>;
pub type TFloatSeq = TSequence<f64>;
pub type TFloatSeqSet = TSequenceSet<f64>;
pub type TFloat = Temporal<f64>;

impl TFloat {
    /// Casts to `tint`, rounding each sampled value to the nearest integer.
    /// A `Linear` sequence is refused outright
    /// rather than silently rounded: rounding the two endpoints and
    /// relabelling the result `Stepwise`/`Discrete` would change which
    /// values the sequence takes at every instant in between, not just at
    /// its samples, so there is no lossy-but-honest rounding to perform.
    pub fn to_tint(&self) -> Result<TInt> {
        match self {
            Temporal::Instant(i) => Ok(Temporal::Instant(TInstant::new(i.timestamp(), i64::from_f64(*i.value())))),
            Temporal::Sequence(s) => Ok(Temporal::Sequence(cast_sequence(s)?)),
            Temporal::SequenceSet(ss) => {
                let mut out = Vec::with_capacity(ss.sequences().len());
                for s in ss.sequences() {
                    out.push(cast_sequence(s)?);
                }
                Ok(Temporal::SequenceSet(TSequenceSet::new(out, true)?))
            }
        }
    }
}

fn cast_sequence(s: &TFloatSeq) -> Result<TSequence<i64>> {
    if s.interpolation() == Interpolation::Linear {
        return Err(TemporalError::CastLossy {
            from: "tfloat",
            to: "tint",
        });
    }
    let instants = s
        .instants()
        .iter()
        .map(|i| TInstant::new(i.timestamp(), i64::from_f64(*i.value())))
        .collect();
    TSequence::new(instants, s.is_lower_inclusive(), s.is_upper_inclusive(), s.interpolation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::datetime::Timestamp;

    #[test]
    fn parses_and_formats_a_float_instant() {
        let text = "1.5@2000-01-01T00:00:00+00:00";
        let t = TFloat::from_wkt(text).unwrap();
        assert_eq!(*t.start_value(), 1.5);
        assert_eq!(t.as_wkt(), text);
    }

    #[test]
    fn stepwise_casts_to_tint_by_rounding() {
        let seq = TFloatSeq::new(
            vec![TInstant::new(Timestamp::from_micros(0), 1.4), TInstant::new(Timestamp::from_micros(1), 2.6)],
            true,
            true,
            Interpolation::Stepwise,
        )
        .unwrap();
        let tint = Temporal::Sequence(seq).to_tint().unwrap();
        match tint {
            Temporal::Sequence(s) => {
                assert_eq!(*s.instant_n(1).unwrap().value(), 1);
                assert_eq!(*s.instant_n(2).unwrap().value(), 3);
            }
            _ => panic!("expected a sequence"),
        }
    }

    #[test]
    fn linear_sequence_rejects_cast_to_tint() {
        let seq = TFloatSeq::new(
            vec![TInstant::new(Timestamp::from_micros(0), 1.0), TInstant::new(Timestamp::from_micros(1), 2.0)],
            true,
            true,
            Interpolation::Linear,
        )
        .unwrap();
        let err = Temporal::Sequence(seq).to_tint().unwrap_err();
        assert!(matches!(err, TemporalError::CastLossy { from: "tfloat", to: "tint" }));
    }
}
