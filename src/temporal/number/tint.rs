//! `tint`: a temporal value over the integer base domain. `i64` is
//! step-only — linear interpolation of an integer would produce
//! fractional values, which is exactly what `CastLossy` exists to
//! forbid (see [`TFloat::to_tint`](super::tfloat::TFloat::to_tint)).

use super::super::dispatch::Temporal;
use super::super::instant::TInstant;
use super::super::sequence::TSequence;
use super::super::sequence_set::TSequenceSet;

pub type TIntInst = TInstant<i64>;
pub type TIntSeq = TSequence<i64>;
pub type TIntSeqSet = TSequenceSet<i64>;
pub type TInt = Temporal<i64>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::interpolation::Interpolation;

    #[test]
    fn rejects_linear_interpolation() {
        let seq = TIntSeq::new(
            vec![TInstant::new(crate::collections::datetime::Timestamp::from_micros(0), 1i64)],
            true,
            true,
            Interpolation::Linear,
        );
        assert!(seq.is_err());
    }
}
