//! `tbool`: a temporal value over the boolean base domain. `bool` is
//! step-only (see
//! [`crate::registry::is_continuous`]), so [`TBoolSeq`] never takes
//! `Linear` interpolation — [`super::sequence::TSequence::new`] rejects
//! it for any temptype the registry doesn't mark continuous.

use super::dispatch::Temporal;
use super::instant::TInstant;
use super::sequence::TSequence;
use super::sequence_set::TSequenceSet;

pub type TBoolInst = TInstant<bool>;
pub type TBoolSeq = TSequence<bool>;
pub type TBoolSeqSet = TSequenceSet<bool>;
pub type TBool = Temporal<bool>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::datetime::Timestamp;
    use crate::temporal::interpolation::Interpolation;

    #[test]
    fn parses_and_formats_a_discrete_bool_sequence() {
        let text = "{true@2000-01-01T00:00:00+00:00, false@2000-01-02T00:00:00+00:00}";
        let t = TBool::from_wkt(text).unwrap();
        assert_eq!(t.as_wkt(), text);
    }

    #[test]
    fn stepwise_is_the_only_continuous_option() {
        let seq = TBoolSeq::new(
            vec![TInstant::new(Timestamp::from_micros(0), true), TInstant::new(Timestamp::from_micros(1), false)],
            true,
            false,
            Interpolation::Linear,
        );
        assert!(seq.is_err());
    }
}
