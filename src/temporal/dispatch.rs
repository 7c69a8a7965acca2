//! Temporal dispatcher: a tagged union over the three in-memory shapes a
//! temporal value can take, routing each operation to the
//! subtype-specific implementation underneath.
//!
//! A database-backed implementation of this model carries a runtime
//! `subtype` tag with `instant`/`discrete sequence`/`continuous
//! sequence`/`sequence set` as four values. Here "discrete sequence" and
//! "continuous sequence" are the same Rust variant ([`TSequence<V>`],
//! which already carries its own [`Interpolation`] flag) rather than two
//! variants that would only ever differ by that one field; the
//! `Sequence` variant's `interpolation()` is how a caller tells them
//! apart, exactly like `TSequence::interpolation` does today.

use chrono::TimeDelta;

use crate::collections::datetime::{Timestamp, TsTzSpan, TsTzSpanSet};
use crate::error::{Result, TemporalError};
use crate::value::{BaseValue, LinearInterpolable};

use super::instant::TInstant;
use super::interpolation::Interpolation;
use super::restrict::{Mode, Selector};
use super::sequence::TSequence;
use super::sequence_set::TSequenceSet;

/// One temporal value over base domain `V`, in whichever of the three
/// subtypes it happens to be stored as.
#[derive(Clone, Debug, PartialEq)]
pub enum Temporal<V> {
    Instant(TInstant<V>),
    Sequence(TSequence<V>),
    SequenceSet(TSequenceSet<V>),
}

impl<V: BaseValue + LinearInterpolable + Clone> Temporal<V> {
    pub fn from_instant(inst: TInstant<V>) -> Self {
        Temporal::Instant(inst)
    }

    pub fn from_sequence(seq: TSequence<V>) -> Self {
        Temporal::Sequence(seq)
    }

    pub fn from_sequence_set(ss: TSequenceSet<V>) -> Self {
        Temporal::SequenceSet(ss)
    }

    /// Assembles a value from disjoint fragments, upgrading to the
    /// smallest subtype that can hold the result (an instant stays an
    /// instant only when there is exactly one fragment and it is itself
    /// an instant).
    pub fn from_merge(parts: Vec<Self>) -> Result<Self>
    where
        V: PartialEq,
    {
        if parts.is_empty() {
            return Err(TemporalError::EmptyResult);
        }
        if parts.len() == 1 {
            return Ok(parts.into_iter().next().expect("checked len == 1"));
        }
        let mut sequences: Vec<TSequence<V>> = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Temporal::Instant(i) => {
                    sequences.push(TSequence::new(vec![i], true, true, Interpolation::Discrete)?);
                }
                Temporal::Sequence(s) => sequences.push(s),
                Temporal::SequenceSet(ss) => sequences.extend(ss.sequences().iter().cloned()),
            }
        }
        sequences.sort_by(|a, b| a.period().lower().cmp(b.period().lower()));
        Ok(Temporal::SequenceSet(TSequenceSet::new(sequences, true)?))
    }

    pub fn interpolation(&self) -> Interpolation {
        match self {
            Temporal::Instant(_) => Interpolation::Discrete,
            Temporal::Sequence(s) => s.interpolation(),
            Temporal::SequenceSet(ss) => ss.interpolation(),
        }
    }

    pub fn num_instants(&self) -> usize {
        match self {
            Temporal::Instant(_) => 1,
            Temporal::Sequence(s) => s.num_instants(),
            Temporal::SequenceSet(ss) => ss.total_instants(),
        }
    }

    pub fn start_value(&self) -> &V {
        match self {
            Temporal::Instant(i) => i.value(),
            Temporal::Sequence(s) => s.start_value(),
            Temporal::SequenceSet(ss) => ss.start_value(),
        }
    }

    pub fn end_value(&self) -> &V {
        match self {
            Temporal::Instant(i) => i.value(),
            Temporal::Sequence(s) => s.end_value(),
            Temporal::SequenceSet(ss) => ss.end_value(),
        }
    }

    pub fn start_timestamp(&self) -> Timestamp {
        match self {
            Temporal::Instant(i) => i.timestamp(),
            Temporal::Sequence(s) => s.start_instant().timestamp(),
            Temporal::SequenceSet(ss) => ss.start_sequence().start_instant().timestamp(),
        }
    }

    pub fn end_timestamp(&self) -> Timestamp {
        match self {
            Temporal::Instant(i) => i.timestamp(),
            Temporal::Sequence(s) => s.end_instant().timestamp(),
            Temporal::SequenceSet(ss) => ss.end_sequence().end_instant().timestamp(),
        }
    }

    pub fn time(&self) -> TsTzSpanSet {
        match self {
            Temporal::Instant(i) => TsTzSpanSet::new(vec![TsTzSpan::at(i.timestamp())]),
            Temporal::Sequence(s) => TsTzSpanSet::new(vec![s.period()]),
            Temporal::SequenceSet(ss) => ss.time(),
        }
    }

    pub fn period(&self) -> TsTzSpan {
        match self {
            Temporal::Instant(i) => TsTzSpan::at(i.timestamp()),
            Temporal::Sequence(s) => s.period(),
            Temporal::SequenceSet(ss) => ss.period(),
        }
    }

    pub fn value_at(&self, t: Timestamp, strict: bool) -> Option<V>
    where
        V: Clone,
    {
        match self {
            Temporal::Instant(i) => (i.timestamp() == t).then(|| i.value().clone()),
            Temporal::Sequence(s) => s.value_at(t, strict),
            Temporal::SequenceSet(ss) => ss.value_at(t, strict),
        }
    }

    /// Shift/scale in time. An instant has no span to rescale, so
    /// `width` only has an effect on sequences and sequence sets; a bare
    /// instant just shifts.
    pub fn shift_scale(&self, delta: Option<TimeDelta>, width: Option<TimeDelta>) -> Self
    where
        V: Clone,
    {
        match self {
            Temporal::Instant(i) => {
                let t = match delta {
                    Some(d) => i.timestamp().checked_add(d).expect("timestamp shift overflow"),
                    None => i.timestamp(),
                };
                Temporal::Instant(TInstant::new(t, i.value().clone()))
            }
            Temporal::Sequence(s) => Temporal::Sequence(s.shift_scale(delta, width)),
            Temporal::SequenceSet(ss) => Temporal::SequenceSet(ss.shift_scale(delta, width)),
        }
    }

    pub fn shift_time(&self, delta: TimeDelta) -> Self
    where
        V: Clone,
    {
        self.shift_scale(Some(delta), None)
    }

    pub fn scale_time(&self, width: TimeDelta) -> Self
    where
        V: Clone,
    {
        self.shift_scale(None, Some(width))
    }

    /// Dispatches to the subtype-appropriate restriction and re-wraps
    /// the (possibly narrower) result in the smallest subtype that
    /// still represents it faithfully.
    pub fn restrict(&self, selector: &Selector<V>, mode: Mode) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        match self {
            Temporal::Instant(i) => restrict_instant(i, selector, mode).map(Temporal::Instant),
            Temporal::Sequence(s) => {
                let pieces = restrict_sequence(s, selector, mode);
                wrap_sequences(pieces)
            }
            Temporal::SequenceSet(ss) => ss.restrict(selector, mode).map(Temporal::SequenceSet),
        }
    }
}

fn restrict_instant<V: BaseValue + Clone + PartialEq>(
    inst: &TInstant<V>,
    selector: &Selector<V>,
    mode: Mode,
) -> Option<TInstant<V>> {
    let matches = match selector {
        Selector::Value(v) => inst.value() == v,
        Selector::ValueSet(vs) => vs.contains(inst.value()),
        Selector::Timestamp(t) => inst.timestamp() == *t,
        Selector::TimestampSet(ts) => ts.contains(&inst.timestamp()),
        Selector::Period(p) => p.contains_value(&inst.timestamp()),
        Selector::PeriodSet(ps) => ps.contains_value(&inst.timestamp()),
    };
    (matches == (mode == Mode::At)).then(|| inst.clone())
}

fn restrict_sequence<V: BaseValue + LinearInterpolable + Clone + PartialEq>(
    seq: &TSequence<V>,
    selector: &Selector<V>,
    mode: Mode,
) -> Vec<TSequence<V>> {
    match selector {
        Selector::Value(v) => seq.restrict_value(v, mode),
        Selector::ValueSet(vs) => seq.restrict_value_set(vs, mode),
        Selector::Timestamp(t) => seq.restrict_timestamp(*t, mode),
        Selector::TimestampSet(ts) => {
            let mut current = vec![seq.clone()];
            match mode {
                Mode::At => ts.iter().flat_map(|t| seq.restrict_timestamp(*t, Mode::At)).collect(),
                Mode::Minus => {
                    for t in ts {
                        current = current.iter().flat_map(|s| s.restrict_timestamp(*t, Mode::Minus)).collect();
                    }
                    current
                }
            }
        }
        Selector::Period(p) => seq.restrict_period(p, mode),
        Selector::PeriodSet(ps) => match mode {
            Mode::At => ps.spans().iter().flat_map(|p| seq.restrict_period(p, Mode::At)).collect(),
            Mode::Minus => {
                let mut current = vec![seq.clone()];
                for p in ps.spans() {
                    current = current.iter().flat_map(|s| s.restrict_period(p, Mode::Minus)).collect();
                }
                current
            }
        },
    }
}

/// Re-wraps a list of sequence pieces in the smallest subtype that
/// represents them without loss: a single singleton sequence collapses
/// back to an instant so restriction round-trips through the same
/// subtype it would if driven at the sequence-set level.
fn wrap_sequences<V: BaseValue + LinearInterpolable + Clone>(mut pieces: Vec<TSequence<V>>) -> Option<Temporal<V>> {
    match pieces.len() {
        0 => None,
        1 => {
            let seq = pieces.pop().expect("checked len == 1");
            if seq.num_instants() == 1 {
                Some(Temporal::Instant(seq.start_instant().clone()))
            } else {
                Some(Temporal::Sequence(seq))
            }
        }
        _ => TSequenceSet::new(pieces, true).ok().map(Temporal::SequenceSet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(n: i64) -> Timestamp {
        Timestamp::from_micros(n)
    }

    #[test]
    fn restrict_sequence_at_value_collapses_to_instant() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(1), 1.0), TInstant::new(ts(3), 3.0)],
            true,
            false,
            Interpolation::Linear,
        )
        .unwrap();
        let t = Temporal::Sequence(seq);
        let hit = t.restrict(&Selector::Value(2.0), Mode::At).unwrap();
        assert!(matches!(hit, Temporal::Instant(_)));
    }

    #[test]
    fn from_merge_of_two_instants_builds_a_sequence_set() {
        let a = Temporal::Instant(TInstant::new(ts(1), 1i64));
        let b = Temporal::Instant(TInstant::new(ts(5), 5i64));
        let merged = Temporal::from_merge(vec![a, b]).unwrap();
        assert!(matches!(merged, Temporal::SequenceSet(_)));
        assert_eq!(merged.num_instants(), 2);
    }

    #[test]
    fn shift_time_on_instant_moves_its_timestamp_only() {
        let t = Temporal::Instant(TInstant::new(ts(1), 1i64));
        let shifted = t.shift_time(TimeDelta::microseconds(9));
        assert_eq!(shifted.start_timestamp(), ts(10));
        assert_eq!(*shifted.start_value(), 1i64);
    }

    #[test]
    fn scale_time_on_sequence_rescales_the_span() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 0.0), TInstant::new(ts(10), 10.0)],
            true,
            true,
            Interpolation::Linear,
        )
        .unwrap();
        let t = Temporal::Sequence(seq);
        let scaled = t.scale_time(TimeDelta::microseconds(100));
        assert_eq!(scaled.start_timestamp(), ts(0));
        assert_eq!(scaled.end_timestamp(), ts(100));
    }
}
