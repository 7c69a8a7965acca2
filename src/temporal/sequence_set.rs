//! Ordered, disjoint sequences sharing one interpolation — the core of
//! the library: construction validity, binary search, append/insert/
//! update/delete, restriction, synchronisation.
//!
//! A database-backed implementation of this model stores this as a
//! single packed buffer — header, bbox, offset table, embedded
//! sequences — to avoid one allocation per sequence. That layout is
//! kept here only as the textual/binary wire format (see
//! [`crate::temporal::wkt`]); in memory this is an owned
//! `Vec<TSequence<V>>`, a reasonable starting point that keeps the
//! packed layout available purely as a serialisation format.

use chrono::TimeDelta;

use crate::boxes::bbox::BoundingBox;
use crate::collections::datetime::{Timestamp, TsTzSpan, TsTzSpanSet};
use crate::error::{Result, TemporalError};
use crate::value::{BaseValue, LinearInterpolable, NumericValue, TotalOrder};

use super::instant::TInstant;
use super::interpolation::Interpolation;
use super::restrict::{Mode, NumericSelector, Selector};
use super::sequence::TSequence;

/// An ordered, pairwise-disjoint collection of [`TSequence`]s that share
/// one interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct TSequenceSet<V> {
    sequences: Vec<TSequence<V>>,
    total_instants: usize,
}

impl<V: BaseValue + LinearInterpolable> TSequenceSet<V> {
    /// Validates ordering/interpolation consistency, then (when
    /// `normalize`) merges adjacent sequences that can be joined without
    /// loss.
    pub fn new(sequences: Vec<TSequence<V>>, normalize: bool) -> Result<Self> {
        if sequences.is_empty() {
            return Err(TemporalError::EmptyResult);
        }
        let interpolation = sequences[0].interpolation();
        for seq in &sequences {
            if seq.interpolation() != interpolation {
                return Err(TemporalError::InterpolationMismatch {
                    expected: interpolation.as_str(),
                    found: seq.interpolation().as_str(),
                });
            }
        }
        for w in sequences.windows(2) {
            if !w[0].period().is_left(&w[1].period()) {
                return Err(TemporalError::InvalidOrder(
                    "sequence periods must be strictly ordered and disjoint".into(),
                ));
            }
        }

        let sequences = if normalize {
            Self::coalesce(sequences)?
        } else {
            sequences
        };

        let total_instants = sequences.iter().map(TSequence::num_instants).sum();
        Ok(Self {
            sequences,
            total_instants,
        })
    }

    /// The `join` predicate: merges `a` into `b` when
    /// their periods touch (share a boundary timestamp, with at least one
    /// side open there) and have the same interpolation and, at that
    /// shared instant, the same value.
    fn join(a: &TSequence<V>, b: &TSequence<V>) -> Result<Option<TSequence<V>>>
    where
        V: Clone,
    {
        if a.interpolation() != b.interpolation() {
            return Ok(None);
        }
        if !a.period().touches(&b.period()) {
            return Ok(None);
        }
        // `touches` on periods only holds when the bounds are equal, so
        // `a`'s last instant and `b`'s first instant sit at the same
        // timestamp. That sample exists once in each list (one as a
        // right-open/closed endpoint, one as a left-open/closed one); the
        // merged sequence keeps it only once, which requires the values to
        // agree.
        if a.end_value() != b.start_value() {
            return Err(TemporalError::ValueMismatchAtJoin {
                at: a.end_instant().timestamp(),
            });
        }

        let mut instants: Vec<TInstant<V>> = a.instants().to_vec();
        instants.extend(b.instants().iter().skip(1).cloned());
        let merged = TSequence::new(instants, a.is_lower_inclusive(), b.is_upper_inclusive(), a.interpolation())?;
        Ok(Some(merged))
    }

    fn coalesce(sequences: Vec<TSequence<V>>) -> Result<Vec<TSequence<V>>>
    where
        V: Clone,
    {
        let mut out: Vec<TSequence<V>> = Vec::with_capacity(sequences.len());
        for seq in sequences {
            if let Some(last) = out.last() {
                if let Some(merged) = Self::join(last, &seq)? {
                    *out.last_mut().expect("checked above") = merged;
                    continue;
                }
            }
            out.push(seq);
        }
        Ok(out)
    }

    pub fn interpolation(&self) -> Interpolation {
        self.sequences[0].interpolation()
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn sequences(&self) -> &[TSequence<V>] {
        &self.sequences
    }

    /// 1-based, matching the source library's `*_n` convention.
    pub fn sequence_n(&self, n: usize) -> Option<&TSequence<V>> {
        n.checked_sub(1).and_then(|i| self.sequences.get(i))
    }

    pub fn start_sequence(&self) -> &TSequence<V> {
        self.sequences.first().expect("sequence set is never empty")
    }

    pub fn end_sequence(&self) -> &TSequence<V> {
        self.sequences.last().expect("sequence set is never empty")
    }

    pub fn total_instants(&self) -> usize {
        self.total_instants
    }

    pub fn time(&self) -> TsTzSpanSet {
        TsTzSpanSet::new(self.sequences.iter().map(TSequence::period).collect())
    }

    pub fn period(&self) -> TsTzSpan {
        TsTzSpan::new(
            self.start_sequence().start_instant().timestamp(),
            self.end_sequence().end_instant().timestamp(),
            self.start_sequence().is_lower_inclusive(),
            self.end_sequence().is_upper_inclusive(),
        )
    }

    /// The bare-period bounding box, folded across every sequence's own
    /// `period_bbox`, so the invariant `bbox(ss) = ⋃ bbox(seqᵢ)` holds by
    /// construction.
    /// See [`TSequence::period_bbox`] for why this is the fallback every
    /// base type gets, refined by numeric/spatial variants elsewhere.
    pub fn period_bbox(&self) -> crate::boxes::TBox {
        self.sequences
            .iter()
            .map(TSequence::period_bbox)
            .reduce(|a, b| a.union(&b))
            .expect("sequence set is never empty")
    }

    /// `find_timestamp` at the sequence-set level: returns `(found,
    /// loc)` over the array of sequence periods.
    pub fn find_timestamp(&self, t: Timestamp) -> (bool, usize) {
        match self
            .sequences
            .binary_search_by(|seq| {
                if seq.period().contains_value(&t) {
                    std::cmp::Ordering::Equal
                } else if t < *seq.period().lower() {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Less
                }
            }) {
            Ok(i) => (true, i),
            Err(i) => (false, i),
        }
    }

    pub fn value_at(&self, t: Timestamp, strict: bool) -> Option<V>
    where
        V: Clone,
    {
        let (found, idx) = self.find_timestamp(t);
        if found {
            return self.sequences[idx].value_at(t, strict);
        }
        if !strict && idx > 0 {
            if let Some(v) = self.sequences[idx - 1].value_at(t, false) {
                return Some(v);
            }
        }
        if !strict && idx < self.sequences.len() {
            if let Some(v) = self.sequences[idx].value_at(t, false) {
                return Some(v);
            }
        }
        None
    }

    /// Appends a whole sequence, joining it into the last sequence when
    /// possible, otherwise pushing it as a new one. `expand` is accepted
    /// for interface parity with a packed-buffer design's expandable
    /// path, but has no effect here:
    /// a `Vec` already amortises growth on push.
    pub fn append_sequence(&self, seq: TSequence<V>, _expand: bool) -> Result<Self>
    where
        V: Clone,
    {
        if !self.end_sequence().period().is_left(&seq.period()) {
            return Err(TemporalError::InvalidOrder(
                "appended sequence must start after the current end".into(),
            ));
        }
        let mut sequences = self.sequences.clone();
        let last = sequences.pop().expect("sequence set is never empty");
        match Self::join(&last, &seq)? {
            Some(merged) => sequences.push(merged),
            None => {
                sequences.push(last);
                sequences.push(seq);
            }
        }
        Self::new(sequences, false)
    }

    /// Appends a single instant to the last sequence,
    /// rebuilding it; the new timestamp must be strictly after the
    /// current end, or equal to it with an equal value and an exclusive
    /// current upper bound.
    pub fn append_instant(&self, inst: TInstant<V>, expand: bool) -> Result<Self>
    where
        V: Clone,
    {
        let last = self.end_sequence();
        let end = last.end_instant();
        if inst.timestamp() < end.timestamp() {
            return Err(TemporalError::InvalidOrder(
                "appended instant must not precede the current end".into(),
            ));
        }
        if inst.timestamp() == end.timestamp() {
            if inst.value() != end.value() || last.is_upper_inclusive() {
                return Err(TemporalError::ValueMismatchAtJoin { at: inst.timestamp() });
            }
            return Ok(self.clone());
        }
        let mut instants = last.instants().to_vec();
        instants.push(inst);
        let rebuilt = TSequence::new(instants, last.is_lower_inclusive(), true, last.interpolation())?;
        let mut sequences = self.sequences.clone();
        *sequences.last_mut().expect("sequence set is never empty") = rebuilt;
        // `expand` mirrors a packed buffer's in-place append flag; a `Vec`
        // rebuild already amortises the same way, so there is no separate
        // fast path to take here.
        let _ = expand;
        Self::new(sequences, false)
    }

    /// `insert(a, b)`: time support becomes `time(a) ∪
    /// time(b)`. Disjoint supports are just merged; overlapping supports
    /// are streamed pairwise, requiring agreement at shared instants.
    pub fn insert(&self, other: &Self) -> Result<Self>
    where
        V: Clone + PartialEq,
    {
        let mut all: Vec<TSequence<V>> = self.sequences.clone();
        all.extend(other.sequences.iter().cloned());
        all.sort_by(|a, b| a.period().lower().cmp(b.period().lower()));
        Self::new(all, true)
    }

    /// `update(a, b) = insert(a.minus(time(b)), b)`.
    pub fn update(&self, other: &Self) -> Result<Self>
    where
        V: Clone + PartialEq,
    {
        let time_b = other.time();
        let trimmed = self.restrict(&Selector::PeriodSet(time_b), Mode::Minus);
        match trimmed {
            Some(trimmed) => trimmed.insert(other),
            None => Ok(other.clone()),
        }
    }

    /// Removes the given time support, stitching the hole closed when
    /// the value on both sides agrees and the interpolation permits —
    /// unlike `minus`, which always leaves the hole open.
    pub fn delete_period(&self, period: &TsTzSpan) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        let remainder = self.restrict(&Selector::Period(period.clone()), Mode::Minus)?;
        Some(remainder.stitch())
    }

    pub fn delete_periodset(&self, periods: &TsTzSpanSet) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        let remainder = self.restrict(&Selector::PeriodSet(periods.clone()), Mode::Minus)?;
        Some(remainder.stitch())
    }

    pub fn delete_timestamp(&self, t: Timestamp) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        let remainder = self.restrict(&Selector::Timestamp(t), Mode::Minus)?;
        Some(remainder.stitch())
    }

    pub fn delete_timestampset(&self, ts: &[Timestamp]) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        let remainder = self.restrict(&Selector::TimestampSet(ts.to_vec()), Mode::Minus)?;
        Some(remainder.stitch())
    }

    /// Re-joins adjacent sequences across a hole whenever the value on
    /// both sides of the gap agrees.
    fn stitch(self) -> Self
    where
        V: Clone + PartialEq,
    {
        if self.sequences.len() < 2 {
            return self;
        }
        let mut out: Vec<TSequence<V>> = Vec::with_capacity(self.sequences.len());
        for seq in self.sequences {
            let can_merge = match out.last() {
                Some(prev) => {
                    prev.interpolation() == seq.interpolation() && prev.end_value() == seq.start_value()
                }
                None => false,
            };
            if !can_merge {
                out.push(seq);
                continue;
            }
            let prev = out.pop().expect("checked above");
            let mut instants: Vec<TInstant<V>> = prev.instants().to_vec();
            instants.extend(seq.instants().iter().cloned());
            match TSequence::new(instants, prev.is_lower_inclusive(), seq.is_upper_inclusive(), prev.interpolation()) {
                Ok(merged) => out.push(merged),
                Err(_) => {
                    out.push(prev);
                    out.push(seq);
                }
            }
        }
        let total_instants = out.iter().map(TSequence::num_instants).sum();
        Self {
            sequences: out,
            total_instants,
        }
    }

    /// Uniform `at`/`minus` restriction across every non-numeric
    /// selector kind. Returns `None` when nothing survives.
    pub fn restrict(&self, selector: &Selector<V>, mode: Mode) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        if self.sequences.len() == 1 {
            let pieces = self.restrict_sequence(&self.sequences[0], selector, mode);
            return Self::new(pieces, true).ok();
        }
        let pieces: Vec<TSequence<V>> = self
            .sequences
            .iter()
            .flat_map(|seq| self.restrict_sequence(seq, selector, mode))
            .collect();
        Self::new(pieces, true).ok()
    }

    fn restrict_sequence(&self, seq: &TSequence<V>, selector: &Selector<V>, mode: Mode) -> Vec<TSequence<V>>
    where
        V: Clone + PartialEq,
    {
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

    /// Aligns `self` and `other` onto their shared time
    /// support. `with_crossings` additionally injects synthetic instants
    /// where the two (ordered, linearly-interpolated) values cross
    /// between samples.
    pub fn synchronize(&self, other: &Self, with_crossings: bool) -> Option<(Self, Self)>
    where
        V: Clone + PartialEq + NumericValue,
    {
        let shared = self.time().intersection(&other.time());
        if shared.is_empty() {
            return None;
        }
        let mut a_pieces = Vec::new();
        let mut b_pieces = Vec::new();
        for period in shared.spans() {
            let a_seqs: Vec<TSequence<V>> = self
                .sequences
                .iter()
                .flat_map(|s| s.restrict_period(period, Mode::At))
                .collect();
            let b_seqs: Vec<TSequence<V>> = other
                .sequences
                .iter()
                .flat_map(|s| s.restrict_period(period, Mode::At))
                .collect();
            for (a_seq, b_seq) in a_seqs.iter().zip(b_seqs.iter()) {
                if with_crossings {
                    let (a2, b2) = inject_crossings(a_seq, b_seq);
                    a_pieces.push(a2);
                    b_pieces.push(b2);
                } else {
                    a_pieces.push(a_seq.clone());
                    b_pieces.push(b_seq.clone());
                }
            }
        }
        let a = Self::new(a_pieces, true).ok()?;
        let b = Self::new(b_pieces, true).ok()?;
        Some((a, b))
    }

    /// Distinct values across all sequences, sorted and deduplicated.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone + PartialEq + TotalOrder,
    {
        let mut out: Vec<V> = Vec::new();
        for seq in &self.sequences {
            for inst in seq.instants() {
                if !out.contains(inst.value()) {
                    out.push(inst.value().clone());
                }
            }
        }
        out.sort_by(|a, b| a.total_cmp(b));
        out
    }

    /// The instant with the smallest value across all sequences, by
    /// [`TotalOrder`], irrespective of whether it sits on an exclusive
    /// bound. `None` only when the set has no sequences, which [`Self::new`]
    /// never produces.
    pub fn min_instant(&self) -> Option<&TInstant<V>>
    where
        V: TotalOrder,
    {
        self.sequences
            .iter()
            .flat_map(|seq| seq.instants())
            .min_by(|a, b| a.value().total_cmp(b.value()))
    }

    /// The instant with the largest value across all sequences, by
    /// [`TotalOrder`], irrespective of whether it sits on an exclusive
    /// bound.
    pub fn max_instant(&self) -> Option<&TInstant<V>>
    where
        V: TotalOrder,
    {
        self.sequences
            .iter()
            .flat_map(|seq| seq.instants())
            .max_by(|a, b| a.value().total_cmp(b.value()))
    }

    /// Count of distinct instants, counting an instant shared by two
    /// adjacent sequences (same timestamp and value, sitting on the
    /// shared bound between them) once rather than twice. Differs from
    /// [`Self::total_instants`], which is the raw per-sequence sum.
    pub fn num_distinct_instants(&self) -> usize
    where
        V: PartialEq,
    {
        self.distinct_instants().len()
    }

    /// The `n`-th (1-based) distinct instant in timestamp order, applying
    /// the same touching-bound deduplication as
    /// [`Self::num_distinct_instants`]. `Err(TemporalError::OutOfRange)`
    /// when `n` falls outside `[1, num_distinct_instants()]`.
    pub fn distinct_instant_n(&self, n: usize) -> Result<TInstant<V>>
    where
        V: Clone + PartialEq,
    {
        let distinct = self.distinct_instants();
        if n == 0 || n > distinct.len() {
            return Err(TemporalError::OutOfRange { index: n, len: distinct.len() });
        }
        Ok(distinct[n - 1].clone())
    }

    /// Instants with consecutive duplicates (an instant shared by the
    /// touching bound of two adjacent sequences) removed.
    fn distinct_instants(&self) -> Vec<&TInstant<V>>
    where
        V: PartialEq,
    {
        let mut out: Vec<&TInstant<V>> = Vec::new();
        for seq in &self.sequences {
            for inst in seq.instants() {
                let duplicate = out
                    .last()
                    .map(|prev| prev.timestamp() == inst.timestamp() && *prev.value() == *inst.value())
                    .unwrap_or(false);
                if !duplicate {
                    out.push(inst);
                }
            }
        }
        out
    }

    pub fn start_value(&self) -> &V {
        self.start_sequence().start_value()
    }

    pub fn end_value(&self) -> &V {
        self.end_sequence().end_value()
    }

    /// Shift/scale in time, at the
    /// sequence-set level: one affine transform is computed across the
    /// whole set's period and applied to every child sequence, so gaps
    /// between sequences scale exactly like gaps inside them (computing
    /// the transform per sequence would stretch the inter-sequence gaps
    /// disproportionately whenever `width` differs from the original
    /// span).
    pub fn shift_scale(&self, delta: Option<TimeDelta>, width: Option<TimeDelta>) -> Self
    where
        V: Clone,
    {
        if delta.is_none() && width.is_none() {
            return self.clone();
        }
        let old_lower = self.start_sequence().start_instant().timestamp();
        let old_span = self
            .end_sequence()
            .end_instant()
            .timestamp()
            .checked_sub(old_lower)
            .unwrap_or_else(TimeDelta::zero);
        let new_lower = match delta {
            Some(d) => old_lower.checked_add(d).expect("timestamp shift overflow"),
            None => old_lower,
        };
        let factor = match width {
            Some(new_span) => {
                let old_us = old_span.num_microseconds().unwrap_or(0);
                if old_us == 0 {
                    0.0
                } else {
                    new_span.num_microseconds().unwrap_or(0) as f64 / old_us as f64
                }
            }
            None => 1.0,
        };
        let sequences: Vec<TSequence<V>> = self
            .sequences
            .iter()
            .map(|seq| seq.remap_time(old_lower, factor, new_lower))
            .collect();
        Self {
            sequences,
            total_instants: self.total_instants,
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
}

impl<V: BaseValue + LinearInterpolable + NumericValue> TSequenceSet<V> {
    pub fn restrict_numeric(&self, selector: &NumericSelector, mode: Mode) -> Option<Self>
    where
        V: Clone + PartialEq,
    {
        let pieces: Vec<TSequence<V>> = self
            .sequences
            .iter()
            .flat_map(|seq| seq.restrict_numeric(selector, mode))
            .collect();
        Self::new(pieces, true).ok()
    }

    /// Folds each child
    /// sequence's own bbox through the monoid rather than recomputing
    /// the extrema directly, so the invariant holds by construction.
    pub fn bbox(&self) -> crate::boxes::TBox {
        self.sequences
            .iter()
            .map(TSequence::bbox)
            .reduce(|a, b| a.union(&b))
            .expect("sequence set is never empty")
    }

    pub fn numeric_span(&self) -> crate::collections::number::FloatSpan {
        self.bbox().to_floatspan().cloned().expect("numeric sequence set always has a numeric span")
    }
}

/// Inserts synthetic instants into both
/// sequences wherever the two linearly-interpolated values become
/// equal between samples. Assumes `a` and `b` already share identical
/// period structure (i.e. have been produced by the same `at(period)`
/// restriction, as [`TSequenceSet::synchronize`] does before calling
/// this).
fn inject_crossings<V: BaseValue + LinearInterpolable + Clone>(
    a: &TSequence<V>,
    b: &TSequence<V>,
) -> (TSequence<V>, TSequence<V>) {
    if a.interpolation() != Interpolation::Linear || b.interpolation() != Interpolation::Linear {
        return (a.clone(), b.clone());
    }
    let mut a_instants = vec![a.start_instant().clone()];
    let mut b_instants = vec![b.start_instant().clone()];
    for (wa, wb) in a.instants().windows(2).zip(b.instants().windows(2)) {
        let (a0, a1) = (&wa[0], &wa[1]);
        let (b0, b1) = (&wb[0], &wb[1]);
        if let Some(t) = V::crossing_fraction(a0.value(), a1.value(), b0.value(), b1.value()) {
            let span = (a1.timestamp().as_micros() - a0.timestamp().as_micros()) as f64;
            let ts = Timestamp::from_micros(a0.timestamp().as_micros() + (span * t).round() as i64);
            let value = V::lerp(a0.value(), a1.value(), t);
            a_instants.push(TInstant::new(ts, value.clone()));
            b_instants.push(TInstant::new(ts, value));
        }
        a_instants.push(a1.clone());
        b_instants.push(b1.clone());
    }
    let a2 = TSequence::new(a_instants, a.is_lower_inclusive(), a.is_upper_inclusive(), a.interpolation())
        .unwrap_or_else(|_| a.clone());
    let b2 = TSequence::new(b_instants, b.is_lower_inclusive(), b.is_upper_inclusive(), b.interpolation())
        .unwrap_or_else(|_| b.clone());
    (a2, b2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(n: i64) -> Timestamp {
        Timestamp::from_micros(n)
    }

    fn seq(a: i64, av: f64, b: i64, bv: f64, upper_inc: bool) -> TSequence<f64> {
        TSequence::new(
            vec![TInstant::new(ts(a), av), TInstant::new(ts(b), bv)],
            true,
            upper_inc,
            Interpolation::Linear,
        )
        .unwrap()
    }

    #[test]
    fn append_joins_into_one_sequence() {
        let ss = TSequenceSet::new(vec![seq(1, 1.0, 2, 2.0, false)], true).unwrap();
        let appended = ss
            .append_sequence(seq(2, 2.0, 3, 3.0, false), true)
            .unwrap();
        assert_eq!(appended.num_sequences(), 1);
        assert_eq!(appended.total_instants(), 3);
    }

    #[test]
    fn total_instants_matches_sum_of_children() {
        let ss = TSequenceSet::new(vec![seq(0, 0.0, 1, 1.0, false), seq(2, 2.0, 3, 3.0, false)], true).unwrap();
        let sum: usize = ss.sequences().iter().map(TSequence::num_instants).sum();
        assert_eq!(ss.total_instants(), sum);
    }

    #[test]
    fn synchronize_with_crossings_finds_midpoint() {
        let a = TSequenceSet::new(vec![seq(0, 0.0, 10, 10.0, true)], true).unwrap();
        let b = TSequenceSet::new(vec![seq(0, 10.0, 10, 0.0, true)], true).unwrap();
        let (a2, b2) = a.synchronize(&b, true).unwrap();
        assert_eq!(a2.total_instants(), 3);
        assert_eq!(b2.total_instants(), 3);
        assert_eq!(a2.value_at(ts(5), true), Some(5.0));
        assert_eq!(b2.value_at(ts(5), true), Some(5.0));
    }

    #[test]
    fn delete_period_stitches_equal_valued_hole() {
        let seq0 = TSequence::new(
            vec![TInstant::new(ts(0), 5i64), TInstant::new(ts(10), 5i64)],
            true,
            true,
            Interpolation::Stepwise,
        )
        .unwrap();
        let ss = TSequenceSet::new(vec![seq0], true).unwrap();
        let hole = TsTzSpan::new(ts(3), ts(7), true, true);
        let stitched = ss.delete_period(&hole).unwrap();
        assert_eq!(stitched.num_sequences(), 1);
    }

    #[test]
    fn shift_scale_preserves_the_gap_between_sequences_proportionally() {
        let ss = TSequenceSet::new(
            vec![seq(0, 0.0, 10, 10.0, false), seq(20, 20.0, 30, 30.0, true)],
            true,
        )
        .unwrap();
        let scaled = ss.scale_time(TimeDelta::microseconds(60));
        assert_eq!(scaled.start_sequence().start_instant().timestamp(), ts(0));
        assert_eq!(scaled.end_sequence().end_instant().timestamp(), ts(60));
        // original span was 30us, factor is 2x: second sequence's start at
        // 20 moves to 40, keeping the gap twice as wide too.
        assert_eq!(scaled.end_sequence().start_instant().timestamp(), ts(40));
    }

    #[test]
    fn values_are_sorted_and_deduplicated() {
        let ss = TSequenceSet::new(
            vec![seq(0, 3.0, 1, 1.0, false), seq(2, 1.0, 3, 2.0, true)],
            true,
        )
        .unwrap();
        assert_eq!(ss.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn min_and_max_instant_ignore_exclusive_bounds() {
        let ss = TSequenceSet::new(
            vec![seq(0, -5.0, 1, 1.0, false), seq(2, 1.0, 3, 9.0, true)],
            true,
        )
        .unwrap();
        assert_eq!(*ss.min_instant().unwrap().value(), -5.0);
        assert_eq!(*ss.max_instant().unwrap().value(), 9.0);
    }

    #[test]
    fn distinct_instants_count_a_touching_bound_once() {
        let ss = TSequenceSet::new(vec![seq(0, 0.0, 1, 1.0, false), seq(1, 1.0, 2, 2.0, true)], true).unwrap();
        // the instant at t=1, v=1.0 is shared by both sequences' touching bound.
        assert_eq!(ss.num_distinct_instants(), 3);
        assert_eq!(ss.distinct_instant_n(2).unwrap().timestamp(), ts(1));
    }

    #[test]
    fn distinct_instant_n_out_of_range_is_an_error() {
        let ss = TSequenceSet::new(vec![seq(0, 0.0, 1, 1.0, false)], true).unwrap();
        let err = ss.distinct_instant_n(0).unwrap_err();
        assert!(matches!(err, TemporalError::OutOfRange { index: 0, len: 2 }));
        let err = ss.distinct_instant_n(3).unwrap_err();
        assert!(matches!(err, TemporalError::OutOfRange { index: 3, len: 2 }));
    }
}
