//! An ordered run of instants over one period with a declared
//! interpolation: per-sequence restriction, crossing detection,
//! integral, normalisation.

use chrono::TimeDelta;

use crate::collections::datetime::{Timestamp, TsTzSpan};
use crate::error::{Result, TemporalError};
use crate::registry;
use crate::value::{BaseValue, LinearInterpolable, NumericValue};

use super::instant::TInstant;
use super::interpolation::Interpolation;
use super::restrict::{Mode, NumericSelector};

/// Owns its instants directly rather than an opaque C buffer: the run of
/// `(timestamp, value)` points and the interpolation flag are plain
/// fields.
#[derive(Clone, Debug, PartialEq)]
pub struct TSequence<V> {
    instants: Vec<TInstant<V>>,
    lower_inc: bool,
    upper_inc: bool,
    interpolation: Interpolation,
}

impl<V: BaseValue + LinearInterpolable> TSequence<V> {
    /// Builds and normalises a sequence from a non-empty, strictly
    /// time-ordered list of instants, restricted to the single-sequence
    /// case; `TSequenceSet` applies the same validity rules one level up
    /// across sequences.
    pub fn new(
        mut instants: Vec<TInstant<V>>,
        lower_inc: bool,
        upper_inc: bool,
        interpolation: Interpolation,
    ) -> Result<Self> {
        if instants.is_empty() {
            return Err(TemporalError::EmptyResult);
        }
        if interpolation == Interpolation::Linear && !registry::is_continuous(V::TEMP_TYPE) {
            return Err(TemporalError::InterpolationMismatch {
                expected: "discrete or stepwise",
                found: "linear",
            });
        }
        for w in instants.windows(2) {
            if w[0].timestamp() >= w[1].timestamp() {
                return Err(TemporalError::InvalidOrder(
                    "instant timestamps must be strictly increasing".into(),
                ));
            }
        }

        // Invariant: discrete sequences and singletons are inclusive on
        // both ends regardless of what the caller asked for.
        let (lower_inc, upper_inc) = if interpolation == Interpolation::Discrete || instants.len() == 1 {
            (true, true)
        } else {
            (lower_inc, upper_inc)
        };

        normalize(&mut instants, interpolation);

        Ok(Self {
            instants,
            lower_inc,
            upper_inc,
            interpolation,
        })
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn is_lower_inclusive(&self) -> bool {
        self.lower_inc
    }

    pub fn is_upper_inclusive(&self) -> bool {
        self.upper_inc
    }

    pub fn instants(&self) -> &[TInstant<V>] {
        &self.instants
    }

    pub fn num_instants(&self) -> usize {
        self.instants.len()
    }

    pub fn start_instant(&self) -> &TInstant<V> {
        self.instants.first().expect("sequence is never empty")
    }

    pub fn end_instant(&self) -> &TInstant<V> {
        self.instants.last().expect("sequence is never empty")
    }

    /// 1-based, matching the `instant_n` naming convention used elsewhere
    /// in this crate.
    pub fn instant_n(&self, n: usize) -> Option<&TInstant<V>> {
        n.checked_sub(1).and_then(|i| self.instants.get(i))
    }

    pub fn start_value(&self) -> &V {
        self.start_instant().value()
    }

    pub fn end_value(&self) -> &V {
        self.end_instant().value()
    }

    pub fn period(&self) -> TsTzSpan {
        TsTzSpan::new(
            self.start_instant().timestamp(),
            self.end_instant().timestamp(),
            self.lower_inc,
            self.upper_inc,
        )
    }

    /// The bare-period bounding box every base type carries, regardless of
    /// whether it also has a numeric or spatial extent. `tint`/`tfloat`
    /// refine this with a numeric span via the
    /// [`NumericValue`]-bounded `bbox` below; `tgeompoint`/`tgeogpoint`
    /// refine it with a spatial extent in `temporal::point`.
    pub fn period_bbox(&self) -> crate::boxes::TBox {
        crate::boxes::TBox::from_period(self.period())
    }

    /// Binary search over the instant timestamps, specialised to a
    /// single sequence's instants rather than a sequence set's periods.
    pub fn find_timestamp(&self, t: Timestamp) -> (bool, usize) {
        match self.instants.binary_search_by_key(&t, TInstant::timestamp) {
            Ok(i) => (true, i),
            Err(i) => (false, i),
        }
    }

    /// `strict = false` lets an exclusive bound still report the
    /// instant's value when `t` coincides with it.
    pub fn value_at(&self, t: Timestamp, strict: bool) -> Option<V>
    where
        V: Clone,
    {
        if !self.period().contains_value(&t) {
            return None;
        }
        let (found, idx) = self.find_timestamp(t);
        if found {
            let on_exclusive_lower = idx == 0 && !self.lower_inc;
            let on_exclusive_upper = idx == self.instants.len() - 1 && !self.upper_inc;
            if strict && (on_exclusive_lower || on_exclusive_upper) {
                return None;
            }
            return Some(self.instants[idx].value().clone());
        }
        if idx == 0 || idx >= self.instants.len() {
            return None;
        }
        let before = &self.instants[idx - 1];
        let after = &self.instants[idx];
        match self.interpolation {
            Interpolation::Discrete => None,
            Interpolation::Stepwise => Some(before.value().clone()),
            Interpolation::Linear => {
                let span = (after.timestamp().as_micros() - before.timestamp().as_micros()) as f64;
                let frac = (t.as_micros() - before.timestamp().as_micros()) as f64 / span;
                Some(V::lerp(before.value(), after.value(), frac))
            }
        }
    }

    /// Restricts to the sub-run whose timestamps fall in `[lo, hi]`
    /// (inclusivity given explicitly), synthesising boundary instants by
    /// interpolation when a boundary falls strictly inside a segment.
    /// Returns `None` when the clip range doesn't overlap this sequence.
    fn clip(&self, lo: Timestamp, lo_inc: bool, hi: Timestamp, hi_inc: bool) -> Option<Self>
    where
        V: Clone,
    {
        if lo > hi || (lo == hi && !(lo_inc && hi_inc)) {
            return None;
        }
        let mut out = Vec::new();
        for inst in &self.instants {
            let t = inst.timestamp();
            let keep = (t > lo || (t == lo && lo_inc)) && (t < hi || (t == hi && hi_inc));
            if keep {
                out.push(inst.clone());
            }
        }
        if out.first().map(TInstant::timestamp) != Some(lo) && self.interpolation != Interpolation::Discrete {
            if let Some(v) = self.value_at(lo, false) {
                out.insert(0, TInstant::new(lo, v));
            }
        }
        if out.last().map(TInstant::timestamp) != Some(hi) && self.interpolation != Interpolation::Discrete {
            if let Some(v) = self.value_at(hi, false) {
                out.push(TInstant::new(hi, v));
            }
        }
        if out.is_empty() {
            return None;
        }
        TSequence::new(out, lo_inc, hi_inc, self.interpolation).ok()
    }

    /// Time-based selectors restricted to a single period.
    pub fn restrict_period(&self, period: &TsTzSpan, mode: Mode) -> Vec<Self>
    where
        V: Clone,
    {
        match mode {
            Mode::At => self
                .period()
                .intersection(period)
                .and_then(|p| self.clip(*p.lower(), p.is_lower_inclusive(), *p.upper(), p.is_upper_inclusive()))
                .into_iter()
                .collect(),
            Mode::Minus => self
                .period()
                .minus(period)
                .into_iter()
                .filter_map(|p| self.clip(*p.lower(), p.is_lower_inclusive(), *p.upper(), p.is_upper_inclusive()))
                .collect(),
        }
    }

    pub fn restrict_timestamp(&self, t: Timestamp, mode: Mode) -> Vec<Self>
    where
        V: Clone,
    {
        match mode {
            Mode::At => match self.value_at(t, true) {
                Some(v) => vec![TSequence {
                    instants: vec![TInstant::new(t, v)],
                    lower_inc: true,
                    upper_inc: true,
                    interpolation: self.interpolation,
                }],
                None => Vec::new(),
            },
            Mode::Minus => {
                let point = TsTzSpan::new(t, t, true, true);
                self.restrict_period(&point, Mode::Minus)
            }
        }
    }

    /// Value-based selector. For linear interpolation a segment that
    /// crosses `target` strictly between its endpoints is split at the
    /// crossing: one sequence may split into up to two pieces per
    /// crossing.
    pub fn restrict_value(&self, target: &V, mode: Mode) -> Vec<Self>
    where
        V: Clone + PartialEq,
    {
        struct Run<V> {
            instants: Vec<TInstant<V>>,
            matches: bool,
            lower_inc: bool,
            upper_inc: bool,
        }

        let first = self.instants[0].clone();
        let first_matches = *first.value() == *target;
        let mut runs: Vec<Run<V>> = vec![Run {
            instants: vec![first],
            matches: first_matches,
            lower_inc: self.lower_inc,
            upper_inc: true,
        }];

        for w in self.instants.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            let b_matches = *b.value() == *target;

            if self.interpolation == Interpolation::Linear {
                if let Some(t) = V::solve_for_value(a.value(), b.value(), target) {
                    let span = (b.timestamp().as_micros() - a.timestamp().as_micros()) as f64;
                    let ts = Timestamp::from_micros(a.timestamp().as_micros() + (span * t).round() as i64);
                    let crossing = TInstant::new(ts, target.clone());

                    let cur = runs.last_mut().expect("runs is never empty");
                    cur.instants.push(crossing.clone());
                    cur.upper_inc = false;

                    runs.push(Run {
                        instants: vec![crossing.clone()],
                        matches: true,
                        lower_inc: true,
                        upper_inc: true,
                    });
                    runs.push(Run {
                        instants: vec![crossing, b.clone()],
                        matches: b_matches,
                        lower_inc: false,
                        upper_inc: true,
                    });
                    continue;
                }
            }

            let cur = runs.last_mut().expect("runs is never empty");
            if cur.matches == b_matches {
                cur.instants.push(b.clone());
            } else {
                runs.push(Run {
                    instants: vec![b.clone()],
                    matches: b_matches,
                    lower_inc: true,
                    upper_inc: true,
                });
            }
        }
        runs.last_mut().expect("runs is never empty").upper_inc = self.upper_inc;

        runs.into_iter()
            .filter(|r| r.matches == (mode == Mode::At))
            .filter_map(|r| {
                let singleton = r.instants.len() == 1;
                let lower_inc = singleton || r.lower_inc;
                let upper_inc = singleton || r.upper_inc;
                TSequence::new(r.instants, lower_inc, upper_inc, self.interpolation).ok()
            })
            .collect()
    }

    pub fn restrict_value_set(&self, targets: &[V], mode: Mode) -> Vec<Self>
    where
        V: Clone + PartialEq,
    {
        match mode {
            Mode::At => {
                let mut out: Vec<Self> = Vec::new();
                for target in targets {
                    out.extend(self.restrict_value(target, Mode::At));
                }
                out.sort_by(|a, b| a.start_instant().timestamp().cmp(&b.start_instant().timestamp()));
                out
            }
            Mode::Minus => {
                let mut current = vec![self.clone()];
                for target in targets {
                    current = current
                        .iter()
                        .flat_map(|seq| seq.restrict_value(target, Mode::Minus))
                        .collect();
                }
                current
            }
        }
    }

    /// Shifts/scales this sequence in time by rewriting every instant's
    /// timestamp, leaving values untouched. `delta`
    /// translates the whole sequence; `width` rescales it so its period
    /// has exactly that duration, keeping the start fixed. Giving both
    /// shifts first, then scales the shifted result.
    pub fn shift_scale(&self, delta: Option<TimeDelta>, width: Option<TimeDelta>) -> Self
    where
        V: Clone,
    {
        if delta.is_none() && width.is_none() {
            return self.clone();
        }
        let old_lower = self.start_instant().timestamp();
        let old_span = self.end_instant().timestamp().checked_sub(old_lower).unwrap_or_else(TimeDelta::zero);
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
        self.remap_time(old_lower, factor, new_lower)
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

    /// Applies an affine remap `new = new_lower + (old - old_lower) *
    /// factor` to every instant, bypassing the validity/normalisation
    /// checks `new` runs (an affine, order-preserving remap can't
    /// introduce a collinear middle instant or an out-of-order pair that
    /// wasn't already there). Shared by [`TSequenceSet::shift_scale`],
    /// which computes one `(old_lower, factor, new_lower)` triple across
    /// all child sequences so relative gaps between sequences scale
    /// consistently with gaps inside them.
    pub(crate) fn remap_time(&self, old_lower: Timestamp, factor: f64, new_lower: Timestamp) -> Self
    where
        V: Clone,
    {
        let instants = self
            .instants
            .iter()
            .map(|inst| {
                let offset_us = (inst.timestamp().as_micros() - old_lower.as_micros()) as f64;
                let new_us = new_lower.as_micros() + (offset_us * factor).round() as i64;
                TInstant::new(Timestamp::from_micros(new_us), inst.value().clone())
            })
            .collect();
        Self {
            instants,
            lower_inc: self.lower_inc,
            upper_inc: self.upper_inc,
            interpolation: self.interpolation,
        }
    }
}

impl<V: BaseValue + NumericValue> TSequence<V> {
    /// Numeric bounding box for this sequence: its period plus the span
    /// of values taken at its instants.
    pub fn bbox(&self) -> crate::boxes::TBox {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for inst in &self.instants {
            let v = inst.value().to_f64();
            lo = lo.min(v);
            hi = hi.max(v);
        }
        crate::boxes::TBox::new(
            Some(self.period()),
            Some(crate::collections::number::FloatSpan::new(lo, hi, true, true)),
        )
    }

    /// Numeric-span/min/max selectors, available only for base types
    /// with a total order and an `f64` cast.
    pub fn restrict_numeric(&self, selector: &NumericSelector, mode: Mode) -> Vec<Self> {
        match selector {
            NumericSelector::Min => {
                let min = self
                    .instants
                    .iter()
                    .map(|i| i.value().to_f64())
                    .fold(f64::INFINITY, f64::min);
                self.restrict_value(&V::from_f64(min), mode)
            }
            NumericSelector::Max => {
                let max = self
                    .instants
                    .iter()
                    .map(|i| i.value().to_f64())
                    .fold(f64::NEG_INFINITY, f64::max);
                self.restrict_value(&V::from_f64(max), mode)
            }
            NumericSelector::Span(span) => {
                let keep = |v: &V| span.contains_value(&v.to_f64());
                self.restrict_predicate(keep, mode)
            }
            NumericSelector::SpanSet(set) => {
                let keep = |v: &V| set.contains_value(&v.to_f64());
                self.restrict_predicate(keep, mode)
            }
        }
    }

    /// Step/discrete predicate restriction; linear spans are approximated
    /// by sampling at the recorded instants rather than solving for the
    /// exact crossing fraction against a span boundary (the closed-form
    /// solver in [`crate::value::LinearInterpolable`] targets a single
    /// value, not an interval).
    fn restrict_predicate(&self, keep: impl Fn(&V) -> bool, mode: Mode) -> Vec<Self> {
        struct Run<V> {
            instants: Vec<TInstant<V>>,
            matches: bool,
        }

        let mut runs: Vec<Run<V>> = Vec::new();
        for inst in &self.instants {
            let matches = keep(inst.value()) == (mode == Mode::At);
            match runs.last_mut() {
                Some(cur) if cur.matches == matches => cur.instants.push(inst.clone()),
                _ => runs.push(Run { instants: vec![inst.clone()], matches }),
            }
        }

        let last_idx = runs.len().saturating_sub(1);
        runs.into_iter()
            .enumerate()
            .filter(|(_, r)| r.matches)
            .filter_map(|(idx, r)| {
                let lower_inc = if idx == 0 { self.is_lower_inclusive() } else { true };
                let upper_inc = if idx == last_idx { self.is_upper_inclusive() } else { true };
                TSequence::new(r.instants, lower_inc, upper_inc, self.interpolation).ok()
            })
            .collect()
    }
}

/// Drops redundant instants while preserving equivalence.
/// Stepwise drops consecutive same-value instants (keeping the last, so
/// the boundary timestamp of the final run is preserved); linear drops
/// middle instants that are collinear with their neighbours.
fn normalize<V: BaseValue + LinearInterpolable>(instants: &mut Vec<TInstant<V>>, interpolation: Interpolation) {
    if instants.len() < 2 {
        return;
    }
    match interpolation {
        Interpolation::Discrete => {}
        Interpolation::Stepwise => {
            // Only interior instants can be redundant: the first and
            // last always anchor the sequence's period and are kept
            // unconditionally, even if their value happens to repeat.
            if instants.len() < 3 {
                return;
            }
            let n = instants.len();
            let mut out = Vec::with_capacity(n);
            out.push(instants[0].clone());
            for inst in instants.drain(1..n - 1) {
                let same_as_last = out.last().map(|prev| *prev.value() == *inst.value()).unwrap_or(false);
                if !same_as_last {
                    out.push(inst);
                }
            }
            // `instants` now holds just the original first and last
            // elements; the last is always kept, even if its value
            // repeats, since it anchors the sequence's upper bound.
            out.push(instants.pop().expect("original last instant survives the drain"));
            *instants = out;
        }
        Interpolation::Linear => {
            if instants.len() < 3 {
                return;
            }
            let mut out = Vec::with_capacity(instants.len());
            out.push(instants[0].clone());
            for i in 1..instants.len() - 1 {
                let prev = &instants[i - 1];
                let cur = &instants[i];
                let next = &instants[i + 1];
                let span = (next.timestamp().as_micros() - prev.timestamp().as_micros()) as f64;
                let t_b = if span == 0.0 {
                    0.0
                } else {
                    (cur.timestamp().as_micros() - prev.timestamp().as_micros()) as f64 / span
                };
                if !V::is_collinear(prev.value(), cur.value(), t_b, next.value()) {
                    out.push(cur.clone());
                }
            }
            out.push(instants[instants.len() - 1].clone());
            *instants = out;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(n: i64) -> Timestamp {
        Timestamp::from_micros(n)
    }

    #[test]
    fn linear_sequence_interpolates_between_samples() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 0.0), TInstant::new(ts(10), 10.0)],
            true,
            false,
            Interpolation::Linear,
        )
        .unwrap();
        assert_eq!(seq.value_at(ts(5), true), Some(5.0));
    }

    #[test]
    fn stepwise_holds_left_value() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 1i64), TInstant::new(ts(10), 2i64)],
            true,
            false,
            Interpolation::Stepwise,
        )
        .unwrap();
        assert_eq!(seq.value_at(ts(5), true), Some(1));
    }

    #[test]
    fn stepwise_drops_consecutive_equal_values() {
        let seq = TSequence::new(
            vec![
                TInstant::new(ts(0), 1i64),
                TInstant::new(ts(5), 1i64),
                TInstant::new(ts(10), 2i64),
            ],
            true,
            false,
            Interpolation::Stepwise,
        )
        .unwrap();
        assert_eq!(seq.num_instants(), 2);
    }

    #[test]
    fn linear_drops_collinear_middle_instant() {
        let seq = TSequence::new(
            vec![
                TInstant::new(ts(0), 0.0),
                TInstant::new(ts(5), 5.0),
                TInstant::new(ts(10), 10.0),
            ],
            true,
            true,
            Interpolation::Linear,
        )
        .unwrap();
        assert_eq!(seq.num_instants(), 2);
    }

    #[test]
    fn restrict_at_value_splits_on_crossing() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(1), 1.0), TInstant::new(ts(3), 3.0)],
            true,
            false,
            Interpolation::Linear,
        )
        .unwrap();
        let hits = seq.restrict_value(&2.0, Mode::At);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].num_instants(), 1);
        assert_eq!(*hits[0].start_value(), 2.0);
    }

    #[test]
    fn minus_period_leaves_exclusive_inner_bounds() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 0i64), TInstant::new(ts(10), 10i64)],
            true,
            false,
            Interpolation::Stepwise,
        )
        .unwrap();
        let period = TsTzSpan::new(ts(3), ts(7), true, true);
        let pieces = seq.restrict_period(&period, Mode::Minus);
        assert_eq!(pieces.len(), 2);
        assert!(!pieces[1].is_lower_inclusive());
    }

    #[test]
    fn shift_time_translates_every_instant_by_delta() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 0i64), TInstant::new(ts(10), 10i64)],
            true,
            true,
            Interpolation::Stepwise,
        )
        .unwrap();
        let shifted = seq.shift_time(TimeDelta::microseconds(5));
        assert_eq!(shifted.start_instant().timestamp(), ts(5));
        assert_eq!(shifted.end_instant().timestamp(), ts(15));
        assert_eq!(*shifted.start_value(), 0i64);
    }

    #[test]
    fn scale_time_rescales_span_keeping_start_fixed() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 0.0), TInstant::new(ts(5), 5.0), TInstant::new(ts(10), 10.0)],
            true,
            true,
            Interpolation::Linear,
        )
        .unwrap();
        let scaled = seq.scale_time(TimeDelta::microseconds(100));
        assert_eq!(scaled.start_instant().timestamp(), ts(0));
        assert_eq!(scaled.end_instant().timestamp(), ts(100));
        assert_eq!(scaled.instant_n(2).unwrap().timestamp(), ts(50));
    }

    #[test]
    fn shift_scale_with_neither_argument_is_identity() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 0i64), TInstant::new(ts(10), 10i64)],
            true,
            true,
            Interpolation::Discrete,
        )
        .unwrap();
        let same = seq.shift_scale(None, None);
        assert_eq!(same, seq);
    }

    #[test]
    fn restrict_numeric_preserves_an_exclusive_edge_bound() {
        use crate::collections::number::FloatSpan;

        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 1i64), TInstant::new(ts(10), 2i64)],
            false,
            true,
            Interpolation::Stepwise,
        )
        .unwrap();
        let span = NumericSelector::Span(FloatSpan::new(0.0, 10.0, true, true));
        let pieces = seq.restrict_numeric(&span, Mode::At);
        assert_eq!(pieces.len(), 1);
        assert!(!pieces[0].is_lower_inclusive());
        assert!(pieces[0].is_upper_inclusive());
    }

    #[test]
    fn restrict_numeric_minus_propagates_both_exclusive_edges() {
        use crate::collections::number::FloatSpan;

        let seq = TSequence::new(
            vec![
                TInstant::new(ts(0), 1i64),
                TInstant::new(ts(3), 2i64),
                TInstant::new(ts(5), 50i64),
                TInstant::new(ts(7), 3i64),
                TInstant::new(ts(10), 4i64),
            ],
            false,
            false,
            Interpolation::Stepwise,
        )
        .unwrap();
        let span = NumericSelector::Span(FloatSpan::new(40.0, 60.0, true, true));
        let pieces = seq.restrict_numeric(&span, Mode::Minus);
        assert_eq!(pieces.len(), 2);
        assert!(!pieces[0].is_lower_inclusive());
        assert!(pieces[0].is_upper_inclusive());
        assert!(pieces[1].is_lower_inclusive());
        assert!(!pieces[1].is_upper_inclusive());
    }
}
