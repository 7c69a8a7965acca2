//! Aggregation & comparison: time-weighted average, integral, total
//! ordering, and structural hash. Kept as a
//! separate module from `sequence`/`sequence_set` since, unlike
//! restriction and synchronisation, none of this is needed to build or
//! mutate a value — it is read-only analysis layered on top.

use crate::value::{BaseValue, LinearInterpolable, NumericValue, TotalOrder};

use super::instant::TInstant;
use super::interpolation::Interpolation;
use super::sequence::TSequence;
use super::sequence_set::TSequenceSet;

impl<V: BaseValue + LinearInterpolable + NumericValue> TSequence<V> {
    /// Area under the value curve over wall-clock time, in
    /// value-seconds. Stepwise: sum of `value * segment_duration`
    /// (rectangle rule, holding the left value). Linear: trapezoid
    /// rule. Discrete sequences have no notion of "between instants"
    /// and integrate to zero.
    pub fn integral(&self) -> f64 {
        if self.interpolation() == Interpolation::Discrete {
            return 0.0;
        }
        let mut total = 0.0;
        for w in self.instants().windows(2) {
            let (a, b) = (&w[0], &w[1]);
            let dt = (b.timestamp().as_micros() - a.timestamp().as_micros()) as f64 / 1_000_000.0;
            total += match self.interpolation() {
                Interpolation::Stepwise => a.value().to_f64() * dt,
                Interpolation::Linear => 0.5 * (a.value().to_f64() + b.value().to_f64()) * dt,
                Interpolation::Discrete => unreachable!("handled above"),
            };
        }
        total
    }

    /// Integral divided by the sequence's wall-clock duration. `None`
    /// for a singleton sequence, which has zero duration.
    pub fn time_weighted_average(&self) -> Option<f64> {
        let dt = self.period().duration();
        let secs = dt.num_microseconds()? as f64 / 1_000_000.0;
        if secs == 0.0 {
            return None;
        }
        Some(self.integral() / secs)
    }
}

impl<V: BaseValue + LinearInterpolable + NumericValue> TSequenceSet<V> {
    pub fn integral(&self) -> f64 {
        self.sequences().iter().map(TSequence::integral).sum()
    }

    pub fn time_weighted_average(&self) -> Option<f64> {
        let secs: f64 = self
            .sequences()
            .iter()
            .filter_map(|s| s.period().duration().num_microseconds())
            .map(|us| us as f64 / 1_000_000.0)
            .sum();
        if secs == 0.0 {
            return None;
        }
        Some(self.integral() / secs)
    }
}

impl<V: BaseValue + TotalOrder> TInstant<V> {
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp()
            .cmp(&other.timestamp())
            .then_with(|| self.value().total_cmp(other.value()))
    }
}

impl<V: BaseValue + TotalOrder> TSequence<V> {
    /// Lexicographic order: bounds first, then instant by instant.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.is_lower_inclusive()
            .cmp(&other.is_lower_inclusive())
            .reverse()
            .then_with(|| self.num_instants().cmp(&other.num_instants()))
            .then_with(|| {
                self.instants()
                    .iter()
                    .zip(other.instants())
                    .map(|(a, b)| a.total_cmp(b))
                    .find(|o| *o != std::cmp::Ordering::Equal)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| self.is_upper_inclusive().cmp(&other.is_upper_inclusive()))
    }
}

impl<V: BaseValue + TotalOrder> TSequenceSet<V> {
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sequences()
            .iter()
            .zip(other.sequences())
            .map(|(a, b)| a.total_cmp(b))
            .find(|o| *o != std::cmp::Ordering::Equal)
            .unwrap_or_else(|| self.num_sequences().cmp(&other.num_sequences()))
    }
}

/// A 32-bit rolling hash, `h' = (h << 5) - h + child_hash` — the classic
/// `h*31 + x` string-hash recurrence applied to a stream of child hashes
/// instead of bytes.
pub fn roll(h: u32, child: u32) -> u32 {
    h.wrapping_shl(5).wrapping_sub(h).wrapping_add(child)
}

pub trait StructuralHash {
    fn struct_hash(&self) -> u32;
}

fn hash_f64(v: f64) -> u32 {
    let bits = v.to_bits();
    (bits as u32) ^ ((bits >> 32) as u32)
}

impl StructuralHash for bool {
    fn struct_hash(&self) -> u32 {
        *self as u32
    }
}
impl StructuralHash for i64 {
    fn struct_hash(&self) -> u32 {
        (*self as u64 as u32) ^ ((*self as u64 >> 32) as u32)
    }
}
impl StructuralHash for f64 {
    fn struct_hash(&self) -> u32 {
        hash_f64(*self)
    }
}
impl StructuralHash for String {
    fn struct_hash(&self) -> u32 {
        self.bytes().fold(0u32, |h, b| roll(h, b as u32))
    }
}
impl StructuralHash for crate::value::GeomPoint {
    fn struct_hash(&self) -> u32 {
        roll(roll(hash_f64(self.x), hash_f64(self.y)), hash_f64(self.z.unwrap_or(0.0)))
    }
}
impl StructuralHash for crate::value::GeogPoint {
    fn struct_hash(&self) -> u32 {
        roll(roll(hash_f64(self.x), hash_f64(self.y)), hash_f64(self.z.unwrap_or(0.0)))
    }
}

impl<V: BaseValue + StructuralHash> StructuralHash for TInstant<V> {
    fn struct_hash(&self) -> u32 {
        roll(self.timestamp().as_micros() as u32, self.value().struct_hash())
    }
}

impl<V: BaseValue + StructuralHash> StructuralHash for TSequence<V> {
    fn struct_hash(&self) -> u32 {
        let mut h = self.instants().len() as u32;
        h = roll(h, self.is_lower_inclusive() as u32);
        h = roll(h, self.is_upper_inclusive() as u32);
        for inst in self.instants() {
            h = roll(h, inst.struct_hash());
        }
        h
    }
}

impl<V: BaseValue + StructuralHash> StructuralHash for TSequenceSet<V> {
    fn struct_hash(&self) -> u32 {
        self.sequences().iter().fold(self.num_sequences() as u32, |h, seq| roll(h, seq.struct_hash()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::datetime::Timestamp;

    fn ts(n: i64) -> Timestamp {
        Timestamp::from_micros(n)
    }

    #[test]
    fn stepwise_integral_is_left_rectangle_rule() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 2.0), TInstant::new(ts(10_000_000), 5.0)],
            true,
            false,
            Interpolation::Stepwise,
        )
        .unwrap();
        assert_eq!(seq.integral(), 20.0);
    }

    #[test]
    fn linear_integral_is_trapezoid_rule() {
        let seq = TSequence::new(
            vec![TInstant::new(ts(0), 0.0), TInstant::new(ts(10_000_000), 10.0)],
            true,
            true,
            Interpolation::Linear,
        )
        .unwrap();
        assert_eq!(seq.integral(), 50.0);
        assert_eq!(seq.time_weighted_average(), Some(5.0));
    }

    #[test]
    fn hash_depends_only_on_content() {
        let a = TSequence::new(
            vec![TInstant::new(ts(0), 1i64), TInstant::new(ts(1), 2i64)],
            true,
            false,
            Interpolation::Stepwise,
        )
        .unwrap();
        let b = a.clone();
        assert_eq!(a.struct_hash(), b.struct_hash());
    }

    #[test]
    fn total_order_is_antisymmetric() {
        let a = TInstant::new(ts(1), 1i64);
        let b = TInstant::new(ts(2), 1i64);
        assert_eq!(a.total_cmp(&b), std::cmp::Ordering::Less);
        assert_eq!(b.total_cmp(&a), std::cmp::Ordering::Greater);
    }
}
