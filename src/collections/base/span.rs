use std::fmt::Debug;

use super::collection::Collection;

/// A contiguous interval over an ordered bound type `T`, with independent
/// inclusive/exclusive flags on each end.
///
/// `Span<T>` is the shared backbone for [`crate::collections::datetime::TsTzSpan`]
/// (a period over timestamps), [`crate::collections::number::IntSpan`] and
/// [`crate::collections::number::FloatSpan`]. An FFI wrapper would need one
/// struct per base type because each maps to a distinct C symbol family
/// (`tstzspan_*`, `intspan_*`, `floatspan_*`); without an FFI boundary the
/// position/containment logic is identical across bound types, so it
/// lives here once and the per-type files only add the arithmetic that is
/// genuinely type-specific (shifting by a duration vs. a number).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span<T> {
    pub(crate) lower: T,
    pub(crate) upper: T,
    pub(crate) lower_inc: bool,
    pub(crate) upper_inc: bool,
}

impl<T: PartialOrd + Clone + Debug> Span<T> {
    /// Builds a span, normalising a single-point inclusive-exclusive span
    /// is left to the caller (periods of zero width are valid only when
    /// both bounds are inclusive).
    pub fn new(lower: T, upper: T, lower_inc: bool, upper_inc: bool) -> Self {
        debug_assert!(lower <= upper, "span lower bound must not exceed upper bound");
        Self {
            lower,
            upper,
            lower_inc,
            upper_inc,
        }
    }

    pub fn lower(&self) -> &T {
        &self.lower
    }

    pub fn upper(&self) -> &T {
        &self.upper
    }

    pub fn is_lower_inclusive(&self) -> bool {
        self.lower_inc
    }

    pub fn is_upper_inclusive(&self) -> bool {
        self.upper_inc
    }

    pub fn contains_value(&self, value: &T) -> bool {
        let lower_ok = if self.lower_inc {
            value >= &self.lower
        } else {
            value > &self.lower
        };
        let upper_ok = if self.upper_inc {
            value <= &self.upper
        } else {
            value < &self.upper
        };
        lower_ok && upper_ok
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_left(other) && !self.is_right(other)
    }

    /// `self` entirely before `other`, i.e. no shared element.
    pub fn is_left(&self, other: &Self) -> bool {
        self.upper < other.lower
            || (self.upper == other.lower && !(self.upper_inc && other.lower_inc))
    }

    /// `self` entirely after `other`, i.e. no shared element.
    pub fn is_right(&self, other: &Self) -> bool {
        other.is_left(self)
    }

    pub fn is_over_or_left(&self, other: &Self) -> bool {
        self.upper < other.upper
            || (self.upper == other.upper && (!self.upper_inc || other.upper_inc))
    }

    pub fn is_over_or_right(&self, other: &Self) -> bool {
        self.lower > other.lower
            || (self.lower == other.lower && (!self.lower_inc || other.lower_inc))
    }

    pub fn is_contained_in(&self, container: &Self) -> bool {
        let lower_ok = container.lower < self.lower
            || (container.lower == self.lower && (container.lower_inc || !self.lower_inc));
        let upper_ok = container.upper > self.upper
            || (container.upper == self.upper && (container.upper_inc || !self.upper_inc));
        lower_ok && upper_ok
    }

    /// Whether this span and `other` touch or overlap at a single shared
    /// instant where at least one side excludes it, the adjacency rule
    /// that lets the sequence-set layer tell "disjoint" from "adjacent".
    pub fn touches(&self, other: &Self) -> bool {
        (self.upper == other.lower && (self.upper_inc != other.lower_inc || !self.upper_inc))
            || (other.upper == self.lower && (other.upper_inc != self.lower_inc || !other.upper_inc))
    }

    /// `self` with `other`'s portion removed, as 0, 1, or 2 remainder
    /// spans: `minus` is defined as `at` of the complement.
    pub fn minus(&self, other: &Self) -> Vec<Self> {
        if !self.overlaps(other) {
            return vec![self.clone()];
        }
        let mut out = Vec::with_capacity(2);
        if other.lower > self.lower
            || (other.lower == self.lower && self.lower_inc && !other.lower_inc)
        {
            out.push(Span::new(
                self.lower.clone(),
                other.lower.clone(),
                self.lower_inc,
                !other.lower_inc,
            ));
        }
        if other.upper < self.upper
            || (other.upper == self.upper && self.upper_inc && !other.upper_inc)
        {
            out.push(Span::new(
                other.upper.clone(),
                self.upper.clone(),
                !other.upper_inc,
                self.upper_inc,
            ));
        }
        out
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let lower = if self.lower >= other.lower {
            self.lower.clone()
        } else {
            other.lower.clone()
        };
        let lower_inc = if self.lower == other.lower {
            self.lower_inc && other.lower_inc
        } else if self.lower >= other.lower {
            self.lower_inc
        } else {
            other.lower_inc
        };
        let upper = if self.upper <= other.upper {
            self.upper.clone()
        } else {
            other.upper.clone()
        };
        let upper_inc = if self.upper == other.upper {
            self.upper_inc && other.upper_inc
        } else if self.upper <= other.upper {
            self.upper_inc
        } else {
            other.upper_inc
        };
        if lower < upper || (lower == upper && lower_inc && upper_inc) {
            Some(Span::new(lower, upper, lower_inc, upper_inc))
        } else {
            None
        }
    }
}

impl<T: PartialOrd + PartialEq + Clone + Debug> Collection for Span<T> {
    type Type = T;

    fn is_contained_in(&self, container: &Self) -> bool {
        Span::is_contained_in(self, container)
    }

    fn contains(&self, content: &T) -> bool {
        self.contains_value(content)
    }

    fn overlaps(&self, other: &Self) -> bool {
        Span::overlaps(self, other)
    }

    fn is_left(&self, other: &Self) -> bool {
        Span::is_left(self, other)
    }

    fn is_over_or_left(&self, other: &Self) -> bool {
        Span::is_over_or_left(self, other)
    }

    fn is_over_or_right(&self, other: &Self) -> bool {
        Span::is_over_or_right(self, other)
    }

    fn is_right(&self, other: &Self) -> bool {
        Span::is_right(self, other)
    }
}
