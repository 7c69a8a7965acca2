use std::fmt::Debug;

use super::{collection::Collection, span::Span};

/// An ordered set of pairwise-disjoint, non-touching [`Span`]s.
///
/// Owns its spans directly rather than an opaque C buffer. Adjacent
/// spans are always merged by the constructor, which is the same
/// normalisation discipline the sequence-set layer applies one level up.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanSet<T> {
    pub(crate) spans: Vec<Span<T>>,
}

impl<T: PartialOrd + Clone + Debug> SpanSet<T> {
    /// Builds a span set from an unsorted, possibly-overlapping slice of
    /// spans, sorting and merging as needed.
    pub fn new(mut spans: Vec<Span<T>>) -> Self {
        spans.sort_by(|a, b| a.lower().partial_cmp(b.lower()).expect("unordered bound"));
        let mut merged: Vec<Span<T>> = Vec::with_capacity(spans.len());
        for span in spans {
            if let Some(last) = merged.last_mut() {
                if last.overlaps(&span) || last.touches(&span) {
                    let lower_is_last = last.lower() <= span.lower();
                    let (lower, lower_inc) = if lower_is_last {
                        (last.lower().clone(), last.is_lower_inclusive())
                    } else {
                        (span.lower().clone(), span.is_lower_inclusive())
                    };
                    let upper_is_last = last.upper() >= span.upper();
                    let (upper, upper_inc) = if upper_is_last {
                        (last.upper().clone(), last.is_upper_inclusive())
                    } else {
                        (span.upper().clone(), span.is_upper_inclusive())
                    };
                    *last = Span::new(lower, upper, lower_inc, upper_inc);
                    continue;
                }
            }
            merged.push(span);
        }
        Self { spans: merged }
    }

    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn start_span(&self) -> Option<&Span<T>> {
        self.spans.first()
    }

    pub fn end_span(&self) -> Option<&Span<T>> {
        self.spans.last()
    }

    /// 1-based, matching the `span_n`/`instant_n` naming convention used
    /// elsewhere in this crate.
    pub fn span_n(&self, n: usize) -> Option<&Span<T>> {
        n.checked_sub(1).and_then(|i| self.spans.get(i))
    }

    pub fn spans(&self) -> &[Span<T>] {
        &self.spans
    }

    pub fn lower(&self) -> Option<&T> {
        self.spans.first().map(Span::lower)
    }

    pub fn upper(&self) -> Option<&T> {
        self.spans.last().map(Span::upper)
    }

    pub fn contains_value(&self, value: &T) -> bool {
        self.spans.iter().any(|s| s.contains_value(value))
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut all = self.spans.clone();
        all.extend(other.spans.iter().cloned());
        Self::new(all)
    }

    /// `self` with every span of `other` removed.
    pub fn minus(&self, other: &Self) -> Self {
        let mut remaining = self.spans.clone();
        for cut in &other.spans {
            remaining = remaining.iter().flat_map(|s| s.minus(cut)).collect();
        }
        Self::new(remaining)
    }

    /// Intersection as a new span set; spans that don't overlap anything
    /// on the other side are dropped.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Vec::new();
        for a in &self.spans {
            for b in &other.spans {
                if let Some(i) = a.intersection(b) {
                    out.push(i);
                }
            }
        }
        Self::new(out)
    }
}

impl<T: PartialOrd + PartialEq + Clone + Debug> Collection for SpanSet<T> {
    type Type = T;

    fn is_contained_in(&self, container: &Self) -> bool {
        self.spans
            .iter()
            .all(|s| container.spans.iter().any(|c| s.is_contained_in(c)))
    }

    fn contains(&self, content: &T) -> bool {
        self.contains_value(content)
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.spans
            .iter()
            .any(|s| other.spans.iter().any(|o| s.overlaps(o)))
    }

    fn is_left(&self, other: &Self) -> bool {
        match (self.end_span(), other.start_span()) {
            (Some(a), Some(b)) => a.is_left(b),
            _ => true,
        }
    }

    fn is_over_or_left(&self, other: &Self) -> bool {
        match (self.end_span(), other.end_span()) {
            (Some(a), Some(b)) => a.is_over_or_left(b),
            _ => true,
        }
    }

    fn is_over_or_right(&self, other: &Self) -> bool {
        match (self.start_span(), other.start_span()) {
            (Some(a), Some(b)) => a.is_over_or_right(b),
            _ => true,
        }
    }

    fn is_right(&self, other: &Self) -> bool {
        match (self.start_span(), other.end_span()) {
            (Some(a), Some(b)) => a.is_right(b),
            _ => true,
        }
    }
}
