use std::fmt::Debug;

pub trait Collection: PartialEq + Debug + Clone {
    type Type: Clone + PartialEq + PartialOrd + Debug;

    // Topological Operations

    /// Returns whether `self` is contained in `container`.
    fn is_contained_in(&self, container: &Self) -> bool;

    /// Determines if the collection contains the specified item.
    fn contains(&self, content: &Self::Type) -> bool;

    /// Returns whether `self` overlaps `other`. That is, both share at least an element.
    fn overlaps(&self, other: &Self) -> bool;

    // Position Operations

    /// Returns whether `self` is strictly before `other`. That is, `self` ends before `other` starts.
    fn is_left(&self, other: &Self) -> bool;

    /// Returns whether `self` is before `other` allowing overlap. That is, `self` ends before `other` ends (or at the same time).
    fn is_over_or_left(&self, other: &Self) -> bool;

    /// Returns whether `self` is after `other` allowing overlap. That is, `self` starts after `other` starts (or at the same time).
    fn is_over_or_right(&self, other: &Self) -> bool;

    /// Returns whether `self` is strictly after `other`. That is, `self` starts after `other` ends.
    fn is_right(&self, other: &Self) -> bool;
}

// A C-FFI wrapper would need a `paste!`-based macro to generate these six
// methods once per concrete base type, since each maps to its own C symbol
// (`contained_span_span`, `contained_spanset_spanset`, ...). There is no
// FFI boundary here, so the same six predicates are expressed once as a
// blanket impl over the generic `Span`/`SpanSet` in this module instead of
// being regenerated per type.
