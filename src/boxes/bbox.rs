/// The summary every temporal value carries alongside its period: a
/// numeric span for `tint`/`tfloat`, a spatial extent for `tgeompoint`/
/// `tgeogpoint`, or just the period for `tbool`/`ttext`.
///
/// `union` is required to be a commutative, associative, idempotent
/// monoid operation — building a sequence set's bbox by folding over its
/// sequences' bboxes must give the same answer regardless of sequence
/// order (`bbox(ss) = ⋃ bbox(seqᵢ)`).
pub trait BoundingBox: Clone + PartialEq + std::fmt::Debug {
    fn union(&self, other: &Self) -> Self;
}
