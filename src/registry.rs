//! The process-wide base-type catalog: per `TempType`, whether it is
//! continuous, whether it carries a numeric or spatial bbox, and so on.
//! Kept as the single piece of process-wide state, behind a read-only,
//! lazily-initialised registry — there is no teardown step because
//! there is nothing to release (no file handles, no external context).

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::value::TempType;

/// Per-`TempType` metadata the rest of the crate consults instead of
/// hard-coding `match` arms everywhere continuity or bbox shape matters.
#[derive(Clone, Copy, Debug)]
pub struct TypeMeta {
    /// Whether linear interpolation is permitted for this type (float,
    /// points) as opposed to step-only (bool, int, text).
    pub continuous: bool,
    /// Whether instances of this type carry a numeric bounding span
    /// alongside their period.
    pub has_numeric_bbox: bool,
    /// Whether instances of this type carry a spatial bounding box
    /// alongside their period.
    pub has_spatial_bbox: bool,
}

static REGISTRY: OnceLock<HashMap<TempType, TypeMeta>> = OnceLock::new();

fn build() -> HashMap<TempType, TypeMeta> {
    use TempType::*;
    HashMap::from([
        (Bool, TypeMeta { continuous: false, has_numeric_bbox: false, has_spatial_bbox: false }),
        (Int, TypeMeta { continuous: false, has_numeric_bbox: true, has_spatial_bbox: false }),
        (Float, TypeMeta { continuous: true, has_numeric_bbox: true, has_spatial_bbox: false }),
        (Text, TypeMeta { continuous: false, has_numeric_bbox: false, has_spatial_bbox: false }),
        (GeomPoint, TypeMeta { continuous: true, has_numeric_bbox: false, has_spatial_bbox: true }),
        (GeogPoint, TypeMeta { continuous: true, has_numeric_bbox: false, has_spatial_bbox: true }),
    ])
}

/// Forces initialisation of the registry. Optional: every lookup below
/// initialises lazily, but long-lived services may want to pay the cost
/// up front at startup rather than on the first temporal value built.
pub fn init() {
    REGISTRY.get_or_init(build);
}

pub fn metadata(temp_type: TempType) -> TypeMeta {
    *REGISTRY
        .get_or_init(build)
        .get(&temp_type)
        .expect("registry is built with an entry for every TempType variant")
}

pub fn is_continuous(temp_type: TempType) -> bool {
    metadata(temp_type).continuous
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_is_continuous_bool_is_not() {
        assert!(is_continuous(TempType::Float));
        assert!(!is_continuous(TempType::Bool));
    }
}
