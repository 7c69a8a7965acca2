//! The temporal-value layer: instants, sequences, sequence sets, the
//! tagged-union dispatcher over them, and the per-base-type wrappers
//! (`tbool`, `ttext`, `tint`/`tfloat`, `tgeompoint`/`tgeogpoint`).

pub mod agg;
pub mod dispatch;
pub mod instant;
pub mod interpolation;
pub mod number;
pub mod restrict;
pub mod sequence;
pub mod sequence_set;
pub mod tbool;
pub mod ttext;
pub mod wkt;

#[cfg(feature = "geos")]
pub mod point;

pub use dispatch::Temporal;
pub use instant::TInstant;
pub use interpolation::Interpolation;
pub use restrict::{Mode, NumericSelector, Selector};
pub use sequence::TSequence;
pub use sequence_set::TSequenceSet;

pub use number::*;
pub use tbool::*;
pub use ttext::*;

#[cfg(feature = "geos")]
pub use point::*;
