//! A pure-Rust implementation of the temporal sequence set at the core
//! of the MobilityDB/MEOS data model: ordered, disjoint runs of instants
//! over boolean, integer, float, text, and 2D/3D point base domains,
//! with restriction, synchronisation, append/insert/update/delete,
//! aggregation, and a textual wire form.
//!
//! Nothing here crosses an FFI boundary: every algorithm — binary
//! search, crossing detection, normalisation, the packed-layout stand-in
//! — is implemented directly against owned Rust data structures (see
//! [`temporal::sequence_set`] for why a `Vec` rather than a packed
//! buffer).

pub mod boxes;
pub mod collections;
pub mod error;
pub mod registry;
pub mod temporal;
pub mod value;

pub use error::{Result, TemporalError};
pub use temporal::{Interpolation, Mode, Temporal};
pub use temporal::{TBool, TBoolInst, TBoolSeq, TBoolSeqSet};
pub use temporal::{TFloat, TFloatInst, TFloatSeq, TFloatSeqSet};
pub use temporal::{TInt, TIntInst, TIntSeq, TIntSeqSet};
pub use temporal::{TText, TTextInst, TTextSeq, TTextSeqSet};
pub use value::{BaseValue, GeogPoint, GeomPoint, NumericValue, OrderedValue, TempType};

#[cfg(feature = "geos")]
pub use temporal::{TGeogPoint, TGeogPointInst, TGeogPointSeq, TGeogPointSeqSet};
#[cfg(feature = "geos")]
pub use temporal::{TGeomPoint, TGeomPointInst, TGeomPointSeq, TGeomPointSeqSet};
