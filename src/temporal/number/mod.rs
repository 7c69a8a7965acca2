pub mod tfloat;
pub mod tint;
pub mod tnumber;

pub use tfloat::*;
pub use tint::*;
pub use tnumber::*;
