pub mod tgeogpoint;
pub mod tgeompoint;
pub mod tpoint;

pub use tgeogpoint::*;
pub use tgeompoint::*;
pub use tpoint::SpatialPoint;
