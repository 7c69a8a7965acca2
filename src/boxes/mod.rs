pub mod bbox;
pub mod stbox;
pub mod tbox;

pub use bbox::BoundingBox;
pub use stbox::STBox;
pub use tbox::TBox;
