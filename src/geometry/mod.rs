pub mod quad;
pub mod region;
pub mod segment;
pub mod wedge;

pub use quad::Quad;
pub use region::{CropRect, CropRegion};
pub use segment::LineSegment;
pub use wedge::CornerWedge;
