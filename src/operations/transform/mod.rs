mod homography;
mod quad_to_quad;

pub use homography::SolveHomography;
pub use quad_to_quad::QuadToQuad;
