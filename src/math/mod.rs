pub mod homogeneous;
pub mod linear_2d;
pub mod tolerance;

pub use tolerance::Tolerance;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type, used for homogeneous 2D coordinates.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 projective matrix acting on homogeneous 2D coordinates.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 rendering matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Absolute tolerance for degeneracy and equality checks.
pub const TOLERANCE: f64 = 1e-6;

/// Multiplicative factor applied to quad corners before the crossing-number
/// test so that points lying exactly on an edge count as inside.
pub const CROSSING_NUDGE: f64 = 1.001;
