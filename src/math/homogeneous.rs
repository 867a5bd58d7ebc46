use super::{Matrix3, Matrix4, Point2, Vector3, TOLERANCE};

/// Maps `point` through the homography `h`, including the perspective divide.
///
/// Returns `None` if the point is sent to infinity.
#[must_use]
pub fn project(h: &Matrix3, point: &Point2) -> Option<Point2> {
    let v = h * Vector3::new(point.x, point.y, 1.0);
    if v.z.abs() <= TOLERANCE {
        return None;
    }
    Some(Point2::new(v.x / v.z, v.y / v.z))
}

/// Embeds a 2D homography into a 4x4 matrix that leaves `z` untouched.
///
/// Row and column 2 of the result are `(0, 0, 1, 0)`; the homography's
/// translation column lands in column 3 and its projective row in row 3, so
/// `(x, y, z, 1)` maps to `(x', y', z, w')`.
#[must_use]
#[rustfmt::skip]
pub fn embed_homography(h: &Matrix3) -> Matrix4 {
    Matrix4::new(
        h[(0, 0)], h[(0, 1)], 0.0, h[(0, 2)],
        h[(1, 0)], h[(1, 1)], 0.0, h[(1, 2)],
        0.0,       0.0,       1.0, 0.0,
        h[(2, 0)], h[(2, 1)], 0.0, h[(2, 2)],
    )
}

/// Scales `h` so that its bottom-right entry is one.
///
/// Returns `None` if that entry vanishes.
#[must_use]
pub fn normalize_homography(h: &Matrix3) -> Option<Matrix3> {
    let w = h[(2, 2)];
    if w.abs() <= f64::EPSILON {
        return None;
    }
    Some(h / w)
}

/// Ratio of the smallest to the largest singular value of `h`.
///
/// Zero for a rank-deficient matrix, one for a multiple of a rotation.
#[must_use]
pub fn reciprocal_condition(h: &Matrix3) -> f64 {
    let sv = h.singular_values();
    let max = sv.max();
    if max <= 0.0 {
        return 0.0;
    }
    sv.min() / max
}
