use crate::error::{GeometryError, Result};
use crate::math::linear_2d::StandardForm;
use crate::math::{Point2, Vector2, TOLERANCE};

/// A line segment between two distinct points.
///
/// Line queries treat the segment as the infinite line through its
/// endpoints. The implicit form is derived from the endpoints on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    p0: Point2,
    p1: Point2,
}

impl LineSegment {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLengthSegment` if the endpoints coincide
    /// within [`TOLERANCE`].
    pub fn new(p0: Point2, p1: Point2) -> Result<Self> {
        if (p1 - p0).norm() <= TOLERANCE {
            return Err(GeometryError::ZeroLengthSegment { x: p0.x, y: p0.y }.into());
        }
        Ok(Self { p0, p1 })
    }

    /// Returns the start point.
    #[must_use]
    pub fn p0(&self) -> &Point2 {
        &self.p0
    }

    /// Returns the end point.
    #[must_use]
    pub fn p1(&self) -> &Point2 {
        &self.p1
    }

    /// Implicit line `A·x + B·y = C` through both endpoints.
    #[must_use]
    pub fn standard_form(&self) -> StandardForm {
        StandardForm::through(&self.p0, &self.p1)
    }

    /// Implicit line through `point`, perpendicular to this segment.
    #[must_use]
    pub fn normal_form(&self, point: &Point2) -> StandardForm {
        self.standard_form().normal_through(point)
    }

    /// Returns `true` if the segment is horizontal within tolerance.
    #[must_use]
    pub fn is_parallel_to_x(&self) -> bool {
        (self.p0.y - self.p1.y).abs() <= TOLERANCE
    }

    /// Returns `true` if the segment is vertical within tolerance.
    #[must_use]
    pub fn is_parallel_to_y(&self) -> bool {
        (self.p0.x - self.p1.x).abs() <= TOLERANCE
    }

    /// Returns `true` if both segments' lines share a direction.
    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        self.standard_form().is_parallel(&other.standard_form())
    }

    /// Collinearity test: `point` lies within [`TOLERANCE`] of this
    /// segment's line.
    ///
    /// Same test as [`StandardForm::contains`], so the result does not
    /// depend on the segment's length.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.standard_form().contains(point)
    }

    /// Intersection point of the two segments' lines.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParallelLines` if the lines are parallel or
    /// coincident.
    pub fn intersection(&self, other: &Self) -> Result<Point2> {
        self.standard_form()
            .intersect(&other.standard_form())
            .ok_or_else(|| GeometryError::ParallelLines.into())
    }

    /// Foot of the perpendicular dropped from `point` onto this segment's line.
    #[must_use]
    pub fn foot_of_perpendicular(&self, point: &Point2) -> Point2 {
        let form = self.standard_form();
        let normal = form.normal_through(point);
        // The normal line is perpendicular by construction, so the system
        // determinant is A² + B², the squared segment length.
        let det = form.determinants(&normal);
        Point2::new(det.dx / det.d, det.dy / det.d)
    }

    /// Vector from `point` to its foot on this segment's line.
    ///
    /// Zero when `point` already lies on the line.
    #[must_use]
    pub fn distance_vector(&self, point: &Point2) -> Vector2 {
        if self.contains(point) {
            return Vector2::zeros();
        }
        self.foot_of_perpendicular(point) - point
    }

    /// Perpendicular distance from `point` to this segment's line.
    #[must_use]
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        self.distance_vector(point).norm()
    }

    /// Distance between this segment's line and a parallel one.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotParallel` if the lines cross.
    pub fn distance_to_parallel(&self, other: &Self) -> Result<f64> {
        if !other.is_parallel(self) {
            return Err(GeometryError::NotParallel.into());
        }
        Ok((other.foot_of_perpendicular(&self.p0) - self.p0).norm())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment {
        LineSegment::new(p(x0, y0), p(x1, y1)).unwrap()
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(LineSegment::new(p(1.0, 1.0), p(1.0, 1.0)).is_err());
        assert!(LineSegment::new(p(1.0, 1.0), p(1.0 + 1e-9, 1.0)).is_err());
    }

    #[test]
    fn standard_form_follows_endpoints() {
        let s = seg(1.0, 2.0, 4.0, 6.0);
        let f = s.standard_form();
        assert_relative_eq!(f.a, -4.0);
        assert_relative_eq!(f.b, 3.0);
        assert_relative_eq!(f.a * 1.0 + f.b * 2.0, f.c);
        assert_relative_eq!(f.a * 4.0 + f.b * 6.0, f.c);
    }

    #[test]
    fn contains_endpoints_and_collinear_points() {
        let s = seg(-1.0, -1.0, 1.0, 1.0);
        assert!(s.contains(s.p0()));
        assert!(s.contains(s.p1()));
        assert!(s.contains(&p(5.0, 5.0)));
        assert!(!s.contains(&p(0.0, 0.5)));
    }

    #[test]
    fn collinearity_ignores_segment_length() {
        let long = seg(0.0, 0.0, 1000.0, 0.0);
        let short = seg(0.0, 0.0, 1e-3, 0.0);
        for s in [long, short] {
            assert!(s.contains(&p(0.5, 5e-7)));
            assert!(!s.contains(&p(0.5, 1e-5)));
        }
    }

    #[test]
    fn parallel_horizontal_segments() {
        let base = seg(-1.0, 1.0, 1.0, 1.0);
        let line1 = seg(-1.0, -1.0, 1.0, -1.0);
        assert!(base.is_parallel(&line1));
        assert!(base.is_parallel(&base));
        assert!(base.is_parallel_to_x());
        assert!(!base.is_parallel_to_y());
        assert!(base.intersection(&line1).is_err());
        assert_relative_eq!(base.distance_to_parallel(&line1).unwrap(), 2.0);
    }

    #[test]
    fn crossing_segments_meet() {
        let base = seg(-1.0, 1.0, 1.0, 1.0);
        let line2 = seg(0.0, -1.0, 0.0, 1.0);
        assert!(!base.is_parallel(&line2));
        assert!(line2.is_parallel_to_y());
        let x = base.intersection(&line2).unwrap();
        assert_relative_eq!(x, p(0.0, 1.0));
        assert!(base.distance_to_parallel(&line2).is_err());
    }

    #[test]
    fn foot_of_perpendicular_on_diagonal() {
        let s = seg(0.0, 0.0, 2.0, 2.0);
        let foot = s.foot_of_perpendicular(&p(0.0, 2.0));
        assert_relative_eq!(foot, p(1.0, 1.0), epsilon = 1e-12);
        assert!(s.contains(&foot));
    }

    #[test]
    fn foot_of_perpendicular_on_vertical_line() {
        let s = seg(1.0, -1.0, 1.0, 1.0);
        let foot = s.foot_of_perpendicular(&p(1.5, -1.0));
        assert_relative_eq!(foot, p(1.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn distance_vector_points_at_line() {
        let s = seg(-1.0, 1.0, 1.0, 1.0);
        let v = s.distance_vector(&p(0.3, -0.5));
        assert_relative_eq!(v, Vector2::new(0.0, 1.5), epsilon = 1e-12);
        assert_relative_eq!(s.distance_to_point(&p(0.3, -0.5)), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn distance_vector_is_zero_on_line() {
        let s = seg(-1.0, 1.0, 1.0, 1.0);
        assert_eq!(s.distance_vector(&p(7.0, 1.0)), Vector2::zeros());
    }
}
