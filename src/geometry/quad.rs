use super::LineSegment;
use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, Matrix4, Point2, Tolerance, Vector2, Vector3, TOLERANCE};
use crate::operations::transform::QuadToQuad;

/// Number of corners in a [`Quad`].
pub const CORNERS: usize = 4;

/// A quadrilateral with corners in fixed cyclic order
/// `[left_bottom, left_top, right_top, right_bottom]`.
///
/// Corner indices wrap modulo four, so `corner(-1)` is `right_bottom` and
/// `corner(4)` is `left_bottom`. The corners are expected to describe a
/// simple (non-self-intersecting) quadrilateral; this is not validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    corners: [Point2; CORNERS],
    aspect: f64,
}

impl Default for Quad {
    /// The unit quad `[(-1,-1), (-1,1), (1,1), (1,-1)]` with unit aspect.
    fn default() -> Self {
        Self::new(
            Point2::new(-1.0, -1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, -1.0),
        )
    }
}

impl Quad {
    /// Creates a quad from its four corners.
    #[must_use]
    pub fn new(
        left_bottom: Point2,
        left_top: Point2,
        right_top: Point2,
        right_bottom: Point2,
    ) -> Self {
        Self::from_corners([left_bottom, left_top, right_top, right_bottom])
    }

    /// Creates a quad from corners already in cyclic order.
    #[must_use]
    pub fn from_corners(corners: [Point2; CORNERS]) -> Self {
        Self {
            corners,
            aspect: 1.0,
        }
    }

    /// Corner 0.
    #[must_use]
    pub fn left_bottom(&self) -> &Point2 {
        &self.corners[0]
    }

    /// Corner 1.
    #[must_use]
    pub fn left_top(&self) -> &Point2 {
        &self.corners[1]
    }

    /// Corner 2, the all-ones point of the basis frame.
    #[must_use]
    pub fn right_top(&self) -> &Point2 {
        &self.corners[2]
    }

    /// Corner 3.
    #[must_use]
    pub fn right_bottom(&self) -> &Point2 {
        &self.corners[3]
    }

    /// All four corners in cyclic order.
    #[must_use]
    pub fn corners(&self) -> &[Point2; CORNERS] {
        &self.corners
    }

    /// Corner at `index` modulo four; negative indices wrap backwards.
    #[must_use]
    pub fn corner(&self, index: isize) -> Point2 {
        self.corners[wrap(index)]
    }

    /// Replaces the corner at `index` modulo four.
    pub fn set_corner(&mut self, index: isize, point: Point2) {
        self.corners[wrap(index)] = point;
    }

    /// Edge from corner `index` to corner `index + 1`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLengthSegment` if the two corners coincide.
    pub fn edge(&self, index: isize) -> Result<LineSegment> {
        LineSegment::new(self.corner(index), self.corner(index + 1))
    }

    /// Arithmetic mean of the corners.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        let sum = self
            .corners
            .iter()
            .fold(Vector2::zeros(), |acc, c| acc + c.coords);
        Point2::from(sum / 4.0)
    }

    /// Current x-axis scale factor.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Rescales the x-coordinates so they reflect `aspect` instead of the
    /// current factor. Setting the current aspect again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if `aspect` is not a
    /// finite positive number.
    #[allow(clippy::float_cmp)]
    pub fn set_aspect(&mut self, aspect: f64) -> Result<()> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "aspect",
                value: aspect,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            }
            .into());
        }
        if aspect == self.aspect {
            return Ok(());
        }
        let ratio = aspect / self.aspect;
        for c in &mut self.corners {
            c.x *= ratio;
        }
        self.aspect = aspect;
        Ok(())
    }

    /// Builder form of [`set_aspect`](Self::set_aspect).
    ///
    /// # Errors
    ///
    /// Returns an error if `aspect` is not a finite positive number.
    pub fn with_aspect(mut self, aspect: f64) -> Result<Self> {
        self.set_aspect(aspect)?;
        Ok(self)
    }

    /// Basis matrix mapping the canonical projective frame onto this quad.
    ///
    /// Columns of `A` are the homogeneous left-bottom, left-top and
    /// right-bottom corners; `X = A⁻¹·right_top`, and the basis is
    /// `A · diag(X)`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SingularMatrix` if those three corners are
    /// collinear.
    pub fn basis(&self) -> Result<Matrix3> {
        let (a, weights) = self.basis_parts()?;
        Ok(a * Matrix3::from_diagonal(&weights))
    }

    /// Returns `true` if the right-top corner is collinear with two of the
    /// other corners, which makes the basis matrix singular.
    ///
    /// The weights of `X` sum to one, so the check does not depend on the
    /// size of the quad.
    #[must_use]
    pub fn has_singular_basis(&self) -> bool {
        match self.basis_parts() {
            Ok((_, weights)) => weights.iter().any(|w| w.abs() <= TOLERANCE),
            Err(_) => true,
        }
    }

    fn basis_parts(&self) -> Result<(Matrix3, Vector3)> {
        let [lb, lt, rt, rb] = self.corners;
        #[rustfmt::skip]
        let a = Matrix3::new(
            lb.x, lt.x, rb.x,
            lb.y, lt.y, rb.y,
            1.0,  1.0,  1.0,
        );
        // det A is twice the triangle area; compare it against the spanning
        // edge lengths so the test is scale free.
        let span = (lt - lb).norm() * (rb - lb).norm();
        if a.determinant().abs() <= TOLERANCE * span {
            return Err(GeometryError::SingularMatrix("basis corners are collinear").into());
        }
        let a_inv = a
            .try_inverse()
            .ok_or(GeometryError::SingularMatrix("basis corners are collinear"))?;
        Ok((a, a_inv * Vector3::new(rt.x, rt.y, 1.0)))
    }

    /// Rendering matrix mapping this quad onto `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if either quad's basis is singular.
    pub fn transform_to(&self, destination: &Self) -> Result<Matrix4> {
        QuadToQuad::new(*self, *destination).execute()
    }

    /// Crossing-number containment with the default [`Tolerance`].
    ///
    /// Points on an edge count as inside.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.contains_with(point, &Tolerance::default())
    }

    /// Crossing-number containment.
    ///
    /// Corners are pushed away from the centroid by `tol.nudge`, then a ray
    /// is cast towards positive x and the edges it crosses are counted. Each
    /// edge covers the half-open y-range `[min, max)`, so a ray through a
    /// vertex is counted once.
    #[must_use]
    pub fn contains_with(&self, point: &Point2, tol: &Tolerance) -> bool {
        let center = self.centroid();
        let nudged = self.corners.map(|c| center + (c - center) * tol.nudge);

        let mut inside = false;
        for i in 0..CORNERS {
            let (p0, p1) = (nudged[i], nudged[(i + 1) % CORNERS]);
            let cross = (p1 - p0).perp(&(point - p0));
            if p0.y <= point.y {
                if p1.y > point.y && cross > 0.0 {
                    inside = !inside;
                }
            } else if p1.y <= point.y && cross < 0.0 {
                inside = !inside;
            }
        }
        inside
    }

    /// Ordered-bound containment with the default [`Tolerance`].
    #[must_use]
    pub fn contains_bounded(&self, point: &Point2) -> bool {
        self.contains_bounded_with(point, &Tolerance::default())
    }

    /// Ordered-bound containment: the point is right of and above the
    /// left-bottom corner, right of and below the left-top corner, and so on.
    ///
    /// Only meaningful for convex quads whose corners match their names.
    #[must_use]
    pub fn contains_bounded_with(&self, point: &Point2, tol: &Tolerance) -> bool {
        let eps = tol.linear;
        let [lb, lt, rt, rb] = &self.corners;
        point.x >= lb.x - eps
            && point.y >= lb.y - eps
            && point.x >= lt.x - eps
            && point.y <= lt.y + eps
            && point.x <= rt.x + eps
            && point.y <= rt.y + eps
            && point.x <= rb.x + eps
            && point.y >= rb.y - eps
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn wrap(index: isize) -> usize {
    index.rem_euclid(CORNERS as isize) as usize
}
