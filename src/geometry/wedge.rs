use super::LineSegment;
use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

/// The two edges meeting at one corner of a quadrilateral.
///
/// `pc` is the apex shared by the edges `p0–pc` and `pc–p1`. The optional
/// aspect factor scales the x-coordinate of all three points at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerWedge {
    p0: Point2,
    pc: Point2,
    p1: Point2,
    aspect: f64,
}

impl CornerWedge {
    /// Creates a wedge with unit aspect.
    #[must_use]
    pub fn new(p0: Point2, pc: Point2, p1: Point2) -> Self {
        Self {
            p0,
            pc,
            p1,
            aspect: 1.0,
        }
    }

    /// Creates a wedge whose x-coordinates are pre-scaled by `aspect`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if `aspect` is not a
    /// finite positive number.
    pub fn with_aspect(p0: Point2, pc: Point2, p1: Point2, aspect: f64) -> Result<Self> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "aspect",
                value: aspect,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            }
            .into());
        }
        let scale = |p: Point2| Point2::new(p.x * aspect, p.y);
        Ok(Self {
            p0: scale(p0),
            pc: scale(pc),
            p1: scale(p1),
            aspect,
        })
    }

    /// End of the first edge, after aspect scaling.
    #[must_use]
    pub fn p0(&self) -> &Point2 {
        &self.p0
    }

    /// The shared corner of both edges.
    #[must_use]
    pub fn apex(&self) -> &Point2 {
        &self.pc
    }

    /// End of the second edge, after aspect scaling.
    #[must_use]
    pub fn p1(&self) -> &Point2 {
        &self.p1
    }

    /// Factor the x-coordinates were scaled by.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// The two edges, `p0–pc` and `p1–pc`. A collapsed edge is `None`.
    #[must_use]
    pub fn edges(&self) -> [Option<LineSegment>; 2] {
        [
            LineSegment::new(self.p0, self.pc).ok(),
            LineSegment::new(self.p1, self.pc).ok(),
        ]
    }

    /// Returns `true` if `point` is collinear with either edge.
    ///
    /// A collapsed edge only contains the point it collapsed to.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        [self.p0, self.p1]
            .iter()
            .zip(self.edges())
            .any(|(end, edge)| match edge {
                Some(edge) => edge.contains(point),
                None => (point - end).norm() <= TOLERANCE,
            })
    }

    /// Feet of the perpendiculars from `point` onto each non-collapsed edge.
    #[must_use]
    pub fn normal_intersections(&self, point: &Point2) -> Vec<Point2> {
        self.edges()
            .iter()
            .flatten()
            .map(|edge| edge.foot_of_perpendicular(point))
            .collect()
    }

    /// Displacements from `point` to each edge's line.
    #[must_use]
    pub fn distances_to(&self, point: &Point2) -> Vec<Vector2> {
        self.edges()
            .iter()
            .flatten()
            .map(|edge| edge.distance_vector(point))
            .collect()
    }

    /// Vector from the apex to its foot on the opposite side `p0–p1`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLengthSegment` if `p0` and `p1` coincide.
    pub fn height_vector(&self) -> Result<Vector2> {
        let base = LineSegment::new(self.p0, self.p1)?;
        Ok(base.foot_of_perpendicular(&self.pc) - self.pc)
    }
}
