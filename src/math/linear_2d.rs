use super::{Point2, TOLERANCE};

/// Implicit line `a·x + b·y = c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardForm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Cramer's-rule determinants of a pair of implicit lines.
///
/// `d` is the system determinant; the intersection is `(dx / d, dy / d)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Determinants {
    pub d: f64,
    pub dx: f64,
    pub dy: f64,
}

impl StandardForm {
    /// Creates a line from its coefficients.
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The line through `p0` and `p1`.
    #[must_use]
    pub fn through(p0: &Point2, p1: &Point2) -> Self {
        Self {
            a: p0.y - p1.y,
            b: p1.x - p0.x,
            c: -(p0.x * p1.y - p1.x * p0.y),
        }
    }

    /// The line through `point` perpendicular to this one.
    #[must_use]
    pub fn normal_through(&self, point: &Point2) -> Self {
        Self {
            a: -self.b,
            b: self.a,
            c: self.a * point.y - self.b * point.x,
        }
    }

    /// Determinants of the 2x2 system formed by `self` and `other`.
    #[must_use]
    pub fn determinants(&self, other: &Self) -> Determinants {
        Determinants {
            d: self.a * other.b - other.a * self.b,
            dx: self.c * other.b - other.c * self.b,
            dy: self.a * other.c - other.a * self.c,
        }
    }

    /// Returns `true` if the two lines have (nearly) the same direction.
    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        self.determinants(other).d.abs() <= TOLERANCE
    }

    /// Intersection point of two lines, or `None` if they are parallel or
    /// coincident.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Point2> {
        let det = self.determinants(other);
        if det.d.abs() <= TOLERANCE {
            return None;
        }
        Some(Point2::new(det.dx / det.d, det.dy / det.d))
    }

    /// Signed residual `a·x + b·y - c`.
    #[must_use]
    pub fn residual(&self, point: &Point2) -> f64 {
        self.a * point.x + self.b * point.y - self.c
    }

    /// Euclidean distance from `point` to the line.
    ///
    /// Returns `f64::INFINITY` when both `a` and `b` vanish.
    #[must_use]
    pub fn distance_to(&self, point: &Point2) -> f64 {
        let norm = self.a.hypot(self.b);
        if norm <= f64::EPSILON {
            return f64::INFINITY;
        }
        self.residual(point).abs() / norm
    }

    /// Returns `true` if `point` lies on the line within [`TOLERANCE`].
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.distance_to(point) <= TOLERANCE
    }
}
