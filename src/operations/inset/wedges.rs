use tracing::trace;

use crate::geometry::{CornerWedge, LineSegment, Quad};
use crate::math::{Point2, Tolerance};

/// Finds the corner wedges of a reference quad cut off by a target quad.
///
/// For every corner the reference's two corner lines are intersected with
/// each of the target's two baselines through the matching corner. A
/// baseline yields a wedge `(x1, apex, x2)` when both of its intersection
/// points fall inside the reference quad. Parallel pairs have no
/// intersection and yield nothing.
pub struct InsetWedges {
    reference: Quad,
    target: Quad,
    tolerance: Tolerance,
}

impl InsetWedges {
    /// Creates a new `InsetWedges` query.
    #[must_use]
    pub fn new(reference: Quad, target: Quad) -> Self {
        Self {
            reference,
            target,
            tolerance: Tolerance::default(),
        }
    }

    /// Sets the tolerance used for containment checks.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> Vec<CornerWedge> {
        let mut wedges = Vec::new();
        for i in 0..4 {
            let apex = self.reference.corner(i);
            let corner_lines = [
                LineSegment::new(apex, self.reference.corner(i - 1)).ok(),
                LineSegment::new(apex, self.reference.corner(i + 1)).ok(),
            ];
            let pc = self.target.corner(i);
            let baselines = [
                LineSegment::new(pc, self.target.corner(i - 1)).ok(),
                LineSegment::new(pc, self.target.corner(i + 1)).ok(),
            ];

            for baseline in baselines.iter().flatten() {
                let crossings = corner_lines.map(|line| self.crossing(line?, baseline));
                if let [Some(x1), Some(x2)] = crossings {
                    wedges.push(CornerWedge::new(x1, apex, x2));
                }
            }
        }
        trace!(count = wedges.len(), "inset wedges");
        wedges
    }

    /// Intersection of `line` with `baseline`, if it lies inside the reference.
    fn crossing(&self, line: LineSegment, baseline: &LineSegment) -> Option<Point2> {
        let point = line.intersection(baseline).ok()?;
        self.reference
            .contains_with(&point, &self.tolerance)
            .then_some(point)
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

    fn diamond() -> Quad {
        Quad::new(p(-1.0, 0.0), p(0.0, 1.0), p(1.0, 0.0), p(0.0, -1.0))
    }

    #[test]
    fn identical_quads_have_no_wedges() {
        let q = Quad::default();
        assert!(InsetWedges::new(q, q).execute().is_empty());
    }

    #[test]
    fn inscribed_diamond_cuts_every_corner() {
        let wedges = InsetWedges::new(Quad::default(), diamond()).execute();
        assert_eq!(wedges.len(), 4);

        let first = &wedges[0];
        assert_relative_eq!(*first.apex(), p(-1.0, -1.0));
        assert_relative_eq!(*first.p0(), p(0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(*first.p1(), p(-1.0, 0.0), epsilon = 1e-12);

        let second = &wedges[1];
        assert_relative_eq!(*second.apex(), p(-1.0, 1.0));
        assert_relative_eq!(*second.p0(), p(-1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(*second.p1(), p(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn wedges_touch_the_target_edges() {
        let target = diamond();
        for w in InsetWedges::new(Quad::default(), target).execute() {
            assert!(target.contains(w.p0()));
            assert!(target.contains(w.p1()));
            assert!(!target.contains(w.apex()));
        }
    }

    #[test]
    fn strict_tolerance_drops_boundary_crossings() {
        let strict = Tolerance::new(0.0, 1.0).unwrap();
        let wedges = InsetWedges::new(Quad::default(), diamond())
            .with_tolerance(strict)
            .execute();
        assert!(wedges.len() < 4);
    }
}
