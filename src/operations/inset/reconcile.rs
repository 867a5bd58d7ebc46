use tracing::debug;

use crate::geometry::{CornerWedge, Quad};
use crate::math::{Point2, Tolerance, Vector2};

/// Which pass of [`Reconcile`] produced the displacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Feet of the target corners on the reference corner wedges.
    Corners,
    /// Feet of the target corners on the reference edges, used when the
    /// corner pass accepts nothing (typically all edges parallel).
    Fallback,
}

/// Per-corner displacements computed by [`Reconcile::displacements`].
#[derive(Debug, Clone, PartialEq)]
pub struct Displacements {
    pub vectors: Vec<Vector2>,
    pub strategy: Strategy,
}

impl Displacements {
    /// Sum of all accepted displacements.
    #[must_use]
    pub fn total(&self) -> Vector2 {
        self.vectors.iter().sum()
    }
}

/// Offset that brings a target quad back in line with a reference quad.
///
/// This is a best-effort heuristic rather than a constraint solve: the
/// result is the sum of the accepted per-corner displacements, with the
/// x-component divided by the reference aspect.
///
/// The corner pass visits each corner `i` whose reference edge
/// `R[i-1] → R[i]` is not parallel to the target edge `T[i-1] → T[i]`,
/// drops perpendiculars from `T[i]` onto both edges of the reference wedge
/// `(R[i-1], R[i], R[i+1])`, and keeps every foot that lies inside the target.
/// If that accepts nothing, the fallback pass drops a perpendicular from
/// `T[i+1]` onto each reference edge `R[i] → R[i+1]` instead.
pub struct Reconcile {
    reference: Quad,
    target: Quad,
    tolerance: Tolerance,
}

impl Reconcile {
    /// Creates a new `Reconcile` operation.
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

    /// Computes the individual displacements and the strategy that found them.
    #[must_use]
    pub fn displacements(&self) -> Displacements {
        let corners = self.corner_pass();
        let result = if corners.is_empty() {
            Displacements {
                vectors: self.fallback_pass(),
                strategy: Strategy::Fallback,
            }
        } else {
            Displacements {
                vectors: corners,
                strategy: Strategy::Corners,
            }
        };
        debug!(
            strategy = ?result.strategy,
            count = result.vectors.len(),
            "reconciled quads"
        );
        result
    }

    /// Executes the operation, returning the aggregate offset.
    #[must_use]
    pub fn execute(&self) -> Vector2 {
        let mut offset = self.displacements().total();
        offset.x /= self.reference.aspect();
        offset
    }

    fn corner_pass(&self) -> Vec<Vector2> {
        let (r, t) = (&self.reference, &self.target);
        let mut vectors = Vec::new();
        for i in 0..4 {
            let (Ok(reference_edge), Ok(target_edge)) = (r.edge(i - 1), t.edge(i - 1)) else {
                continue;
            };
            if reference_edge.is_parallel(&target_edge) {
                continue;
            }
            let base = t.corner(i);
            let wedge = CornerWedge::new(r.corner(i - 1), r.corner(i), r.corner(i + 1));
            vectors.extend(
                wedge
                    .normal_intersections(&base)
                    .into_iter()
                    .filter(|foot| self.inside_target(foot))
                    .map(|foot| foot - base),
            );
        }
        vectors
    }

    fn fallback_pass(&self) -> Vec<Vector2> {
        (0..4)
            .filter_map(|i| {
                let edge = self.reference.edge(i).ok()?;
                let corner = self.target.corner(i + 1);
                let foot = edge.foot_of_perpendicular(&corner);
                self.inside_target(&foot).then_some(foot - corner)
            })
            .collect()
    }

    fn inside_target(&self, point: &Point2) -> bool {
        self.target.contains_with(point, &self.tolerance)
    }
}
