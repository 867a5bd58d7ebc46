use std::f64::consts::SQRT_2;

use nalgebra::{SMatrix, SVector};
use tracing::{trace, warn};

use crate::error::{Result, SolverStatus};
use crate::geometry::quad::CORNERS;
use crate::geometry::Quad;
use crate::math::homogeneous::{normalize_homography, reciprocal_condition};
use crate::math::{Matrix3, Point2, Vector2, TOLERANCE};

type Matrix8 = SMatrix<f64, 8, 8>;
type Vector8 = SVector<f64, 8>;

/// Systems whose reciprocal condition number falls below this are rejected.
const SYSTEM_RCOND_MIN: f64 = 1e-12;

/// Homographies whose reciprocal condition number falls below this are
/// treated as rank deficient.
const HOMOGRAPHY_RCOND_MIN: f64 = 1e-10;

/// Homography from four point correspondences via the direct linear transform.
///
/// Unlike [`QuadToQuad`](super::QuadToQuad), the correspondences need not
/// follow a quad's corner order. Each pair `source[i] → destination[i]`
/// contributes two rows of an 8×8 system in the unknowns `h0..h7`, with the
/// bottom-right entry fixed at one:
///
/// ```text
/// [x, y, 1, 0, 0, 0, -u·x, -u·y] · h = u
/// [0, 0, 0, x, y, 1, -v·x, -v·y] · h = v
/// ```
///
/// Both point sets are normalized (centroid at the origin, mean distance √2)
/// before the solve, and the result is mapped back afterwards.
pub struct SolveHomography {
    source: [Point2; CORNERS],
    destination: [Point2; CORNERS],
}

impl SolveHomography {
    /// Creates a new `SolveHomography` operation.
    #[must_use]
    pub fn new(source: [Point2; CORNERS], destination: [Point2; CORNERS]) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Correspondences between the corners of two quads.
    #[must_use]
    pub fn from_quads(source: &Quad, destination: &Quad) -> Self {
        Self::new(*source.corners(), *destination.corners())
    }

    /// Executes the operation.
    ///
    /// The result maps column vectors `(x, y, 1)` and is scaled so its
    /// bottom-right entry is one.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::Failure` if the points of either set coincide,
    /// if the linear system is singular or ill-conditioned (e.g. three
    /// collinear points), or if the solution is not a usable homography.
    pub fn execute(&self) -> Result<Matrix3> {
        self.solve().inspect_err(|err| {
            warn!(
                source = ?self.source,
                destination = ?self.destination,
                %err,
                "homography solve failed"
            );
        })
    }

    fn solve(&self) -> Result<Matrix3> {
        let (src_t, src) = normalize_points(&self.source).ok_or(SolverStatus::Singular)?;
        let (dst_t, dst) = normalize_points(&self.destination).ok_or(SolverStatus::Singular)?;

        let (a, b) = build_system(&src, &dst);
        let sv = a.singular_values();
        let rcond = if sv.max() > 0.0 { sv.min() / sv.max() } else { 0.0 };
        trace!(rcond, "dlt system conditioning");
        if rcond < SYSTEM_RCOND_MIN {
            return Err(SolverStatus::IllConditioned { rcond }.into());
        }

        let h = a.lu().solve(&b).ok_or(SolverStatus::Singular)?;
        if h.iter().any(|v| !v.is_finite()) {
            return Err(SolverStatus::NonFinite.into());
        }

        #[rustfmt::skip]
        let normalized = Matrix3::new(
            h[0], h[1], h[2],
            h[3], h[4], h[5],
            h[6], h[7], 1.0,
        );
        let dst_t_inv = dst_t.try_inverse().ok_or(SolverStatus::Singular)?;
        let denormalized = dst_t_inv * normalized * src_t;

        let result = normalize_homography(&denormalized)
            .ok_or(SolverStatus::DegenerateSolution { rcond: 0.0 })?;
        if result.iter().any(|v| !v.is_finite()) {
            return Err(SolverStatus::NonFinite.into());
        }
        let rcond = reciprocal_condition(&result);
        if rcond < HOMOGRAPHY_RCOND_MIN {
            return Err(SolverStatus::DegenerateSolution { rcond }.into());
        }
        Ok(result)
    }
}

/// Similarity moving the centroid to the origin with mean distance √2,
/// along with the transformed points. `None` if all points coincide.
fn normalize_points(points: &[Point2; CORNERS]) -> Option<(Matrix3, [Point2; CORNERS])> {
    let centroid = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords)
        / 4.0;
    let mean = points
        .iter()
        .map(|p| (p.coords - centroid).norm())
        .sum::<f64>()
        / 4.0;
    if mean <= TOLERANCE {
        return None;
    }
    let s = SQRT_2 / mean;
    #[rustfmt::skip]
    let t = Matrix3::new(
        s,   0.0, -s * centroid.x,
        0.0, s,   -s * centroid.y,
        0.0, 0.0, 1.0,
    );
    let normalized = points.map(|p| Point2::from((p.coords - centroid) * s));
    Some((t, normalized))
}

fn build_system(src: &[Point2; CORNERS], dst: &[Point2; CORNERS]) -> (Matrix8, Vector8) {
    let mut a = Matrix8::zeros();
    let mut b = Vector8::zeros();
    for (i, (s, d)) in src.iter().zip(dst).enumerate() {
        let (x, y, u, v) = (s.x, s.y, d.x, d.y);
        let r = 2 * i;
        let rows = [
            [x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y],
            [0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y],
        ];
        for (k, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                a[(r + k, c)] = *value;
            }
        }
        b[r] = u;
        b[r + 1] = v;
    }
    (a, b)
}
