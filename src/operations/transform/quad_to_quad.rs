use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::Quad;
use crate::math::homogeneous::embed_homography;
use crate::math::{Matrix3, Matrix4};

/// Projective transform taking one quad's corners onto another's.
///
/// Composes the destination basis with the inverse source basis, so no
/// general linear solve is needed. Corners correspond by position: the
/// source's left-bottom maps to the destination's left-bottom, and so on.
pub struct QuadToQuad {
    source: Quad,
    destination: Quad,
}

impl QuadToQuad {
    /// Creates a new `QuadToQuad` operation.
    #[must_use]
    pub fn new(source: Quad, destination: Quad) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Computes the 3x3 homography `basis(destination) · basis(source)⁻¹`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SingularMatrix` if either basis is singular.
    pub fn homography(&self) -> Result<Matrix3> {
        let src = self.source.basis()?;
        let dst = self.destination.basis()?;
        if self.source.has_singular_basis() {
            debug!(source = ?self.source, "source basis is singular");
            return Err(GeometryError::SingularMatrix("source basis").into());
        }
        if self.destination.has_singular_basis() {
            debug!(destination = ?self.destination, "destination basis is singular");
            return Err(GeometryError::SingularMatrix("destination basis").into());
        }
        let src_inv = src
            .try_inverse()
            .ok_or(GeometryError::SingularMatrix("source basis"))?;
        Ok(dst * src_inv)
    }

    /// Executes the operation, returning the homography embedded in a
    /// z-preserving 4x4 matrix ready for a rendering pipeline.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SingularMatrix` if either basis is singular.
    pub fn execute(&self) -> Result<Matrix4> {
        let t = self.homography()?;
        Ok(embed_homography(&t))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::QuadwarpError;
    use crate::math::homogeneous::project;
    use crate::math::Point2;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn trapezoid() -> Quad {
        Quad::new(p(-0.8, -1.0), p(-0.5, 0.9), p(0.6, 1.1), p(1.0, -0.9))
    }

    #[test]
    fn same_quad_gives_identity() {
        for q in [Quad::default(), trapezoid()] {
            let m = QuadToQuad::new(q, q).execute().unwrap();
            assert_relative_eq!(m, Matrix4::identity(), epsilon = 1e-9);
        }
    }

    #[test]
    fn maps_corners_onto_destination() {
        let src = Quad::default();
        let dst = trapezoid();
        let h = QuadToQuad::new(src, dst).homography().unwrap();
        for (s, d) in src.corners().iter().zip(dst.corners()) {
            let mapped = project(&h, s).unwrap();
            assert_relative_eq!(mapped, *d, epsilon = 1e-9);
        }
    }

    #[test]
    fn rendering_matrix_maps_corners_and_keeps_z() {
        let src = trapezoid();
        let dst = Quad::default();
        let m = src.transform_to(&dst).unwrap();
        for (s, d) in src.corners().iter().zip(dst.corners()) {
            let v = m * Vector4::new(s.x, s.y, 0.25, 1.0);
            assert_relative_eq!(v.x / v.w, d.x, epsilon = 1e-9);
            assert_relative_eq!(v.y / v.w, d.y, epsilon = 1e-9);
            assert_relative_eq!(v.z, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn translation_is_affine() {
        let src = Quad::default();
        let mut dst = src;
        for i in 0..4 {
            let c = dst.corner(i);
            dst.set_corner(i, p(c.x + 0.5, c.y - 0.25));
        }
        let h = QuadToQuad::new(src, dst).homography().unwrap();
        let h = h / h[(2, 2)];
        assert_relative_eq!(h[(0, 2)], 0.5, epsilon = 1e-12);
        assert_relative_eq!(h[(1, 2)], -0.25, epsilon = 1e-12);
        assert_relative_eq!(h[(2, 0)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(h[(2, 1)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_source_is_an_error() {
        let collapsed = Quad::new(p(0.0, 0.0), p(0.0, 1.0), p(0.0, 0.5), p(1.0, 0.0));
        let err = QuadToQuad::new(collapsed, Quad::default()).execute().unwrap_err();
        assert!(matches!(
            err,
            QuadwarpError::Geometry(GeometryError::SingularMatrix(_))
        ));
    }

    #[test]
    fn tiny_quad_maps_onto_itself() {
        let s = 5e-4;
        let q = Quad::new(p(0.0, 0.0), p(0.0, s), p(s, s), p(s, 0.0));
        let m = QuadToQuad::new(q, q).execute().unwrap();
        assert_relative_eq!(m, Matrix4::identity(), epsilon = 1e-9);

        let big = Quad::new(p(0.5, 0.5), p(0.5, 0.5 + s), p(0.5 + s, 0.5 + s), p(0.5 + s, 0.5));
        let h = QuadToQuad::new(q, big).homography().unwrap();
        for (src, dst) in q.corners().iter().zip(big.corners()) {
            assert_relative_eq!(project(&h, src).unwrap(), *dst, epsilon = 1e-9);
        }
    }

    #[test]
    fn degenerate_destination_is_an_error() {
        let collapsed = Quad::new(p(0.0, 0.0), p(0.0, 1.0), p(0.0, 0.5), p(1.0, 0.0));
        let err = QuadToQuad::new(Quad::default(), collapsed).execute().unwrap_err();
        assert!(matches!(
            err,
            QuadwarpError::Geometry(GeometryError::SingularMatrix("destination basis"))
        ));
    }

    #[test]
    fn collinear_basis_corners_are_an_error() {
        let flat = Quad::new(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(2.0, 0.0));
        assert!(QuadToQuad::new(Quad::default(), flat).execute().is_err());
    }
}
