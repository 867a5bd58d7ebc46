use super::Quad;
use crate::error::Result;
use crate::math::Point2;

/// A normalized rectangle inside the unit square.
///
/// `(x, y)` is the top-left corner with y growing downwards, matching image
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Creates a new rectangle; no clamping is applied.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamps the origin into `[0, 1]` and shrinks the size so the rectangle
    /// stays inside the unit square.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let x = clamp_unit(self.x, 1.0);
        let y = clamp_unit(self.y, 1.0);
        Self {
            x,
            y,
            width: clamp_unit(self.width, 1.0 - x),
            height: clamp_unit(self.height, 1.0 - y),
        }
    }
}

/// Clamps into `[0, max]`, mapping NaN to zero.
fn clamp_unit(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

impl Default for CropRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Crop expressed as normalized insets from each side of the image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRegion {
    pub top: f64,
    pub right: f64,
    pub left: f64,
    pub bottom: f64,
}

impl CropRegion {
    #[must_use]
    pub fn new(top: f64, right: f64, left: f64, bottom: f64) -> Self {
        Self {
            top,
            right,
            left,
            bottom,
        }
    }

    /// Insets equivalent to `rect` after clamping it to the unit square.
    #[must_use]
    pub fn from_rect(rect: &CropRect) -> Self {
        let r = rect.clamped();
        Self {
            top: r.y,
            right: 1.0 - (r.width + r.x),
            left: r.x,
            bottom: 1.0 - (r.height + r.y),
        }
    }

    /// The rectangle left after removing the insets.
    #[must_use]
    pub fn to_rect(&self) -> CropRect {
        CropRect::new(
            self.left,
            self.top,
            1.0 - (self.right + self.left),
            1.0 - (self.bottom + self.top),
        )
        .clamped()
    }

    /// Reference quad of the cropped plate in clip space.
    ///
    /// The full image spans `[-aspect, aspect] × [-1, 1]`; each inset removes
    /// its share of that span.
    ///
    /// # Errors
    ///
    /// Returns an error if `aspect` is not a finite positive number.
    pub fn to_quad(&self, aspect: f64) -> Result<Quad> {
        let r = self.to_rect();
        let left = 2.0 * r.x - 1.0;
        let right = 2.0 * (r.x + r.width) - 1.0;
        let top = 1.0 - 2.0 * r.y;
        let bottom = 1.0 - 2.0 * (r.y + r.height);
        Quad::new(
            Point2::new(left, bottom),
            Point2::new(left, top),
            Point2::new(right, top),
            Point2::new(right, bottom),
        )
        .with_aspect(aspect)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clamping_keeps_rect_inside_unit_square() {
        let r = CropRect::new(-0.2, 0.5, 1.5, 0.8).clamped();
        assert_relative_eq!(r.x, 0.0);
        assert_relative_eq!(r.y, 0.5);
        assert_relative_eq!(r.width, 1.0);
        assert_relative_eq!(r.height, 0.5);
    }

    #[test]
    fn clamping_maps_nan_to_zero() {
        let r = CropRect::new(f64::NAN, 0.0, 1.0, f64::NAN).clamped();
        assert_relative_eq!(r.x, 0.0);
        assert_relative_eq!(r.width, 1.0);
        assert_relative_eq!(r.height, 0.0);
    }

    #[test]
    fn region_and_rect_convert_both_ways() {
        let rect = CropRect::new(0.1, 0.2, 0.5, 0.6);
        let region = CropRegion::from_rect(&rect);
        assert_relative_eq!(region.top, 0.2);
        assert_relative_eq!(region.left, 0.1);
        assert_relative_eq!(region.right, 0.4, epsilon = 1e-12);
        assert_relative_eq!(region.bottom, 0.2, epsilon = 1e-12);

        let back = region.to_rect();
        assert_relative_eq!(back.x, 0.1);
        assert_relative_eq!(back.y, 0.2);
        assert_relative_eq!(back.width, 0.5, epsilon = 1e-12);
        assert_relative_eq!(back.height, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn empty_region_is_the_unit_quad() {
        let q = CropRegion::default().to_quad(1.0).unwrap();
        assert_eq!(q, Quad::default());
    }

    #[test]
    fn region_quad_respects_insets_and_aspect() {
        let q = CropRegion::new(0.25, 0.0, 0.5, 0.0).to_quad(2.0).unwrap();
        // x in [0, 1] before the aspect scale, y in [-1, 0.5].
        assert_relative_eq!(*q.left_bottom(), Point2::new(0.0, -1.0));
        assert_relative_eq!(*q.left_top(), Point2::new(0.0, 0.5));
        assert_relative_eq!(*q.right_top(), Point2::new(2.0, 0.5));
        assert_relative_eq!(*q.right_bottom(), Point2::new(2.0, -1.0));
        assert_relative_eq!(q.aspect(), 2.0);
    }

    #[test]
    fn invalid_aspect_is_rejected() {
        assert!(CropRegion::default().to_quad(0.0).is_err());
    }
}
