use super::{CROSSING_NUDGE, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Parameters controlling containment and degeneracy checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Absolute slack for coordinate comparisons.
    pub linear: f64,
    /// Factor by which quad corners are pushed away from their centroid
    /// before a crossing-number test. `1.0` disables the nudge.
    pub nudge: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: TOLERANCE,
            nudge: CROSSING_NUDGE,
        }
    }
}

impl Tolerance {
    /// Creates a validated set of tolerances.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if `linear` is negative or
    /// not finite, or if `nudge` is outside `[1, 2]`.
    pub fn new(linear: f64, nudge: f64) -> Result<Self> {
        if !linear.is_finite() || linear < 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "linear",
                value: linear,
                min: 0.0,
                max: f64::MAX,
            }
            .into());
        }
        if !(1.0..=2.0).contains(&nudge) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "nudge",
                value: nudge,
                min: 1.0,
                max: 2.0,
            }
            .into());
        }
        Ok(Self { linear, nudge })
    }
}
