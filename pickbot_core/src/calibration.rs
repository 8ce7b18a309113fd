//! Immutable calibration snapshot used for a single dispatch.
//!
//! A `Calibration` is taken from the operator configuration at the moment a
//! dispatch begins and is never mutated afterwards. Sharing a mutable
//! configuration object across dispatch contexts invites torn reads; a `Copy`
//! snapshot makes mid-dispatch reconfiguration structurally impossible.

use crate::error::{DispatchError, Result};

/// Physical constants translating logical slots into controller-frame
/// coordinates, plus the dynamics embedded into every generated program.
///
/// All lengths in meters except the fine offsets, which are millimeters and
/// converted by the resolver.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    /// Spacing between consecutive slots along X.
    pub pitch_m: f64,
    /// Y of the bin row.
    pub row_offset_m: f64,
    /// Shipment box drop-off position.
    pub shipment_x_m: f64,
    pub shipment_y_m: f64,
    /// Hover altitude for travel moves. Must exceed `touch_height_m`.
    pub safe_height_m: f64,
    /// Contact altitude for the touch action.
    pub touch_height_m: f64,
    pub acceleration: f64,
    pub velocity: f64,
    pub blend_radius_m: f64,
    /// Exactly 1 or -1; flips the axis without renumbering slots.
    pub sign_x: i32,
    pub sign_y: i32,
    /// Fine nudge in millimeters.
    pub fine_offset_x_mm: f64,
    pub fine_offset_y_mm: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            pitch_m: 0.10,
            row_offset_m: 0.10,
            shipment_x_m: 0.30,
            shipment_y_m: 0.30,
            safe_height_m: 0.070,
            touch_height_m: 0.015,
            acceleration: 1.0,
            velocity: 0.20,
            blend_radius_m: 0.002,
            sign_x: 1,
            sign_y: 1,
            fine_offset_x_mm: 0.0,
            fine_offset_y_mm: 0.0,
        }
    }
}

impl Calibration {
    /// Fine X offset converted to meters.
    #[inline]
    pub fn fine_offset_x_m(&self) -> f64 {
        self.fine_offset_x_mm / 1000.0
    }

    /// Fine Y offset converted to meters.
    #[inline]
    pub fn fine_offset_y_m(&self) -> f64 {
        self.fine_offset_y_mm / 1000.0
    }

    /// Reject snapshots the compiler must not see: non-finite fields, signs
    /// other than ±1, or inverted heights. Fails before any text is produced.
    pub fn validate(&self) -> Result<()> {
        let finite_fields = [
            ("pitch_m", self.pitch_m),
            ("row_offset_m", self.row_offset_m),
            ("shipment_x_m", self.shipment_x_m),
            ("shipment_y_m", self.shipment_y_m),
            ("safe_height_m", self.safe_height_m),
            ("touch_height_m", self.touch_height_m),
            ("acceleration", self.acceleration),
            ("velocity", self.velocity),
            ("blend_radius_m", self.blend_radius_m),
            ("fine_offset_x_mm", self.fine_offset_x_mm),
            ("fine_offset_y_mm", self.fine_offset_y_mm),
        ];
        for (name, v) in finite_fields {
            if !v.is_finite() {
                return Err(DispatchError::invalid_configuration(format!(
                    "{name} is not finite: {v}"
                )));
            }
        }
        if self.sign_x != 1 && self.sign_x != -1 {
            return Err(DispatchError::invalid_configuration(format!(
                "sign_x must be exactly 1 or -1, got {}",
                self.sign_x
            )));
        }
        if self.sign_y != 1 && self.sign_y != -1 {
            return Err(DispatchError::invalid_configuration(format!(
                "sign_y must be exactly 1 or -1, got {}",
                self.sign_y
            )));
        }
        if self.touch_height_m < 0.0 {
            return Err(DispatchError::invalid_configuration(format!(
                "touch_height_m must be >= 0, got {}",
                self.touch_height_m
            )));
        }
        if self.safe_height_m <= self.touch_height_m {
            return Err(DispatchError::invalid_configuration(format!(
                "safe_height_m ({}) must be > touch_height_m ({})",
                self.safe_height_m, self.touch_height_m
            )));
        }
        if self.blend_radius_m < 0.0 {
            return Err(DispatchError::invalid_configuration(format!(
                "blend_radius_m must be >= 0, got {}",
                self.blend_radius_m
            )));
        }
        Ok(())
    }
}
