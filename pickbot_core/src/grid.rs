//! Slot → controller-frame coordinate resolution.
//!
//! Slots are 1-based along a linear bin row: slot 1 sits at the origin row
//! and each subsequent slot advances by one pitch increment along X, scaled
//! by the axis sign so a mirrored cell keeps its slot numbering. No rounding
//! happens here; formatting precision belongs to the script compiler.

use crate::calibration::Calibration;
use crate::error::{DispatchError, Result};

/// A discrete, 1-based pick-location index along the bin row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId {
    /// Fail fast on any value below 1; silent clamping would pick the wrong bin.
    pub fn new(raw: i64) -> Result<Self> {
        if raw < 1 {
            return Err(DispatchError::invalid_input(format!(
                "slot id must be >= 1, got {raw}"
            )));
        }
        u32::try_from(raw)
            .map(SlotId)
            .map_err(|_| DispatchError::invalid_input(format!("slot id out of range: {raw}")))
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A planar position in the controller's frame. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// Compute the pick position for a slot:
/// `x = (slot - 1) * pitch * sign_x + fine_x`, `y = row_offset * sign_y + fine_y`.
pub fn resolve_pick_coordinate(slot: SlotId, cal: &Calibration) -> Coordinate {
    let steps = f64::from(slot.get() - 1);
    Coordinate {
        x: steps * cal.pitch_m * f64::from(cal.sign_x) + cal.fine_offset_x_m(),
        y: cal.row_offset_m * f64::from(cal.sign_y) + cal.fine_offset_y_m(),
    }
}

/// Compute the fixed shipment-box position with the same sign flips and
/// fine offsets as the pick side.
pub fn resolve_shipment_coordinate(cal: &Calibration) -> Coordinate {
    Coordinate {
        x: cal.shipment_x_m * f64::from(cal.sign_x) + cal.fine_offset_x_m(),
        y: cal.shipment_y_m * f64::from(cal.sign_y) + cal.fine_offset_y_m(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;

    #[test]
    fn slot_below_one_is_invalid_input() {
        for raw in [0_i64, -1, i64::MIN] {
            match SlotId::new(raw) {
                Err(DispatchError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn slot_one_sits_on_the_origin_row() {
        let cal = Calibration::default();
        let c = resolve_pick_coordinate(SlotId::new(1).unwrap(), &cal);
        assert_eq!(c.x, 0.0);
        assert_eq!(c.y, cal.row_offset_m);
    }

    #[test]
    fn worked_example_from_the_cell_defaults() {
        // pitch=0.10, row=0.10, signs +1, offsets 0 -> slot 2 = (0.100, 0.100)
        let cal = Calibration::default();
        let pick = resolve_pick_coordinate(SlotId::new(2).unwrap(), &cal);
        assert!((pick.x - 0.100).abs() < 1e-12);
        assert!((pick.y - 0.100).abs() < 1e-12);
        let ship = resolve_shipment_coordinate(&cal);
        assert!((ship.x - 0.300).abs() < 1e-12);
        assert!((ship.y - 0.300).abs() < 1e-12);
    }

    #[test]
    fn fine_offsets_are_millimeters() {
        let cal = Calibration {
            fine_offset_x_mm: 2.5,
            fine_offset_y_mm: -1.0,
            ..Calibration::default()
        };
        let c = resolve_pick_coordinate(SlotId::new(1).unwrap(), &cal);
        assert!((c.x - 0.0025).abs() < 1e-12);
        assert!((c.y - (0.10 - 0.001)).abs() < 1e-12);
    }
}
