//! Mapping from the TOML-deserialized operator config to the runtime
//! calibration snapshot.

use crate::calibration::Calibration;

impl From<&pickbot_config::Config> for Calibration {
    fn from(cfg: &pickbot_config::Config) -> Self {
        Calibration {
            pitch_m: cfg.grid.pitch_m,
            row_offset_m: cfg.grid.row_offset_m,
            shipment_x_m: cfg.shipment.x_m,
            shipment_y_m: cfg.shipment.y_m,
            safe_height_m: cfg.heights.safe_m,
            touch_height_m: cfg.heights.touch_m,
            acceleration: cfg.motion.acceleration,
            velocity: cfg.motion.velocity,
            blend_radius_m: cfg.motion.blend_radius_m,
            sign_x: cfg.grid.sign_x,
            sign_y: cfg.grid.sign_y,
            fine_offset_x_mm: cfg.grid.fine_offset_x_mm,
            fine_offset_y_mm: cfg.grid.fine_offset_y_mm,
        }
    }
}
