#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Operator-facing configuration for the pick-and-ship dispatcher.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Section defaults match the shipped controller cell, so an empty TOML
//!   file is a usable starting point for bring-up.
//! - The dispatch core never reads this directly; it takes an immutable
//!   `Calibration` snapshot at the moment a dispatch begins.
use serde::Deserialize;

/// Controller network settings. Ports are protocol constants owned by the
/// network crate; only the host and socket timeouts are operator-facing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Controller {
    /// IPv4 address of the arm controller.
    pub host: String,
    /// Max time to wait for a TCP connect on either channel (ms).
    pub connect_timeout_ms: u64,
    /// Max time to wait for a blocked write on either channel (ms).
    pub write_timeout_ms: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            connect_timeout_ms: 2000,
            write_timeout_ms: 2000,
        }
    }
}

/// Bin-row geometry translating 1-based slots into controller-frame XY.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Grid {
    /// Spacing between consecutive slots along X (m). Slot 1 sits at the origin row.
    pub pitch_m: f64,
    /// Y of the bin row (m).
    pub row_offset_m: f64,
    /// Axis sign, exactly 1 or -1. Flip to mirror the cell without renumbering slots.
    pub sign_x: i32,
    pub sign_y: i32,
    /// Fine nudge applied to every computed X/Y (mm).
    pub fine_offset_x_mm: f64,
    pub fine_offset_y_mm: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            pitch_m: 0.10,
            row_offset_m: 0.10,
            sign_x: 1,
            sign_y: 1,
            fine_offset_x_mm: 0.0,
            fine_offset_y_mm: 0.0,
        }
    }
}

/// Fixed drop-off position of the shipment box (m, controller frame).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Shipment {
    pub x_m: f64,
    pub y_m: f64,
}

impl Default for Shipment {
    fn default() -> Self {
        Self { x_m: 0.30, y_m: 0.30 }
    }
}

/// Hover and contact altitudes used during pick/place motions.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Heights {
    /// Travel altitude above the workpieces (m). Must exceed `touch_m`.
    pub safe_m: f64,
    /// Contact altitude for the gripper/sensor touch (m).
    pub touch_m: f64,
}

impl Default for Heights {
    fn default() -> Self {
        Self {
            safe_m: 0.070,
            touch_m: 0.015,
        }
    }
}

/// Motion dynamics embedded into every generated program.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub acceleration: f64,
    pub velocity: f64,
    /// Path-smoothing tolerance for consecutive linear moves (m).
    pub blend_radius_m: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            acceleration: 1.0,
            velocity: 0.20,
            blend_radius_m: 0.002,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub controller: Controller,
    pub grid: Grid,
    pub shipment: Shipment,
    pub heights: Heights,
    pub motion: Motion,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

fn require_finite(name: &str, v: f64) -> eyre::Result<()> {
    if !v.is_finite() {
        eyre::bail!("{name} must be finite, got {v}");
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Controller
        if self.controller.host.trim().is_empty() {
            eyre::bail!("controller.host must not be empty");
        }
        if self.controller.connect_timeout_ms == 0 {
            eyre::bail!("controller.connect_timeout_ms must be >= 1");
        }
        if self.controller.write_timeout_ms == 0 {
            eyre::bail!("controller.write_timeout_ms must be >= 1");
        }

        // Grid
        require_finite("grid.pitch_m", self.grid.pitch_m)?;
        require_finite("grid.row_offset_m", self.grid.row_offset_m)?;
        require_finite("grid.fine_offset_x_mm", self.grid.fine_offset_x_mm)?;
        require_finite("grid.fine_offset_y_mm", self.grid.fine_offset_y_mm)?;
        if self.grid.pitch_m <= 0.0 {
            eyre::bail!("grid.pitch_m must be > 0");
        }
        if self.grid.sign_x != 1 && self.grid.sign_x != -1 {
            eyre::bail!("grid.sign_x must be exactly 1 or -1");
        }
        if self.grid.sign_y != 1 && self.grid.sign_y != -1 {
            eyre::bail!("grid.sign_y must be exactly 1 or -1");
        }

        // Shipment
        require_finite("shipment.x_m", self.shipment.x_m)?;
        require_finite("shipment.y_m", self.shipment.y_m)?;

        // Heights
        require_finite("heights.safe_m", self.heights.safe_m)?;
        require_finite("heights.touch_m", self.heights.touch_m)?;
        if self.heights.touch_m < 0.0 {
            eyre::bail!("heights.touch_m must be >= 0");
        }
        if self.heights.safe_m <= self.heights.touch_m {
            eyre::bail!("heights.safe_m must be > heights.touch_m");
        }

        // Motion
        require_finite("motion.acceleration", self.motion.acceleration)?;
        require_finite("motion.velocity", self.motion.velocity)?;
        require_finite("motion.blend_radius_m", self.motion.blend_radius_m)?;
        if self.motion.acceleration <= 0.0 {
            eyre::bail!("motion.acceleration must be > 0");
        }
        if self.motion.velocity <= 0.0 {
            eyre::bail!("motion.velocity must be > 0");
        }
        if self.motion.blend_radius_m < 0.0 {
            eyre::bail!("motion.blend_radius_m must be >= 0");
        }

        Ok(())
    }
}
