//! Motion-program generation.
//!
//! The program is rendered from one explicit template plus a typed parameter
//! set, so the numeric-formatting rules live in exactly two helpers instead
//! of being scattered across interpolation sites. All motion coordinates are
//! relative offsets from the tool pose captured at program start, which lets
//! the same program run regardless of where the tool currently sits.

use crate::calibration::Calibration;
use crate::error::{DispatchError, Result};
use crate::grid::Coordinate;

/// The generated textual script. Opaque and immutable once produced; always
/// ends with exactly one trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionProgram(String);

impl MotionProgram {
    fn new(text: String) -> Self {
        let mut text = text;
        // Exactly one trailing newline: append if missing, never duplicate.
        while text.ends_with('\n') {
            text.pop();
        }
        text.push('\n');
        MotionProgram(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_text(self) -> String {
        self.0
    }
}

/// Format a coordinate or diagnostic literal: exactly three decimals with an
/// invariant decimal point. The interpreter parses literals with a fixed
/// grammar and operators grep controller-side logs for these exact strings.
pub fn fmt_coord(v: f64) -> String {
    format!("{v:.3}")
}

/// Format a dynamics constant: up to three decimals, trailing zeros trimmed
/// (`1.0` renders `1`, `0.20` renders `0.2`, `0.002` stays `0.002`).
pub fn fmt_dynamic(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Typed parameter set for the program template. Construction validates the
/// calibration, so rendering cannot observe non-finite values.
#[derive(Debug, Clone, Copy)]
pub struct ScriptParams {
    pick: Coordinate,
    ship: Coordinate,
    acceleration: f64,
    velocity: f64,
    blend_radius_m: f64,
    safe_height_m: f64,
    touch_height_m: f64,
}

impl ScriptParams {
    pub fn new(pick: Coordinate, ship: Coordinate, cal: &Calibration) -> Result<Self> {
        cal.validate()?;
        for (name, v) in [
            ("pick.x", pick.x),
            ("pick.y", pick.y),
            ("ship.x", ship.x),
            ("ship.y", ship.y),
        ] {
            if !v.is_finite() {
                return Err(DispatchError::invalid_configuration(format!(
                    "computed coordinate {name} is not finite: {v}"
                )));
            }
        }
        Ok(Self {
            pick,
            ship,
            acceleration: cal.acceleration,
            velocity: cal.velocity,
            blend_radius_m: cal.blend_radius_m,
            safe_height_m: cal.safe_height_m,
            touch_height_m: cal.touch_height_m,
        })
    }

    /// Render the fixed program shape. The structure never depends on the
    /// numeric values: locals, pose capture as the reference frame, the
    /// move-to-XY routine (joint move to a pre-position 50 mm above safe
    /// height, then a blended linear approach), the descend-touch-retract
    /// routine (100 ms settle dwell at touch height), two diagnostic prints,
    /// the pick/place sequence, and the single invocation line.
    fn render(&self) -> String {
        let a = fmt_dynamic(self.acceleration);
        let v = fmt_dynamic(self.velocity);
        let r = fmt_dynamic(self.blend_radius_m);
        let z_above = fmt_dynamic(self.safe_height_m);
        let z_down = fmt_dynamic(self.touch_height_m);
        let px = fmt_coord(self.pick.x);
        let py = fmt_coord(self.pick.y);
        let sx = fmt_coord(self.ship.x);
        let sy = fmt_coord(self.ship.y);

        format!(
            r#"def move_item_to_shipment_box():
  a = {a}
  v = {v}
  r = {r}
  z_above = {z_above}
  z_down  = {z_down}

  P0 = get_actual_tcp_pose()

  def at_xy(x, y):
    return p[P0[0] + x, P0[1] + y, P0[2], P0[3], P0[4], P0[5]]
  end

  def go_to_xy(x, y):
    tgt = at_xy(x, y)
    pre = pose_trans(tgt, p[0,0, z_above + 0.050, 0,0,0])
    movej(pre, a, v)
    movel(pose_trans(tgt, p[0,0, z_above, 0,0,0]), a, v, r)
  end

  def go_down_up_at_xy(x, y):
    tgt = at_xy(x, y)
    movel(pose_trans(tgt, p[0,0, z_down, 0,0,0]), a, v, r)
    sleep(0.10)
    movel(pose_trans(tgt, p[0,0, z_above, 0,0,0]), a, v, r)
  end

  textmsg("ITEM_X={px}; ITEM_Y={py}")
  textmsg("SBOX_X={sx}; SBOX_Y={sy}")

  # Pick
  go_to_xy({px}, {py})
  go_down_up_at_xy({px}, {py})

  # Place
  go_to_xy({sx}, {sy})
  go_down_up_at_xy({sx}, {sy})
end

move_item_to_shipment_box()
"#
        )
    }
}

/// Compile the pick/place program for the given positions. Fails fast with
/// `InvalidConfiguration` before producing any text when a calibration field
/// or computed coordinate is non-finite.
pub fn compile_program(
    pick: Coordinate,
    ship: Coordinate,
    cal: &Calibration,
) -> Result<MotionProgram> {
    let params = ScriptParams::new(pick, ship, cal)?;
    tracing::debug!(
        pick_x = pick.x,
        pick_y = pick.y,
        ship_x = ship.x,
        ship_y = ship.y,
        "compiling motion program"
    );
    Ok(MotionProgram::new(params.render()))
}
