use pickbot_core::error::DispatchError;
use pickbot_core::{
    Calibration, Coordinate, SlotId, compile_program, resolve_pick_coordinate,
    resolve_shipment_coordinate,
};
use rstest::rstest;

fn default_program() -> String {
    let cal = Calibration::default();
    let pick = resolve_pick_coordinate(SlotId::new(2).unwrap(), &cal);
    let ship = resolve_shipment_coordinate(&cal);
    compile_program(pick, ship, &cal).unwrap().into_text()
}

#[test]
fn program_has_exactly_one_invocation_line() {
    let text = default_program();
    let invocations = text
        .lines()
        .filter(|l| *l == "move_item_to_shipment_box()")
        .count();
    assert_eq!(invocations, 1);
    // The invocation is the final line of the program.
    assert!(text.ends_with("\nmove_item_to_shipment_box()\n"));
}

#[test]
fn program_ends_with_exactly_one_trailing_newline() {
    let text = default_program();
    assert!(text.ends_with('\n'));
    assert!(!text.ends_with("\n\n"));
}

#[test]
fn coordinates_render_with_three_decimals() {
    // slot 2 with the cell defaults -> pick (0.100, 0.100), ship (0.300, 0.300)
    let text = default_program();
    assert!(text.contains("go_to_xy(0.100, 0.100)"));
    assert!(text.contains("go_down_up_at_xy(0.100, 0.100)"));
    assert!(text.contains("go_to_xy(0.300, 0.300)"));
    assert!(text.contains("go_down_up_at_xy(0.300, 0.300)"));
    // Never the bare or over-long forms.
    assert!(!text.contains("go_to_xy(0.1,"));
    assert!(!text.contains("0.10000"));
}

#[test]
fn diagnostics_report_both_positions() {
    let text = default_program();
    assert!(text.contains(r#"textmsg("ITEM_X=0.100; ITEM_Y=0.100")"#));
    assert!(text.contains(r#"textmsg("SBOX_X=0.300; SBOX_Y=0.300")"#));
}

#[test]
fn dynamics_render_with_trimmed_literals() {
    // acc 1.0 -> "1", vel 0.20 -> "0.2", blend 0.002 -> "0.002"
    let text = default_program();
    assert!(text.contains("\n  a = 1\n"));
    assert!(text.contains("\n  v = 0.2\n"));
    assert!(text.contains("\n  r = 0.002\n"));
    assert!(text.contains("\n  z_above = 0.07\n"));
    assert!(text.contains("\n  z_down  = 0.015\n"));
}

#[test]
fn pick_precedes_place_in_the_sequence() {
    let text = default_program();
    let pick_at = text.find("go_to_xy(0.100, 0.100)").unwrap();
    let place_at = text.find("go_to_xy(0.300, 0.300)").unwrap();
    assert!(pick_at < place_at);
}

#[test]
fn frame_is_captured_from_the_current_pose() {
    let text = default_program();
    assert!(text.contains("P0 = get_actual_tcp_pose()"));
    // Pre-position is 50 mm above safe height; dwell is 100 ms.
    assert!(text.contains("z_above + 0.050"));
    assert!(text.contains("sleep(0.10)"));
}

#[rstest]
#[case(Calibration { acceleration: f64::NAN, ..Calibration::default() })]
#[case(Calibration { velocity: f64::INFINITY, ..Calibration::default() })]
#[case(Calibration { safe_height_m: f64::NAN, ..Calibration::default() })]
#[case(Calibration { fine_offset_x_mm: f64::NEG_INFINITY, ..Calibration::default() })]
fn non_finite_calibration_fails_before_producing_text(#[case] cal: Calibration) {
    let pick = Coordinate { x: 0.1, y: 0.1 };
    let ship = Coordinate { x: 0.3, y: 0.3 };
    match compile_program(pick, ship, &cal) {
        Err(DispatchError::InvalidConfiguration(_)) => {}
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn non_finite_coordinate_fails_compilation() {
    let cal = Calibration::default();
    let pick = Coordinate {
        x: f64::NAN,
        y: 0.1,
    };
    let ship = resolve_shipment_coordinate(&cal);
    match compile_program(pick, ship, &cal) {
        Err(DispatchError::InvalidConfiguration(_)) => {}
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn negative_coordinates_keep_three_decimals() {
    let cal = Calibration {
        sign_x: -1,
        sign_y: -1,
        ..Calibration::default()
    };
    let pick = resolve_pick_coordinate(SlotId::new(3).unwrap(), &cal);
    let ship = resolve_shipment_coordinate(&cal);
    let text = compile_program(pick, ship, &cal).unwrap().into_text();
    assert!(text.contains("go_to_xy(-0.200, -0.100)"));
    assert!(text.contains("go_to_xy(-0.300, -0.300)"));
}
