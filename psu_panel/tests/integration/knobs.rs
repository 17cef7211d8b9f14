//! Knob rotation through the panel.

use crate::fake_driver::{STANDARD, fake_panel};
use psu_common::io::driver::DriverError;
use psu_common::panel::ids::KnobId;
use psu_panel::error::ActionError;
use psu_panel::event::PanelEvent;
use psu_panel::panel::Flow;
use std::f64::consts::PI;

#[test]
fn quarter_turns_to_full_scale() {
    let (mut panel, fake) = fake_panel(STANDARD);

    // π/4, π/4, π/2, π/4 at π/256 rad per wheel unit; the last one overshoots.
    for dz in [64, 64, 128, 64] {
        panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, dz).unwrap();
    }

    let knob = panel.knob(KnobId::OUTPUT_VOLTAGE).unwrap();
    assert_eq!(knob.angle, PI);
    assert_eq!(knob.voltage_setting, 24.0);

    let writes = fake.analog_writes();
    assert_eq!(writes.len(), 4);
    assert!((writes[0].1 - 2.5).abs() < 1e-12);
    assert!((writes[1].1 - 5.0).abs() < 1e-12);
    assert_eq!(writes[2].1, 10.0);
    assert_eq!(writes[3].1, 10.0);
    for (channel, _, v_max, v_min) in writes {
        assert_eq!(channel, 0);
        assert_eq!(v_max, 10.0);
        assert_eq!(v_min, 0.0);
    }
}

#[test]
fn counter_clockwise_past_limit_writes_zero() {
    let (mut panel, fake) = fake_panel(STANDARD);
    panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, 100).unwrap();
    panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, -500).unwrap();

    let knob = panel.knob(KnobId::OUTPUT_VOLTAGE).unwrap();
    assert_eq!(knob.angle, 0.0);
    assert_eq!(knob.voltage_setting, 0.0);
    assert_eq!(fake.analog_writes().last().unwrap().1, 0.0);
}

#[test]
fn unmapped_knob_never_writes() {
    let content = STANDARD.replace(
        "[[knobs]]\nid = 0\ntitle = \"Output voltage\"",
        "[[knobs]]\nid = 3\ntitle = \"Auxiliary\"",
    );
    let (mut panel, fake) = fake_panel(&content);

    let err = panel.rotate_knob(KnobId(3), 64).unwrap_err();
    assert!(matches!(err, ActionError::Unmapped(_)));

    // Setting is kept for display and retry.
    let knob = panel.knob(KnobId(3)).unwrap();
    assert_eq!(knob.angle, PI / 4.0);
    assert!((knob.voltage_setting - 6.0).abs() < 1e-12);

    assert_eq!(panel.handle(PanelEvent::Rotate { knob: KnobId(3), dz: 1 }), Flow::Redraw);
    assert!(fake.analog_writes().is_empty());
}

#[test]
fn unknown_knob_is_ignored() {
    let (mut panel, fake) = fake_panel(STANDARD);
    assert_eq!(
        panel.rotate_knob(KnobId(9), 64).unwrap_err(),
        ActionError::UnknownKnob(KnobId(9))
    );
    assert_eq!(panel.handle(PanelEvent::Rotate { knob: KnobId(9), dz: 64 }), Flow::Idle);
    assert!(fake.state().calls.is_empty());
    assert_eq!(panel.summary().failures, 1);
}

#[test]
fn failed_write_still_commits_setting() {
    let (mut panel, fake) = fake_panel(STANDARD);
    fake.state().fail_analog_writes = true;

    let err = panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, 128).unwrap_err();
    assert!(matches!(err, ActionError::Driver { source: DriverError::Io { .. }, .. }));

    let knob = panel.knob(KnobId::OUTPUT_VOLTAGE).unwrap();
    assert_eq!(knob.angle, PI / 2.0);
    assert!((knob.voltage_setting - 12.0).abs() < 1e-12);
}

#[test]
fn program_below_window_is_rejected_but_kept() {
    let content = STANDARD.replace("v_program_min = 0.0", "v_program_min = 2.0");
    let (mut panel, fake) = fake_panel(&content);

    // 6 V knob voltage is 2.5 V program: inside the window.
    panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, 64).unwrap();
    // Back to 0 V: program 0 V is below v_program_min.
    let err = panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, -64).unwrap_err();
    match err {
        ActionError::Driver { source, .. } => assert!(source.is_bounds()),
        other => panic!("unexpected {other:?}"),
    }

    assert_eq!(panel.knob(KnobId::OUTPUT_VOLTAGE).unwrap().voltage_setting, 0.0);
    assert_eq!(fake.analog_writes().len(), 2);
}

#[test]
fn voltage_stays_in_range_for_large_deltas() {
    let (mut panel, _fake) = fake_panel(STANDARD);
    for dz in [i32::MAX, i32::MIN, 3, -1, 700, -7000] {
        let _ = panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, dz);
        let knob = panel.knob(KnobId::OUTPUT_VOLTAGE).unwrap();
        assert!((0.0..=PI).contains(&knob.angle));
        assert!((0.0..=24.0).contains(&knob.voltage_setting));
    }
}
