//! Control toggling through the panel.

use crate::fake_driver::{STANDARD, fake_panel};
use psu_common::io::driver::Level;
use psu_common::panel::ids::ControlId;
use psu_panel::error::ActionError;
use psu_panel::event::PanelEvent;
use psu_panel::panel::Flow;

#[test]
fn even_presses_round_trip() {
    let (mut panel, fake) = fake_panel(STANDARD);

    for _ in 0..4 {
        panel.press_control(ControlId::ENABLE).unwrap();
    }

    assert!(!panel.control(ControlId::ENABLE).unwrap().on);
    assert_eq!(
        fake.digital_writes(),
        vec![
            (4, Level::High),
            (4, Level::Low),
            (4, Level::High),
            (4, Level::Low),
        ]
    );
}

#[test]
fn controls_drive_their_lines() {
    let (mut panel, fake) = fake_panel(STANDARD);
    assert!(panel.press_control(ControlId::INHIBIT).unwrap());
    assert!(panel.press_control(ControlId::INTERLOCK).unwrap());
    assert_eq!(fake.digital_writes(), vec![(0, Level::High), (2, Level::High)]);
}

#[test]
fn failed_write_does_not_flip() {
    let (mut panel, fake) = fake_panel(STANDARD);

    assert!(panel.press_control(ControlId::ENABLE).unwrap());

    fake.state().fail_digital_writes = true;
    assert!(matches!(
        panel.press_control(ControlId::ENABLE),
        Err(ActionError::Driver { .. })
    ));
    assert!(panel.control(ControlId::ENABLE).unwrap().on);
    assert_eq!(panel.handle(PanelEvent::Release { control: ControlId::ENABLE }), Flow::Idle);

    fake.state().fail_digital_writes = false;
    assert!(!panel.press_control(ControlId::ENABLE).unwrap());

    // The failed presses retried the same level.
    assert_eq!(
        fake.digital_writes(),
        vec![
            (4, Level::High),
            (4, Level::Low),
            (4, Level::Low),
            (4, Level::Low),
        ]
    );
}

#[test]
fn unmapped_control_is_a_no_op() {
    let content = STANDARD.replace(
        "[[indicators]]\nid = 0\n",
        "[[controls]]\nid = 7\ntitle = \"Spare\"\n\n[[indicators]]\nid = 0\n",
    );
    let (mut panel, fake) = fake_panel(&content);

    assert!(matches!(
        panel.press_control(ControlId(7)),
        Err(ActionError::Unmapped(_))
    ));
    assert!(!panel.control(ControlId(7)).unwrap().on);
    assert!(fake.digital_writes().is_empty());
}

#[test]
fn unknown_control_is_reported() {
    let (mut panel, fake) = fake_panel(STANDARD);
    assert_eq!(
        panel.press_control(ControlId(42)).unwrap_err(),
        ActionError::UnknownControl(ControlId(42))
    );
    assert!(fake.state().calls.is_empty());
}
