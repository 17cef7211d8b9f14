//! Indicator polling through the panel.

use crate::fake_driver::{Call, STANDARD, fake_panel};
use psu_common::io::driver::DriverError;
use psu_common::panel::ids::IndicatorId;
use psu_panel::error::ActionError;
use psu_panel::event::PanelEvent;
use psu_panel::panel::Flow;

const OVERLOAD_AI: u32 = 8;

#[test]
fn tick_samples_every_lamp_channel() {
    let (mut panel, fake) = fake_panel(STANDARD);
    panel.poll_indicators();

    let reads: Vec<_> = fake
        .state()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::ReadAnalog(ch) => Some(*ch),
            _ => None,
        })
        .collect();
    assert_eq!(reads, vec![8, 9, 10, 11, 12, 13]);
}

#[test]
fn band_edges_are_dark() {
    let (mut panel, fake) = fake_panel(STANDARD);

    fake.set_sample(OVERLOAD_AI, 0.2);
    panel.refresh_indicator(IndicatorId::OVERLOAD).unwrap();
    assert!(!panel.indicator(IndicatorId::OVERLOAD).unwrap().on);

    fake.set_sample(OVERLOAD_AI, 0.7);
    panel.refresh_indicator(IndicatorId::OVERLOAD).unwrap();
    assert!(!panel.indicator(IndicatorId::OVERLOAD).unwrap().on);

    fake.set_sample(OVERLOAD_AI, 0.45);
    assert!(panel.refresh_indicator(IndicatorId::OVERLOAD).unwrap());
    assert!(panel.indicator(IndicatorId::OVERLOAD).unwrap().on);
}

#[test]
fn failing_tick_holds_previous_state() {
    let (mut panel, fake) = fake_panel(STANDARD);

    fake.set_sample(OVERLOAD_AI, 0.5);
    assert_eq!(panel.handle(PanelEvent::Tick), Flow::Redraw);
    assert!(panel.indicator(IndicatorId::OVERLOAD).unwrap().on);

    // True value now dark, but the sample fails.
    fake.set_sample(OVERLOAD_AI, 0.0);
    fake.fail_read(OVERLOAD_AI, true);
    assert_eq!(panel.handle(PanelEvent::Tick), Flow::Idle);
    assert!(panel.indicator(IndicatorId::OVERLOAD).unwrap().on);
    assert_eq!(panel.summary().failures, 1);

    fake.fail_read(OVERLOAD_AI, false);
    assert_eq!(panel.handle(PanelEvent::Tick), Flow::Redraw);
    assert!(!panel.indicator(IndicatorId::OVERLOAD).unwrap().on);
}

#[test]
fn out_of_range_tick_holds_previous_state() {
    let (mut panel, fake) = fake_panel(STANDARD);

    fake.set_sample(OVERLOAD_AI, 0.5);
    assert_eq!(panel.handle(PanelEvent::Tick), Flow::Redraw);

    fake.set_sample(OVERLOAD_AI, 0.0);
    fake.pin_read(OVERLOAD_AI, true);
    assert_eq!(panel.handle(PanelEvent::Tick), Flow::Idle);
    assert!(panel.indicator(IndicatorId::OVERLOAD).unwrap().on);
    assert_eq!(panel.summary().failures, 1);
    assert!(matches!(
        panel.refresh_indicator(IndicatorId::OVERLOAD),
        Err(ActionError::Driver {
            source: DriverError::SampleOutOfRange { .. },
            ..
        })
    ));

    fake.pin_read(OVERLOAD_AI, false);
    assert_eq!(panel.handle(PanelEvent::Tick), Flow::Redraw);
    assert!(!panel.indicator(IndicatorId::OVERLOAD).unwrap().on);
}

#[test]
fn one_failing_lamp_does_not_stop_the_others() {
    let (mut panel, fake) = fake_panel(STANDARD);
    fake.fail_read(OVERLOAD_AI, true);
    fake.set_sample(13, 0.5);

    let report = panel.poll_indicators();
    assert_eq!(report.failed, 1);
    assert_eq!(report.changed, 1);
    assert!(panel.indicator(IndicatorId::INHIBIT).unwrap().on);
}

#[test]
fn initial_state_comes_from_config() {
    let content = STANDARD.replace(
        "id = 2\ntitle = \"Interlock\"\n\n[[indicators]]\nid = 3",
        "id = 2\ntitle = \"Interlock\"\nstate = \"on\"\n\n[[indicators]]\nid = 3",
    );
    let (panel, _fake) = fake_panel(&content);
    assert!(panel.indicator(IndicatorId::INTERLOCK).unwrap().on);
}

#[test]
fn unknown_indicator_is_reported() {
    let (mut panel, _fake) = fake_panel(STANDARD);
    assert_eq!(
        panel.refresh_indicator(IndicatorId(11)).unwrap_err(),
        ActionError::UnknownIndicator(IndicatorId(11))
    );
}
