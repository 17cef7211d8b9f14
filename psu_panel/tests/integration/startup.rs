//! Start-up, simulation driver and persist-on-exit.

use crate::fake_driver::RecordingPresenter;
use psu_common::config::{ConfigError, ConfigLoader};
use psu_common::io::driver::{DriverError, IoDriver};
use psu_common::panel::config::PanelConfig;
use psu_common::panel::ids::{ControlId, IndicatorId, KnobId};
use psu_hal::DriverRegistry;
use psu_hal::drivers::simulation;
use psu_panel::error::PanelError;
use psu_panel::event::PanelEvent;
use psu_panel::panel::Panel;
use std::collections::VecDeque;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

const SIMULATED: &str = r#"
driver = "simulation"

[power_supply]
title = "ALE 102"
voltage_full_output = 24.0
v_program_max = 10.0
v_program_min = 0.0

[panel]
tick_period_ms = 10

[driver_config.simulation]
links = [{ digital_channel = 0, analog_channel = 13, high = 0.5 }]

[[knobs]]
id = 0
title = "Output voltage"
angle = 2.0943951023931953
clock_wise_limit = 7.330382858376184
counter_clock_wise_limit = 2.0943951023931953
voltage_setting = 0.0

[[controls]]
id = 1
title = "Inhibit"

[[indicators]]
id = 5
title = "Inhibit"
"#;

fn start(content: &str) -> Result<Panel, PanelError> {
    let config = PanelConfig::from_toml(content)?;
    Panel::start(config, &DriverRegistry::with_builtin_drivers())
}

#[test]
fn starts_on_simulation() {
    let panel = start(SIMULATED).unwrap();
    assert_eq!(panel.driver().name(), "simulation");
    assert_eq!(panel.tick_period().as_millis(), 10);
}

#[test]
fn unknown_driver_fails_start_up() {
    let result = start(&SIMULATED.replace("\"simulation\"\n\n[power_supply]", "\"nidaq\"\n\n[power_supply]"));
    assert!(matches!(
        result,
        Err(PanelError::Driver(DriverError::DriverNotFound(_)))
    ));
}

#[test]
fn invalid_config_fails_start_up() {
    let result = start(&SIMULATED.replace("v_program_min = 0.0", "v_program_min = 20.0"));
    assert!(matches!(
        result,
        Err(PanelError::Config(ConfigError::ValidationError(_)))
    ));
}

#[test]
fn bad_driver_settings_fail_start_up() {
    let result = start(&SIMULATED.replace("analog_channel = 13", "analog_channel = 31"));
    assert!(matches!(
        result,
        Err(PanelError::Driver(DriverError::InitFailed(_)))
    ));
}

#[test]
fn inhibit_key_lights_inhibit_lamp() {
    let mut panel = start(SIMULATED).unwrap();
    let mut presenter = RecordingPresenter::default();
    let mut script: VecDeque<_> = [
        PanelEvent::Release {
            control: ControlId::INHIBIT,
        },
        PanelEvent::Tick,
    ]
    .into();

    panel.run(&mut script, &mut presenter);

    assert!(panel.control(ControlId::INHIBIT).unwrap().on);
    assert!(panel.indicator(IndicatorId::INHIBIT).unwrap().on);
    assert!(presenter.frames.last().unwrap().indicators[0].on);
}

#[test]
fn settings_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("power_supply.toml");
    fs::write(&path, SIMULATED).unwrap();

    let mut panel = Panel::start(
        PanelConfig::load(&path).unwrap(),
        &DriverRegistry::with_builtin_drivers(),
    )
    .unwrap();
    let mut script: VecDeque<_> = [PanelEvent::Rotate {
        knob: KnobId::OUTPUT_VOLTAGE,
        dz: 160,
    }]
    .into();
    panel.run(&mut script, &mut RecordingPresenter::default());

    let knob = panel.knob(KnobId::OUTPUT_VOLTAGE).unwrap().clone();
    panel.persist(&path).unwrap();
    panel.shutdown().unwrap();

    let reloaded = PanelConfig::load(&path).unwrap();
    assert_eq!(reloaded.knobs[0].angle, knob.angle);
    assert_eq!(reloaded.knobs[0].voltage_setting, knob.voltage_setting);
    assert_eq!(reloaded.driver, "simulation");
    assert_eq!(reloaded.panel.tick_period_ms, 10);

    let restarted = Panel::start(reloaded, &DriverRegistry::with_builtin_drivers()).unwrap();
    assert_eq!(restarted.knob(KnobId::OUTPUT_VOLTAGE).unwrap(), &knob);
}

static CREATED: AtomicUsize = AtomicUsize::new(0);

fn counted_simulation() -> Box<dyn IoDriver> {
    CREATED.fetch_add(1, Ordering::SeqCst);
    simulation::create_driver()
}

#[test]
fn invalid_config_never_creates_a_driver() {
    let mut registry = DriverRegistry::new();
    registry.register("counted", counted_simulation);

    let content = SIMULATED
        .replace("\"simulation\"\n\n[power_supply]", "\"counted\"\n\n[power_supply]")
        .replace("voltage_full_output = 24.0", "voltage_full_output = 0.0");
    let result = Panel::start(PanelConfig::from_toml(&content).unwrap(), &registry);
    assert!(matches!(
        result,
        Err(PanelError::Config(ConfigError::ValidationError(_)))
    ));
    assert_eq!(CREATED.load(Ordering::SeqCst), 0);
}

#[test]
fn shipped_config_keeps_its_comments_on_save() {
    let shipped = fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../data/power_supply.toml"
    ))
    .unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("power_supply.toml");
    fs::write(&path, &shipped).unwrap();

    let mut panel = Panel::start(
        PanelConfig::load(&path).unwrap(),
        &DriverRegistry::with_builtin_drivers(),
    )
    .unwrap();
    panel.rotate_knob(KnobId::OUTPUT_VOLTAGE, 96).unwrap();
    panel.persist(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written.matches('#').count(), shipped.matches('#').count());
    assert!(written.contains("# enable -> end of charge"));
    assert!(written.contains("links = ["));
    assert!(!written.contains("[[driver_config.simulation.links]]"));
    assert_eq!(written.lines().count(), shipped.lines().count());

    let reloaded = PanelConfig::load(&path).unwrap();
    let knob = panel.knob(KnobId::OUTPUT_VOLTAGE).unwrap();
    assert_eq!(reloaded.knobs[0].angle, knob.angle);
    assert_eq!(reloaded.knobs[0].voltage_setting, knob.voltage_setting);
}
