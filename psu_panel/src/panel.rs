//! Panel context and event loop.
//!
//! `Panel` owns the driver and the live state of every knob, control and
//! indicator. All driver calls happen on the thread running [`Panel::run`];
//! events are handled one at a time in arrival order.

use crate::error::{ActionError, PanelError};
use crate::event::{
    ControlView, EventSource, IndicatorView, KnobView, PanelEvent, PanelSnapshot, Presenter,
};
use crate::indicator::{IndicatorState, PollReport, Thresholds};
use crate::knob::{KnobState, KnobStep};
use crate::persist::persist_knobs;
use crate::toggle::ControlState;
use psu_common::io::driver::{DriverError, IoDriver};
use psu_common::panel::config::PanelConfig;
use psu_common::panel::ids::{ControlId, IndicatorId, KnobId};
use psu_hal::DriverRegistry;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Largest tolerated gap between a configured knob voltage and the voltage
/// its angle implies [V].
const KNOB_DRIFT_TOLERANCE: f64 = 1e-6;

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Nothing visible changed.
    Idle,
    /// Displayed state changed; redraw.
    Redraw,
    /// Leave the loop.
    Stop,
}

/// Counters collected by [`Panel::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Events handled, including the final shutdown.
    pub events: u64,
    /// Rotation events.
    pub rotations: u64,
    /// Press-release events.
    pub presses: u64,
    /// Polling ticks.
    pub ticks: u64,
    /// Logged in-loop failures.
    pub failures: u64,
}

/// Operator panel bound to one driver.
pub struct Panel {
    config: PanelConfig,
    driver: Box<dyn IoDriver>,
    knobs: Vec<KnobState>,
    controls: Vec<ControlState>,
    indicators: Vec<IndicatorState>,
    thresholds: Thresholds,
    summary: RunSummary,
}

impl Panel {
    /// Validate `config` and bind it to a ready driver.
    ///
    /// # Errors
    /// Fails if the configuration is invalid or the driver is not ready.
    pub fn new(config: PanelConfig, driver: Box<dyn IoDriver>) -> Result<Self, PanelError> {
        config.validate()?;
        Self::bind(config, driver)
    }

    /// Resolve the configured driver through `registry` and bind it.
    ///
    /// The configuration is validated before any driver is created.
    pub fn start(config: PanelConfig, registry: &DriverRegistry) -> Result<Self, PanelError> {
        config.validate()?;
        let driver = registry.load(&config)?;
        Self::bind(config, driver)
    }

    fn bind(config: PanelConfig, driver: Box<dyn IoDriver>) -> Result<Self, PanelError> {
        if !driver.ready() {
            return Err(DriverError::NotReady(format!("driver '{}' is not ready", driver.name())).into());
        }

        let full = config.power_supply.voltage_full_output;
        for knob in &config.knobs {
            let expected = knob.expected_voltage(full);
            if (knob.voltage_setting - expected).abs() > KNOB_DRIFT_TOLERANCE {
                warn!(
                    "{} '{}': voltage_setting {} disagrees with angle (expected {:.6})",
                    knob.id, knob.title, knob.voltage_setting, expected
                );
            }
        }

        let panel = Self {
            knobs: config.knobs.iter().map(KnobState::from_config).collect(),
            controls: config.controls.iter().map(ControlState::from_config).collect(),
            indicators: config.indicators.iter().map(IndicatorState::from_config).collect(),
            thresholds: Thresholds::from_poll(&config.panel),
            summary: RunSummary::default(),
            config,
            driver,
        };

        info!(
            "Panel '{}' bound to driver '{}': {} knobs, {} controls, {} indicators",
            panel.config.power_supply.title,
            panel.driver.name(),
            panel.knobs.len(),
            panel.controls.len(),
            panel.indicators.len()
        );
        Ok(panel)
    }

    /// Configuration the panel was built from.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Indicator polling period.
    pub fn tick_period(&self) -> Duration {
        self.config.panel.tick_period()
    }

    /// Bound driver.
    pub fn driver(&self) -> &dyn IoDriver {
        self.driver.as_ref()
    }

    /// Live knob state.
    pub fn knob(&self, id: KnobId) -> Option<&KnobState> {
        self.knobs.iter().find(|k| k.id == id)
    }

    /// Live control state.
    pub fn control(&self, id: ControlId) -> Option<&ControlState> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Live indicator state.
    pub fn indicator(&self, id: IndicatorId) -> Option<&IndicatorState> {
        self.indicators.iter().find(|i| i.id == id)
    }

    /// Counters so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Turn a knob by `dz` wheel units and command its program voltage.
    ///
    /// The new angle and voltage are kept even when the channel lookup or
    /// the write fails.
    pub fn rotate_knob(&mut self, knob: KnobId, dz: i32) -> Result<KnobStep, ActionError> {
        let supply = &self.config.power_supply;
        let state = self
            .knobs
            .iter_mut()
            .find(|k| k.id == knob)
            .ok_or(ActionError::UnknownKnob(knob))?;

        let step = state.rotate(dz, supply.voltage_full_output);
        let program = state.program_voltage(supply.voltage_full_output, supply.v_program_max);
        debug!(
            "{} dz={} -> angle {:.4} rad, {:.3} V, program {:.4} V",
            knob, dz, state.angle, state.voltage_setting, program
        );

        let channel = self
            .driver
            .channel_map()
            .knob_channel(knob)
            .ok_or_else(|| ActionError::Unmapped(knob.to_string()))?;

        self.driver
            .write_analog(channel, program, supply.v_program_max, supply.v_program_min)
            .map_err(|e| ActionError::driver(knob, e))?;
        Ok(step)
    }

    /// Toggle a control. Returns its confirmed state.
    ///
    /// State changes only after the driver confirms the write.
    pub fn press_control(&mut self, control: ControlId) -> Result<bool, ActionError> {
        let idx = self
            .controls
            .iter()
            .position(|c| c.id == control)
            .ok_or(ActionError::UnknownControl(control))?;

        let channel = self
            .driver
            .channel_map()
            .control_channel(control)
            .ok_or_else(|| ActionError::Unmapped(control.to_string()))?;

        let level = self.controls[idx].press_level();
        self.driver
            .write_digital(channel, level)
            .map_err(|e| ActionError::driver(control, e))?;

        let state = &mut self.controls[idx];
        state.confirm(level);
        info!("{} '{}' -> {}", control, state.title, if state.on { "on" } else { "off" });
        Ok(state.on)
    }

    /// Sample one indicator. Returns `true` if its lamp changed.
    pub fn refresh_indicator(&mut self, indicator: IndicatorId) -> Result<bool, ActionError> {
        let idx = self
            .indicators
            .iter()
            .position(|i| i.id == indicator)
            .ok_or(ActionError::UnknownIndicator(indicator))?;
        self.sample_indicator(idx)
    }

    fn sample_indicator(&mut self, idx: usize) -> Result<bool, ActionError> {
        let id = self.indicators[idx].id;
        let channel = self
            .driver
            .channel_map()
            .indicator_channel(id)
            .ok_or_else(|| ActionError::Unmapped(id.to_string()))?;

        let sample = self
            .driver
            .read_analog(channel)
            .map_err(|e| ActionError::driver(id, e))?;
        trace!("{} sample {:.4} V", id, sample);
        Ok(self.indicators[idx].update(sample, &self.thresholds))
    }

    /// Sample every indicator once. Failures keep the lamp as it was.
    pub fn poll_indicators(&mut self) -> PollReport {
        let mut report = PollReport::default();
        for idx in 0..self.indicators.len() {
            match self.sample_indicator(idx) {
                Ok(true) => report.changed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("Indicator poll failed: {}", e);
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Displayed state.
    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            title: self.config.power_supply.title.to_string(),
            knobs: self
                .knobs
                .iter()
                .map(|k| KnobView {
                    id: k.id,
                    title: k.title.to_string(),
                    angle: k.angle,
                    voltage: k.voltage_setting,
                })
                .collect(),
            controls: self
                .controls
                .iter()
                .map(|c| ControlView {
                    id: c.id,
                    title: c.title.to_string(),
                    on: c.on,
                })
                .collect(),
            indicators: self
                .indicators
                .iter()
                .map(|i| IndicatorView {
                    id: i.id,
                    title: i.title.to_string(),
                    on: i.on,
                })
                .collect(),
        }
    }

    /// Handle one event. In-loop failures are logged and never returned.
    pub fn handle(&mut self, event: PanelEvent) -> Flow {
        self.summary.events += 1;
        match event {
            PanelEvent::Rotate { knob, dz } => {
                self.summary.rotations += 1;
                match self.rotate_knob(knob, dz) {
                    Ok(_) => Flow::Redraw,
                    Err(e @ ActionError::UnknownKnob(_)) => {
                        self.failed(&e);
                        Flow::Idle
                    }
                    Err(e) => {
                        // Setting already moved; the rail may lag behind it.
                        self.failed(&e);
                        Flow::Redraw
                    }
                }
            }
            PanelEvent::Release { control } => {
                self.summary.presses += 1;
                match self.press_control(control) {
                    Ok(_) => Flow::Redraw,
                    Err(e) => {
                        self.failed(&e);
                        Flow::Idle
                    }
                }
            }
            PanelEvent::Tick => {
                self.summary.ticks += 1;
                let report = self.poll_indicators();
                self.summary.failures += report.failed as u64;
                if report.changed > 0 {
                    Flow::Redraw
                } else {
                    Flow::Idle
                }
            }
            PanelEvent::Shutdown => {
                info!("Shutdown requested");
                Flow::Stop
            }
        }
    }

    fn failed(&mut self, error: &ActionError) {
        warn!("{}", error);
        self.summary.failures += 1;
    }

    /// Run the event loop until a shutdown event.
    ///
    /// `presenter` gets the initial state and every changed state.
    pub fn run<S, P>(&mut self, source: &mut S, presenter: &mut P) -> RunSummary
    where
        S: EventSource + ?Sized,
        P: Presenter + ?Sized,
    {
        info!(
            "Panel loop started (tick {} ms)",
            self.config.panel.tick_period_ms
        );
        presenter.redraw(&self.snapshot());

        loop {
            match self.handle(source.next_event()) {
                Flow::Stop => break,
                Flow::Redraw => presenter.redraw(&self.snapshot()),
                Flow::Idle => {}
            }
        }

        info!(
            "Panel loop stopped after {} events ({} failures)",
            self.summary.events, self.summary.failures
        );
        self.summary
    }

    /// Write the current knob settings back into the configuration file.
    pub fn persist(&self, path: &Path) -> Result<(), PanelError> {
        persist_knobs(path, &self.knobs)
    }

    /// Release the driver.
    pub fn shutdown(mut self) -> Result<(), PanelError> {
        self.driver.shutdown()?;
        info!("Driver '{}' shut down", self.driver.name());
        Ok(())
    }
}
