//! Panel configuration types.
//!
//! - `PanelConfig` - Complete contents of `power_supply.toml`
//! - `PowerSupplyConfig` - Calibration of the controlled supply
//! - `PollConfig` - Indicator sampling cadence and threshold band
//! - `KnobConfig` / `ControlConfig` / `IndicatorConfig` - Per-element initial state

use super::ids::{ControlId, IndicatorId, KnobId};
use super::label::Label;
use crate::config::ConfigError;
use crate::consts::{
    DEFAULT_DRIVER, DEFAULT_INDICATOR_LOWER_THRESHOLD, DEFAULT_INDICATOR_UPPER_THRESHOLD,
    DEFAULT_TICK_PERIOD_MS,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Duration;

fn default_driver() -> String {
    DEFAULT_DRIVER.to_string()
}

fn default_tick_period_ms() -> u64 {
    DEFAULT_TICK_PERIOD_MS
}

fn default_lower_threshold() -> f64 {
    DEFAULT_INDICATOR_LOWER_THRESHOLD
}

fn default_upper_threshold() -> f64 {
    DEFAULT_INDICATOR_UPPER_THRESHOLD
}

/// Main configuration loaded from `power_supply.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    /// Calibration of the controlled supply.
    pub power_supply: PowerSupplyConfig,

    /// Name of the I/O driver to resolve from the registry.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Per-driver configuration sections.
    /// Key = driver name, Value = driver-specific TOML table.
    #[serde(default)]
    pub driver_config: HashMap<String, toml::Value>,

    /// Indicator sampling parameters.
    #[serde(default)]
    pub panel: PollConfig,

    /// Rotational controls.
    #[serde(default)]
    pub knobs: Vec<KnobConfig>,

    /// Toggle buttons.
    #[serde(default)]
    pub controls: Vec<ControlConfig>,

    /// Indicator lamps.
    #[serde(default)]
    pub indicators: Vec<IndicatorConfig>,
}

/// Static calibration relating knob voltage to the supply's program input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerSupplyConfig {
    /// Panel title.
    pub title: Label,
    /// Operator-facing full-scale voltage of the controlled rail [V].
    pub voltage_full_output: f64,
    /// Highest program voltage accepted by the supply [V].
    pub v_program_max: f64,
    /// Lowest program voltage accepted by the supply [V].
    pub v_program_min: f64,
}

/// Indicator polling cadence and "normal operating window".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    /// Poll period in milliseconds.
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,
    /// Lamp is lit only above this sample [V] (exclusive).
    #[serde(default = "default_lower_threshold")]
    pub indicator_lower_threshold: f64,
    /// Lamp is lit only below this sample [V] (exclusive).
    #[serde(default = "default_upper_threshold")]
    pub indicator_upper_threshold: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            indicator_lower_threshold: DEFAULT_INDICATOR_LOWER_THRESHOLD,
            indicator_upper_threshold: DEFAULT_INDICATOR_UPPER_THRESHOLD,
        }
    }
}

impl PollConfig {
    /// Poll period as a `Duration`.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

/// Two-state element state as written in the configuration (`"on"` / `"off"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    /// Lit / asserted.
    On,
    /// Dark / released.
    #[default]
    Off,
}

impl SwitchState {
    /// `true` for [`SwitchState::On`].
    #[inline]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Rotational control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnobConfig {
    /// Logical id.
    pub id: KnobId,
    /// Label shown under the knob.
    pub title: Label,
    /// Current pointer angle [rad].
    pub angle: f64,
    /// Clockwise travel limit [rad]; full-scale voltage.
    pub clock_wise_limit: f64,
    /// Counter-clockwise travel limit [rad]; zero voltage.
    pub counter_clock_wise_limit: f64,
    /// Current voltage setting [V].
    pub voltage_setting: f64,
}

impl KnobConfig {
    /// Voltage the affine knob law assigns to `self.angle`.
    pub fn expected_voltage(&self, voltage_full_output: f64) -> f64 {
        let span = self.clock_wise_limit - self.counter_clock_wise_limit;
        voltage_full_output * (self.angle - self.counter_clock_wise_limit) / span
    }
}

/// Toggle button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlConfig {
    /// Logical id.
    pub id: ControlId,
    /// Label shown under the button.
    pub title: Label,
    /// Initial state.
    #[serde(default)]
    pub state: SwitchState,
}

/// Indicator lamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Logical id.
    pub id: IndicatorId,
    /// Label shown under the lamp.
    pub title: Label,
    /// State shown before the first successful sample.
    #[serde(default)]
    pub state: SwitchState,
}

fn require_finite(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

fn require_unique<T, I>(kind: &str, ids: I) -> Result<(), ConfigError>
where
    T: Eq + Hash + std::fmt::Display,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    for id in ids {
        let label = id.to_string();
        if !seen.insert(id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate {kind} id {label}"
            )));
        }
    }
    Ok(())
}

impl PanelConfig {
    /// Validate the panel configuration.
    ///
    /// # Validation Rules
    /// 1. Every numeric calibration value is finite
    /// 2. `voltage_full_output` > 0
    /// 3. `v_program_max` > `v_program_min`
    /// 4. `tick_period_ms` > 0, `indicator_lower_threshold` < `indicator_upper_threshold`
    /// 5. Per knob: ccw limit < cw limit, angle within limits, voltage within `[0, voltage_full_output]`
    /// 6. Ids unique within knobs, controls and indicators
    /// 7. Driver name not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ps = &self.power_supply;
        require_finite("voltage_full_output", ps.voltage_full_output)?;
        require_finite("v_program_max", ps.v_program_max)?;
        require_finite("v_program_min", ps.v_program_min)?;

        if ps.voltage_full_output <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "voltage_full_output must be greater than 0, got {}",
                ps.voltage_full_output
            )));
        }

        if ps.v_program_max <= ps.v_program_min {
            return Err(ConfigError::ValidationError(format!(
                "v_program_max ({}) must be greater than v_program_min ({})",
                ps.v_program_max, ps.v_program_min
            )));
        }

        if self.driver.is_empty() {
            return Err(ConfigError::ValidationError(
                "driver name cannot be empty".to_string(),
            ));
        }

        let poll = &self.panel;
        if poll.tick_period_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_period_ms must be greater than 0".to_string(),
            ));
        }
        require_finite("indicator_lower_threshold", poll.indicator_lower_threshold)?;
        require_finite("indicator_upper_threshold", poll.indicator_upper_threshold)?;
        if poll.indicator_lower_threshold >= poll.indicator_upper_threshold {
            return Err(ConfigError::ValidationError(format!(
                "indicator_lower_threshold ({}) must be below indicator_upper_threshold ({})",
                poll.indicator_lower_threshold, poll.indicator_upper_threshold
            )));
        }

        for knob in &self.knobs {
            let name = knob.id.to_string();
            require_finite(&format!("{name}.angle"), knob.angle)?;
            require_finite(&format!("{name}.clock_wise_limit"), knob.clock_wise_limit)?;
            require_finite(
                &format!("{name}.counter_clock_wise_limit"),
                knob.counter_clock_wise_limit,
            )?;
            require_finite(&format!("{name}.voltage_setting"), knob.voltage_setting)?;

            if knob.counter_clock_wise_limit >= knob.clock_wise_limit {
                return Err(ConfigError::ValidationError(format!(
                    "{name}: counter_clock_wise_limit ({}) must be below clock_wise_limit ({})",
                    knob.counter_clock_wise_limit, knob.clock_wise_limit
                )));
            }
            if knob.angle < knob.counter_clock_wise_limit || knob.angle > knob.clock_wise_limit {
                return Err(ConfigError::ValidationError(format!(
                    "{name}: angle {} outside [{}, {}]",
                    knob.angle, knob.counter_clock_wise_limit, knob.clock_wise_limit
                )));
            }
            if knob.voltage_setting < 0.0 || knob.voltage_setting > ps.voltage_full_output {
                return Err(ConfigError::ValidationError(format!(
                    "{name}: voltage_setting {} outside [0, {}]",
                    knob.voltage_setting, ps.voltage_full_output
                )));
            }
        }

        require_unique("knob", self.knobs.iter().map(|k| k.id))?;
        require_unique("control", self.controls.iter().map(|c| c.id))?;
        require_unique("indicator", self.indicators.iter().map(|i| i.id))?;

        Ok(())
    }

    /// Driver-specific section for `driver`, if present.
    pub fn driver_settings(&self, driver: &str) -> Option<&toml::Value> {
        self.driver_config.get(driver)
    }
}
