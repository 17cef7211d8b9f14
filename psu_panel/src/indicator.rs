//! Indicator polling.
//!
//! Each tick samples every indicator's analog input. A lamp is lit while its
//! sample lies strictly inside the threshold band. A failed sample keeps the
//! lamp as it was.

use psu_common::bounds::in_open_band;
use psu_common::panel::config::{IndicatorConfig, PollConfig, SwitchState};
use psu_common::panel::ids::IndicatorId;
use psu_common::panel::label::Label;

/// Live state of one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorState {
    /// Logical id.
    pub id: IndicatorId,
    /// Display title.
    pub title: Label,
    /// Lamp lit.
    pub on: bool,
}

impl IndicatorState {
    /// Build from a configuration entry.
    pub fn from_config(config: &IndicatorConfig) -> Self {
        Self {
            id: config.id,
            title: config.title.clone(),
            on: config.state.is_on(),
        }
    }

    /// Apply a successful sample. Returns `true` if the lamp changed.
    pub fn update(&mut self, sample: f64, band: &Thresholds) -> bool {
        let on = band.classify(sample);
        let changed = on != self.on;
        self.on = on;
        changed
    }

    /// Current state as a configuration entry.
    pub fn to_config(&self) -> IndicatorConfig {
        IndicatorConfig {
            id: self.id,
            title: self.title.clone(),
            state: SwitchState::from(self.on),
        }
    }
}

/// Open band `(lower, upper)` in which a lamp is lit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Lower edge [V], excluded.
    pub lower: f64,
    /// Upper edge [V], excluded.
    pub upper: f64,
}

impl Thresholds {
    /// Band from the `[panel]` section.
    pub fn from_poll(poll: &PollConfig) -> Self {
        Self {
            lower: poll.indicator_lower_threshold,
            upper: poll.indicator_upper_threshold,
        }
    }

    /// `true` iff `sample` lies strictly inside the band.
    pub fn classify(&self, sample: f64) -> bool {
        in_open_band(sample, self.lower, self.upper)
    }
}

/// Result of one polling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Lamps whose state changed.
    pub changed: usize,
    /// Indicators whose sample could not be taken.
    pub failed: usize,
}
