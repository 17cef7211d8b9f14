//! Control toggle state machine.
//!
//! A control is on or off. Pressing it commands the opposite level on its
//! digital line; the state flips only once the write is confirmed.

use psu_common::io::driver::Level;
use psu_common::panel::config::{ControlConfig, SwitchState};
use psu_common::panel::ids::ControlId;
use psu_common::panel::label::Label;

/// Live state of one control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    /// Logical id.
    pub id: ControlId,
    /// Display title.
    pub title: Label,
    /// Last confirmed hardware state.
    pub on: bool,
}

impl ControlState {
    /// Build from a configuration entry.
    pub fn from_config(config: &ControlConfig) -> Self {
        Self {
            id: config.id,
            title: config.title.clone(),
            on: config.state.is_on(),
        }
    }

    /// Level a press should command.
    pub fn press_level(&self) -> Level {
        Level::from_bool(!self.on)
    }

    /// Record a confirmed write of `level`.
    pub fn confirm(&mut self, level: Level) {
        self.on = level.is_high();
    }

    /// Current state as a configuration entry.
    pub fn to_config(&self) -> ControlConfig {
        ControlConfig {
            id: self.id,
            title: self.title.clone(),
            state: SwitchState::from(self.on),
        }
    }
}
