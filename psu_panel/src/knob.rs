//! Knob voltage state machine.
//!
//! A knob is the pair (angle, voltage setting). Rotation moves the angle
//! inside the knob's travel and the voltage proportionally inside
//! `[0, voltage_full_output]`. Reaching either end of travel snaps the
//! voltage to the matching extreme.

use psu_common::bounds::{Bound, rescale, saturate};
use psu_common::consts::ROTATION_SCALE;
use psu_common::panel::config::KnobConfig;
use psu_common::panel::ids::KnobId;
use psu_common::panel::label::Label;

/// Live state of one knob.
#[derive(Debug, Clone, PartialEq)]
pub struct KnobState {
    /// Logical id.
    pub id: KnobId,
    /// Display title.
    pub title: Label,
    /// Pointer angle [rad], always inside the travel limits.
    pub angle: f64,
    /// Voltage setting [V], always inside `[0, voltage_full_output]`.
    pub voltage_setting: f64,
    clock_wise_limit: f64,
    counter_clock_wise_limit: f64,
}

/// Outcome of one rotation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobStep {
    /// Angle change that fed the voltage update; zero when an edge was hit.
    pub angle_delta: f64,
    /// End of travel reached, if any.
    pub edge: Option<Bound>,
}

impl KnobState {
    /// Build from a validated knob entry.
    pub fn from_config(config: &KnobConfig) -> Self {
        Self {
            id: config.id,
            title: config.title.clone(),
            angle: config.angle,
            voltage_setting: config.voltage_setting,
            clock_wise_limit: config.clock_wise_limit,
            counter_clock_wise_limit: config.counter_clock_wise_limit,
        }
    }

    /// Clockwise travel limit [rad].
    pub fn clock_wise_limit(&self) -> f64 {
        self.clock_wise_limit
    }

    /// Counter-clockwise travel limit [rad].
    pub fn counter_clock_wise_limit(&self) -> f64 {
        self.counter_clock_wise_limit
    }

    /// Total angular travel [rad].
    pub fn span(&self) -> f64 {
        self.clock_wise_limit - self.counter_clock_wise_limit
    }

    /// Apply a raw wheel delta; one unit turns the knob by [`ROTATION_SCALE`].
    pub fn rotate(&mut self, dz: i32, voltage_full_output: f64) -> KnobStep {
        self.rotate_by_angle(ROTATION_SCALE * f64::from(dz), voltage_full_output)
    }

    /// Turn the knob by `delta` radians.
    pub fn rotate_by_angle(&mut self, delta: f64, voltage_full_output: f64) -> KnobStep {
        let pinned = saturate(
            self.angle + delta,
            self.counter_clock_wise_limit,
            self.clock_wise_limit,
        );
        self.angle = pinned.value;

        match pinned.edge {
            Some(Bound::Lower) => {
                self.voltage_setting = 0.0;
                KnobStep {
                    angle_delta: 0.0,
                    edge: pinned.edge,
                }
            }
            Some(Bound::Upper) => {
                self.voltage_setting = voltage_full_output;
                KnobStep {
                    angle_delta: 0.0,
                    edge: pinned.edge,
                }
            }
            None => {
                let moved = self.voltage_setting + voltage_full_output * delta / self.span();
                self.voltage_setting = saturate(moved, 0.0, voltage_full_output).value;
                KnobStep {
                    angle_delta: delta,
                    edge: None,
                }
            }
        }
    }

    /// Voltage to command on the supply's programming input.
    pub fn program_voltage(&self, voltage_full_output: f64, v_program_max: f64) -> f64 {
        rescale(self.voltage_setting, voltage_full_output, v_program_max)
    }

    /// Current state as a configuration entry, for persisting.
    pub fn to_config(&self) -> KnobConfig {
        KnobConfig {
            id: self.id,
            title: self.title.clone(),
            angle: self.angle,
            clock_wise_limit: self.clock_wise_limit,
            counter_clock_wise_limit: self.counter_clock_wise_limit,
            voltage_setting: self.voltage_setting,
        }
    }
}

// ── Tests ──
