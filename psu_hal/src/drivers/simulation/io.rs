//! I/O simulator for the software card.
//!
//! The `IoSimulator` manages:
//! - Analog input voltages, preset from `[driver_config.simulation]`
//! - Analog output voltages, recorded as written
//! - Digital line levels with linked analog reactions (a line edge sets an input voltage)

use psu_common::io::capabilities::DeviceCapabilities;
use psu_common::io::driver::Level;
use serde::Deserialize;
use tracing::{debug, trace};

/// Settings read from `[driver_config.simulation]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSettings {
    /// Preset analog input voltages.
    #[serde(default)]
    pub analog_inputs: Vec<SimulatedInput>,
    /// Digital line → analog input reactions.
    #[serde(default)]
    pub links: Vec<AnalogLink>,
}

/// Preset voltage on one analog input.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulatedInput {
    /// Analog input channel.
    pub channel: u32,
    /// Voltage reported until a link overrides it.
    pub value: f64,
}

/// Analog input that follows a digital line.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalogLink {
    /// Digital line watched.
    pub digital_channel: u32,
    /// Analog input driven.
    pub analog_channel: u32,
    /// Voltage while the line is high.
    pub high: f64,
    /// Voltage while the line is low.
    #[serde(default)]
    pub low: f64,
}

impl SimulationSettings {
    /// Check every referenced channel against the simulated card.
    pub fn validate(&self, caps: &DeviceCapabilities) -> Result<(), String> {
        for input in &self.analog_inputs {
            if input.channel >= caps.analog_inputs {
                return Err(format!(
                    "analog_inputs: channel {} beyond {} inputs",
                    input.channel, caps.analog_inputs
                ));
            }
            if !input.value.is_finite() {
                return Err(format!(
                    "analog_inputs: channel {} value must be finite",
                    input.channel
                ));
            }
        }
        for link in &self.links {
            if link.digital_channel >= caps.digital_channels {
                return Err(format!(
                    "links: digital channel {} beyond {} lines",
                    link.digital_channel, caps.digital_channels
                ));
            }
            if link.analog_channel >= caps.analog_inputs {
                return Err(format!(
                    "links: analog channel {} beyond {} inputs",
                    link.analog_channel, caps.analog_inputs
                ));
            }
            if !link.high.is_finite() || !link.low.is_finite() {
                return Err(format!(
                    "links: digital channel {} voltages must be finite",
                    link.digital_channel
                ));
            }
        }
        Ok(())
    }
}

/// I/O simulator for analog and digital channels.
pub struct IoSimulator {
    /// Analog input voltages
    ai_values: Vec<f64>,
    /// Analog output voltages
    ao_values: Vec<f64>,
    /// Digital line levels
    do_levels: Vec<Level>,
    /// Linked reactions for each digital line (indexed by line)
    linked_reactions: Vec<Vec<AnalogLink>>,
}

impl IoSimulator {
    /// Create a simulator sized to `caps`. All lines start low.
    ///
    /// `settings` must have passed [`SimulationSettings::validate`].
    pub fn new(caps: &DeviceCapabilities, settings: &SimulationSettings) -> Self {
        let mut ai_values = vec![0.0; caps.analog_inputs as usize];
        for input in &settings.analog_inputs {
            if let Some(slot) = ai_values.get_mut(input.channel as usize) {
                *slot = input.value;
            }
        }

        let mut linked_reactions = vec![Vec::new(); caps.digital_channels as usize];
        for link in &settings.links {
            if let Some(reactions) = linked_reactions.get_mut(link.digital_channel as usize) {
                reactions.push(*link);
            }
        }

        debug!(
            "IoSimulator initialized: {} AI, {} AO, {} DIO, {} links",
            ai_values.len(),
            caps.analog_outputs,
            caps.digital_channels,
            settings.links.len()
        );

        Self {
            ai_values,
            ao_values: vec![0.0; caps.analog_outputs as usize],
            do_levels: vec![Level::Low; caps.digital_channels as usize],
            linked_reactions,
        }
    }

    /// Current voltage on an analog input.
    pub fn analog_input(&self, channel: u32) -> Option<f64> {
        self.ai_values.get(channel as usize).copied()
    }

    /// Override an analog input voltage.
    pub fn set_analog_input(&mut self, channel: u32, value: f64) {
        if let Some(slot) = self.ai_values.get_mut(channel as usize) {
            *slot = value;
        }
    }

    /// Last voltage written to an analog output.
    pub fn analog_output(&self, channel: u32) -> Option<f64> {
        self.ao_values.get(channel as usize).copied()
    }

    /// Record an analog output write.
    pub fn set_analog_output(&mut self, channel: u32, value: f64) {
        if let Some(slot) = self.ao_values.get_mut(channel as usize) {
            *slot = value;
        }
    }

    /// Current level of a digital line.
    pub fn digital_level(&self, channel: u32) -> Option<Level> {
        self.do_levels.get(channel as usize).copied()
    }

    /// Drive a digital line; an edge applies the line's linked reactions.
    pub fn set_digital(&mut self, channel: u32, level: Level) {
        let idx = channel as usize;
        let Some(prev) = self.do_levels.get(idx).copied() else {
            return;
        };
        self.do_levels[idx] = level;

        if prev != level {
            self.handle_edge(idx, level);
        }
    }

    /// Apply linked reactions of digital line `idx`.
    fn handle_edge(&mut self, idx: usize, level: Level) {
        let Some(reactions) = self.linked_reactions.get(idx) else {
            return;
        };

        for link in reactions {
            let value = if level.is_high() { link.high } else { link.low };
            if let Some(slot) = self.ai_values.get_mut(link.analog_channel as usize) {
                *slot = value;
                trace!(
                    "DIO[{}] {} -> AI[{}] = {:.3} V",
                    idx, level, link.analog_channel, value
                );
            }
        }
    }
}

// ── Tests ──
