//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `IoDriver` trait with the same
//! channel counts, ranges and channel map as the PCI-DAS1602/16 driver, so a
//! panel configuration works unchanged against either.

use super::io::{IoSimulator, SimulationSettings};
use crate::drivers::wiring::{CAPABILITIES, CHANNEL_MAP, SAFE_LOW_LINES};
use psu_common::io::capabilities::DeviceCapabilities;
use psu_common::io::channel_map::ChannelMap;
use psu_common::io::driver::{ChannelKind, DriverError, DriverFeatures, IoDriver, Level};
use psu_common::panel::config::PanelConfig;
use tracing::{debug, info};

/// Simulation driver implementing the IoDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Initialized flag
    initialized: bool,
    /// I/O simulator
    io_sim: Option<IoSimulator>,
}

impl SimulationDriver {
    /// Create a new simulation driver instance.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            initialized: false,
            io_sim: None,
        }
    }

    /// Simulator state, once initialized.
    pub fn io(&self) -> Option<&IoSimulator> {
        self.io_sim.as_ref()
    }

    fn sim(&mut self) -> Result<&mut IoSimulator, DriverError> {
        self.io_sim
            .as_mut()
            .ok_or_else(|| DriverError::NotReady("simulation driver not initialized".to_string()))
    }

    fn settings(config: &PanelConfig) -> Result<SimulationSettings, DriverError> {
        let Some(value) = config.driver_settings("simulation") else {
            return Ok(SimulationSettings::default());
        };
        let settings: SimulationSettings = value
            .clone()
            .try_into()
            .map_err(|e| DriverError::InitFailed(format!("[driver_config.simulation]: {e}")))?;
        settings
            .validate(&CAPABILITIES)
            .map_err(|e| DriverError::InitFailed(format!("[driver_config.simulation] {e}")))?;
        Ok(settings)
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl IoDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn features(&self) -> DriverFeatures {
        DriverFeatures::REQUIRED
    }

    fn capabilities(&self) -> &DeviceCapabilities {
        &CAPABILITIES
    }

    fn channel_map(&self) -> &ChannelMap {
        &CHANNEL_MAP
    }

    fn init(&mut self, config: &PanelConfig) -> Result<(), DriverError> {
        let settings = Self::settings(config)?;
        info!(
            "Initializing simulation driver with {} preset inputs, {} links",
            settings.analog_inputs.len(),
            settings.links.len()
        );

        let mut sim = IoSimulator::new(&CAPABILITIES, &settings);
        for line in SAFE_LOW_LINES {
            sim.set_digital(line, Level::Low);
        }

        self.io_sim = Some(sim);
        self.initialized = true;
        info!("Simulation driver initialized");
        Ok(())
    }

    fn ready(&self) -> bool {
        self.initialized && self.io_sim.is_some()
    }

    fn read_analog(&mut self, channel: u32) -> Result<f64, DriverError> {
        CAPABILITIES.check_channel(ChannelKind::AnalogInput, channel)?;
        let value = self.sim()?.analog_input(channel).unwrap_or_default();

        // A converter pinned at either rail has no meaningful reading.
        let range = CAPABILITIES.analog_input_range;
        if value <= range.min || value >= range.max {
            return Err(DriverError::SampleOutOfRange {
                channel,
                min: range.min,
                max: range.max,
            });
        }
        Ok(value)
    }

    fn write_analog(
        &mut self,
        channel: u32,
        value: f64,
        v_max: f64,
        v_min: f64,
    ) -> Result<(), DriverError> {
        CAPABILITIES.check_channel(ChannelKind::AnalogOutput, channel)?;
        CAPABILITIES.check_output(value, v_max, v_min)?;
        self.sim()?.set_analog_output(channel, value);
        debug!("AO[{}] = {:.4} V", channel, value);
        Ok(())
    }

    fn write_digital(&mut self, channel: u32, level: Level) -> Result<(), DriverError> {
        CAPABILITIES.check_channel(ChannelKind::Digital, channel)?;
        self.sim()?.set_digital(channel, level);
        debug!("DIO[{}] = {}", channel, level);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        info!("Shutting down simulation driver");
        self.io_sim = None;
        self.initialized = false;
        Ok(())
    }
}

// ── Tests ──
