//! PCI-DAS1602/16 driver implementation.

use super::comedi::{AREF_GROUND, ComediDevice, MAXDATA, from_phys, to_phys};
use crate::drivers::wiring::{CAPABILITIES, CHANNEL_MAP, SAFE_LOW_LINES};
use psu_common::io::capabilities::DeviceCapabilities;
use psu_common::io::channel_map::ChannelMap;
use psu_common::io::driver::{ChannelKind, DriverError, DriverFeatures, IoDriver, Level};
use psu_common::panel::config::PanelConfig;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Comedi subdevice indexes of the card.
const SUBDEV_ANALOG_INPUT: u32 = 0;
const SUBDEV_ANALOG_OUTPUT: u32 = 1;
const SUBDEV_DIGITAL_IO: u32 = 2;

/// Range index for ±10 V analog input.
const ANALOG_INPUT_RANGE: u32 = 0;
/// Range index for 0..10 V analog output.
const ANALOG_OUTPUT_RANGE: u32 = 3;

fn default_device() -> PathBuf {
    PathBuf::from("/dev/comedi0")
}

/// Settings read from `[driver_config.pcidas1602_16]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pcidas1602Settings {
    /// Comedi device node.
    #[serde(default = "default_device")]
    pub device: PathBuf,
}

impl Default for Pcidas1602Settings {
    fn default() -> Self {
        Self {
            device: default_device(),
        }
    }
}

fn io_error(kind: ChannelKind, channel: u32, err: nix::Error) -> DriverError {
    DriverError::Io {
        kind,
        channel,
        message: err.to_string(),
    }
}

/// PCI-DAS1602/16 driver implementing the IoDriver trait.
pub struct Pcidas1602Driver {
    device: Option<ComediDevice>,
    ready: bool,
}

impl Pcidas1602Driver {
    /// Create a driver with no device open.
    pub fn new() -> Self {
        Self {
            device: None,
            ready: false,
        }
    }

    fn device(&self) -> Result<&ComediDevice, DriverError> {
        self.device
            .as_ref()
            .ok_or_else(|| DriverError::NotReady("comedi device not open".to_string()))
    }

    fn settings(config: &PanelConfig) -> Result<Pcidas1602Settings, DriverError> {
        match config.driver_settings("pcidas1602_16") {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|e| DriverError::InitFailed(format!("[driver_config.pcidas1602_16]: {e}"))),
            None => Ok(Pcidas1602Settings::default()),
        }
    }

    fn drive_line(device: &ComediDevice, channel: u32, level: Level) -> Result<(), DriverError> {
        device
            .dio_config_output(SUBDEV_DIGITAL_IO, channel)
            .and_then(|()| device.dio_write(SUBDEV_DIGITAL_IO, channel, level.is_high()))
            .map_err(|e| io_error(ChannelKind::Digital, channel, e))
    }
}

impl Default for Pcidas1602Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl IoDriver for Pcidas1602Driver {
    fn name(&self) -> &'static str {
        "pcidas1602_16"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
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
        self.ready = false;
        let settings = Self::settings(config)?;
        info!("Opening comedi device {}", settings.device.display());

        let device = ComediDevice::open(&settings.device).map_err(|e| {
            DriverError::InitFailed(format!("{}: {e}", settings.device.display()))
        })?;

        for line in SAFE_LOW_LINES {
            Self::drive_line(&device, line, Level::Low).map_err(|e| {
                DriverError::InitFailed(format!("driving digital channel[{line}] low: {e}"))
            })?;
        }

        info!("PCI-DAS1602/16 ready on {}", device.path().display());
        self.device = Some(device);
        self.ready = true;
        Ok(())
    }

    fn ready(&self) -> bool {
        self.ready
    }

    fn read_analog(&mut self, channel: u32) -> Result<f64, DriverError> {
        CAPABILITIES.check_channel(ChannelKind::AnalogInput, channel)?;
        let raw = self
            .device()?
            .data_read(SUBDEV_ANALOG_INPUT, channel, ANALOG_INPUT_RANGE, AREF_GROUND)
            .map_err(|e| io_error(ChannelKind::AnalogInput, channel, e))?;

        let range = CAPABILITIES.analog_input_range;
        let value = to_phys(raw, &range, MAXDATA).ok_or(DriverError::SampleOutOfRange {
            channel,
            min: range.min,
            max: range.max,
        })?;
        debug!("AI[{}] raw {} = {:.4} V", channel, raw, value);
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

        let raw = from_phys(value, &CAPABILITIES.analog_output_range, MAXDATA);
        self.device()?
            .data_write(
                SUBDEV_ANALOG_OUTPUT,
                channel,
                ANALOG_OUTPUT_RANGE,
                AREF_GROUND,
                raw,
            )
            .map_err(|e| io_error(ChannelKind::AnalogOutput, channel, e))?;
        debug!("AO[{}] = {:.4} V (raw {})", channel, value, raw);
        Ok(())
    }

    fn write_digital(&mut self, channel: u32, level: Level) -> Result<(), DriverError> {
        CAPABILITIES.check_channel(ChannelKind::Digital, channel)?;
        Self::drive_line(self.device()?, channel, level)?;
        debug!("DIO[{}] = {}", channel, level);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        if let Some(device) = self.device.take() {
            info!("Closing comedi device {}", device.path().display());
        }
        self.ready = false;
        Ok(())
    }
}

// ── Tests ──
