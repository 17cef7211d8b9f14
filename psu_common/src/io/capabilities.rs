//! Device limits declared by a driver.

use super::driver::{ChannelKind, DriverError};
use crate::bounds::VoltageRange;

/// Fixed channel counts and voltage ranges of an I/O card.
///
/// Immutable once the driver is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceCapabilities {
    /// Number of analog input channels.
    pub analog_inputs: u32,
    /// Number of analog output channels.
    pub analog_outputs: u32,
    /// Number of digital I/O channels.
    pub digital_channels: u32,
    /// Engineering range of analog inputs.
    pub analog_input_range: VoltageRange,
    /// Engineering range of analog outputs.
    pub analog_output_range: VoltageRange,
}

impl DeviceCapabilities {
    /// Declared channel count of `kind`.
    pub const fn channel_count(&self, kind: ChannelKind) -> u32 {
        match kind {
            ChannelKind::AnalogInput => self.analog_inputs,
            ChannelKind::AnalogOutput => self.analog_outputs,
            ChannelKind::Digital => self.digital_channels,
        }
    }

    /// Reject `channel` if it is beyond the declared count of `kind`.
    pub fn check_channel(&self, kind: ChannelKind, channel: u32) -> Result<(), DriverError> {
        let count = self.channel_count(kind);
        if channel >= count {
            return Err(DriverError::ChannelOutOfRange {
                kind,
                channel,
                count,
            });
        }
        Ok(())
    }

    /// Reject an analog output command outside `[v_min, v_max]` or outside
    /// the device's output range.
    pub fn check_output(&self, value: f64, v_max: f64, v_min: f64) -> Result<(), DriverError> {
        let window = VoltageRange::new(v_min, v_max);
        if !window.contains(value) {
            return Err(DriverError::ValueOutOfRange {
                value,
                min: v_min,
                max: v_max,
            });
        }
        if !self.analog_output_range.contains(value) {
            return Err(DriverError::ValueOutOfRange {
                value,
                min: self.analog_output_range.min,
                max: self.analog_output_range.max,
            });
        }
        Ok(())
    }
}
