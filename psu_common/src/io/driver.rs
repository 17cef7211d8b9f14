//! I/O driver trait and error types.
//!
//! This module defines:
//! - `IoDriver` trait - Capability contract every I/O card driver implements
//! - `DriverError` enum - Error types for driver operations
//! - `DriverFeatures` bitflags - Capability set a driver declares
//! - `DriverFactory` type alias - Factory function type
//! - `Level` / `ChannelKind` - Digital level and channel namespace

use super::capabilities::DeviceCapabilities;
use super::channel_map::ChannelMap;
use crate::panel::config::PanelConfig;
use bitflags::bitflags;
use std::fmt;
use thiserror::Error;

/// Channel namespace of an I/O card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Analog input (sampled by the indicator poller).
    AnalogInput,
    /// Analog output (knob setpoints).
    AnalogOutput,
    /// Digital I/O line (toggle controls).
    Digital,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnalogInput => write!(f, "analog input"),
            Self::AnalogOutput => write!(f, "analog output"),
            Self::Digital => write!(f, "digital"),
        }
    }
}

/// Digital output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Line driven low (control released).
    Low,
    /// Line driven high (control asserted).
    High,
}

impl Level {
    /// `High` for `true`, `Low` for `false`.
    #[inline]
    pub const fn from_bool(on: bool) -> Self {
        if on { Self::High } else { Self::Low }
    }

    /// `true` for `High`.
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

bitflags! {
    /// Capability set a driver provides.
    ///
    /// The panel refuses to start with a driver that lacks any of
    /// [`DriverFeatures::REQUIRED`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DriverFeatures: u8 {
        /// `read_analog` is backed by hardware.
        const ANALOG_INPUT = 1 << 0;
        /// `write_analog` is backed by hardware.
        const ANALOG_OUTPUT = 1 << 1;
        /// `write_digital` is backed by hardware.
        const DIGITAL_OUTPUT = 1 << 2;
        /// `channel_map` covers knobs, controls and indicators.
        const CHANNEL_MAP = 1 << 3;

        /// Everything the panel core calls.
        const REQUIRED = Self::ANALOG_INPUT.bits()
            | Self::ANALOG_OUTPUT.bits()
            | Self::DIGITAL_OUTPUT.bits()
            | Self::CHANNEL_MAP.bits();
    }
}

/// Error types for driver operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriverError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Driver not found in the registry
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Driver does not provide every required capability
    #[error("Driver '{driver}' lacks required capabilities: {missing:?}")]
    MissingFeatures {
        /// Driver name.
        driver: String,
        /// Capabilities the driver did not declare.
        missing: DriverFeatures,
    },

    /// Device did not report ready after initialization
    #[error("Device not ready: {0}")]
    NotReady(String),

    /// Channel index beyond the device's declared channel count
    #[error("{kind} channel[{channel}] out of range (device has {count})")]
    ChannelOutOfRange {
        /// Channel namespace.
        kind: ChannelKind,
        /// Requested channel.
        channel: u32,
        /// Declared channel count.
        count: u32,
    },

    /// Commanded output value outside the allowed window
    #[error("voltage[{value}] out of range [{min}, {max}]")]
    ValueOutOfRange {
        /// Commanded value [V].
        value: f64,
        /// Lowest allowed value [V].
        min: f64,
        /// Highest allowed value [V].
        max: f64,
    },

    /// Sample converted to a non-representable engineering value
    #[error("analog input channel[{channel}] sample out of representable range [{min}, {max}]")]
    SampleOutOfRange {
        /// Sampled channel.
        channel: u32,
        /// Lowest representable value [V].
        min: f64,
        /// Highest representable value [V].
        max: f64,
    },

    /// Transport call to the device failed
    #[error("device I/O error on {kind} channel[{channel}]: {message}")]
    Io {
        /// Channel namespace.
        kind: ChannelKind,
        /// Channel being accessed.
        channel: u32,
        /// Transport error text.
        message: String,
    },
}

impl DriverError {
    /// `true` for errors raised before any I/O was attempted.
    pub fn is_bounds(&self) -> bool {
        matches!(
            self,
            Self::ChannelOutOfRange { .. } | Self::ValueOutOfRange { .. }
        )
    }
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn IoDriver>;

/// Capability contract for a physical I/O card.
///
/// The panel core only ever holds a `Box<dyn IoDriver>`; any device family
/// that implements this trait is a drop-in replacement.
///
/// # Lifecycle
///
/// 1. `init()` - Called once at start-up, may open device handles
/// 2. `ready()` - Checked once after `init()`; `false` aborts start-up
/// 3. `read_analog()` / `write_analog()` / `write_digital()` - Called from the event loop
/// 4. `shutdown()` - Called once after the event loop and persist step
///
/// # Failure contract
///
/// Every I/O call is synchronous and fails independently. A failed call
/// returns `Err` and leaves outputs as they were from the caller's point of
/// view. Channel indices beyond [`DeviceCapabilities`] and commanded values
/// outside `[v_min, v_max]` are rejected before any I/O attempt.
pub trait IoDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation", "pcidas1602_16").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Capability set this driver provides.
    fn features(&self) -> DriverFeatures;

    /// Channel counts and voltage ranges of the device.
    fn capabilities(&self) -> &DeviceCapabilities;

    /// Logical id → physical channel lookup for this device family.
    fn channel_map(&self) -> &ChannelMap;

    /// Initialize the driver.
    ///
    /// Driver-specific options are read from
    /// `config.driver_settings(self.name())`.
    ///
    /// # Errors
    /// Return `DriverError::InitFailed` if the device cannot be brought up.
    fn init(&mut self, config: &PanelConfig) -> Result<(), DriverError>;

    /// Whether the device is open and in its safe initial state.
    fn ready(&self) -> bool;

    /// Sample one analog input channel [V].
    fn read_analog(&mut self, channel: u32) -> Result<f64, DriverError>;

    /// Drive one analog output channel to `value` volts.
    ///
    /// `value` must lie within `[v_min, v_max]`.
    fn write_analog(
        &mut self,
        channel: u32,
        value: f64,
        v_max: f64,
        v_min: f64,
    ) -> Result<(), DriverError>;

    /// Drive one digital channel to `level`.
    fn write_digital(&mut self, channel: u32, level: Level) -> Result<(), DriverError>;

    /// Release device handles.
    fn shutdown(&mut self) -> Result<(), DriverError>;
}
