//! Prelude module for common re-exports.
//!
//! ```rust
//! use psu_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader};
pub use crate::panel::config::{
    ControlConfig, IndicatorConfig, KnobConfig, PanelConfig, PollConfig, PowerSupplyConfig,
    SwitchState,
};
pub use crate::panel::label::Label;

// ─── Identifiers ────────────────────────────────────────────────────
pub use crate::panel::ids::{ControlId, IndicatorId, KnobId};

// ─── Driver contract ────────────────────────────────────────────────
pub use crate::io::capabilities::DeviceCapabilities;
pub use crate::io::channel_map::ChannelMap;
pub use crate::io::driver::{
    ChannelKind, DriverError, DriverFactory, DriverFeatures, IoDriver, Level,
};

// ─── Numerics ───────────────────────────────────────────────────────
pub use crate::bounds::{Bound, Saturated, VoltageRange, in_open_band, rescale, saturate};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEFAULT_CONFIG_PATH, DEFAULT_DRIVER, ROTATION_SCALE};
