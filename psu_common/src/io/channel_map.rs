//! Logical id → physical channel resolution.
//!
//! Each driver ships the table for its device family; the panel never
//! hard-codes channel numbers. Lookups are pure and return `None` for ids
//! the table does not cover.

use super::capabilities::DeviceCapabilities;
use super::driver::{ChannelKind, DriverError};
use crate::panel::ids::{ControlId, IndicatorId, KnobId};

/// Static mapping tables of one device family.
#[derive(Debug, Clone, Copy)]
pub struct ChannelMap {
    knobs: &'static [(KnobId, u32)],
    controls: &'static [(ControlId, u32)],
    indicators: &'static [(IndicatorId, u32)],
}

impl ChannelMap {
    /// Build a map from static tables.
    pub const fn new(
        knobs: &'static [(KnobId, u32)],
        controls: &'static [(ControlId, u32)],
        indicators: &'static [(IndicatorId, u32)],
    ) -> Self {
        Self {
            knobs,
            controls,
            indicators,
        }
    }

    /// Map with no entries; every lookup is unmapped.
    pub const fn empty() -> Self {
        Self::new(&[], &[], &[])
    }

    /// Analog output channel driven by `knob`.
    pub fn knob_channel(&self, knob: KnobId) -> Option<u32> {
        lookup(self.knobs, knob)
    }

    /// Digital channel driven by `control`.
    pub fn control_channel(&self, control: ControlId) -> Option<u32> {
        lookup(self.controls, control)
    }

    /// Analog input channel sampled for `indicator`.
    pub fn indicator_channel(&self, indicator: IndicatorId) -> Option<u32> {
        lookup(self.indicators, indicator)
    }

    /// Check every mapped channel against the device's declared counts.
    pub fn validate(&self, caps: &DeviceCapabilities) -> Result<(), DriverError> {
        for &(_, ch) in self.knobs {
            caps.check_channel(ChannelKind::AnalogOutput, ch)?;
        }
        for &(_, ch) in self.controls {
            caps.check_channel(ChannelKind::Digital, ch)?;
        }
        for &(_, ch) in self.indicators {
            caps.check_channel(ChannelKind::AnalogInput, ch)?;
        }
        Ok(())
    }
}

fn lookup<K: PartialEq + Copy>(table: &[(K, u32)], key: K) -> Option<u32> {
    table.iter().find(|(k, _)| *k == key).map(|&(_, ch)| ch)
}
