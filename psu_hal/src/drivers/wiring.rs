//! Wiring of the ALE 102 prototype board onto a PCI-DAS1602/16.
//!
//! The board routes the supply's programming input to AO0, its three
//! control lines to the 8255 port A and its six status lines to the upper
//! eight single-ended analog inputs.

use psu_common::bounds::VoltageRange;
use psu_common::io::capabilities::DeviceCapabilities;
use psu_common::io::channel_map::ChannelMap;
use psu_common::panel::ids::{ControlId, IndicatorId, KnobId};
use static_assertions::const_assert;

/// First analog input carrying a status line.
pub const INDICATOR_CHANNEL_BASE: u32 = 8;

/// Digital lines the board requires low before the supply is touched.
pub const SAFE_LOW_LINES: [u32; 3] = [0, 2, 4];

/// PCI-DAS1602/16 limits in the ranges the board uses.
pub const CAPABILITIES: DeviceCapabilities = DeviceCapabilities {
    analog_inputs: 16,
    analog_outputs: 2,
    digital_channels: 24,
    analog_input_range: VoltageRange::new(-10.0, 10.0),
    analog_output_range: VoltageRange::new(0.0, 10.0),
};

const_assert!(INDICATOR_CHANNEL_BASE + IndicatorId::ALL.len() as u32 <= CAPABILITIES.analog_inputs);

static KNOBS: [(KnobId, u32); 1] = [(KnobId::OUTPUT_VOLTAGE, 0)];

static CONTROLS: [(ControlId, u32); 3] = [
    (ControlId::ENABLE, 4),
    (ControlId::INHIBIT, 0),
    (ControlId::INTERLOCK, 2),
];

static INDICATORS: [(IndicatorId, u32); 6] = [
    (IndicatorId::OVERLOAD, INDICATOR_CHANNEL_BASE),
    (IndicatorId::THERMAL_OVERLOAD, INDICATOR_CHANNEL_BASE + 1),
    (IndicatorId::INTERLOCK, INDICATOR_CHANNEL_BASE + 2),
    (IndicatorId::OVERVOLTAGE, INDICATOR_CHANNEL_BASE + 3),
    (IndicatorId::END_OF_CHARGE, INDICATOR_CHANNEL_BASE + 4),
    (IndicatorId::INHIBIT, INDICATOR_CHANNEL_BASE + 5),
];

/// Logical id → card channel table shared by every driver of this family.
pub static CHANNEL_MAP: ChannelMap = ChannelMap::new(&KNOBS, &CONTROLS, &INDICATORS);
