//! Logical identifiers for operator-facing panel elements.
//!
//! Ids are what the presentation layer and the configuration speak; the
//! driver's [`ChannelMap`](crate::io::channel_map::ChannelMap) turns them into
//! physical channels. Any `u32` is a representable id; ids that no table
//! knows about resolve to "unmapped".

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! logical_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Raw numeric value.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "[{}]"), self.0)
            }
        }
    };
}

logical_id!(
    /// Rotational control mapped to one analog output.
    KnobId,
    "knob"
);

logical_id!(
    /// Toggle button mapped to one digital output.
    ControlId,
    "control"
);

logical_id!(
    /// Lamp derived from one analog input.
    IndicatorId,
    "indicator"
);

impl KnobId {
    /// Output voltage selector.
    pub const OUTPUT_VOLTAGE: Self = Self(0);
}

impl ControlId {
    /// Rail enable key.
    pub const ENABLE: Self = Self(0);
    /// Output inhibit key.
    pub const INHIBIT: Self = Self(1);
    /// Interlock key.
    pub const INTERLOCK: Self = Self(2);
}

impl IndicatorId {
    /// Overload lamp.
    pub const OVERLOAD: Self = Self(0);
    /// Thermal overload lamp.
    pub const THERMAL_OVERLOAD: Self = Self(1);
    /// Interlock lamp.
    pub const INTERLOCK: Self = Self(2);
    /// Overvoltage lamp.
    pub const OVERVOLTAGE: Self = Self(3);
    /// End-of-charge lamp.
    pub const END_OF_CHARGE: Self = Self(4);
    /// Inhibit lamp.
    pub const INHIBIT: Self = Self(5);

    /// All lamps of the standard panel, in id order.
    pub const ALL: [Self; 6] = [
        Self::OVERLOAD,
        Self::THERMAL_OVERLOAD,
        Self::INTERLOCK,
        Self::OVERVOLTAGE,
        Self::END_OF_CHARGE,
        Self::INHIBIT,
    ];
}
