//! System-wide constants for the PSU workspace.
//!
//! Single source of truth for calibration defaults and default paths.

use std::f64::consts::PI;

/// Default configuration file path (relative to the working directory).
pub const DEFAULT_CONFIG_PATH: &str = "data/power_supply.toml";

/// Driver selected when the configuration does not name one.
pub const DEFAULT_DRIVER: &str = "simulation";

/// Radians of knob travel per raw wheel unit reported by the presentation layer.
pub const ROTATION_SCALE: f64 = PI / 256.0;

/// Default indicator poll period (~30 Hz).
pub const DEFAULT_TICK_PERIOD_MS: u64 = 33;

/// Default lower edge of the indicator "normal operating window" [V].
pub const DEFAULT_INDICATOR_LOWER_THRESHOLD: f64 = 0.2;

/// Default upper edge of the indicator "normal operating window" [V].
pub const DEFAULT_INDICATOR_UPPER_THRESHOLD: f64 = 0.7;

/// Maximum length in bytes of any operator-visible title.
pub const TITLE_CAPACITY: usize = 64;
