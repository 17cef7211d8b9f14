//! Panel error types.
//!
//! Two layers:
//! - [`ActionError`]: one in-loop operation failed. Logged by the event
//!   loop, never fatal.
//! - [`PanelError`]: start-up or persist failure. Start-up failures end the
//!   process with status 1.

use psu_common::config::ConfigError;
use psu_common::io::driver::DriverError;
use psu_common::panel::ids::{ControlId, IndicatorId, KnobId};
use thiserror::Error;

/// Failure of a single knob, control or indicator operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// Knob id not present in the panel.
    #[error("unknown {0}")]
    UnknownKnob(KnobId),

    /// Control id not present in the panel.
    #[error("unknown {0}")]
    UnknownControl(ControlId),

    /// Indicator id not present in the panel.
    #[error("unknown {0}")]
    UnknownIndicator(IndicatorId),

    /// The driver's channel map has no entry for this element.
    #[error("{0} has no channel on this device")]
    Unmapped(String),

    /// The driver rejected or failed the operation.
    #[error("{target}: {source}")]
    Driver {
        /// Panel element the operation was for.
        target: String,
        /// Underlying driver error.
        #[source]
        source: DriverError,
    },
}

impl ActionError {
    pub(crate) fn driver(target: impl ToString, source: DriverError) -> Self {
        Self::Driver {
            target: target.to_string(),
            source,
        }
    }
}

/// Start-up and shutdown errors.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Driver could not be resolved, initialized or ready-checked.
    #[error("driver: {0}")]
    Driver(#[from] DriverError),

    /// Knob settings could not be written back.
    #[error("persist {path}: {message}")]
    Persist {
        /// Configuration file being rewritten.
        path: String,
        /// What went wrong.
        message: String,
    },
}
