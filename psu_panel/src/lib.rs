//! # PSU Panel Library
//!
//! Operator panel for a programmable bench power supply: knobs set the
//! output voltage through an analog output, toggles drive the supply's
//! enable/inhibit/interlock lines, and lamps mirror its status lines.
//!
//! # Module Structure
//!
//! - [`panel`] - `Panel` context object and event loop
//! - [`knob`] - Knob voltage state machine
//! - [`toggle`] - Control toggle state machine
//! - [`indicator`] - Indicator classification and polling report
//! - [`event`] - Presentation boundary (events, snapshots, ticker)
//! - [`console`] - stdin command reader and console presenter
//! - [`persist`] - Knob settings write-back on exit
//! - [`error`] - Action and start-up errors
//!
//! # Example
//!
//! ```no_run
//! use psu_common::config::ConfigLoader;
//! use psu_common::panel::config::PanelConfig;
//! use psu_hal::DriverRegistry;
//! use psu_panel::console::ConsolePresenter;
//! use psu_panel::event::PanelEvent;
//! use psu_panel::panel::Panel;
//! use std::path::Path;
//! use std::sync::mpsc;
//!
//! let config = PanelConfig::load(Path::new("data/power_supply.toml")).unwrap();
//! let mut panel = Panel::start(config, &DriverRegistry::with_builtin_drivers()).unwrap();
//! let (tx, mut rx) = mpsc::channel();
//! tx.send(PanelEvent::Tick).unwrap();
//! drop(tx);
//! panel.run(&mut rx, &mut ConsolePresenter::new(std::io::stdout(), false));
//! ```

#![warn(missing_docs)]

pub mod console;
pub mod error;
pub mod event;
pub mod indicator;
pub mod knob;
pub mod panel;
pub mod persist;
pub mod toggle;

pub use crate::error::{ActionError, PanelError};
pub use crate::event::{EventSource, PanelEvent, PanelSnapshot, Presenter};
pub use crate::panel::{Flow, Panel, RunSummary};
