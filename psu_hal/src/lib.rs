//! # PSU HAL Library
//!
//! I/O card drivers for the bench power supply operator panel.
//!
//! Drivers implement the `IoDriver` trait defined in `psu_common::io::driver`
//! and are resolved by name through a [`DriverRegistry`] at start-up.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration and start-up resolution
//! - [`drivers`] - Driver implementations (`simulation`, `pcidas1602_16`)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       psu_hal                            │
//! │  ┌──────────────────┐        ┌────────────────────────┐  │
//! │  │  DriverRegistry  │───────►│  IoDriver (trait obj)  │  │
//! │  │  name → factory  │        └───────────┬────────────┘  │
//! │  └──────────────────┘                    │               │
//! │                           ┌──────────────┴───────────┐   │
//! │                           ▼                          ▼   │
//! │                 SimulationDriver         Pcidas1602Driver│
//! │                 (software card)          (/dev/comedi0)  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod driver_registry;
pub mod drivers;

pub use crate::driver_registry::DriverRegistry;
