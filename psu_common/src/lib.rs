//! PSU Common Library
//!
//! Shared types for every crate of the bench power supply operator panel.
//!
//! # Module Structure
//!
//! - [`io`] - Driver capability contract (`IoDriver`), channel maps, device limits
//! - [`panel`] - Logical knob/control/indicator ids and the panel configuration
//! - [`config`] - Configuration loading traits and errors
//! - [`bounds`] - Numeric range helpers shared by drivers and state machines
//! - [`consts`] - Workspace-wide constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use psu_common::prelude::*;
//!
//! let span = VoltageRange::new(0.0, 10.0);
//! assert!(span.contains(5.0));
//! ```

#![warn(missing_docs)]

pub mod bounds;
pub mod config;
pub mod consts;
pub mod io;
pub mod panel;
pub mod prelude;
