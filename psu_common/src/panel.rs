//! Operator panel identifiers and configuration.
//!
//! This module contains the logical ids of knobs, controls and indicators
//! and the configuration types loaded from `power_supply.toml`.

pub mod config;
pub mod ids;
pub mod label;
