//! I/O card driver contract.
//!
//! This module contains the capability contract every I/O card driver
//! implements, the channel-map lookup and the device limits a driver
//! declares.

pub mod capabilities;
pub mod channel_map;
pub mod driver;
