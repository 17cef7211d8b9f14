//! I/O card driver implementations.
//!
//! - [`simulation`] - Software card for development and testing
//! - [`pcidas1602_16`] - Measurement Computing PCI-DAS1602/16 through the comedi kernel interface
//!
//! Both drivers present the same device family, described in [`wiring`].
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `IoDriver` trait from `psu_common::io::driver`
//! 3. Register the factory in [`register_all_drivers`]

#[cfg(target_os = "linux")]
pub mod pcidas1602_16;
pub mod simulation;
pub mod wiring;

use crate::driver_registry::DriverRegistry;

/// Register every built-in driver.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register("simulation", simulation::create_driver);

    #[cfg(target_os = "linux")]
    registry.register("pcidas1602_16", pcidas1602_16::create_driver);
}
