//! Simulation driver module.
//!
//! Software rendition of the PCI-DAS1602/16 card behind the ALE 102 board,
//! for development and testing without hardware.

mod driver;
mod io;

pub use driver::SimulationDriver;
pub use io::{AnalogLink, IoSimulator, SimulatedInput, SimulationSettings};

use psu_common::io::driver::IoDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn IoDriver> {
    Box::new(SimulationDriver::new())
}
