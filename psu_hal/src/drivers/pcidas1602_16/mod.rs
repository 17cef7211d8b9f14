//! Measurement Computing PCI-DAS1602/16 driver.
//!
//! Talks to the card through the comedi kernel driver (`cb_pcidas`). The
//! device node defaults to `/dev/comedi0` and can be overridden:
//!
//! ```toml
//! [driver_config.pcidas1602_16]
//! device = "/dev/comedi1"
//! ```

mod comedi;
mod driver;

pub use comedi::{ComediDevice, from_phys, to_phys};
pub use driver::{Pcidas1602Driver, Pcidas1602Settings};

use psu_common::io::driver::IoDriver;

/// Factory function to create a PCI-DAS1602/16 driver instance.
pub fn create_driver() -> Box<dyn IoDriver> {
    Box::new(Pcidas1602Driver::new())
}
