//! Driver registry for I/O card drivers.
//!
//! Provides a `DriverRegistry` struct for registering driver factories and
//! resolving one by name at start-up. Constructed explicitly and passed by
//! value; there is no global registry.

use psu_common::io::driver::{DriverError, DriverFactory, DriverFeatures, IoDriver};
use psu_common::panel::config::PanelConfig;
use std::collections::HashMap;
use tracing::info;

/// Registry of available I/O drivers.
pub struct DriverRegistry {
    factories: HashMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in driver.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_all_drivers(&mut registry);
        registry
    }

    /// Register a driver factory.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a driver factory by name.
    pub fn get_factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Create an uninitialized driver instance by name.
    ///
    /// # Errors
    /// Returns `DriverError::DriverNotFound` if no driver with the given name is registered.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn IoDriver>, DriverError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| DriverError::DriverNotFound(name.to_string()))?;
        Ok(factory())
    }

    /// Resolve, initialize and ready-check the driver named in `config`.
    ///
    /// Every failure here is a start-up failure:
    /// 1. name not registered
    /// 2. driver lacks a capability of `DriverFeatures::REQUIRED`
    /// 3. channel map points beyond the device's channel counts
    /// 4. `init()` fails
    /// 5. `ready()` is false after `init()`
    pub fn load(&self, config: &PanelConfig) -> Result<Box<dyn IoDriver>, DriverError> {
        let mut driver = self.create_driver(&config.driver)?;
        info!("Created driver: {} v{}", driver.name(), driver.version());

        let missing = DriverFeatures::REQUIRED - driver.features();
        if !missing.is_empty() {
            return Err(DriverError::MissingFeatures {
                driver: driver.name().to_string(),
                missing,
            });
        }

        driver.channel_map().validate(driver.capabilities())?;

        driver.init(config)?;

        if !driver.ready() {
            return Err(DriverError::NotReady(format!(
                "driver '{}' reported not ready after init",
                driver.name()
            )));
        }

        info!("Driver '{}' ready", driver.name());
        Ok(driver)
    }

    /// List all registered driver names.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
