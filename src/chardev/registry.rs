//! Device registry and attach/detach hooks
//!
//! The transport subsystem calls [`DeviceRegistry::probe`] once per attached
//! bus instance and [`DeviceRegistry::remove`] on detach. Every successful
//! probe gets its own [`DeviceHandle`] with an independent lock domain; the
//! first one additionally becomes the primary handle backing the shared
//! device node, an explicit stand-in for the usual process-wide singleton
//! pointer. Later attaches initialize fully but do not replace the node.

use std::sync::Arc;
use std::vec::Vec;

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

use crate::device::Mpu6050Driver;
use crate::Error;

use super::node::{DeviceHandle, Errno, OpenFile};

/// Registry of attached devices with a first-attach-wins primary node
pub struct DeviceRegistry<I, D> {
    devices: Vec<Arc<DeviceHandle<I, D>>>,
    primary: Option<Arc<DeviceHandle<I, D>>>,
}

impl<I, D> DeviceRegistry<I, D>
where
    I: RegisterInterface<AddressType = u8>,
    D: DelayNs,
{
    /// Create an empty registry (no node until the first attach)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
            primary: None,
        }
    }

    /// Attach hook: verify, initialize and register one device
    ///
    /// Identity verification happens first; a device answering with the
    /// wrong `WHO_AM_I` value fails the whole attach and registers nothing
    /// (no handle, no node). Initialization then wakes the device and
    /// applies the default configuration. The first handle to register
    /// becomes the primary one serving [`open()`](Self::open).
    ///
    /// # Errors
    ///
    /// Returns the driver error of the failing step; the registry is left
    /// unchanged on failure.
    pub fn probe(
        &mut self,
        interface: I,
        mut delay: D,
    ) -> Result<Arc<DeviceHandle<I, D>>, Error<I::Error>> {
        let mut driver = Mpu6050Driver::new(interface)?;
        driver.init(&mut delay)?;

        let handle = Arc::new(DeviceHandle::new(driver, delay));
        self.devices.push(Arc::clone(&handle));
        if self.primary.is_none() {
            self.primary = Some(Arc::clone(&handle));
        }
        Ok(handle)
    }

    /// Detach hook: unregister one device
    ///
    /// Removing the primary handle takes the shared node away with it;
    /// remaining handles stay registered but none is promoted (the next
    /// probe becomes primary again).
    pub fn remove(&mut self, handle: &Arc<DeviceHandle<I, D>>) {
        self.devices.retain(|dev| !Arc::ptr_eq(dev, handle));
        if let Some(primary) = &self.primary {
            if Arc::ptr_eq(primary, handle) {
                self.primary = None;
            }
        }
    }

    /// Open the shared device node
    ///
    /// # Errors
    ///
    /// `ENODEV` when no device has successfully attached yet.
    pub fn open(&self) -> Result<OpenFile<I, D>, Errno> {
        self.primary
            .as_ref()
            .map(|handle| OpenFile::new(Arc::clone(handle)))
            .ok_or(Errno::ENODEV)
    }

    /// Whether the shared device node currently exists
    #[must_use]
    pub fn has_node(&self) -> bool {
        self.primary.is_some()
    }

    /// Number of attached devices
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

impl<I, D> Default for DeviceRegistry<I, D>
where
    I: RegisterInterface<AddressType = u8>,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}
