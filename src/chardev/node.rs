//! Device handle and open-file surface
//!
//! A [`DeviceHandle`] pairs one driver with one delay provider behind a
//! single mutex; every register-touching operation, including the reset
//! settle sleeps, runs inside one critical section on that mutex. An
//! [`OpenFile`] is what `open` hands out: a shared reference to the handle
//! with the `read`/`ioctl` entry points and the errno translation that
//! callers see.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

use crate::device::{Mpu6050Driver, RawSample};
use crate::Error;

use super::ioctl::{self, IoctlCmd, CONFIG_BYTES, RAW_SAMPLE_BYTES};

/// Error numbers returned to callers
///
/// The userspace surface is the only layer that translates driver errors
/// into this fixed set; everything below it propagates typed errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Errno {
    /// I/O error (transport failure: NACK, timeout, device absent)
    EIO = 5,
    /// Bad address (user-memory copy failed)
    EFAULT = 14,
    /// No such device (nothing attached, or identity mismatch)
    ENODEV = 19,
    /// Invalid argument (undersized read buffer)
    EINVAL = 22,
    /// Inappropriate ioctl for device (unrecognized command)
    ENOTTY = 25,
}

impl Errno {
    /// The negative error code as a caller sees it
    #[must_use]
    pub const fn code(self) -> i32 {
        -(self as i32)
    }
}

impl<E> From<Error<E>> for Errno {
    fn from(error: Error<E>) -> Self {
        match error {
            Error::Bus(_) => Self::EIO,
            Error::InvalidDevice(_) => Self::ENODEV,
        }
    }
}

struct Inner<I, D> {
    driver: Mpu6050Driver<I>,
    delay: D,
}

/// One attached device: driver plus delay provider behind one lock
///
/// The lock serializes reads, configuration changes and resets against each
/// other, so no bus transaction of one logical operation interleaves with
/// another's. It is held for the whole duration of a burst or write
/// sequence, reset sleeps included.
pub struct DeviceHandle<I, D> {
    inner: Mutex<Inner<I, D>>,
}

impl<I, D> DeviceHandle<I, D>
where
    I: RegisterInterface<AddressType = u8>,
    D: DelayNs,
{
    pub(crate) fn new(driver: Mpu6050Driver<I>, delay: D) -> Self {
        Self {
            inner: Mutex::new(Inner { driver, delay }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<I, D>> {
        // State behind a poisoned lock is still consistent: configuration
        // adoption is all-or-nothing.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read one raw sample under the handle lock
    pub(crate) fn read_raw(&self) -> Result<RawSample, Errno> {
        self.lock().driver.read_raw().map_err(Errno::from)
    }
}

/// An open file handle on the shared device node
///
/// Cheap to clone; every clone refers to the same underlying device and
/// competes for the same lock.
#[derive(Clone)]
pub struct OpenFile<I, D> {
    handle: Arc<DeviceHandle<I, D>>,
}

impl<I, D> OpenFile<I, D>
where
    I: RegisterInterface<AddressType = u8>,
    D: DelayNs,
{
    pub(crate) fn new(handle: Arc<DeviceHandle<I, D>>) -> Self {
        Self { handle }
    }

    /// Read one raw sample into `buf`
    ///
    /// `buf` must hold at least one full raw sample (14 bytes); a smaller
    /// buffer fails with `EINVAL` and nothing is copied. On success the
    /// sample is copied out and the byte count returned.
    ///
    /// # Errors
    ///
    /// `EINVAL` for an undersized buffer, `EIO` for a transport failure.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, Errno> {
        if buf.len() < RAW_SAMPLE_BYTES {
            return Err(Errno::EINVAL);
        }

        let raw = self.handle.read_raw()?;

        buf[..RAW_SAMPLE_BYTES].copy_from_slice(&ioctl::encode_raw_sample(&raw));
        Ok(RAW_SAMPLE_BYTES)
    }

    /// Dispatch one ioctl command
    ///
    /// `cmd` is the wire-level command word; `arg` stands in for the
    /// caller's memory and must be large enough for the command's payload,
    /// else the copy fails with `EFAULT` (distinct from a transport error,
    /// and reported even when the register operation itself succeeded).
    /// Payloads are copied out only after the whole operation has
    /// succeeded.
    ///
    /// # Errors
    ///
    /// `ENOTTY` for commands outside the family, `EFAULT` for payload copy
    /// failures, otherwise the translated driver error.
    pub fn ioctl(&self, cmd: u32, arg: &mut [u8]) -> Result<(), Errno> {
        match IoctlCmd::decode(cmd)? {
            IoctlCmd::ReadRaw => {
                let raw = self.handle.read_raw()?;
                copy_out(arg, &ioctl::encode_raw_sample(&raw))
            }
            IoctlCmd::ReadScaled => {
                let scaled = {
                    let mut inner = self.handle.lock();
                    inner.driver.read_scaled().map_err(Errno::from)?
                };
                copy_out(arg, &ioctl::encode_scaled_sample(&scaled))
            }
            IoctlCmd::SetConfig => {
                let mut bytes = [0u8; CONFIG_BYTES];
                copy_in(arg, &mut bytes)?;
                let config = ioctl::decode_config(&bytes);
                let mut inner = self.handle.lock();
                inner.driver.set_config(&config).map_err(Errno::from)
            }
            IoctlCmd::GetConfig => {
                let config = *self.handle.lock().driver.config();
                copy_out(arg, &ioctl::encode_config(&config))
            }
            IoctlCmd::Reset => {
                let mut guard = self.handle.lock();
                let inner = &mut *guard;
                inner.driver.reset(&mut inner.delay).map_err(Errno::from)
            }
            IoctlCmd::WhoAmI => {
                let value = {
                    let mut inner = self.handle.lock();
                    inner.driver.who_am_i().map_err(Errno::from)?
                };
                copy_out(arg, &[value])
            }
        }
    }
}

fn copy_out(dst: &mut [u8], payload: &[u8]) -> Result<(), Errno> {
    if dst.len() < payload.len() {
        return Err(Errno::EFAULT);
    }
    dst[..payload.len()].copy_from_slice(payload);
    Ok(())
}

fn copy_in(src: &[u8], payload: &mut [u8]) -> Result<(), Errno> {
    if src.len() < payload.len() {
        return Err(Errno::EFAULT);
    }
    payload.copy_from_slice(&src[..payload.len()]);
    Ok(())
}
