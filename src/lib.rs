#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[cfg(feature = "chardev")]
extern crate std;

pub mod device;
pub mod interface;
pub mod power;
pub mod registers;
pub mod sensors;

#[cfg(feature = "chardev")]
pub mod chardev;

// Re-export main types
pub use device::{Config, Mpu6050Driver, RawSample, ScaleFactors, ScaledSample};
pub use interface::I2cInterface;
pub use power::ClockSource;
pub use sensors::{AccelFullScale, Dlpf, GyroFullScale};

/// MPU-6050 I2C address when AD0 pin is low (default: 0x68)
///
/// This is the most common configuration. The AD0 pin is typically pulled low
/// or left floating. Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// MPU-6050 I2C address when AD0 pin is high (alternative: 0x69)
///
/// Use this address when the AD0 pin is explicitly pulled high to VDD.
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_AD0_HIGH: u8 = 0x69;

/// Expected value of `WHO_AM_I` register
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
