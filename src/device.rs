//! High-level driver API for the MPU-6050
//!
//! This module provides the driver state machine: identity verification,
//! wake/reset sequencing, configuration with write-all-then-commit
//! semantics, and atomic burst reads with fixed-point scaling.

use crate::power::{ClockSource, RESET_SETTLE_MS, WAKE_SETTLE_MS};
use crate::registers::{Mpu6050 as RegisterDevice, ACCEL_XOUT_H};
use crate::sensors::{AccelFullScale, Dlpf, GyroFullScale};
use crate::{Error, WHO_AM_I_VALUE};

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

/// Sample rate divider applied at init (1 kHz / (1 + 7) = 125 Hz)
const DEFAULT_SMPLRT_DIV: u8 = 0x07;

/// Size of the contiguous sensor-data block in bytes
pub(crate) const SENSOR_DATA_LEN: usize = 14;

/// Device configuration
///
/// Mirrors the last configuration successfully written to the hardware.
/// [`Mpu6050Driver::set_config`] adopts a new value only after all four
/// configuration registers have been written, so this is never a partially
/// applied state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Sample rate divider (rate = 1 kHz / (1 + divider) with DLPF enabled)
    pub sample_rate_div: u8,
    /// Digital low-pass filter setting
    pub dlpf: Dlpf,
    /// Gyroscope full-scale range
    pub gyro_range: GyroFullScale,
    /// Accelerometer full-scale range
    pub accel_range: AccelFullScale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate_div: DEFAULT_SMPLRT_DIV,
            dlpf: Dlpf::Bw260,
            gyro_range: GyroFullScale::Dps250,
            accel_range: AccelFullScale::G2,
        }
    }
}

/// Fixed-point scale factors derived from the configured ranges
///
/// Recomputed every time a configuration is adopted; a pure function of
/// [`Config`], so a failed configuration attempt leaves the factors matching
/// the previous configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactors {
    /// Accelerometer scale in micro-g per LSB
    pub accel: u32,
    /// Gyroscope scale in micro-degrees-per-second per LSB
    pub gyro: u32,
}

impl ScaleFactors {
    /// Compute the scale factors for a configuration
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            accel: config.accel_range.scale_ug_per_lsb(),
            gyro: config.gyro_range.scale_udps_per_lsb(),
        }
    }
}

/// Raw sensor data (16-bit two's complement, as read from the device)
///
/// All seven fields come from one 14-byte burst read, so a sample is never
/// a mix of two bus transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X-axis acceleration (raw)
    pub accel_x: i16,
    /// Y-axis acceleration (raw)
    pub accel_y: i16,
    /// Z-axis acceleration (raw)
    pub accel_z: i16,
    /// Temperature (raw)
    pub temp: i16,
    /// X-axis rotation (raw)
    pub gyro_x: i16,
    /// Y-axis rotation (raw)
    pub gyro_y: i16,
    /// Z-axis rotation (raw)
    pub gyro_z: i16,
}

impl RawSample {
    /// Decode a sample from the 14-byte sensor-data block
    ///
    /// Field order is fixed by the register map: accel X/Y/Z, temperature,
    /// gyro X/Y/Z, each as a big-endian 16-bit word.
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8; SENSOR_DATA_LEN]) -> Self {
        Self {
            accel_x: i16::from_be_bytes([bytes[0], bytes[1]]),
            accel_y: i16::from_be_bytes([bytes[2], bytes[3]]),
            accel_z: i16::from_be_bytes([bytes[4], bytes[5]]),
            temp: i16::from_be_bytes([bytes[6], bytes[7]]),
            gyro_x: i16::from_be_bytes([bytes[8], bytes[9]]),
            gyro_y: i16::from_be_bytes([bytes[10], bytes[11]]),
            gyro_z: i16::from_be_bytes([bytes[12], bytes[13]]),
        }
    }
}

/// Sensor data scaled to physical units
///
/// Derived from a [`RawSample`] and the current [`ScaleFactors`] at read
/// time; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaledSample {
    /// X-axis acceleration in milli-g
    pub accel_x: i32,
    /// Y-axis acceleration in milli-g
    pub accel_y: i32,
    /// Z-axis acceleration in milli-g
    pub accel_z: i32,
    /// Temperature in centi-degrees Celsius
    pub temp: i32,
    /// X-axis rotation in milli-degrees per second
    pub gyro_x: i32,
    /// Y-axis rotation in milli-degrees per second
    pub gyro_y: i32,
    /// Z-axis rotation in milli-degrees per second
    pub gyro_z: i32,
}

impl ScaledSample {
    /// Scale a raw sample
    ///
    /// Accel axes: `(raw * accel_scale) / 1000` converts micro-g·LSB to
    /// milli-g. Gyro axes: `(raw * gyro_scale) / 1_000_000` converts
    /// micro-°/s·LSB to milli-°/s. Temperature implements the hardware's
    /// `T = raw/340 + 36.53 °C` formula scaled to centi-degrees. All
    /// intermediates fit signed 32 bits (max |raw| 32768 × max scale 61035).
    #[must_use]
    pub fn from_raw(raw: &RawSample, scale: &ScaleFactors) -> Self {
        let accel = scale.accel as i32;
        let gyro = scale.gyro as i32;
        Self {
            accel_x: i32::from(raw.accel_x) * accel / 1000,
            accel_y: i32::from(raw.accel_y) * accel / 1000,
            accel_z: i32::from(raw.accel_z) * accel / 1000,
            temp: i32::from(raw.temp) * 100 / 340 + 3653,
            gyro_x: i32::from(raw.gyro_x) * gyro / 1_000_000,
            gyro_y: i32::from(raw.gyro_y) * gyro / 1_000_000,
            gyro_z: i32::from(raw.gyro_z) * gyro / 1_000_000,
        }
    }
}

/// Main driver for the MPU-6050
///
/// Holds the in-memory mirror of the hardware configuration and the scale
/// factors derived from it. The driver itself is not internally locked;
/// callers that share one across threads must serialize access (the
/// `chardev` surface wraps it in a per-handle mutex).
pub struct Mpu6050Driver<I> {
    device: RegisterDevice<I>,
    config: Config,
    scale: ScaleFactors,
}

impl<I> Mpu6050Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new MPU-6050 driver instance
    ///
    /// This verifies the `WHO_AM_I` register but does not initialize the
    /// device. Call [`init()`](Self::init) after construction to wake the
    /// device and apply the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let device = RegisterDevice::new(interface);
        let config = Config::default();
        let mut driver = Self {
            device,
            config,
            scale: ScaleFactors::from_config(&config),
        };

        let who_am_i = driver.who_am_i()?;
        if who_am_i != WHO_AM_I_VALUE {
            return Err(Error::InvalidDevice(who_am_i));
        }

        Ok(driver)
    }

    /// Initialize the device
    ///
    /// Takes the device out of sleep by selecting the X-gyro PLL clock
    /// source, waits for the clock to stabilize, then applies the default
    /// configuration (125 Hz sample rate, DLPF off, ±250°/s, ±2g).
    ///
    /// The delay is a blocking sleep; initialization runs in attach-time
    /// context where latency does not matter.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. On failure
    /// the stored configuration is left unchanged.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        // Wake up and select the gyro PLL clock source. Writing the whole
        // register also clears the sleep bit.
        self.device.pwr_mgmt_1().write(|w| {
            w.set_clksel(ClockSource::PllGyroX as u8);
        })?;

        delay.delay_ms(WAKE_SETTLE_MS);

        self.set_config(&Config::default())
    }

    /// Apply a configuration to the hardware
    ///
    /// Writes the sample-rate divider, DLPF, gyro range and accel range
    /// registers in that order. The configuration is adopted (and the scale
    /// factors recomputed) only after all four writes succeed; a failure at
    /// any point aborts the sequence and leaves the stored configuration
    /// and scale factors at their previous values.
    ///
    /// # Errors
    ///
    /// Returns the transport error of the first failing register write.
    pub fn set_config(&mut self, config: &Config) -> Result<(), Error<I::Error>> {
        self.device.smplrt_div().write(|w| {
            w.set_smplrt_div(config.sample_rate_div);
        })?;

        self.device.config().write(|w| {
            w.set_dlpf_cfg(config.dlpf as u8);
        })?;

        self.device.gyro_config().write(|w| {
            w.set_fs_sel(config.gyro_range as u8);
        })?;

        self.device.accel_config().write(|w| {
            w.set_afs_sel(config.accel_range as u8);
        })?;

        self.config = *config;
        self.scale = ScaleFactors::from_config(config);
        Ok(())
    }

    /// Reset the device and restore the current configuration
    ///
    /// Sets the device-reset bit, waits out the reset settle delay, then
    /// replays the configuration in effect before the reset (not the
    /// hardware defaults). A failure at any step leaves the stored
    /// configuration as the last-known-good value.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.device.pwr_mgmt_1().write(|w| {
            w.set_device_reset(true);
        })?;

        delay.delay_ms(RESET_SETTLE_MS);

        let config = self.config;
        self.set_config(&config)
    }

    /// Read one raw sample
    ///
    /// Performs a single 14-byte burst read starting at `ACCEL_XOUT_H` so
    /// all seven values come from the same bus transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut buffer = [0u8; SENSOR_DATA_LEN];
        self.device
            .interface
            .read_register(ACCEL_XOUT_H, (SENSOR_DATA_LEN * 8) as u32, &mut buffer)?;

        Ok(RawSample::from_be_bytes(&buffer))
    }

    /// Read one sample scaled to physical units
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_scaled(&mut self) -> Result<ScaledSample, Error<I::Error>> {
        let raw = self.read_raw()?;
        Ok(ScaledSample::from_raw(&raw, &self.scale))
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x68 for a valid MPU-6050.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Get the current configuration
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Get the current scale factors
    #[must_use]
    pub const fn scale_factors(&self) -> &ScaleFactors {
        &self.scale
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}
