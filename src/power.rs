//! Power management for the MPU-6050
//!
//! The MPU-6050 powers up in sleep mode with the internal 8 MHz oscillator
//! selected. Before sensor data is meaningful the device must be taken out
//! of sleep and given a stable clock; the gyroscope PLL is the recommended
//! source. Both waking and a full device reset need a settle delay before
//! register contents can be trusted.

/// Clock source selection (`PWR_MGMT_1` CLKSEL field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal 8 MHz oscillator
    Internal8MHz = 0,
    /// PLL with X-axis gyroscope reference (recommended)
    PllGyroX = 1,
    /// PLL with Y-axis gyroscope reference
    PllGyroY = 2,
    /// PLL with Z-axis gyroscope reference
    PllGyroZ = 3,
    /// PLL with external 32.768 kHz reference
    PllExternal32k = 4,
    /// PLL with external 19.2 MHz reference
    PllExternal19M = 5,
    /// Stop the clock, keep timing generator in reset
    Stop = 7,
}

/// Settle delay after waking the device from sleep, in milliseconds
///
/// The gyro PLL needs this long to stabilize before readings are trustworthy.
pub const WAKE_SETTLE_MS: u32 = 50;

/// Settle delay after a full device reset, in milliseconds
pub const RESET_SETTLE_MS: u32 = 100;
