//! Sensor types and configuration
//!
//! Range and filter enums for the MPU-6050's accelerometer and gyroscope,
//! together with their register encodings and fixed-point scale factors.

pub mod accelerometer;
pub mod gyroscope;

pub use accelerometer::AccelFullScale;
pub use gyroscope::GyroFullScale;

/// Digital Low Pass Filter setting (`CONFIG` register DLPF_CFG field)
///
/// One filter serves both sensors. Selecting any setting other than
/// [`Dlpf::Bw260`] also drops the gyro output rate from 8 kHz to 1 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dlpf {
    /// Filter off: 260 Hz accel bandwidth, 256 Hz gyro bandwidth
    Bw260 = 0,
    /// 184 Hz accel / 188 Hz gyro bandwidth
    Bw184 = 1,
    /// 94 Hz accel / 98 Hz gyro bandwidth
    Bw94 = 2,
    /// 44 Hz accel / 42 Hz gyro bandwidth
    Bw44 = 3,
    /// 21 Hz accel / 20 Hz gyro bandwidth
    Bw21 = 4,
    /// 10 Hz accel / 10 Hz gyro bandwidth
    Bw10 = 5,
    /// 5 Hz accel / 5 Hz gyro bandwidth
    Bw5 = 6,
}

impl Dlpf {
    /// Accelerometer 3dB bandwidth in Hz
    #[must_use]
    pub const fn bandwidth_hz(self) -> u16 {
        match self {
            Self::Bw260 => 260,
            Self::Bw184 => 184,
            Self::Bw94 => 94,
            Self::Bw44 => 44,
            Self::Bw21 => 21,
            Self::Bw10 => 10,
            Self::Bw5 => 5,
        }
    }

    /// Decode a DLPF_CFG field value
    ///
    /// Value 7 is reserved by the hardware; it and anything out of range
    /// decode to the filter-off setting.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Bw184,
            2 => Self::Bw94,
            3 => Self::Bw44,
            4 => Self::Bw21,
            5 => Self::Bw10,
            6 => Self::Bw5,
            _ => Self::Bw260,
        }
    }
}
