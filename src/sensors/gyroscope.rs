//! Gyroscope types and configuration
//!
//! Provides the full-scale range enum and scale factors for the MPU-6050's
//! 3-axis gyroscope.

/// Gyroscope full-scale range (`GYRO_CONFIG` FS_SEL field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250°/s range
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl GyroFullScale {
    /// Get the scale factor in micro-degrees-per-second per LSB
    ///
    /// Used for fixed-point conversion of raw samples to milli-°/s:
    /// `mdps = (raw * scale) / 1_000_000`.
    #[must_use]
    pub const fn scale_udps_per_lsb(self) -> u32 {
        match self {
            Self::Dps250 => 7633,   // 1/131 °/s ≈ 7.633 mdps/LSB
            Self::Dps500 => 15267,  // 1/65.5 °/s
            Self::Dps1000 => 30518, // 1/32.8 °/s
            Self::Dps2000 => 61035, // 1/16.4 °/s
        }
    }

    /// Get the maximum measurable value in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }

    /// Decode an FS_SEL field value
    ///
    /// Unrecognized encodings decode to the ±250°/s default.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Dps500,
            2 => Self::Dps1000,
            3 => Self::Dps2000,
            _ => Self::Dps250,
        }
    }
}

impl Default for GyroFullScale {
    fn default() -> Self {
        Self::Dps250
    }
}
