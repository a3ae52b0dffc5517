//! Ioctl command family and wire-level payload codecs
//!
//! The command numbers keep the classic `_IOC` encoding (direction, size,
//! magic byte, number) so existing userspace callers keep working, but
//! internally every accepted command decodes to a tagged [`IoctlCmd`] before
//! dispatch; raw integers never reach the handlers.

use crate::device::{Config, RawSample, ScaledSample};
use crate::sensors::{AccelFullScale, Dlpf, GyroFullScale};

use super::node::Errno;

/// Magic byte identifying this driver's command family
pub const IOC_MAGIC: u8 = b'M';

/// Highest command number in the family
pub const IOC_MAXNR: u32 = 6;

/// Wire size of a raw sample (7 × i16)
pub const RAW_SAMPLE_BYTES: usize = 14;
/// Wire size of a scaled sample (7 × i32)
pub const SCALED_SAMPLE_BYTES: usize = 28;
/// Wire size of a configuration (4 × u8)
pub const CONFIG_BYTES: usize = 4;

const IOC_NONE: u32 = 0;
const IOC_WRITE: u32 = 1;
const IOC_READ: u32 = 2;

const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = 8;
const IOC_SIZESHIFT: u32 = 16;
const IOC_DIRSHIFT: u32 = 30;

const fn ioc(dir: u32, nr: u32, size: u32) -> u32 {
    (dir << IOC_DIRSHIFT)
        | ((IOC_MAGIC as u32) << IOC_TYPESHIFT)
        | (nr << IOC_NRSHIFT)
        | (size << IOC_SIZESHIFT)
}

/// Read one raw sample
pub const IOC_READ_RAW: u32 = ioc(IOC_READ, 0, RAW_SAMPLE_BYTES as u32);
/// Read one scaled sample
pub const IOC_READ_SCALED: u32 = ioc(IOC_READ, 1, SCALED_SAMPLE_BYTES as u32);
/// Apply and persist a configuration
pub const IOC_SET_CONFIG: u32 = ioc(IOC_WRITE, 2, CONFIG_BYTES as u32);
/// Snapshot the current configuration
pub const IOC_GET_CONFIG: u32 = ioc(IOC_READ, 3, CONFIG_BYTES as u32);
/// Full device reset plus reconfiguration
pub const IOC_RESET: u32 = ioc(IOC_NONE, 4, 0);
/// Raw identity register read
pub const IOC_WHO_AM_I: u32 = ioc(IOC_READ, 6, 1);

/// Decoded ioctl command
///
/// Command number 5 (self-test) is reserved in the family but has no
/// handler; like any other unrecognized encoding it decodes to `ENOTTY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoctlCmd {
    /// One raw burst read, sample copied out
    ReadRaw,
    /// One raw burst read plus scaling, sample copied out
    ReadScaled,
    /// Configuration copied in, applied, persisted
    SetConfig,
    /// Current configuration copied out
    GetConfig,
    /// Device reset and reconfiguration, no payload
    Reset,
    /// Identity register value copied out
    WhoAmI,
}

impl IoctlCmd {
    /// Decode a wire-level command word
    ///
    /// The magic byte and command number are validated first; anything
    /// outside the family, past the highest number, or not matching a
    /// handled encoding exactly fails with `ENOTTY`.
    pub fn decode(raw: u32) -> Result<Self, Errno> {
        if (raw >> IOC_TYPESHIFT) & 0xFF != IOC_MAGIC as u32 {
            return Err(Errno::ENOTTY);
        }
        if (raw >> IOC_NRSHIFT) & 0xFF > IOC_MAXNR {
            return Err(Errno::ENOTTY);
        }

        match raw {
            IOC_READ_RAW => Ok(Self::ReadRaw),
            IOC_READ_SCALED => Ok(Self::ReadScaled),
            IOC_SET_CONFIG => Ok(Self::SetConfig),
            IOC_GET_CONFIG => Ok(Self::GetConfig),
            IOC_RESET => Ok(Self::Reset),
            IOC_WHO_AM_I => Ok(Self::WhoAmI),
            _ => Err(Errno::ENOTTY),
        }
    }
}

/// Encode a raw sample into its 14-byte wire layout
///
/// Seven little-endian i16 words in register order: accel X/Y/Z,
/// temperature, gyro X/Y/Z.
#[must_use]
pub fn encode_raw_sample(sample: &RawSample) -> [u8; RAW_SAMPLE_BYTES] {
    let mut out = [0u8; RAW_SAMPLE_BYTES];
    let words = [
        sample.accel_x,
        sample.accel_y,
        sample.accel_z,
        sample.temp,
        sample.gyro_x,
        sample.gyro_y,
        sample.gyro_z,
    ];
    for (chunk, word) in out.chunks_exact_mut(2).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Encode a scaled sample into its 28-byte wire layout
///
/// Field order matches the raw layout: accel X/Y/Z, temperature,
/// gyro X/Y/Z, each a little-endian i32.
#[must_use]
pub fn encode_scaled_sample(sample: &ScaledSample) -> [u8; SCALED_SAMPLE_BYTES] {
    let mut out = [0u8; SCALED_SAMPLE_BYTES];
    let words = [
        sample.accel_x,
        sample.accel_y,
        sample.accel_z,
        sample.temp,
        sample.gyro_x,
        sample.gyro_y,
        sample.gyro_z,
    ];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Encode a configuration into its 4-byte wire layout
///
/// Byte order: sample-rate divider, gyro range, accel range, DLPF setting.
#[must_use]
pub fn encode_config(config: &Config) -> [u8; CONFIG_BYTES] {
    [
        config.sample_rate_div,
        config.gyro_range as u8,
        config.accel_range as u8,
        config.dlpf as u8,
    ]
}

/// Decode a configuration from its 4-byte wire layout
///
/// Out-of-range range and filter encodings fall back to the hardware
/// defaults (±250°/s, ±2g, filter off) rather than failing.
#[must_use]
pub fn decode_config(bytes: &[u8; CONFIG_BYTES]) -> Config {
    Config {
        sample_rate_div: bytes[0],
        gyro_range: GyroFullScale::from_bits(bytes[1]),
        accel_range: AccelFullScale::from_bits(bytes[2]),
        dlpf: Dlpf::from_bits(bytes[3]),
    }
}
