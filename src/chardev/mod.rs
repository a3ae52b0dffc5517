//! Character-device style userspace surface
//!
//! Models the classic `/dev/mpu6050` interface: a registry of attached
//! devices with one shared node, `open` handing out file handles, `read`
//! returning one raw sample per call, and an ioctl command family for raw
//! and scaled reads, configuration, reset and identity.
//!
//! Every operation on a handle is serialized by that handle's lock;
//! concurrent callers block rather than interleave bus transactions. Error
//! translation to errno-style codes happens here and nowhere else.
//!
//! Requires `std` (enabled through the `chardev` feature).

pub mod ioctl;
pub mod node;
pub mod registry;

pub use ioctl::{
    IoctlCmd, CONFIG_BYTES, IOC_GET_CONFIG, IOC_MAGIC, IOC_MAXNR, IOC_READ_RAW,
    IOC_READ_SCALED, IOC_RESET, IOC_SET_CONFIG, IOC_WHO_AM_I, RAW_SAMPLE_BYTES,
    SCALED_SAMPLE_BYTES,
};
pub use node::{DeviceHandle, Errno, OpenFile};
pub use registry::DeviceRegistry;
