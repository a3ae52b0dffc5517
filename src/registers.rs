//! Register definitions for the MPU-6050
//!
//! Unlike its bank-switched successors, the MPU-6050 exposes a single flat
//! register space. Only the registers the driver actually touches are
//! modelled as bit fields here; the contiguous sensor-data block starting at
//! `ACCEL_XOUT_H` (0x3B) is read as one 14-byte burst through the raw
//! interface to keep samples atomic.

device_driver::create_device!(
    device_name: Mpu6050,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// SMPLRT_DIV - Sample Rate Divider (0x19)
        /// Sample rate = gyro output rate / (1 + SMPLRT_DIV)
        register SmplrtDiv {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            /// Divider applied to the 1 kHz gyro output rate
            smplrt_div: uint = 0..8,
        },

        /// CONFIG - Configuration (0x1A)
        register Config {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Digital low-pass filter setting (0-6)
            dlpf_cfg: uint = 0..3,
            /// External frame synchronization
            ext_sync_set: uint = 3..6,
            reserved_7_6: uint = 6..8,
        },

        /// GYRO_CONFIG - Gyroscope Configuration (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale range select (0=±250, 1=±500, 2=±1000, 3=±2000 °/s)
            fs_sel: uint = 3..5,
            /// Z-axis self-test
            zg_st: bool = 5,
            /// Y-axis self-test
            yg_st: bool = 6,
            /// X-axis self-test
            xg_st: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer Configuration (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            /// High-pass filter setting
            accel_hpf: uint = 0..3,
            /// Full-scale range select (0=±2g, 1=±4g, 2=±8g, 3=±16g)
            afs_sel: uint = 3..5,
            /// Z-axis self-test
            za_st: bool = 5,
            /// Y-axis self-test
            ya_st: bool = 6,
            /// X-axis self-test
            xa_st: bool = 7,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (0=internal 8MHz, 1-3=gyro PLL, 7=stop)
            clksel: uint = 0..3,
            /// Temperature sensor disable
            temp_dis: bool = 3,
            reserved_4: uint = 4..5,
            /// Cycle between sleep and sampling
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Device reset (self-clearing)
            device_reset: bool = 7,
        },

        /// PWR_MGMT_2 - Power Management 2 (0x6C)
        register PwrMgmt2 {
            const ADDRESS = 0x6C;
            const SIZE_BITS = 8;

            /// Put gyroscope Z-axis in standby
            stby_zg: bool = 0,
            /// Put gyroscope Y-axis in standby
            stby_yg: bool = 1,
            /// Put gyroscope X-axis in standby
            stby_xg: bool = 2,
            /// Put accelerometer Z-axis in standby
            stby_za: bool = 3,
            /// Put accelerometer Y-axis in standby
            stby_ya: bool = 4,
            /// Put accelerometer X-axis in standby
            stby_xa: bool = 5,
            /// Wake-up frequency in cycle mode
            lp_wake_ctrl: uint = 6..8,
        },

        /// WHO_AM_I - Device ID Register (0x75)
        /// Expected value: 0x68
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID (should read 0x68)
            who_am_i: uint = 0..8,
        }
    }
);

/// First register of the 14-byte sensor-data block
/// (accel X/Y/Z, temperature, gyro X/Y/Z; high byte first)
pub const ACCEL_XOUT_H: u8 = 0x3B;
