//! Unit tests for sample decoding and scaling
//!
//! Covers burst-read atomicity at the bus level, big-endian decode order,
//! and the fixed-point conversion arithmetic.

use crate::common::{create_initialized_driver, Operation};
use mpu6050_chardev::{RawSample, ScaleFactors, ScaledSample};

const ACCEL_XOUT_H: u8 = 0x3B;

#[test]
fn test_raw_read_values() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_raw_sample([1000, -2000, 3000, 340, -100, 200, -300]);

    let raw = driver.read_raw().unwrap();
    assert_eq!(raw.accel_x, 1000);
    assert_eq!(raw.accel_y, -2000);
    assert_eq!(raw.accel_z, 3000);
    assert_eq!(raw.temp, 340);
    assert_eq!(raw.gyro_x, -100);
    assert_eq!(raw.gyro_y, 200);
    assert_eq!(raw.gyro_z, -300);
}

#[test]
fn test_raw_read_is_one_burst() {
    let (mut driver, interface) = create_initialized_driver();
    interface.clear_operations();

    driver.read_raw().unwrap();

    // Exactly one 14-byte burst: consecutive addresses from ACCEL_XOUT_H,
    // nothing else on the bus.
    let reads: Vec<u8> = interface
        .operations()
        .iter()
        .map(|op| match op {
            Operation::ReadRegister { address, .. } => *address,
            Operation::WriteRegister { .. } => panic!("unexpected write during read_raw"),
        })
        .collect();

    assert_eq!(reads.len(), 14);
    for (i, &addr) in reads.iter().enumerate() {
        assert_eq!(addr, ACCEL_XOUT_H + i as u8);
    }
}

#[test]
fn test_extreme_raw_values() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_raw_sample([
        i16::MAX,
        i16::MIN,
        0,
        i16::MIN,
        i16::MAX,
        i16::MIN,
        -1,
    ]);

    let raw = driver.read_raw().unwrap();
    assert_eq!(raw.accel_x, i16::MAX);
    assert_eq!(raw.accel_y, i16::MIN);
    assert_eq!(raw.temp, i16::MIN);
    assert_eq!(raw.gyro_z, -1);
}

#[test]
fn test_scaled_read_default_ranges() {
    let (mut driver, interface) = create_initialized_driver();

    // 1g on Z at ±2g is 16384 LSB; 16384 * 61 / 1000 = 999 mg
    interface.set_raw_sample([0, 0, 16384, 0, 0, 0, 131]);

    let scaled = driver.read_scaled().unwrap();
    assert_eq!(scaled.accel_x, 0);
    assert_eq!(scaled.accel_z, 999);
    assert_eq!(scaled.temp, 3653);
    // 1°/s at ±250°/s is 131 LSB; 131 * 7633 = 999_923, truncates to 0 mdps
    assert_eq!(scaled.gyro_z, 0);
}

#[test]
fn test_scaling_is_deterministic() {
    let raw = RawSample {
        accel_x: 123,
        accel_y: -456,
        accel_z: 789,
        temp: -1000,
        gyro_x: 32000,
        gyro_y: -32000,
        gyro_z: 1,
    };
    let scale = ScaleFactors {
        accel: 122,
        gyro: 15267,
    };

    let first = ScaledSample::from_raw(&raw, &scale);
    let second = ScaledSample::from_raw(&raw, &scale);
    assert_eq!(first, second);
}

#[test]
fn test_scaling_boundary_no_overflow() {
    // Most negative raw at the widest ranges stays within i32 intermediates
    let raw = RawSample {
        accel_x: -32768,
        accel_y: 0,
        accel_z: 0,
        temp: 0,
        gyro_x: -32768,
        gyro_y: 0,
        gyro_z: 0,
    };
    let scale = ScaleFactors {
        accel: 488,
        gyro: 61035,
    };

    let scaled = ScaledSample::from_raw(&raw, &scale);
    assert_eq!(scaled.accel_x, -15990);
    assert_eq!(scaled.gyro_x, -1999);
}

#[test]
fn test_truncation_toward_zero() {
    // Integer division truncates toward zero for both signs
    let raw = RawSample {
        accel_x: 1,
        accel_y: -1,
        accel_z: 0,
        temp: 0,
        gyro_x: 1,
        gyro_y: -1,
        gyro_z: 0,
    };
    let scale = ScaleFactors {
        accel: 61,
        gyro: 7633,
    };

    let scaled = ScaledSample::from_raw(&raw, &scale);
    assert_eq!(scaled.accel_x, 0);
    assert_eq!(scaled.accel_y, 0);
    assert_eq!(scaled.gyro_x, 0);
    assert_eq!(scaled.gyro_y, 0);
}

#[test]
fn test_temperature_conversion() {
    let scale = ScaleFactors {
        accel: 61,
        gyro: 7633,
    };
    let sample = |temp| RawSample {
        accel_x: 0,
        accel_y: 0,
        accel_z: 0,
        temp,
        gyro_x: 0,
        gyro_y: 0,
        gyro_z: 0,
    };

    // T = raw/340 + 36.53, in centi-degrees
    assert_eq!(ScaledSample::from_raw(&sample(0), &scale).temp, 3653);
    assert_eq!(ScaledSample::from_raw(&sample(340), &scale).temp, 3753);
    assert_eq!(ScaledSample::from_raw(&sample(-340), &scale).temp, 3553);
    // 85°C point: raw = (85 - 36.53) * 340 = 16479.8
    assert_eq!(ScaledSample::from_raw(&sample(16480), &scale).temp, 8500);
}

#[test]
fn test_scaled_read_uses_current_ranges() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_raw_sample([1000, 0, 0, 0, 1000, 0, 0]);

    let at_default = driver.read_scaled().unwrap();
    assert_eq!(at_default.accel_x, 1000 * 61 / 1000);
    assert_eq!(at_default.gyro_x, 1000 * 7633 / 1_000_000);

    driver.set_config(&crate::common::custom_config()).unwrap();

    let at_custom = driver.read_scaled().unwrap();
    assert_eq!(at_custom.accel_x, 1000 * 244 / 1000);
    assert_eq!(at_custom.gyro_x, 1000 * 30518 / 1_000_000);
}
