//! Unit tests for error handling and recovery

use crate::common::{create_mock_driver, create_ready_driver, MockDelay, MockError};
use itg3200::{Axis, DeviceState, Error, GyroConfig};

#[test]
fn test_reads_before_init_are_rejected() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_gyro_data(1, 2, 3);

    assert!(matches!(driver.read_raw_all(), Err(Error::InvalidState)));
    assert!(matches!(driver.read_raw_axis(Axis::Y), Err(Error::InvalidState)));
    assert!(matches!(driver.read_calibrated_raw(), Err(Error::InvalidState)));
    assert!(matches!(driver.read_physical(), Err(Error::InvalidState)));
    assert!(matches!(driver.read_physical_radians(), Err(Error::InvalidState)));
    assert!(matches!(driver.read_temperature(), Err(Error::InvalidState)));
    assert!(matches!(driver.read_temperature_raw(), Err(Error::InvalidState)));

    // Nothing reached the bus
    assert!(interface.operations().is_empty());
}

#[test]
fn test_configuration_allowed_before_init() {
    let (mut driver, _interface) = create_mock_driver();

    driver.set_sample_rate_div(3).unwrap();
    assert_eq!(driver.sample_rate_div().unwrap(), 3);
    assert_eq!(driver.state(), DeviceState::Uninitialized);
}

#[test]
fn test_read_failure_propagates() {
    let (mut driver, interface) = create_ready_driver();

    interface.fail_next_read();
    let result = driver.read_raw_all();

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_ready_driver();

    interface.fail_next_read();
    assert!(driver.read_physical().is_err(), "First read should fail");

    // Error was only for one operation
    interface.set_gyro_data(100, 200, 300);
    let raw = driver.read_raw_all().unwrap();
    assert_eq!((raw.x, raw.y, raw.z), (100, 200, 300));
}

#[test]
fn test_temperature_read_failure_is_not_zero() {
    let (mut driver, interface) = create_ready_driver();
    interface.set_temperature_data(0);

    interface.fail_next_read();
    assert!(matches!(
        driver.read_temperature(),
        Err(Error::Bus(MockError::Communication))
    ));
}

#[test]
fn test_setter_read_failure_skips_write() {
    let (mut driver, interface) = create_ready_driver();

    interface.fail_next_read();
    let result = driver.set_low_power(true);

    assert!(result.is_err());
    assert_eq!(interface.write_count(), 0);
}

#[test]
fn test_setter_write_failure() {
    let (mut driver, interface) = create_ready_driver();

    interface.fail_next_write();
    let result = driver.set_int_open_drain(true);

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert!(!driver.is_int_open_drain().unwrap());
}

#[test]
fn test_init_failure_stays_uninitialized() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();
    let mut delay = MockDelay::new();
    let result = driver.init_with(&GyroConfig::default(), &mut delay);

    assert!(result.is_err());
    assert_eq!(driver.state(), DeviceState::Uninitialized);
    assert!(delay.delays_ms.is_empty());
}

#[test]
fn test_reset_write_failure_keeps_state() {
    let (mut driver, interface) = create_ready_driver();

    interface.fail_next_write();
    assert!(driver.reset().is_err());
    assert_eq!(driver.state(), DeviceState::Ready);
}
