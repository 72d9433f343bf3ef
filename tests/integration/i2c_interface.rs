//! Integration tests for the I2C bus interface

use crate::common::MockDelay;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use itg3200::registers::{GYRO_XOUT, SMPLRT_DIV};
use itg3200::{Error, I2cInterface, Itg3200Driver, RawSample};

/// A transaction as seen on the wire
#[derive(Debug, Clone, PartialEq)]
enum Transfer {
    Write { address: u8, bytes: Vec<u8> },
    Read { address: u8, len: usize },
}

/// Simulated ITG-3200 on an I2C bus with an auto-incrementing register pointer
struct MockI2c {
    registers: [u8; 256],
    pointer: u8,
    transfers: Vec<Transfer>,
    nack: bool,
}

impl MockI2c {
    fn new() -> Self {
        Self {
            registers: [0; 256],
            pointer: 0,
            transfers: Vec::new(),
            nack: false,
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.nack {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    self.transfers.push(Transfer::Write {
                        address,
                        bytes: bytes.to_vec(),
                    });
                    if let Some((&register, data)) = bytes.split_first() {
                        self.pointer = register;
                        for &byte in data {
                            self.registers[usize::from(self.pointer)] = byte;
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                    }
                }
                Operation::Read(buffer) => {
                    self.transfers.push(Transfer::Read {
                        address,
                        len: buffer.len(),
                    });
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[usize::from(self.pointer)];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

#[test]
fn test_address_selection() {
    assert_eq!(I2cInterface::default(MockI2c::new()).address(), 0x68);
    assert_eq!(I2cInterface::alternative(MockI2c::new()).address(), 0x69);
    assert_eq!(I2cInterface::with_ad0(MockI2c::new(), false).address(), 0x68);
    assert_eq!(I2cInterface::with_ad0(MockI2c::new(), true).address(), 0x69);
    assert_eq!(I2cInterface::new(MockI2c::new(), 0x42).address(), 0x42);
}

#[test]
fn test_register_write_framing() {
    let mut driver = Itg3200Driver::new(I2cInterface::alternative(MockI2c::new()));

    driver.set_sample_rate_div(0x2A).unwrap();

    let i2c = driver.release().release();
    assert_eq!(
        i2c.transfers,
        vec![Transfer::Write {
            address: 0x69,
            bytes: vec![SMPLRT_DIV, 0x2A]
        }]
    );
    assert_eq!(i2c.registers[usize::from(SMPLRT_DIV)], 0x2A);
}

#[test]
fn test_burst_read_over_i2c() {
    let mut i2c = MockI2c::new();
    let start = usize::from(GYRO_XOUT);
    i2c.registers[start..start + 6].copy_from_slice(&[0x00, 0x0A, 0xFF, 0xFB, 0x00, 0x03]);

    let mut driver = Itg3200Driver::new(I2cInterface::default(i2c));
    driver.init(&mut MockDelay::new()).unwrap();

    assert_eq!(
        driver.read_raw_all().unwrap(),
        RawSample { x: 10, y: -5, z: 3 }
    );

    let i2c = driver.release().release();
    let tail = &i2c.transfers[i2c.transfers.len() - 2..];
    assert_eq!(
        tail,
        &[
            Transfer::Write {
                address: 0x68,
                bytes: vec![GYRO_XOUT]
            },
            Transfer::Read {
                address: 0x68,
                len: 6
            },
        ]
    );
    assert!(i2c.transfers.iter().all(|t| matches!(
        t,
        Transfer::Write { address: 0x68, .. } | Transfer::Read { address: 0x68, .. }
    )));
}

#[test]
fn test_nack_surfaces_as_bus_error() {
    let mut i2c = MockI2c::new();
    i2c.nack = true;

    let mut driver = Itg3200Driver::new(I2cInterface::default(i2c));
    let result = driver.init(&mut MockDelay::new());

    assert!(matches!(
        result,
        Err(Error::Bus(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)))
    ));
}
