#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod calibration;
pub mod config;
pub mod device;
pub mod interface;
pub mod registers;

// Re-export main types
pub use calibration::{
    Axis, CalibratedSample, OffsetTriple, PhysicalSample, PhysicalSampleRad, RawSample,
    SENSITIVITY_LSB_PER_DPS,
};
pub use config::{
    ClockSource, DeviceConfig, FilterBandwidth, FullScaleRange, GyroConfig, InterruptConfig,
    PowerConfig,
};
pub use device::{DeviceState, Itg3200Driver};
pub use interface::I2cInterface;

/// ITG-3200 I2C address when the AD0 pin is low (0x68)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// ITG-3200 I2C address when the AD0 pin is high (0x69)
///
/// Most breakout boards (SparkFun and clones) pull AD0 high, so this is the
/// address you usually want. Use [`I2cInterface::alternative()`] for it.
pub const I2C_ADDRESS_AD0_HIGH: u8 = 0x69;

/// Time the gyroscope needs after power-up or reset before its output is valid
pub const STARTUP_DELAY_MS: u32 = 70;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Sensor read or calibration attempted before `init()` (or after `reset()`)
    InvalidState,
    /// Invalid parameter, or a reserved code read back from a configuration field
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
