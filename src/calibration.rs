//! Sample types, zero-rate calibration and unit conversion
//!
//! Raw gyro output is a big-endian two's-complement 16-bit value per axis.
//! Calibration estimates the per-axis zero-rate bias while the sensor is
//! stationary; that bias is subtracted from every subsequent raw sample and
//! the result is divided by [`SENSITIVITY_LSB_PER_DPS`] to get °/s.

use crate::config::FullScaleRange;

/// Sensitivity at the ±2000°/s full-scale setting, in LSB/(°/s)
pub const SENSITIVITY_LSB_PER_DPS: f64 = FullScaleRange::Dps2000.sensitivity();

/// Temperature sensitivity in LSB/°C
const TEMP_SENSITIVITY: f64 = 280.0;
/// Raw temperature reading at 35°C
const TEMP_OFFSET_LSB: f64 = -13200.0;
/// Reference temperature in °C
const TEMP_REFERENCE_C: f64 = 35.0;

/// Gyroscope axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Address of the high byte of this axis' output register
    #[must_use]
    pub const fn register(self) -> u8 {
        match self {
            Self::X => crate::registers::GYRO_XOUT,
            Self::Y => crate::registers::GYRO_YOUT,
            Self::Z => crate::registers::GYRO_ZOUT,
        }
    }
}

/// Gyroscope data (raw 16-bit register values)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

impl RawSample {
    /// Decode the six bytes starting at `GYRO_XOUT_H`
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([bytes[0], bytes[1]]),
            y: i16::from_be_bytes([bytes[2], bytes[3]]),
            z: i16::from_be_bytes([bytes[4], bytes[5]]),
        }
    }
}

/// Per-axis zero-rate bias in raw counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OffsetTriple {
    /// X-axis offset (subtracted from raw value)
    pub x: i32,
    /// Y-axis offset (subtracted from raw value)
    pub y: i32,
    /// Z-axis offset (subtracted from raw value)
    pub z: i32,
}

impl OffsetTriple {
    /// Create an offset triple
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Subtract the offsets from a raw sample
    ///
    /// Uses wrapping two's-complement arithmetic; the result is never clamped.
    #[must_use]
    pub const fn apply(&self, raw: RawSample) -> CalibratedSample {
        CalibratedSample {
            x: (raw.x as i32).wrapping_sub(self.x),
            y: (raw.y as i32).wrapping_sub(self.y),
            z: (raw.z as i32).wrapping_sub(self.z),
        }
    }
}

/// Raw sample with the zero-rate offsets removed, still in counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibratedSample {
    /// X-axis rotation (counts)
    pub x: i32,
    /// Y-axis rotation (counts)
    pub y: i32,
    /// Z-axis rotation (counts)
    pub z: i32,
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalSample {
    /// X-axis rotation rate in °/s
    pub x: f64,
    /// Y-axis rotation rate in °/s
    pub y: f64,
    /// Z-axis rotation rate in °/s
    pub z: f64,
}

impl PhysicalSample {
    /// Convert a calibrated sample using the fixed ±2000°/s sensitivity
    #[must_use]
    pub fn from_calibrated(sample: CalibratedSample) -> Self {
        Self {
            x: f64::from(sample.x) / SENSITIVITY_LSB_PER_DPS,
            y: f64::from(sample.y) / SENSITIVITY_LSB_PER_DPS,
            z: f64::from(sample.z) / SENSITIVITY_LSB_PER_DPS,
        }
    }

    /// Convert to radians per second
    #[must_use]
    pub fn to_radians_per_sec(&self) -> PhysicalSampleRad {
        const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
        PhysicalSampleRad {
            x: self.x * DEG_TO_RAD,
            y: self.y * DEG_TO_RAD,
            z: self.z * DEG_TO_RAD,
        }
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Gyroscope data in radians per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalSampleRad {
    /// X-axis rotation rate in rad/s
    pub x: f64,
    /// Y-axis rotation rate in rad/s
    pub y: f64,
    /// Z-axis rotation rate in rad/s
    pub z: f64,
}

impl PhysicalSampleRad {
    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Convert a raw `TEMP_OUT` reading to degrees Celsius
///
/// `35 + (raw + 13200) / 280`
#[must_use]
pub fn temperature_to_celsius(raw: i16) -> f64 {
    TEMP_REFERENCE_C + (f64::from(raw) - TEMP_OFFSET_LSB) / TEMP_SENSITIVITY
}

/// Running per-axis sums for zero-rate calibration
///
/// Sums are kept in 64 bits so that any `u32` sample count of 16-bit
/// readings fits without overflow.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ZeroRateAccumulator {
    sum_x: i64,
    sum_y: i64,
    sum_z: i64,
    count: u32,
}

impl ZeroRateAccumulator {
    pub(crate) const fn new() -> Self {
        Self {
            sum_x: 0,
            sum_y: 0,
            sum_z: 0,
            count: 0,
        }
    }

    pub(crate) fn add(&mut self, sample: RawSample) {
        self.sum_x += i64::from(sample.x);
        self.sum_y += i64::from(sample.y);
        self.sum_z += i64::from(sample.z);
        self.count += 1;
    }

    /// Integer mean per axis, truncated toward zero; `None` if no samples
    pub(crate) fn mean(&self) -> Option<OffsetTriple> {
        if self.count == 0 {
            return None;
        }
        let count = i64::from(self.count);

        // The mean of i16 samples always lies within the i16 range
        #[allow(clippy::cast_possible_truncation)]
        let offsets = OffsetTriple {
            x: (self.sum_x / count) as i32,
            y: (self.sum_y / count) as i32,
            z: (self.sum_z / count) as i32,
        };
        Some(offsets)
    }
}
