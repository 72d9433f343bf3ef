//! Device configuration types
//!
//! Typed views of the ITG-3200 configuration registers:
//! - `SMPLRT_DIV`: sample rate divider
//! - `DLPF_FS`: full-scale range and low-pass filter bandwidth
//! - `INT_CFG`: interrupt pin behaviour and enable flags
//! - `PWR_MGM`: sleep, per-axis standby and clock source
//!
//! # Example
//!
//! ```ignore
//! # use itg3200::{Itg3200Driver, GyroConfig, FilterBandwidth, ClockSource};
//! # let mut gyro: Itg3200Driver<_> = todo!();
//! let config = GyroConfig {
//!     sample_rate_div: 9, // 1 kHz / 10 = 100 Hz
//!     filter: FilterBandwidth::Hz42,
//!     clock_source: ClockSource::PllXGyro,
//!     ..Default::default()
//! };
//! gyro.init_with(&config, &mut delay)?;
//! # Ok::<(), itg3200::Error<()>>(())
//! ```

/// Gyroscope full-scale range
///
/// The ITG-3200 only supports ±2000°/s; the other `FS_SEL` codes are reserved
/// by the hardware and are never written by this driver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScaleRange {
    /// ±2000°/s range
    #[default]
    Dps2000 = 3,
}

impl FullScaleRange {
    /// Get the sensitivity in LSB/(°/s)
    #[must_use]
    pub const fn sensitivity(self) -> f64 {
        match self {
            Self::Dps2000 => 14.375,
        }
    }

    /// Get the maximum value in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps2000 => 2000,
        }
    }
}

/// Digital low-pass filter bandwidth and the internal sample rate it implies
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterBandwidth {
    /// 256 kHz bandwidth, 8 kHz internal sample rate
    #[default]
    Hz256k = 0,
    /// 188 Hz bandwidth, 1 kHz internal sample rate
    Hz188 = 1,
    /// 98 Hz bandwidth, 1 kHz internal sample rate
    Hz98 = 2,
    /// 42 Hz bandwidth, 1 kHz internal sample rate
    Hz42 = 3,
    /// 20 Hz bandwidth, 1 kHz internal sample rate
    Hz20 = 4,
    /// 10 Hz bandwidth, 1 kHz internal sample rate
    Hz10 = 5,
    /// 5 Hz bandwidth, 1 kHz internal sample rate
    Hz5 = 6,
}

impl FilterBandwidth {
    /// All filter settings in register-code order
    pub const ALL: [Self; 7] = [
        Self::Hz256k,
        Self::Hz188,
        Self::Hz98,
        Self::Hz42,
        Self::Hz20,
        Self::Hz10,
        Self::Hz5,
    ];

    /// Decode a `DLPF_CFG` field value; code 7 is reserved
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Hz256k),
            1 => Some(Self::Hz188),
            2 => Some(Self::Hz98),
            3 => Some(Self::Hz42),
            4 => Some(Self::Hz20),
            5 => Some(Self::Hz10),
            6 => Some(Self::Hz5),
            _ => None,
        }
    }

    /// Get the filter bandwidth in Hz
    #[must_use]
    pub const fn bandwidth_hz(self) -> u32 {
        match self {
            Self::Hz256k => 256_000,
            Self::Hz188 => 188,
            Self::Hz98 => 98,
            Self::Hz42 => 42,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
        }
    }

    /// Get the internal sample rate in Hz that the divider is applied to
    #[must_use]
    pub const fn internal_sample_rate_hz(self) -> u32 {
        match self {
            Self::Hz256k => 8_000,
            _ => 1_000,
        }
    }
}

/// Clock source selection (`PWR_MGM` bits 2..0)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal oscillator
    #[default]
    InternalOscillator = 0,
    /// PLL with X gyro reference
    PllXGyro = 1,
    /// PLL with Y gyro reference
    PllYGyro = 2,
    /// PLL with Z gyro reference
    PllZGyro = 3,
    /// PLL with external 32.768 kHz reference
    PllExternal32kHz = 4,
    /// PLL with external 19.2 MHz reference
    PllExternal19MHz = 5,
}

impl ClockSource {
    /// Decode a `CLK_SEL` field value; codes 6 and 7 are reserved
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::InternalOscillator),
            1 => Some(Self::PllXGyro),
            2 => Some(Self::PllYGyro),
            3 => Some(Self::PllZGyro),
            4 => Some(Self::PllExternal32kHz),
            5 => Some(Self::PllExternal19MHz),
            _ => None,
        }
    }
}

/// Interrupt pin behaviour and enable flags (`INT_CFG`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct InterruptConfig {
    /// Active low (true) or active high (false)
    pub active_low: bool,
    /// Open-drain (true) or push-pull (false)
    pub open_drain: bool,
    /// Latch until cleared (true) or 50us pulse (false)
    pub latch_until_cleared: bool,
    /// Clear on any register read (true) or on status register read (false)
    pub clear_on_any_read: bool,
    /// Interrupt when the PLL is ready
    pub itg_ready: bool,
    /// Interrupt when new raw data is available
    pub raw_data_ready: bool,
}

/// Power state (`PWR_MGM` bits 6..3)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct PowerConfig {
    /// Low power sleep mode
    pub sleep: bool,
    /// X gyro in standby
    pub standby_x: bool,
    /// Y gyro in standby
    pub standby_y: bool,
    /// Z gyro in standby
    pub standby_z: bool,
}

/// Parameters for [`Itg3200Driver::init_with`](crate::Itg3200Driver::init_with)
///
/// `Default` matches the zero-argument `init()`: no sample rate division,
/// ±2000°/s, 256 kHz / 8 kHz filter, internal oscillator, both ready
/// interrupts disabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
    /// Sample rate divider (0-255)
    pub sample_rate_div: u8,
    /// Full-scale range
    pub full_scale: FullScaleRange,
    /// Low-pass filter bandwidth
    pub filter: FilterBandwidth,
    /// Clock source
    pub clock_source: ClockSource,
    /// Enable the PLL-ready interrupt
    pub itg_ready_interrupt: bool,
    /// Enable the raw-data-ready interrupt
    pub raw_data_ready_interrupt: bool,
}

impl GyroConfig {
    /// Calculate the effective sample rate in Hz
    #[must_use]
    pub fn sample_rate_hz(&self) -> f32 {
        sample_rate_hz(self.filter, self.sample_rate_div)
    }
}

/// Snapshot of all configuration registers as read back from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Sample rate divider
    pub sample_rate_div: u8,
    /// Raw `FS_SEL` field, passed through unchanged
    pub fs_range: u8,
    /// Low-pass filter bandwidth
    pub filter: FilterBandwidth,
    /// Clock source
    pub clock_source: ClockSource,
    /// Interrupt configuration
    pub interrupt: InterruptConfig,
    /// Power state
    pub power: PowerConfig,
}

impl DeviceConfig {
    /// Calculate the effective sample rate in Hz
    #[must_use]
    pub fn sample_rate_hz(&self) -> f32 {
        sample_rate_hz(self.filter, self.sample_rate_div)
    }
}

#[allow(clippy::cast_precision_loss)]
fn sample_rate_hz(filter: FilterBandwidth, divider: u8) -> f32 {
    filter.internal_sample_rate_hz() as f32 / (1.0 + f32::from(divider))
}
