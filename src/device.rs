//! High-level driver API for the ITG-3200
//!
//! This module provides a user-friendly interface to the ITG-3200 gyroscope:
//! typed configuration accessors over the control registers, zero-rate
//! calibration and conversion of raw samples to physical units.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init()--> Ready --zero_calibrate()--> Calibrated
//!       ^                                                   |
//!       +-------------------------reset()-------------------+
//! ```
//!
//! Gyro and temperature reads and calibration require `Ready` or
//! `Calibrated`. Configuration accessors are available in every state.

use crate::calibration::{
    temperature_to_celsius, Axis, CalibratedSample, OffsetTriple, PhysicalSample,
    PhysicalSampleRad, RawSample, ZeroRateAccumulator,
};
use crate::config::{
    ClockSource, DeviceConfig, FilterBandwidth, FullScaleRange, GyroConfig, InterruptConfig,
    PowerConfig,
};
use crate::registers::{RegisterDevice, GYRO_XOUT, TEMP_OUT};
use crate::{Error, STARTUP_DELAY_MS};

use device_driver::RegisterInterface;

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Not configured since construction or the last reset
    Uninitialized,
    /// Configured and past the startup delay
    Ready,
    /// Ready, and offsets have been set or calibrated since `init()`
    Calibrated,
}

/// Main driver for the ITG-3200
pub struct Itg3200Driver<I> {
    device: RegisterDevice<I>,
    state: DeviceState,
    offsets: OffsetTriple,
}

impl<I> Itg3200Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new ITG-3200 driver instance
    ///
    /// No bus traffic happens here. Call `init()` or `init_with()` before
    /// reading sensor data.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            state: DeviceState::Uninitialized,
            offsets: OffsetTriple::default(),
        }
    }

    /// Initialize the device with default settings
    ///
    /// Equivalent to `init_with(&GyroConfig::default(), delay)`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.init_with(&GyroConfig::default(), delay)
    }

    /// Initialize the device with explicit settings
    ///
    /// Writes the sample rate divider, full-scale range, filter, clock
    /// source and both ready-interrupt enables, then waits
    /// [`STARTUP_DELAY_MS`] for the gyro output to settle.
    ///
    /// Stored offsets are kept; use `set_offsets()` to clear them.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The driver
    /// stays `Uninitialized` in that case.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use embassy_time::Delay;
    /// let mut delay = Delay;
    /// gyro.init_with(&GyroConfig { sample_rate_div: 7, ..Default::default() }, &mut delay)?;
    /// ```
    pub fn init_with<D>(&mut self, config: &GyroConfig, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.set_sample_rate_div(config.sample_rate_div)?;
        self.set_fs_range(config.full_scale)?;
        self.set_filter_bw(config.filter)?;
        self.set_clock_source(config.clock_source)?;
        self.set_itg_ready_enabled(config.itg_ready_interrupt)?;
        self.set_raw_data_ready_enabled(config.raw_data_ready_interrupt)?;

        delay.delay_ms(STARTUP_DELAY_MS);
        self.state = DeviceState::Ready;

        #[cfg(feature = "defmt")]
        defmt::debug!("ITG-3200 initialized: {}", config);

        Ok(())
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DeviceState {
        self.state
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    fn ensure_ready(&self) -> Result<(), Error<I::Error>> {
        match self.state {
            DeviceState::Uninitialized => Err(Error::InvalidState),
            DeviceState::Ready | DeviceState::Calibrated => Ok(()),
        }
    }

    // ==================== Configuration ====================

    /// Read the `WHO_AM_I` register
    ///
    /// Bits 6..1 hold the device's I2C address (0x68 after power-up,
    /// whatever the AD0 level).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.who_am_i().read()?;
        Ok(reg.id() << 1)
    }

    /// Read the sample rate divider
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sample_rate_div(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.smplrt_div().read()?;
        Ok(reg.div())
    }

    /// Set the sample rate divider
    ///
    /// Sample rate = internal rate / (`divider` + 1), where the internal rate
    /// is 8 kHz or 1 kHz depending on the filter setting.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_rate_div(&mut self, divider: u8) -> Result<(), Error<I::Error>> {
        self.device.smplrt_div().write(|w| {
            w.set_div(divider);
        })?;
        Ok(())
    }

    /// Read the raw full-scale range field
    ///
    /// Returns the two `FS_SEL` bits unchanged; only 3 (±2000°/s) is a
    /// supported value.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fs_range(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.dlpf_fs().read()?;
        Ok(reg.fs_sel())
    }

    /// Set the full-scale range, preserving the filter bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fs_range(&mut self, range: FullScaleRange) -> Result<(), Error<I::Error>> {
        self.device.dlpf_fs().modify(|w| {
            w.set_fs_sel(range as u8);
        })?;
        Ok(())
    }

    /// Read the low-pass filter setting
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the field holds the reserved code 7,
    /// or an error if communication with the device fails.
    pub fn filter_bw(&mut self) -> Result<FilterBandwidth, Error<I::Error>> {
        let reg = self.device.dlpf_fs().read()?;
        FilterBandwidth::from_bits(reg.dlpf_cfg()).ok_or(Error::InvalidConfig)
    }

    /// Set the low-pass filter, preserving the full-scale bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_filter_bw(&mut self, filter: FilterBandwidth) -> Result<(), Error<I::Error>> {
        self.device.dlpf_fs().modify(|w| {
            w.set_dlpf_cfg(filter as u8);
        })?;
        Ok(())
    }

    /// Check whether the INT pin is active low
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_int_active_low(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.actl())
    }

    /// Set the INT pin logic level: active low (`true`) or active high
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_int_active_low(&mut self, active_low: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| {
            w.set_actl(active_low);
        })?;
        Ok(())
    }

    /// Check whether the INT pin is open drain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_int_open_drain(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.open())
    }

    /// Set the INT pin drive type: open drain (`true`) or push-pull
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_int_open_drain(&mut self, open_drain: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| {
            w.set_open(open_drain);
        })?;
        Ok(())
    }

    /// Check whether the interrupt latches until cleared
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_latch_until_cleared(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.latch_int_en())
    }

    /// Set the latch mode: until cleared (`true`) or a 50us pulse
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_latch_until_cleared(&mut self, latch: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| {
            w.set_latch_int_en(latch);
        })?;
        Ok(())
    }

    /// Check whether any register read clears the latch
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_any_read_clear(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.int_anyrd_clear())
    }

    /// Set the latch clear method: any register read (`true`) or status read
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_any_read_clear(&mut self, any_read: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| {
            w.set_int_anyrd_clear(any_read);
        })?;
        Ok(())
    }

    /// Check whether the PLL-ready interrupt is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_itg_ready_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.itg_rdy_en())
    }

    /// Enable or disable the PLL-ready interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_itg_ready_enabled(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| {
            w.set_itg_rdy_en(enable);
        })?;
        Ok(())
    }

    /// Check whether the raw-data-ready interrupt is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_raw_data_ready_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.raw_rdy_en())
    }

    /// Enable or disable the raw-data-ready interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_raw_data_ready_enabled(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| {
            w.set_raw_rdy_en(enable);
        })?;
        Ok(())
    }

    /// Check the PLL-ready status flag
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_itg_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_status().read()?.itg_rdy())
    }

    /// Check the raw-data-ready status flag
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_raw_data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_status().read()?.raw_data_rdy())
    }

    /// Check whether the device is in low power sleep mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_low_power(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.pwr_mgm().read()?.sleep())
    }

    /// Enter (`true`) or leave low power sleep mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_power(&mut self, sleep: bool) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgm().modify(|w| {
            w.set_sleep(sleep);
        })?;
        Ok(())
    }

    /// Check whether one gyro axis is in standby
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_standby(&mut self, axis: Axis) -> Result<bool, Error<I::Error>> {
        let reg = self.device.pwr_mgm().read()?;
        Ok(match axis {
            Axis::X => reg.stby_xg(),
            Axis::Y => reg.stby_yg(),
            Axis::Z => reg.stby_zg(),
        })
    }

    /// Put one gyro axis into standby (`true`) or back to normal operation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_standby(&mut self, axis: Axis, standby: bool) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgm().modify(|w| match axis {
            Axis::X => w.set_stby_xg(standby),
            Axis::Y => w.set_stby_yg(standby),
            Axis::Z => w.set_stby_zg(standby),
        })?;
        Ok(())
    }

    /// Read the clock source
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the field holds a reserved code,
    /// or an error if communication with the device fails.
    pub fn clock_source(&mut self) -> Result<ClockSource, Error<I::Error>> {
        let reg = self.device.pwr_mgm().read()?;
        ClockSource::from_bits(reg.clk_sel()).ok_or(Error::InvalidConfig)
    }

    /// Set the clock source, preserving the other power management bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgm().modify(|w| {
            w.set_clk_sel(source as u8);
        })?;
        Ok(())
    }

    /// Read every configuration register into a [`DeviceConfig`] snapshot
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the filter or clock field holds a
    /// reserved code, or an error if communication with the device fails.
    pub fn read_config(&mut self) -> Result<DeviceConfig, Error<I::Error>> {
        let sample_rate_div = self.device.smplrt_div().read()?.div();
        let dlpf_fs = self.device.dlpf_fs().read()?;
        let int_cfg = self.device.int_cfg().read()?;
        let pwr_mgm = self.device.pwr_mgm().read()?;

        Ok(DeviceConfig {
            sample_rate_div,
            fs_range: dlpf_fs.fs_sel(),
            filter: FilterBandwidth::from_bits(dlpf_fs.dlpf_cfg()).ok_or(Error::InvalidConfig)?,
            clock_source: ClockSource::from_bits(pwr_mgm.clk_sel()).ok_or(Error::InvalidConfig)?,
            interrupt: InterruptConfig {
                active_low: int_cfg.actl(),
                open_drain: int_cfg.open(),
                latch_until_cleared: int_cfg.latch_int_en(),
                clear_on_any_read: int_cfg.int_anyrd_clear(),
                itg_ready: int_cfg.itg_rdy_en(),
                raw_data_ready: int_cfg.raw_rdy_en(),
            },
            power: PowerConfig {
                sleep: pwr_mgm.sleep(),
                standby_x: pwr_mgm.stby_xg(),
                standby_y: pwr_mgm.stby_yg(),
                standby_z: pwr_mgm.stby_zg(),
            },
        })
    }

    /// Hard-reset the device to its power-up register values
    ///
    /// The driver returns to `Uninitialized`; stored offsets are kept. The
    /// device needs [`STARTUP_DELAY_MS`] before its output is valid again,
    /// which `init()` waits for.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgm().write(|w| {
            w.set_h_reset(true);
        })?;
        self.state = DeviceState::Uninitialized;

        #[cfg(feature = "defmt")]
        defmt::debug!("ITG-3200 reset");

        Ok(())
    }

    // ==================== Sensor data ====================

    /// Read one axis (16-bit signed value)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] before `init()`, or an error if
    /// communication with the device fails.
    pub fn read_raw_axis(&mut self, axis: Axis) -> Result<i16, Error<I::Error>> {
        self.ensure_ready()?;
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(axis.register(), 16, &mut buffer)?;
        Ok(i16::from_be_bytes(buffer))
    }

    /// Read all three axes in one burst
    ///
    /// Returns raw sensor values without calibration or conversion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] before `init()`, or an error if
    /// communication with the device fails.
    pub fn read_raw_all(&mut self) -> Result<RawSample, Error<I::Error>> {
        self.ensure_ready()?;
        // Read all 6 bytes at once to prevent torn reads
        // GYRO_XOUT_H (0x1D) through GYRO_ZOUT_L (0x22)
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(GYRO_XOUT, 48, &mut buffer)?;
        Ok(RawSample::from_be_bytes(buffer))
    }

    /// Current zero-rate offsets
    #[must_use]
    pub const fn offsets(&self) -> OffsetTriple {
        self.offsets
    }

    /// Override the zero-rate offsets, e.g. to restore a stored calibration
    pub fn set_offsets(&mut self, x: i32, y: i32, z: i32) {
        self.offsets = OffsetTriple::new(x, y, z);
        if self.state == DeviceState::Ready {
            self.state = DeviceState::Calibrated;
        }
    }

    /// Estimate the zero-rate offsets while the device is stationary
    ///
    /// Takes `samples` burst reads, waiting `sample_delay_ms` between
    /// consecutive reads, and stores the per-axis integer mean as the new
    /// offsets. The mean is truncated toward zero (`sum / samples`), not
    /// rounded.
    ///
    /// On error the stored offsets are left untouched.
    ///
    /// # Arguments
    ///
    /// * `samples` - Number of samples to average (at least 1)
    /// * `sample_delay_ms` - Delay between reads; match it to the output data rate
    /// * `delay` - Delay provider
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `samples` is 0,
    /// [`Error::InvalidState`] before `init()`, or an error if communication
    /// with the device fails.
    pub fn zero_calibrate<D>(
        &mut self,
        samples: u32,
        sample_delay_ms: u32,
        delay: &mut D,
    ) -> Result<OffsetTriple, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.ensure_ready()?;
        if samples == 0 {
            return Err(Error::InvalidConfig);
        }

        let mut accumulator = ZeroRateAccumulator::new();
        for i in 0..samples {
            if i > 0 {
                delay.delay_ms(sample_delay_ms);
            }
            accumulator.add(self.read_raw_all()?);
        }

        let offsets = accumulator.mean().ok_or(Error::InvalidConfig)?;
        self.offsets = offsets;
        self.state = DeviceState::Calibrated;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Zero-rate calibration over {} samples: {}",
            samples,
            offsets
        );

        Ok(offsets)
    }

    /// Read all axes with the offsets subtracted (still in counts)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] before `init()`, or an error if
    /// communication with the device fails.
    pub fn read_calibrated_raw(&mut self) -> Result<CalibratedSample, Error<I::Error>> {
        let raw = self.read_raw_all()?;
        Ok(self.offsets.apply(raw))
    }

    /// Read calibrated angular rate in degrees per second
    ///
    /// # Example
    ///
    /// ```ignore
    /// let rate = gyro.read_physical()?;
    /// println!("X: {}°/s, Y: {}°/s, Z: {}°/s", rate.x, rate.y, rate.z);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] before `init()`, or an error if
    /// communication with the device fails.
    pub fn read_physical(&mut self) -> Result<PhysicalSample, Error<I::Error>> {
        let calibrated = self.read_calibrated_raw()?;
        Ok(PhysicalSample::from_calibrated(calibrated))
    }

    /// Read calibrated angular rate in radians per second
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] before `init()`, or an error if
    /// communication with the device fails.
    pub fn read_physical_radians(&mut self) -> Result<PhysicalSampleRad, Error<I::Error>> {
        let dps = self.read_physical()?;
        Ok(dps.to_radians_per_sec())
    }

    /// Read the raw temperature sensor value
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] before `init()`, or an error if
    /// communication with the device fails.
    pub fn read_temperature_raw(&mut self) -> Result<i16, Error<I::Error>> {
        self.ensure_ready()?;
        // TEMP_OUT_H (0x1B) through TEMP_OUT_L (0x1C)
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(TEMP_OUT, 16, &mut buffer)?;
        Ok(i16::from_be_bytes(buffer))
    }

    /// Read temperature in degrees Celsius
    ///
    /// Independent of the gyro offsets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] before `init()`, or an error if
    /// communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<f64, Error<I::Error>> {
        let raw = self.read_temperature_raw()?;
        Ok(temperature_to_celsius(raw))
    }
}
