//! Register definitions for the ITG-3200
//!
//! The ITG-3200 has a flat 8-bit register space with no banking. The four
//! configuration registers and the two status/identity registers are declared
//! below; sensor output registers are read as contiguous big-endian blocks
//! through the raw interface and only their addresses are exported.
//!
//! ## Bit layouts
//! - `DLPF_FS` (0x16): bits 4..3 full-scale select, bits 2..0 low-pass filter config
//! - `INT_CFG` (0x17): 7 ACTL, 6 OPEN, 5 `LATCH_INT_EN`, 4 `INT_ANYRD_2CLEAR`,
//!   2 `ITG_RDY_EN`, 0 `RAW_RDY_EN`
//! - `INT_STATUS` (0x1A): 2 `ITG_RDY`, 0 `RAW_DATA_RDY`
//! - `PWR_MGM` (0x3E): 7 `H_RESET`, 6 SLEEP, 5..3 per-axis standby (X, Y, Z),
//!   bits 2..0 clock select

/// `WHO_AM_I` register address
pub const WHO_AM_I: u8 = 0x00;
/// `SMPLRT_DIV` register address
pub const SMPLRT_DIV: u8 = 0x15;
/// `DLPF_FS` register address
pub const DLPF_FS: u8 = 0x16;
/// `INT_CFG` register address
pub const INT_CFG: u8 = 0x17;
/// `INT_STATUS` register address
pub const INT_STATUS: u8 = 0x1A;
/// `TEMP_OUT_H` register address (2 bytes, big-endian)
pub const TEMP_OUT: u8 = 0x1B;
/// `GYRO_XOUT_H` register address (2 bytes, big-endian)
pub const GYRO_XOUT: u8 = 0x1D;
/// `GYRO_YOUT_H` register address (2 bytes, big-endian)
pub const GYRO_YOUT: u8 = 0x1F;
/// `GYRO_ZOUT_H` register address (2 bytes, big-endian)
pub const GYRO_ZOUT: u8 = 0x21;
/// `PWR_MGM` register address
pub const PWR_MGM: u8 = 0x3E;

device_driver::create_device!(
    device_name: Itg3200,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// WHO_AM_I - Device identity (0x00)
        /// Bits 6..1 hold the upper bits of the device's I2C address
        register WhoAmI {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// I2C address bits 6..1 (0b110100 after power-up)
            id: uint = 1..7,
            reserved_7: uint = 7..8,
        },

        /// SMPLRT_DIV - Sample Rate Divider (0x15)
        /// F_sample = F_internal / (divider + 1)
        register SmplrtDiv {
            const ADDRESS = 0x15;
            const SIZE_BITS = 8;

            /// Sample rate divider
            div: uint = 0..8,
        },

        /// DLPF_FS - Digital Low Pass Filter / Full Scale (0x16)
        register DlpfFs {
            const ADDRESS = 0x16;
            const SIZE_BITS = 8;

            /// Low-pass filter bandwidth and internal sample rate
            dlpf_cfg: uint = 0..3,
            /// Full-scale range (3 = ±2000°/s, the only supported value)
            fs_sel: uint = 3..5,
            reserved_7_5: uint = 5..8,
        },

        /// INT_CFG - Interrupt Configuration (0x17)
        register IntCfg {
            const ADDRESS = 0x17;
            const SIZE_BITS = 8;

            /// Enable interrupt when new sensor data is available
            raw_rdy_en: bool = 0,
            reserved_1: uint = 1..2,
            /// Enable interrupt when the PLL is ready
            itg_rdy_en: bool = 2,
            reserved_3: uint = 3..4,
            /// Clear latch on any register read (otherwise status read only)
            int_anyrd_clear: bool = 4,
            /// Latch interrupt until cleared (otherwise 50us pulse)
            latch_int_en: bool = 5,
            /// INT pin is open drain (otherwise push-pull)
            open: bool = 6,
            /// INT pin is active low (otherwise active high)
            actl: bool = 7,
        },

        /// INT_STATUS - Interrupt Status (0x1A)
        register IntStatus {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Raw data is ready
            raw_data_rdy: bool = 0,
            reserved_1: uint = 1..2,
            /// PLL is ready
            itg_rdy: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// PWR_MGM - Power Management (0x3E)
        register PwrMgm {
            const ADDRESS = 0x3E;
            const SIZE_BITS = 8;

            /// Clock source select
            clk_sel: uint = 0..3,
            /// Z gyro standby
            stby_zg: bool = 3,
            /// Y gyro standby
            stby_yg: bool = 4,
            /// X gyro standby
            stby_xg: bool = 5,
            /// Low power sleep mode
            sleep: bool = 6,
            /// Reset device and internal registers to power-up defaults
            h_reset: bool = 7,
        }
    }
);

pub use Itg3200 as RegisterDevice;
