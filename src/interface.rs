//! Bus interface implementation for the ITG-3200
//!
//! The driver talks to the register map through the `device-driver`
//! [`RegisterInterface`] trait, so any transport (or a test double) that
//! implements it can back an [`Itg3200Driver`](crate::Itg3200Driver).
//! [`I2cInterface`] is the implementation for a real `embedded-hal` I2C bus.

use crate::{I2C_ADDRESS_AD0_HIGH, I2C_ADDRESS_AD0_LOW};

use device_driver::RegisterInterface;

/// Largest burst written in one transaction (register address excluded)
const MAX_WRITE_LEN: usize = 6;

/// I2C interface for the ITG-3200
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the AD0-low address (0x68)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut gyro = Itg3200Driver::new(interface);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_LOW,
        }
    }

    /// Create a new I2C interface with the AD0-high address (0x69)
    ///
    /// This is the wiring used by most ITG-3200 breakout boards.
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_HIGH,
        }
    }

    /// Create a new I2C interface selecting the address from the AD0 pin level
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `ad0_high` - `true` if AD0 is tied high (0x69), `false` for low (0x68)
    pub const fn with_ad0(i2c: I2C, ad0_high: bool) -> Self {
        if ad0_high {
            Self::alternative(i2c)
        } else {
            Self::default(i2c)
        }
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit device address used for every transaction
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        // The ITG-3200 auto-increments the register pointer on burst reads
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let mut buffer = [0u8; MAX_WRITE_LEN + 1];
        buffer[0] = address;
        let len = write_data.len().min(MAX_WRITE_LEN);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}
