//! I2C master seam
//!
//! The DHT20 protocol only needs plain writes and plain reads; there are
//! no repeated-start register reads.

/// Async I2C master
///
/// Transactions are awaited so a caller can race them against a timer;
/// dropping an unfinished future must leave the bus usable for the next
/// transaction.
#[allow(async_fn_in_trait)]
pub trait I2cBus {
    type Error;

    /// Send `data` to the 7-bit `address` in one transaction
    async fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` from the 7-bit `address` in one transaction
    async fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: I2cBus> I2cBus for &mut T {
    type Error = T::Error;

    async fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data).await
    }

    async fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf).await
    }
}

/// Bus clock settings handed to the chip HAL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// 100 kHz
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// 400 kHz, the fastest mode the DHT20 supports
    pub const FAST: Self = Self { frequency: 400_000 };
}
