//! I2C bridge
//!
//! Adapts any async `embedded-hal` 1.0 I2C master (such as
//! `embassy_rp::i2c::I2c<'_, _, Async>`) to [`hygro_hal::I2cBus`].
//! Transaction timeouts are applied by the driver racing each call
//! against its delay.

use embedded_hal_async::i2c::I2c;
use hygro_hal::I2cBus;

/// [`I2cBus`] over an async `embedded-hal` I2C master
pub struct I2cBridge<B> {
    bus: B,
}

impl<B: I2c> I2cBridge<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2c> I2cBus for I2cBridge<B> {
    type Error = B::Error;

    async fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data).await
    }

    async fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(address, buf).await
    }
}
