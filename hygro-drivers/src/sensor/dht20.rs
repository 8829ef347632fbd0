//! DHT20 humidity/temperature sensor (I2C)
//!
//! # Protocol
//!
//! ```text
//! init:     wait 100 ms ─► 0xBA (soft reset) ─► wait 20 ms ─► 0x71, read status
//!           status bit 3 clear? ─► 0xBE 0x08 0x00 ─► wait 10 ms
//! measure:  0xAC 0x33 0x00 ─► poll 7-byte frame until the busy bit clears
//! ```
//!
//! Only the power-on/reset settles and the busy polling loop sleep; every
//! other call is a single bus transaction. Each transaction is raced
//! against `SensorConfig::i2c_timeout_ms` on the driver's delay, so a
//! wedged bus surfaces as [`SensorError::Bus`] instead of a hang.

use core::future::Future;

use embassy_futures::select::{select, Either};
use embedded_hal_async::delay::DelayNs;
use hygro_core::sensor::{
    Status, CALIBRATION_DELAY_MS, CMD_INIT, CMD_SOFT_RESET, CMD_STATUS, CMD_TRIGGER, FRAME_LEN,
    POWER_ON_DELAY_MS, SOFT_RESET_DELAY_MS,
};
use hygro_core::{Sample, SensorConfig, SensorError, SensorFrame};
use hygro_hal::{I2cBus, Monotonic};

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dht20State {
    /// Not initialized, or the last init failed
    Uninitialized,
    /// Idle and calibrated
    Ready,
    /// Conversion triggered, result not read yet
    Measuring,
}

/// DHT20 driver
pub struct Dht20<I2C, C, D> {
    i2c: I2C,
    clock: C,
    delay: D,
    config: SensorConfig,
    state: Dht20State,
}

impl<I2C, C, D> Dht20<I2C, C, D>
where
    I2C: I2cBus,
    C: Monotonic,
    D: DelayNs,
{
    /// Create an uninitialized driver
    ///
    /// Validates `config`; its `i2c_timeout_ms` bounds every bus
    /// transaction, 0 leaves them unbounded.
    pub fn new(i2c: I2C, clock: C, delay: D, config: SensorConfig) -> Result<Self, SensorError> {
        config.validate()?;
        Ok(Self {
            i2c,
            clock,
            delay,
            config,
            state: Dht20State::Uninitialized,
        })
    }

    /// Power-on settle, soft reset, and calibration if the sensor needs it
    ///
    /// On failure the driver stays uninitialized and `init` may be retried.
    pub async fn init(&mut self) -> Result<(), SensorError> {
        self.state = Dht20State::Uninitialized;

        self.delay.delay_ms(POWER_ON_DELAY_MS).await;
        self.soft_reset().await?;

        let status = self.read_status().await?;
        if !status.is_calibrated() {
            #[cfg(feature = "defmt")]
            defmt::debug!("dht20 not calibrated (status {=u8:#x}), sending init", status.0);

            self.write(&CMD_INIT).await?;
            self.delay.delay_ms(CALIBRATION_DELAY_MS).await;
        }

        self.state = Dht20State::Ready;

        #[cfg(feature = "defmt")]
        defmt::info!("dht20 ready at {=u8:#x}", self.config.address);

        Ok(())
    }

    /// Send the soft reset command and wait for the sensor to settle
    ///
    /// Aborts a conversion in progress.
    pub async fn soft_reset(&mut self) -> Result<(), SensorError> {
        self.write(&[CMD_SOFT_RESET]).await?;
        self.delay.delay_ms(SOFT_RESET_DELAY_MS).await;
        if self.state == Dht20State::Measuring {
            self.state = Dht20State::Ready;
        }
        Ok(())
    }

    /// Trigger a conversion
    pub async fn start_measurement(&mut self) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        self.write(&CMD_TRIGGER).await?;
        self.state = Dht20State::Measuring;
        Ok(())
    }

    /// Read and decode one frame without waiting
    ///
    /// Returns [`SensorError::NotReady`] while the conversion is still
    /// running, [`SensorError::CrcMismatch`] for a corrupted frame.
    pub async fn read_measurement(&mut self) -> Result<Sample, SensorError> {
        self.ensure_initialized()?;

        let mut frame = SensorFrame([0; FRAME_LEN]);
        bounded(
            &mut self.delay,
            self.config.i2c_timeout_ms,
            self.i2c.read(self.config.address, &mut frame.0),
        )
        .await?;

        let sample = frame.decode(self.clock.now_us())?;
        self.state = Dht20State::Ready;
        Ok(sample)
    }

    /// Poll until a frame is ready or `timeout_ms` has elapsed
    ///
    /// The elapsed time is checked after every busy poll, then the task
    /// sleeps `poll_interval_ms` (at least 1 ms). Errors other than
    /// [`SensorError::NotReady`] end the wait immediately.
    pub async fn read_measurement_with_timeout(
        &mut self,
        timeout_ms: u32,
        poll_interval_ms: u32,
    ) -> Result<Sample, SensorError> {
        let start_us = self.clock.now_us();
        let timeout_us = u64::from(timeout_ms) * 1000;
        let poll_ms = poll_interval_ms.max(1);

        loop {
            match self.read_measurement().await {
                Err(SensorError::NotReady) => {}
                result => return result,
            }

            let elapsed_us = self.clock.now_us().saturating_sub(start_us);
            if elapsed_us >= timeout_us {
                #[cfg(feature = "defmt")]
                defmt::warn!("dht20 still busy after {=u64} us", elapsed_us);

                return Err(SensorError::Timeout);
            }

            self.delay.delay_ms(poll_ms).await;
        }
    }

    /// Trigger a conversion and wait for its result
    pub async fn read_oneshot(&mut self, timeout_ms: u32, poll_interval_ms: u32) -> Result<Sample, SensorError> {
        self.start_measurement().await?;
        self.read_measurement_with_timeout(timeout_ms, poll_interval_ms)
            .await
    }

    /// Trigger, sleep a fixed `conversion_wait_ms`, then read once
    ///
    /// Kept for callers that know their conversion time; prefer
    /// [`Dht20::read_oneshot`].
    pub async fn read(&mut self, conversion_wait_ms: u32) -> Result<Sample, SensorError> {
        self.start_measurement().await?;
        if conversion_wait_ms > 0 {
            self.delay.delay_ms(conversion_wait_ms).await;
        }
        self.read_measurement().await
    }

    pub fn state(&self) -> Dht20State {
        self.state
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Give back the bus, clock and delay
    pub fn release(self) -> (I2C, C, D) {
        (self.i2c, self.clock, self.delay)
    }

    fn ensure_initialized(&self) -> Result<(), SensorError> {
        if self.state == Dht20State::Uninitialized {
            return Err(SensorError::InvalidState);
        }
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), SensorError> {
        bounded(
            &mut self.delay,
            self.config.i2c_timeout_ms,
            self.i2c.write(self.config.address, bytes),
        )
        .await
    }

    async fn read_status(&mut self) -> Result<Status, SensorError> {
        self.write(&[CMD_STATUS]).await?;
        let mut status = [0u8; 1];
        bounded(
            &mut self.delay,
            self.config.i2c_timeout_ms,
            self.i2c.read(self.config.address, &mut status),
        )
        .await?;
        Ok(Status(status[0]))
    }
}

/// Await one bus transaction for at most `timeout_ms` (0: no bound)
async fn bounded<D, F, E>(delay: &mut D, timeout_ms: u32, transaction: F) -> Result<(), SensorError>
where
    D: DelayNs,
    F: Future<Output = Result<(), E>>,
{
    if timeout_ms == 0 {
        return transaction.await.map_err(|_| SensorError::Bus);
    }
    match select(transaction, delay.delay_ms(timeout_ms)).await {
        Either::First(result) => result.map_err(|_| SensorError::Bus),
        Either::Second(()) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("dht20 transaction exceeded {=u32} ms", timeout_ms);

            Err(SensorError::Bus)
        }
    }
}
