//! RP2040-specific HAL for the hygro board
//!
//! Implements the `hygro-hal` traits on top of embassy-rp:
//!
//! - I2C bridge for any async `embedded-hal` I2C master
//! - Knob inputs and GPIO allocation
//! - PWM backlight
//! - Monotonic clock backed by the embassy time driver

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod time;

pub use gpio::{GpioAllocator, KnobInput};
pub use i2c::I2cBridge;
pub use pwm::PwmBacklight;
pub use time::EmbassyClock;
