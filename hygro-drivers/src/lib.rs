//! Hardware driver implementations
//!
//! Drivers built on the seam traits of `hygro-hal` and the pure logic of
//! `hygro-core`:
//!
//! - Display context: viewport, line-buffer rasterizer, text, images
//! - ST7789 panel backend over an `embedded-hal` SPI device
//! - DHT20 humidity/temperature sensor over I2C
//! - Rotary encoder with push button

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod display;
pub mod knob;
pub mod sensor;

#[cfg(test)]
pub(crate) mod testing;

pub use display::{Display, St7789};
pub use knob::{Knob, KnobEvent};
pub use sensor::dht20::{Dht20, Dht20State};
