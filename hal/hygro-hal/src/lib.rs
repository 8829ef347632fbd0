//! Hardware seams for the hygro drivers
//!
//! `hygro-drivers` reaches hardware only through the traits here, so every
//! driver runs on the host against hand-written doubles. Chip crates such
//! as `hygro-hal-rp2040` provide the real implementations.
//!
//! | Trait | Used by |
//! |---|---|
//! | [`PanelBus`] | `Display` blits and panel control |
//! | [`Backlight`] | `Display::set_backlight` |
//! | [`I2cBus`] | `Dht20` |
//! | [`InputPin`] | `Knob` contacts and button |
//! | [`Monotonic`] | sample timestamps, timeouts, debouncing |
//!
//! The ST7789 backend takes `embedded-hal` SPI and output pins directly
//! rather than a trait from this crate.

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod gpio;
pub mod i2c;
pub mod time;

pub use display::{Backlight, PanelBus};
pub use gpio::InputPin;
pub use i2c::{I2cBus, I2cConfig};
pub use time::Monotonic;
