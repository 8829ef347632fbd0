//! Board-agnostic core logic for the hygro peripheral drivers
//!
//! This crate contains the parts of the drivers that do not touch
//! hardware at all:
//!
//! - Configuration types (panel geometry, sensor and knob settings)
//! - Viewport transform under panel rotation
//! - RGB565 colours and the built-in 5x7 bitmap font
//! - DHT20 frame layout, CRC-8 and unit conversion
//! - Exponential moving average filter
//! - Quadrature and push-button decoding for the rotary encoder
//! - Fixed-period averaging window for periodic reports
//! - Error types shared with `hygro-drivers`

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod font;
pub mod sensor;
pub mod viewport;
pub mod window;

pub use color::Rgb565;
pub use config::{KnobConfig, PanelConfig, SensorConfig, LINE_BUFFER_CAPACITY};
pub use error::{DisplayError, SensorError};
pub use filter::EmaFilter;
pub use sensor::{Sample, SensorFrame};
pub use viewport::{Orientation, Rotation, Viewport};
pub use window::{SampleWindow, WindowSummary};
