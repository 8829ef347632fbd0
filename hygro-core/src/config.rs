//! Configuration types
//!
//! Static settings for the display panel, the DHT20 sensor and the rotary
//! encoder. Defaults match the reference board (ST7789 170x320 panel,
//! DHT20 at 0x38).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DisplayError, SensorError};

/// Pixels in one scanline of the rasterizer's line buffer
///
/// This is the largest panel dimension the drivers support.
pub const LINE_BUFFER_CAPACITY: usize = 320;

/// Default DHT20 7-bit I2C address
pub const DHT20_DEFAULT_ADDRESS: u8 = 0x38;

/// Default knob button debounce window
pub const DEFAULT_DEBOUNCE_MS: u32 = 30;

/// Physical panel geometry
///
/// Immutable once the display is brought up. Width and height describe
/// the panel at rotation 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in pixels
    pub height: u16,
    /// Column offset of the visible area in controller RAM
    pub x_offset: u16,
    /// Row offset of the visible area in controller RAM
    pub y_offset: u16,
    /// SPI clock in Hz
    pub spi_clock_hz: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 170,
            height: 320,
            x_offset: 35,
            y_offset: 0,
            spi_clock_hz: 26_000_000,
        }
    }
}

impl PanelConfig {
    /// Create a panel config with zero offsets
    pub const fn new(width: u16, height: u16, spi_clock_hz: u32) -> Self {
        Self {
            width,
            height,
            x_offset: 0,
            y_offset: 0,
            spi_clock_hz,
        }
    }

    /// Set the RAM offsets
    pub const fn with_offset(mut self, x_offset: u16, y_offset: u16) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Check the geometry against a line buffer of `capacity` pixels
    ///
    /// Both dimensions must fit, since either can become the scanline
    /// width after rotation.
    pub fn validate(&self, capacity: usize) -> Result<(), DisplayError> {
        if self.width == 0 || self.height == 0 {
            return Err(DisplayError::InvalidArgument);
        }
        if usize::from(self.width.max(self.height)) > capacity {
            return Err(DisplayError::InvalidArgument);
        }
        if self.spi_clock_hz == 0 {
            return Err(DisplayError::InvalidArgument);
        }
        Ok(())
    }
}

/// DHT20 acquisition settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Per-transaction I2C timeout, 0 leaves transactions unbounded
    pub i2c_timeout_ms: u32,
    /// How long to wait for a conversion to complete
    pub ready_timeout_ms: u32,
    /// Sleep between busy polls
    pub poll_interval_ms: u32,
    /// Added to every temperature reading (°C)
    pub temperature_offset_c: f32,
    /// Added to every humidity reading (%RH), result clamped to [0, 100]
    pub humidity_offset_rh: f32,
    /// EMA smoothing factor, `None` disables filtering
    pub filter_alpha: Option<f32>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: DHT20_DEFAULT_ADDRESS,
            i2c_timeout_ms: 20,
            ready_timeout_ms: 120,
            poll_interval_ms: 2,
            temperature_offset_c: 0.0,
            humidity_offset_rh: 0.0,
            filter_alpha: None,
        }
    }
}

impl SensorConfig {
    /// Check that the settings are usable
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.address > 0x7F {
            return Err(SensorError::InvalidArgument);
        }
        if !self.temperature_offset_c.is_finite() || !self.humidity_offset_rh.is_finite() {
            return Err(SensorError::InvalidArgument);
        }
        if let Some(alpha) = self.filter_alpha {
            crate::filter::validate_alpha(alpha)?;
        }
        Ok(())
    }
}

/// Rotary encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnobConfig {
    /// Enable internal pull-ups on CLK/DT/SW
    pub enable_pullup: bool,
    /// Button reads low when pressed
    pub button_active_low: bool,
    /// Button debounce window, 0 selects [`DEFAULT_DEBOUNCE_MS`]
    pub button_debounce_ms: u32,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            enable_pullup: true,
            button_active_low: true,
            button_debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl KnobConfig {
    /// Debounce window actually applied
    pub const fn debounce_ms(&self) -> u32 {
        if self.button_debounce_ms == 0 {
            DEFAULT_DEBOUNCE_MS
        } else {
            self.button_debounce_ms
        }
    }
}
