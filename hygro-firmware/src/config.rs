//! Board wiring and application settings
//!
//! Pins are fixed at compile time because embassy hands out peripherals
//! by type; the numbers here are checked against each other at start-up
//! so a typo in the table shows up as a log line instead of a silent
//! short between two functions.

use hygro_core::{KnobConfig, PanelConfig, Rotation, SensorConfig};
use hygro_hal::I2cConfig;
use hygro_hal_rp2040::gpio::{GpioAllocator, PinError};

/// DHT20 on I2C1
pub const SENSOR_SDA_PIN: u8 = 6;
pub const SENSOR_SCL_PIN: u8 = 7;
pub const SENSOR_I2C: I2cConfig = I2cConfig::FAST;

/// ST7789 on SPI0; the backlight needs a PWM channel A pin (GP4 = PWM2A)
pub const TFT_SCK_PIN: u8 = 2;
pub const TFT_MOSI_PIN: u8 = 3;
pub const TFT_BLK_PIN: u8 = 4;
pub const TFT_RST_PIN: u8 = 5;
pub const TFT_CS_PIN: u8 = 10;
pub const TFT_DC_PIN: u8 = 11;

pub const KNOB_CLK_PIN: u8 = 21;
pub const KNOB_DT_PIN: u8 = 9;
pub const KNOB_SW_PIN: u8 = 20;

/// Every pin the firmware drives, in claim order
pub const BOARD_PINS: [u8; 11] = [
    SENSOR_SDA_PIN,
    SENSOR_SCL_PIN,
    TFT_SCK_PIN,
    TFT_MOSI_PIN,
    TFT_BLK_PIN,
    TFT_RST_PIN,
    TFT_CS_PIN,
    TFT_DC_PIN,
    KNOB_CLK_PIN,
    KNOB_DT_PIN,
    KNOB_SW_PIN,
];

pub const TFT_WIDTH: u16 = 170;
pub const TFT_HEIGHT: u16 = 320;
pub const TFT_X_OFFSET: u16 = 35;
pub const TFT_Y_OFFSET: u16 = 0;
pub const TFT_SPI_CLOCK_HZ: u32 = 26_000_000;
pub const TFT_ROTATION: Rotation = Rotation::Deg90;

/// Report period for averaged readings
pub const PRINT_PERIOD_MS: u32 = 2000;
/// Wait before re-triggering after a failed read
pub const RETRY_BACKOFF_MS: u64 = 50;
/// Main loop yield
pub const LOOP_DELAY_MS: u64 = 1;

/// Backlight change per knob detent (percent)
pub const KNOB_BACKLIGHT_STEP: u8 = 5;
pub const INITIAL_BACKLIGHT: u8 = 90;

/// Smoothing used while the filter is switched on
pub const FILTER_ALPHA: f32 = 0.2;
/// Filter state at boot
pub const FILTER_AT_BOOT: bool = false;

/// Height of the text area cleared before each report
pub const HEADER_HEIGHT: i32 = 42;
pub const TEXT_X: i32 = 8;
pub const TEMP_Y: i32 = 8;
pub const HUMIDITY_Y: i32 = 22;

/// Rows per block for the start-up colour bars
pub const TEST_PATTERN_ROWS: i32 = 20;

pub fn panel_config() -> PanelConfig {
    PanelConfig::new(TFT_WIDTH, TFT_HEIGHT, TFT_SPI_CLOCK_HZ).with_offset(TFT_X_OFFSET, TFT_Y_OFFSET)
}

pub fn sensor_config() -> SensorConfig {
    SensorConfig {
        i2c_timeout_ms: 20,
        ready_timeout_ms: 120,
        poll_interval_ms: 2,
        temperature_offset_c: 0.0,
        humidity_offset_rh: 0.0,
        ..SensorConfig::default()
    }
}

pub fn knob_config() -> KnobConfig {
    KnobConfig::default()
}

/// Claim every board pin once; a duplicate or out-of-range number fails
pub fn check_pin_map(pins: &[u8]) -> Result<GpioAllocator, PinError> {
    let mut allocator = GpioAllocator::new();
    allocator.allocate_all(pins)?;
    Ok(allocator)
}
