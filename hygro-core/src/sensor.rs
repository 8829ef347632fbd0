//! DHT20 wire protocol
//!
//! Measurement frame (7 bytes):
//! ```text
//! ┌────────┬──────────────────────────┬──────────────────────────┬─────┐
//! │ STATUS │ HUMIDITY (20 bit)        │ TEMPERATURE (20 bit)     │ CRC │
//! │ b0     │ b1, b2, b3[7:4]          │ b3[3:0], b4, b5          │ b6  │
//! └────────┴──────────────────────────┴──────────────────────────┴─────┘
//! ```
//!
//! The CRC is CRC-8 with polynomial 0x31 seeded with 0xFF, computed over
//! bytes 0-5.

use crate::error::SensorError;

/// Soft reset command
pub const CMD_SOFT_RESET: u8 = 0xBA;
/// Status register read command
pub const CMD_STATUS: u8 = 0x71;
/// Measurement trigger command and arguments
pub const CMD_TRIGGER: [u8; 3] = [0xAC, 0x33, 0x00];
/// Calibration init command and arguments
pub const CMD_INIT: [u8; 3] = [0xBE, 0x08, 0x00];

/// Status bit: conversion in progress
pub const STATUS_BUSY: u8 = 1 << 7;
/// Status bit: calibration coefficients loaded
pub const STATUS_CALIBRATED: u8 = 1 << 3;

/// Settle time after power-on
pub const POWER_ON_DELAY_MS: u32 = 100;
/// Settle time after a soft reset
pub const SOFT_RESET_DELAY_MS: u32 = 20;
/// Settle time after the calibration command
pub const CALIBRATION_DELAY_MS: u32 = 10;

/// Measurement frame length
pub const FRAME_LEN: usize = 7;

/// Full scale of the 20-bit raw values (2^20)
const RAW_FULL_SCALE: f32 = 1_048_576.0;

/// Largest 20-bit raw value
pub const RAW_MAX: u32 = (1 << 20) - 1;

/// CRC-8, polynomial 0x31, initial value 0xFF, no reflection
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Status register byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u8);

impl Status {
    /// Conversion still running
    pub const fn is_busy(self) -> bool {
        self.0 & STATUS_BUSY != 0
    }

    /// Calibration already loaded, no init command needed
    pub const fn is_calibrated(self) -> bool {
        self.0 & STATUS_CALIBRATED != 0
    }
}

/// Raw 7-byte measurement frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame(pub [u8; FRAME_LEN]);

impl SensorFrame {
    /// Build a frame with a valid CRC from raw values
    ///
    /// Values are truncated to 20 bits.
    pub fn from_raw(status: u8, humidity_raw: u32, temperature_raw: u32) -> Self {
        let h = humidity_raw & RAW_MAX;
        let t = temperature_raw & RAW_MAX;
        let mut bytes = [
            status,
            (h >> 12) as u8,
            (h >> 4) as u8,
            (((h & 0x0F) << 4) | ((t >> 16) & 0x0F)) as u8,
            (t >> 8) as u8,
            t as u8,
            0,
        ];
        bytes[FRAME_LEN - 1] = crc8(&bytes[..FRAME_LEN - 1]);
        Self(bytes)
    }

    /// Status byte
    pub const fn status(&self) -> Status {
        Status(self.0[0])
    }

    /// Whether the trailing CRC matches bytes 0-5
    pub fn crc_valid(&self) -> bool {
        crc8(&self.0[..FRAME_LEN - 1]) == self.0[FRAME_LEN - 1]
    }

    /// 20-bit humidity fraction
    pub const fn humidity_raw(&self) -> u32 {
        let b = &self.0;
        ((b[1] as u32) << 12) | ((b[2] as u32) << 4) | ((b[3] as u32) >> 4)
    }

    /// 20-bit temperature fraction
    pub const fn temperature_raw(&self) -> u32 {
        let b = &self.0;
        (((b[3] as u32) & 0x0F) << 16) | ((b[4] as u32) << 8) | (b[5] as u32)
    }

    /// Validate and decode the frame
    ///
    /// The busy bit is checked before the CRC: a frame read mid-conversion
    /// reports [`SensorError::NotReady`] rather than a corruption.
    pub fn decode(&self, timestamp_us: u64) -> Result<Sample, SensorError> {
        if self.status().is_busy() {
            return Err(SensorError::NotReady);
        }
        if !self.crc_valid() {
            return Err(SensorError::CrcMismatch);
        }
        Ok(Sample::from_raw(
            timestamp_us,
            self.humidity_raw(),
            self.temperature_raw(),
        ))
    }
}

/// One decoded measurement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Monotonic timestamp of the read, microseconds
    pub timestamp_us: u64,
    /// 20-bit raw humidity
    pub humidity_raw: u32,
    /// 20-bit raw temperature
    pub temperature_raw: u32,
    /// Relative humidity, %RH
    pub humidity_rh: f32,
    /// Temperature, °C
    pub temperature_c: f32,
}

impl Sample {
    /// Convert raw 20-bit values to physical units
    pub fn from_raw(timestamp_us: u64, humidity_raw: u32, temperature_raw: u32) -> Self {
        Self {
            timestamp_us,
            humidity_raw,
            temperature_raw,
            humidity_rh: humidity_raw as f32 * 100.0 / RAW_FULL_SCALE,
            temperature_c: temperature_raw as f32 * 200.0 / RAW_FULL_SCALE - 50.0,
        }
    }

    /// Add calibration offsets
    ///
    /// Humidity is clamped to [0, 100] %RH, temperature is not clamped.
    pub fn with_offset(mut self, temperature_offset_c: f32, humidity_offset_rh: f32) -> Self {
        self.temperature_c += temperature_offset_c;
        self.humidity_rh = clamp_humidity(self.humidity_rh + humidity_offset_rh);
        self
    }
}

/// Clamp relative humidity into its physical range
pub fn clamp_humidity(rh: f32) -> f32 {
    rh.clamp(0.0, 100.0)
}
