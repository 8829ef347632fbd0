//! Fixed-period reporting window
//!
//! Accumulates samples and read failures, then hands out an average once
//! the period has elapsed. Times are wrapping millisecond counters.

use crate::sensor::{clamp_humidity, Sample};

/// Averages over one closed window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowSummary {
    /// Mean temperature, `None` when no sample arrived
    pub temperature_c: Option<f32>,
    /// Mean humidity clamped to [0, 100] %RH
    pub humidity_rh: Option<f32>,
    /// Samples that made it into the average
    pub valid: u32,
    /// Failed reads in the window
    pub errors: u32,
}

/// Running sums for the current window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleWindow {
    period_ms: u32,
    started_ms: u32,
    sum_temperature_c: f32,
    sum_humidity_rh: f32,
    valid: u32,
    errors: u32,
}

impl SampleWindow {
    /// Open a window of `period_ms` starting at `now_ms`
    pub fn new(period_ms: u32, now_ms: u32) -> Self {
        Self {
            period_ms,
            started_ms: now_ms,
            sum_temperature_c: 0.0,
            sum_humidity_rh: 0.0,
            valid: 0,
            errors: 0,
        }
    }

    pub fn push(&mut self, sample: &Sample) {
        self.sum_temperature_c += sample.temperature_c;
        self.sum_humidity_rh += sample.humidity_rh;
        self.valid = self.valid.saturating_add(1);
    }

    pub fn record_error(&mut self) {
        self.errors = self.errors.saturating_add(1);
    }

    /// Whether the period has elapsed
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.started_ms) >= self.period_ms
    }

    /// Close the window if it is due and start the next one at `now_ms`
    pub fn take(&mut self, now_ms: u32) -> Option<WindowSummary> {
        if !self.is_due(now_ms) {
            return None;
        }

        let summary = if self.valid == 0 {
            WindowSummary {
                temperature_c: None,
                humidity_rh: None,
                valid: 0,
                errors: self.errors,
            }
        } else {
            let n = self.valid as f32;
            WindowSummary {
                temperature_c: Some(self.sum_temperature_c / n),
                humidity_rh: Some(clamp_humidity(self.sum_humidity_rh / n)),
                valid: self.valid,
                errors: self.errors,
            }
        };

        *self = Self::new(self.period_ms, now_ms);
        Some(summary)
    }
}
