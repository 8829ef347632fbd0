//! Exponential moving average filter
//!
//! `state = alpha * input + (1 - alpha) * state`, applied independently to
//! temperature and humidity. The first sample after construction or
//! [`EmaFilter::reset`] seeds the state directly, so there is no start-up
//! transient from zero.

use crate::error::SensorError;
use crate::sensor::{clamp_humidity, Sample};

/// Check a smoothing factor: finite and in (0, 1]
pub fn validate_alpha(alpha: f32) -> Result<(), SensorError> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
        return Err(SensorError::InvalidArgument);
    }
    Ok(())
}

/// EMA filter state for one sensor channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmaFilter {
    alpha: f32,
    initialized: bool,
    humidity_rh: f32,
    temperature_c: f32,
}

impl EmaFilter {
    /// Create a filter with smoothing factor `alpha`
    ///
    /// `alpha = 1.0` passes samples through unchanged; smaller values
    /// smooth harder.
    pub fn new(alpha: f32) -> Result<Self, SensorError> {
        validate_alpha(alpha)?;
        Ok(Self {
            alpha,
            initialized: false,
            humidity_rh: 0.0,
            temperature_c: 0.0,
        })
    }

    /// Smoothing factor
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Whether a sample has been applied since construction or reset
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Forget the smoothed state; the next sample seeds it again
    pub fn reset(&mut self) {
        self.initialized = false;
    }

    /// Feed one sample and return the smoothed sample
    ///
    /// Timestamp and raw values pass through from `input`. Output humidity
    /// is clamped to [0, 100] %RH; temperature is not clamped.
    pub fn apply(&mut self, input: &Sample) -> Sample {
        if self.initialized {
            let keep = 1.0 - self.alpha;
            self.temperature_c = self.alpha * input.temperature_c + keep * self.temperature_c;
            self.humidity_rh = self.alpha * input.humidity_rh + keep * self.humidity_rh;
        } else {
            self.temperature_c = input.temperature_c;
            self.humidity_rh = input.humidity_rh;
            self.initialized = true;
        }

        Sample {
            temperature_c: self.temperature_c,
            humidity_rh: clamp_humidity(self.humidity_rh),
            ..*input
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(temperature_c: f32, humidity_rh: f32) -> Sample {
        Sample {
            timestamp_us: 7,
            humidity_raw: 1,
            temperature_raw: 2,
            humidity_rh,
            temperature_c,
        }
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        for alpha in [0.0, -0.1, 1.0001, f32::NAN, f32::INFINITY] {
            assert_eq!(EmaFilter::new(alpha), Err(SensorError::InvalidArgument));
        }
        assert!(EmaFilter::new(1.0).is_ok());
        assert!(EmaFilter::new(f32::MIN_POSITIVE).is_ok());
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = EmaFilter::new(0.1).unwrap();
        let input = sample(21.5, 40.0);
        assert_eq!(filter.apply(&input), input);
        assert!(filter.is_initialized());
    }

    #[test]
    fn test_smoothing_step() {
        let mut filter = EmaFilter::new(0.25).unwrap();
        filter.apply(&sample(20.0, 40.0));
        let out = filter.apply(&sample(24.0, 60.0));
        assert!((out.temperature_c - 21.0).abs() < 1e-5);
        assert!((out.humidity_rh - 45.0).abs() < 1e-5);
        assert_eq!(out.timestamp_us, 7);
        assert_eq!((out.humidity_raw, out.temperature_raw), (1, 2));
    }

    #[test]
    fn test_reset_reseeds_and_keeps_alpha() {
        let mut filter = EmaFilter::new(0.5).unwrap();
        filter.apply(&sample(10.0, 10.0));
        filter.apply(&sample(30.0, 30.0));
        filter.reset();
        assert!(!filter.is_initialized());
        assert_eq!(filter.alpha(), 0.5);

        let input = sample(-3.0, 80.0);
        assert_eq!(filter.apply(&input), input);
    }

    #[test]
    fn test_output_humidity_clamped_temperature_not() {
        let mut filter = EmaFilter::new(1.0).unwrap();
        let out = filter.apply(&sample(-60.0, 104.0));
        assert_eq!(out.humidity_rh, 100.0);
        assert_eq!(out.temperature_c, -60.0);
    }

    #[test]
    fn test_constant_input_converges() {
        for alpha in [0.01, 0.1, 0.5, 1.0] {
            let mut filter = EmaFilter::new(alpha).unwrap();
            filter.apply(&sample(0.0, 0.0));
            let mut out = Sample::default();
            for _ in 0..5000 {
                out = filter.apply(&sample(25.0, 55.0));
            }
            assert!((out.temperature_c - 25.0).abs() < 1e-3, "alpha {alpha}");
            assert!((out.humidity_rh - 55.0).abs() < 1e-3, "alpha {alpha}");
        }
    }
}
