//! PWM backlight

use core::convert::Infallible;

use embassy_rp::pwm::{Config, Pwm};
use hygro_hal::Backlight;

/// Default PWM wrap value; with the default divider this is ~12 kHz
pub const DEFAULT_TOP: u16 = 9_999;

/// Backlight on channel A of a PWM slice
pub struct PwmBacklight<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> PwmBacklight<'d> {
    /// Take a PWM slice already bound to its A output, starting dark
    pub fn new(mut pwm: Pwm<'d>, top: u16) -> Self {
        let mut config = Config::default();
        config.top = top;
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl Backlight for PwmBacklight<'_> {
    type Error = Infallible;

    fn max_duty(&self) -> u32 {
        u32::from(self.config.top)
    }

    fn set_duty(&mut self, duty: u32) -> Result<(), Infallible> {
        // Clamped to top, which fits in u16
        self.config.compare_a = duty.min(u32::from(self.config.top)) as u16;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
