//! Display context
//!
//! [`Display`] owns the panel, its backlight, the current rotation and
//! viewport, and the rasterizer's line buffer. All drawing goes through
//! it, so concurrent use needs a caller-side mutex.
//!
//! ```text
//! draw_rect / draw_text / fill ──► Rasterizer<N> ──► PanelBus::draw_bitmap
//! draw_image / test pattern ──────────────────────► PanelBus::draw_bitmap
//! ```

mod image;
pub mod raster;
pub mod st7789;
mod text;

use embedded_hal_async::delay::DelayNs;
use hygro_core::config::LINE_BUFFER_CAPACITY;
use hygro_core::{DisplayError, PanelConfig, Rgb565, Rotation, Viewport};
use hygro_hal::{Backlight, PanelBus};

pub use raster::Rasterizer;
pub use st7789::St7789;

/// Backlight level applied during bring-up
pub const DEFAULT_BACKLIGHT_PERCENT: u8 = 80;

/// Pause between self-test colour fills
const SELF_TEST_STEP_MS: u32 = 180;

/// RGB565 display with a line-buffer rasterizer of `N` pixels
pub struct Display<P, B, const N: usize = LINE_BUFFER_CAPACITY> {
    panel: P,
    backlight: B,
    config: PanelConfig,
    rotation: Rotation,
    viewport: Viewport,
    raster: Rasterizer<N>,
}

impl<P, B, const N: usize> Display<P, B, N>
where
    P: PanelBus,
    B: Backlight,
{
    /// Bring up the panel
    ///
    /// Validates `config` against the line buffer, initializes the
    /// controller, applies the RAM gap, enables colour inversion, turns
    /// the panel on, sets the backlight to 80 % and selects rotation 0.
    pub fn new(panel: P, backlight: B, config: PanelConfig) -> Result<Self, DisplayError> {
        config.validate(N)?;

        let mut display = Self {
            panel,
            backlight,
            config,
            rotation: Rotation::Deg0,
            viewport: Viewport::compute(Rotation::Deg0, &config),
            raster: Rasterizer::new(),
        };

        display.panel.init().map_err(|_| DisplayError::Bus)?;
        display
            .panel
            .set_gap(config.x_offset, config.y_offset)
            .map_err(|_| DisplayError::Bus)?;
        display.panel.set_inverted(true).map_err(|_| DisplayError::Bus)?;
        display.panel.set_display_on(true).map_err(|_| DisplayError::Bus)?;

        display.set_backlight(DEFAULT_BACKLIGHT_PERCENT)?;
        display.set_rotation(Rotation::Deg0)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "display initialized {}x{} @ {} Hz",
            config.width,
            config.height,
            config.spi_clock_hz
        );

        Ok(display)
    }

    /// Apply a rotation
    ///
    /// Sets the controller scan orientation and the rotated RAM gap, then
    /// adopts the new viewport. If the gap cannot be applied the previous
    /// scan orientation is put back and rotation and viewport are left
    /// unchanged.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        let viewport = Viewport::compute(rotation, &self.config);

        let o = rotation.orientation();
        self.panel
            .set_orientation(o.swap_xy, o.mirror_x, o.mirror_y)
            .map_err(|_| DisplayError::Bus)?;

        if self
            .panel
            .set_gap(viewport.x_offset, viewport.y_offset)
            .is_err()
        {
            let prev = self.rotation.orientation();
            // Best effort; the gap failure is what gets reported
            let _ = self
                .panel
                .set_orientation(prev.swap_xy, prev.mirror_x, prev.mirror_y);
            return Err(DisplayError::Bus);
        }

        self.rotation = rotation;
        self.viewport = viewport;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "rotation {} deg, viewport {}x{}",
            rotation.degrees(),
            viewport.width,
            viewport.height
        );

        Ok(())
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Active width under the current rotation
    pub fn width(&self) -> u16 {
        self.viewport.width
    }

    /// Active height under the current rotation
    pub fn height(&self) -> u16 {
        self.viewport.height
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Set backlight brightness in percent, clamped to 100
    pub fn set_backlight(&mut self, percent: u8) -> Result<(), DisplayError> {
        let percent = u64::from(percent.min(100));
        let duty = u64::from(self.backlight.max_duty()) * percent / 100;
        // duty <= max_duty, so it fits back into u32
        self.backlight
            .set_duty(duty as u32)
            .map_err(|_| DisplayError::Bus)
    }

    /// Fill a rectangle, clipped to the viewport
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.raster
            .fill_rect(&mut self.panel, &self.viewport, x, y, w, h, color)
    }

    /// Fill the whole viewport
    pub fn fill(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        let (w, h) = (i32::from(self.viewport.width), i32::from(self.viewport.height));
        self.draw_rect(0, 0, w, h, color)
    }

    /// Visual bring-up check
    ///
    /// Full backlight, red/green/blue/white fills with a short pause
    /// after each, then black with a yellow block and two labels.
    pub async fn self_test<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.set_backlight(100)?;

        for color in [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE] {
            self.fill(color)?;
            delay.delay_ms(SELF_TEST_STEP_MS).await;
        }
        self.fill(Rgb565::BLACK)?;

        let w = i32::from(self.viewport.width);
        let h = i32::from(self.viewport.height);
        self.draw_rect(20, 30, (w / 3).max(30), (h / 4).max(30), Rgb565::YELLOW)?;
        self.draw_text(12, 12, "TEMP", Rgb565::WHITE)?;
        self.draw_text(12, 24, "RH", Rgb565::WHITE)
    }

    /// Give back the panel and backlight
    pub fn release(self) -> (P, B) {
        (self.panel, self.backlight)
    }
}
