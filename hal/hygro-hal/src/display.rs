//! Display panel abstractions
//!
//! [`PanelBus`] is the pixel blit sink plus the handful of controller
//! settings the display context needs. Coordinates passed to
//! [`PanelBus::draw_bitmap`] are in the rotated (logical) coordinate
//! space; the implementation adds the gap set by [`PanelBus::set_gap`].

/// RGB565 display panel controller
pub trait PanelBus {
    /// Error type for panel operations
    type Error;

    /// Reset and initialize the controller
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Blit a rectangle of packed RGB565 pixels
    ///
    /// `x1`/`y1` are exclusive. `pixels` holds at least
    /// `(x1 - x0) * (y1 - y0)` values in row-major order; a shorter slice
    /// is an error and nothing is sent.
    fn draw_bitmap(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        pixels: &[u16],
    ) -> Result<(), Self::Error>;

    /// Set scan orientation (row/column exchange and mirroring)
    fn set_orientation(
        &mut self,
        swap_xy: bool,
        mirror_x: bool,
        mirror_y: bool,
    ) -> Result<(), Self::Error>;

    /// Set the offset of the visible area inside controller RAM
    fn set_gap(&mut self, x: u16, y: u16) -> Result<(), Self::Error>;

    /// Enable or disable colour inversion
    fn set_inverted(&mut self, inverted: bool) -> Result<(), Self::Error>;

    /// Turn the panel output on or off
    fn set_display_on(&mut self, on: bool) -> Result<(), Self::Error>;
}

/// PWM-driven backlight
pub trait Backlight {
    /// Error type for backlight operations
    type Error;

    /// Largest duty value the channel accepts
    fn max_duty(&self) -> u32;

    /// Set the raw duty value (`0..=max_duty()`)
    fn set_duty(&mut self, duty: u32) -> Result<(), Self::Error>;
}
