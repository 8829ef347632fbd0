//! Line-buffer rasterizer
//!
//! Solid rectangles are drawn one scanline at a time from a single
//! buffer of `N` pixels: the buffer is filled once with the colour and
//! then blitted for every row of the clipped rectangle. Memory use is
//! bounded by the widest scanline, never by the rectangle area.

use hygro_core::{DisplayError, Rgb565, Viewport};
use hygro_hal::PanelBus;

/// Scanline buffer of `N` RGB565 pixels
pub struct Rasterizer<const N: usize> {
    line: [u16; N],
}

impl<const N: usize> Default for Rasterizer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Rasterizer<N> {
    pub const fn new() -> Self {
        Self { line: [0; N] }
    }

    /// Fill a rectangle, clipped to `viewport`
    ///
    /// Empty or fully clipped rectangles issue no blits. The first failed
    /// row blit aborts the draw with [`DisplayError::Bus`]; rows already
    /// sent stay on the panel.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_rect<P: PanelBus>(
        &mut self,
        panel: &mut P,
        viewport: &Viewport,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        let Some((x0, y0, x1, y1)) = viewport.clip(x, y, w, h) else {
            return Ok(());
        };

        let line = self
            .line
            .get_mut(..usize::from(x1 - x0))
            .ok_or(DisplayError::InvalidArgument)?;
        line.fill(color.raw());

        for row in y0..y1 {
            panel
                .draw_bitmap(x0, row, x1, row + 1, line)
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }
}
