//! Text rendering with the built-in 5x7 font
//!
//! Every set glyph bit becomes a `scale x scale` rectangle drawn through
//! the rasterizer. There is no wrapping; glyphs leaving the viewport are
//! clipped by the rasterizer like any other rectangle.

use hygro_core::font::{self, GLYPH_ADVANCE};
use hygro_core::{DisplayError, Rgb565};
use hygro_hal::{Backlight, PanelBus};

use super::Display;

impl<P, B, const N: usize> Display<P, B, N>
where
    P: PanelBus,
    B: Backlight,
{
    /// Draw `text` at scale 1 with its top-left corner at `(x, y)`
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb565) -> Result<(), DisplayError> {
        self.draw_text_scaled(x, y, text, color, 1)
    }

    /// Draw `text` with each font pixel enlarged to `scale x scale`
    ///
    /// Scale 0 draws as scale 1.
    pub fn draw_text_scaled(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Rgb565,
        scale: u8,
    ) -> Result<(), DisplayError> {
        let s = i32::from(font::effective_scale(scale));
        let advance = i32::from(GLYPH_ADVANCE) * s;

        let mut cursor_x = x;
        for ch in text.chars() {
            for (col, row) in font::dots(font::glyph(ch)) {
                let px = cursor_x.saturating_add(i32::from(col) * s);
                let py = y.saturating_add(i32::from(row) * s);
                self.draw_rect(px, py, s, s, color)?;
            }
            cursor_x = cursor_x.saturating_add(advance);
        }
        Ok(())
    }
}
