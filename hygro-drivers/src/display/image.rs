//! Direct RGB565 image blits and the streaming colour-bar pattern

use hygro_core::DisplayError;
use hygro_hal::{Backlight, PanelBus};

use super::Display;

impl<P, B, const N: usize> Display<P, B, N>
where
    P: PanelBus,
    B: Backlight,
{
    /// Blit a full-viewport image in one transaction
    ///
    /// `pixels` is row-major and must hold at least `width * height`
    /// values.
    pub fn draw_image(&mut self, pixels: &[u16]) -> Result<(), DisplayError> {
        if pixels.len() < self.viewport.area() {
            return Err(DisplayError::InvalidArgument);
        }
        self.panel
            .draw_bitmap(0, 0, self.viewport.width, self.viewport.height, pixels)
            .map_err(|_| DisplayError::Bus)
    }

    /// Blit an image into a rectangle that lies fully inside the viewport
    ///
    /// Unlike the drawing primitives this does not clip: a rectangle that
    /// leaves the viewport is an [`DisplayError::InvalidArgument`].
    pub fn draw_image_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        pixels: &[u16],
    ) -> Result<(), DisplayError> {
        if x < 0 || y < 0 || w <= 0 || h <= 0 {
            return Err(DisplayError::InvalidArgument);
        }
        let x1 = x.checked_add(w).ok_or(DisplayError::InvalidArgument)?;
        let y1 = y.checked_add(h).ok_or(DisplayError::InvalidArgument)?;
        if x1 > i32::from(self.viewport.width) || y1 > i32::from(self.viewport.height) {
            return Err(DisplayError::InvalidArgument);
        }
        // w, h > 0 and both fit in the viewport
        if pixels.len() < w as usize * h as usize {
            return Err(DisplayError::InvalidArgument);
        }

        self.panel
            .draw_bitmap(x as u16, y as u16, x1 as u16, y1 as u16, pixels)
            .map_err(|_| DisplayError::Bus)
    }

    /// Stream eight vertical colour bars in blocks of `block_rows` rows
    ///
    /// Uses a heap scratch buffer of `width * block_rows` pixels; the last
    /// block is shortened to the remaining rows.
    #[cfg(feature = "alloc")]
    pub fn draw_test_pattern(&mut self, block_rows: i32) -> Result<(), DisplayError> {
        use alloc::vec::Vec;
        use hygro_core::color::color_bar_at;

        if block_rows <= 0 {
            return Err(DisplayError::InvalidArgument);
        }

        let width = usize::from(self.viewport.width);
        let height = self.viewport.height;
        // Never need more rows than the panel has
        let block_rows = (block_rows as usize).min(usize::from(height));
        let len = width
            .checked_mul(block_rows)
            .ok_or(DisplayError::OutOfMemory)?;

        let mut block: Vec<u16> = Vec::new();
        block
            .try_reserve_exact(len)
            .map_err(|_| DisplayError::OutOfMemory)?;

        // Every row of the pattern is identical
        for _ in 0..block_rows {
            block.extend((0..width).map(|x| color_bar_at(x, width).raw()));
        }

        let mut y = 0u16;
        while y < height {
            let rows = (height - y).min(block_rows as u16);
            self.panel
                .draw_bitmap(0, y, self.viewport.width, y + rows, &block)
                .map_err(|_| DisplayError::Bus)?;
            y += rows;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::display::Display;
    use crate::testing::{FakeBacklight, RecordingPanel};
    use hygro_core::{DisplayError, PanelConfig, Rgb565, Rotation};

    fn display() -> Display<RecordingPanel, FakeBacklight> {
        let mut display = Display::new(
            RecordingPanel::default(),
            FakeBacklight::default(),
            PanelConfig::new(16, 10, 1_000_000),
        )
        .unwrap();
        display.panel.blits.clear();
        display
    }

    #[test]
    fn test_full_image_needs_enough_pixels() {
        let mut display = display();
        let short = vec![0u16; 159];
        assert_eq!(display.draw_image(&short), Err(DisplayError::InvalidArgument));

        let image: Vec<u16> = (0..160).collect();
        display.draw_image(&image).unwrap();
        assert_eq!(display.panel.rects(), vec![(0, 0, 16, 10)]);
        assert_eq!(display.panel.blits[0].pixels, image);
    }

    #[test]
    fn test_full_image_follows_rotation() {
        let mut display = display();
        display.set_rotation(Rotation::Deg90).unwrap();
        display.draw_image(&[0u16; 160]).unwrap();
        assert_eq!(display.panel.rects(), vec![(0, 0, 10, 16)]);
    }

    #[test]
    fn test_image_rect_validation() {
        let mut display = display();
        let pixels = [0u16; 64];
        for (x, y, w, h) in [
            (-1, 0, 2, 2),
            (0, -1, 2, 2),
            (0, 0, 0, 2),
            (0, 0, 2, -3),
            (15, 0, 2, 2),
            (0, 9, 2, 2),
            (0, 0, 9, 8),
            (i32::MAX, 0, 1, 1),
        ] {
            assert_eq!(
                display.draw_image_rect(x, y, w, h, &pixels),
                Err(DisplayError::InvalidArgument),
                "rect {x},{y} {w}x{h}"
            );
        }
        assert!(display.panel.blits.is_empty());

        display.draw_image_rect(14, 8, 2, 2, &pixels).unwrap();
        assert_eq!(display.panel.rects(), vec![(14, 8, 16, 10)]);
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn test_test_pattern_streams_blocks() {
        let mut display = display();
        display.draw_test_pattern(4).unwrap();

        assert_eq!(
            display.panel.rects(),
            vec![(0, 0, 16, 4), (0, 4, 16, 8), (0, 8, 16, 10)]
        );
        let first_row = &display.panel.blits[0].pixels[..16];
        assert_eq!(first_row[0], Rgb565::BLACK.raw());
        assert_eq!(first_row[2], Rgb565::WHITE.raw());
        assert_eq!(first_row[15], Rgb565::MAGENTA.raw());
        assert_eq!(display.panel.blits[2].pixels.len(), 32);
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn test_test_pattern_rejects_non_positive_blocks() {
        let mut display = display();
        assert_eq!(display.draw_test_pattern(0), Err(DisplayError::InvalidArgument));
        assert_eq!(display.draw_test_pattern(-4), Err(DisplayError::InvalidArgument));
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn test_test_pattern_stops_at_first_failure() {
        let mut display = Display::<_, _, 320>::new(
            RecordingPanel::failing_at(1),
            FakeBacklight::default(),
            PanelConfig::new(16, 10, 1_000_000),
        )
        .unwrap();
        assert_eq!(display.draw_test_pattern(3), Err(DisplayError::Bus));
        assert_eq!(display.panel.rects(), vec![(0, 0, 16, 3)]);
    }
}
