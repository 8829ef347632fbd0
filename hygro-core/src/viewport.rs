//! Viewport transform
//!
//! A panel is configured once in its native (rotation 0) orientation.
//! Rotating it by a quarter turn exchanges the roles of width and height
//! and of the two RAM offsets; a half turn leaves the geometry unchanged.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;

/// Clockwise panel rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Native orientation
    #[default]
    Deg0,
    /// Quarter turn clockwise
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turns clockwise
    Deg270,
}

impl Rotation {
    /// Decode the 2-bit rotation index, taking any value modulo 4
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// 2-bit rotation index (0-3)
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        self.index() as u16 * 90
    }

    /// Next quarter turn clockwise
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Whether width and height are exchanged relative to the native panel
    pub const fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Controller scan orientation for this rotation
    pub const fn orientation(self) -> Orientation {
        match self {
            Rotation::Deg0 => Orientation {
                swap_xy: false,
                mirror_x: false,
                mirror_y: false,
            },
            Rotation::Deg90 => Orientation {
                swap_xy: true,
                mirror_x: true,
                mirror_y: false,
            },
            Rotation::Deg180 => Orientation {
                swap_xy: false,
                mirror_x: true,
                mirror_y: true,
            },
            Rotation::Deg270 => Orientation {
                swap_xy: true,
                mirror_x: false,
                mirror_y: true,
            },
        }
    }
}

/// Controller scan direction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Exchange rows and columns
    pub swap_xy: bool,
    /// Mirror horizontally
    pub mirror_x: bool,
    /// Mirror vertically
    pub mirror_y: bool,
}

/// Active drawable area after rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Viewport {
    /// Active width in pixels
    pub width: u16,
    /// Active height in pixels
    pub height: u16,
    /// Column offset in controller RAM
    pub x_offset: u16,
    /// Row offset in controller RAM
    pub y_offset: u16,
}

impl Viewport {
    /// Compute the active viewport of `panel` under `rotation`
    pub const fn compute(rotation: Rotation, panel: &PanelConfig) -> Self {
        if rotation.is_transposed() {
            Self {
                width: panel.height,
                height: panel.width,
                x_offset: panel.y_offset,
                y_offset: panel.x_offset,
            }
        } else {
            Self {
                width: panel.width,
                height: panel.height,
                x_offset: panel.x_offset,
                y_offset: panel.y_offset,
            }
        }
    }

    /// Number of pixels in the viewport
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Intersect a signed rectangle with `[0, width) x [0, height)`
    ///
    /// Returns `(x0, y0, x1, y1)` with exclusive ends, or `None` when the
    /// intersection is empty.
    pub fn clip(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(u16, u16, u16, u16)> {
        if w <= 0 || h <= 0 {
            return None;
        }

        let width = i32::from(self.width);
        let height = i32::from(self.height);
        let x0 = x.clamp(0, width);
        let y0 = y.clamp(0, height);
        let x1 = x.saturating_add(w).clamp(0, width);
        let y1 = y.saturating_add(h).clamp(0, height);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        // All four are within 0..=u16::MAX after clamping
        Some((x0 as u16, y0 as u16, x1 as u16, y1 as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn panel() -> PanelConfig {
        PanelConfig::new(170, 320, 26_000_000).with_offset(35, 0)
    }

    #[test]
    fn test_rotation_index_wraps() {
        assert_eq!(Rotation::from_index(0), Rotation::Deg0);
        assert_eq!(Rotation::from_index(5), Rotation::Deg90);
        assert_eq!(Rotation::from_index(6), Rotation::Deg180);
        assert_eq!(Rotation::from_index(255), Rotation::Deg270);
        assert_eq!(Rotation::Deg270.next(), Rotation::Deg0);
        assert_eq!(Rotation::Deg180.degrees(), 180);
    }

    #[test]
    fn test_native_rotation_passthrough() {
        let vp = Viewport::compute(Rotation::Deg0, &panel());
        assert_eq!(
            vp,
            Viewport {
                width: 170,
                height: 320,
                x_offset: 35,
                y_offset: 0
            }
        );
        assert_eq!(Viewport::compute(Rotation::Deg180, &panel()), vp);
    }

    #[test]
    fn test_quarter_turn_swaps_geometry() {
        let vp = Viewport::compute(Rotation::Deg90, &panel());
        assert_eq!(
            vp,
            Viewport {
                width: 320,
                height: 170,
                x_offset: 0,
                y_offset: 35
            }
        );
        assert_eq!(Viewport::compute(Rotation::Deg270, &panel()), vp);
    }

    #[test]
    fn test_orientation_table() {
        let o = Rotation::Deg90.orientation();
        assert!(o.swap_xy && o.mirror_x && !o.mirror_y);
        let o = Rotation::Deg180.orientation();
        assert!(!o.swap_xy && o.mirror_x && o.mirror_y);
        let o = Rotation::Deg270.orientation();
        assert!(o.swap_xy && !o.mirror_x && o.mirror_y);
    }

    #[test]
    fn test_clip_partial_overlap() {
        let vp = Viewport::compute(Rotation::Deg0, &PanelConfig::new(100, 50, 1));
        assert_eq!(vp.clip(-10, -5, 20, 10), Some((0, 0, 10, 5)));
        assert_eq!(vp.clip(90, 40, 20, 20), Some((90, 40, 100, 50)));
    }

    #[test]
    fn test_clip_empty() {
        let vp = Viewport::compute(Rotation::Deg0, &PanelConfig::new(100, 50, 1));
        assert_eq!(vp.clip(0, 0, 0, 10), None);
        assert_eq!(vp.clip(0, 0, 10, -1), None);
        assert_eq!(vp.clip(100, 0, 10, 10), None);
        assert_eq!(vp.clip(-20, 0, 20, 10), None);
        assert_eq!(vp.clip(i32::MAX, i32::MAX, i32::MAX, 1), None);
    }

    proptest! {
        #[test]
        fn prop_compute_is_idempotent(
            w in 1u16..=320, h in 1u16..=320, xo in 0u16..100, yo in 0u16..100, r in 0u8..4
        ) {
            let cfg = PanelConfig::new(w, h, 1).with_offset(xo, yo);
            let rot = Rotation::from_index(r);
            prop_assert_eq!(Viewport::compute(rot, &cfg), Viewport::compute(rot, &cfg));
        }

        #[test]
        fn prop_swap_between_even_and_odd(
            w in 1u16..=320, h in 1u16..=320, xo in 0u16..100, yo in 0u16..100, r in 0u8..4
        ) {
            let cfg = PanelConfig::new(w, h, 1).with_offset(xo, yo);
            let rot = Rotation::from_index(r);
            let a = Viewport::compute(rot, &cfg);
            let b = Viewport::compute(rot.next(), &cfg);
            prop_assert_eq!((a.width, a.height), (b.height, b.width));
            prop_assert_eq!((a.x_offset, a.y_offset), (b.y_offset, b.x_offset));
        }

        #[test]
        fn prop_four_quarter_turns_restore(
            w in 1u16..=320, h in 1u16..=320, xo in 0u16..100, yo in 0u16..100, r in 0u8..4
        ) {
            let cfg = PanelConfig::new(w, h, 1).with_offset(xo, yo);
            let start = Rotation::from_index(r);
            let mut rot = start;
            for _ in 0..4 {
                rot = rot.next();
            }
            prop_assert_eq!(rot, start);
            prop_assert_eq!(Viewport::compute(rot, &cfg), Viewport::compute(start, &cfg));
        }

        #[test]
        fn prop_clip_is_intersection(
            x in -400i32..400, y in -400i32..400, w in 1i32..400, h in 1i32..400
        ) {
            let vp = Viewport::compute(Rotation::Deg0, &PanelConfig::new(170, 320, 1));
            let ix0 = x.max(0);
            let iy0 = y.max(0);
            let ix1 = (x + w).min(170);
            let iy1 = (y + h).min(320);
            match vp.clip(x, y, w, h) {
                Some((x0, y0, x1, y1)) => {
                    prop_assert_eq!(
                        (i32::from(x0), i32::from(y0), i32::from(x1), i32::from(y1)),
                        (ix0, iy0, ix1, iy1)
                    );
                }
                None => prop_assert!(ix1 <= ix0 || iy1 <= iy0),
            }
        }
    }
}
