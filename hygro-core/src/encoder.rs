//! Rotary encoder decoding
//!
//! Hardware-independent part of the knob driver: a table-driven
//! quadrature decoder and a push-button debouncer. Both are fed sampled
//! pin levels by the caller.

/// Step direction for every `(previous AB << 2) | current AB` transition
///
/// Invalid transitions (both contacts changed at once) count as 0.
const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0, //
];

/// Quarter steps per mechanical detent
pub const STEPS_PER_DETENT: i8 = 4;

/// Pack CLK/DT levels into the 2-bit AB state
pub const fn ab_state(clk_high: bool, dt_high: bool) -> u8 {
    ((clk_high as u8) << 1) | dt_high as u8
}

/// Quadrature decoder with detent accumulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    last_ab: u8,
    step_acc: i8,
    position: i32,
}

impl QuadratureDecoder {
    /// Create a decoder starting from the current AB state
    pub const fn new(initial_ab: u8) -> Self {
        Self {
            last_ab: initial_ab & 0x03,
            step_acc: 0,
            position: 0,
        }
    }

    /// Feed a sampled AB state
    ///
    /// Returns +1 or -1 once a full detent has accumulated, otherwise 0.
    pub fn update(&mut self, ab: u8) -> i8 {
        let ab = ab & 0x03;
        let idx = usize::from((self.last_ab << 2) | ab);
        self.step_acc = self.step_acc.saturating_add(TRANSITIONS[idx]);
        self.last_ab = ab;

        if self.step_acc >= STEPS_PER_DETENT {
            self.step_acc = 0;
            self.position = self.position.wrapping_add(1);
            1
        } else if self.step_acc <= -STEPS_PER_DETENT {
            self.step_acc = 0;
            self.position = self.position.wrapping_sub(1);
            -1
        } else {
            0
        }
    }

    /// Logical position in detents
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Overwrite the logical position
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

/// Edge reported by the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    /// Button went down
    Pressed,
    /// Button went up; `clicked` is set when a press was latched before it
    Released { clicked: bool },
}

/// Push-button debouncer
///
/// A level change is accepted only if at least `debounce_ms` have passed
/// since the last accepted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDebouncer {
    active_low: bool,
    debounce_ms: u32,
    last_level: bool,
    last_change_ms: u32,
    pressed_latched: bool,
}

impl ButtonDebouncer {
    /// Create a debouncer from the current pin level
    pub const fn new(active_low: bool, debounce_ms: u32, level_high: bool, now_ms: u32) -> Self {
        Self {
            active_low,
            debounce_ms,
            last_level: level_high,
            last_change_ms: now_ms,
            pressed_latched: false,
        }
    }

    /// Feed a sampled level at `now_ms` (wrapping millisecond counter)
    pub fn update(&mut self, level_high: bool, now_ms: u32) -> Option<ButtonEdge> {
        if level_high == self.last_level {
            return None;
        }
        if now_ms.wrapping_sub(self.last_change_ms) < self.debounce_ms {
            return None;
        }

        self.last_level = level_high;
        self.last_change_ms = now_ms;

        let pressed = level_high != self.active_low;
        if pressed {
            self.pressed_latched = true;
            Some(ButtonEdge::Pressed)
        } else {
            let clicked = self.pressed_latched;
            self.pressed_latched = false;
            Some(ButtonEdge::Released { clicked })
        }
    }

    /// Whether the debounced button is currently held
    pub const fn is_pressed(&self) -> bool {
        self.last_level != self.active_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One clockwise detent, DT leads: 11 -> 01 -> 00 -> 10 -> 11
    const CW: [u8; 4] = [0b01, 0b00, 0b10, 0b11];
    /// One counter-clockwise detent, CLK leads: 11 -> 10 -> 00 -> 01 -> 11
    const CCW: [u8; 4] = [0b10, 0b00, 0b01, 0b11];

    fn feed(decoder: &mut QuadratureDecoder, seq: &[u8]) -> i32 {
        seq.iter().map(|&ab| i32::from(decoder.update(ab))).sum()
    }

    #[test]
    fn test_transition_signs() {
        // 11 -> 01 and 01 -> 00 step forward, 11 -> 10 steps back
        assert_eq!(TRANSITIONS[0b1101], 1);
        assert_eq!(TRANSITIONS[0b0100], 1);
        assert_eq!(TRANSITIONS[0b1110], -1);
    }

    #[test]
    fn test_ab_packing() {
        assert_eq!(ab_state(true, false), 0b10);
        assert_eq!(ab_state(false, true), 0b01);
    }

    #[test]
    fn test_full_detent_each_direction() {
        let mut decoder = QuadratureDecoder::new(0b11);
        assert_eq!(feed(&mut decoder, &CW), 1);
        assert_eq!(decoder.position(), 1);
        assert_eq!(feed(&mut decoder, &CCW), -1);
        assert_eq!(feed(&mut decoder, &CCW), -1);
        assert_eq!(decoder.position(), -1);
    }

    #[test]
    fn test_event_only_on_last_quarter_step() {
        let mut decoder = QuadratureDecoder::new(0b11);
        assert_eq!(decoder.update(CW[0]), 0);
        assert_eq!(decoder.update(CW[1]), 0);
        assert_eq!(decoder.update(CW[2]), 0);
        assert_eq!(decoder.update(CW[3]), 1);
    }

    #[test]
    fn test_bounce_cancels_out() {
        let mut decoder = QuadratureDecoder::new(0b11);
        assert_eq!(feed(&mut decoder, &[0b10, 0b11, 0b10, 0b11]), 0);
        assert_eq!(decoder.position(), 0);
    }

    #[test]
    fn test_invalid_jump_ignored() {
        let mut decoder = QuadratureDecoder::new(0b11);
        assert_eq!(decoder.update(0b00), 0);
        assert_eq!(decoder.update(0b11), 0);
        assert_eq!(decoder.position(), 0);
    }

    #[test]
    fn test_set_position() {
        let mut decoder = QuadratureDecoder::new(0b11);
        decoder.set_position(128);
        feed(&mut decoder, &CW);
        assert_eq!(decoder.position(), 129);
    }

    #[test]
    fn test_button_click_cycle() {
        let mut button = ButtonDebouncer::new(true, 30, true, 0);
        assert_eq!(button.update(false, 40), Some(ButtonEdge::Pressed));
        assert!(button.is_pressed());
        assert_eq!(
            button.update(true, 100),
            Some(ButtonEdge::Released { clicked: true })
        );
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_button_bounce_rejected() {
        let mut button = ButtonDebouncer::new(true, 30, true, 0);
        assert_eq!(button.update(false, 10), None);
        assert_eq!(button.update(false, 35), Some(ButtonEdge::Pressed));
        assert_eq!(button.update(true, 40), None);
        assert_eq!(button.update(false, 50), None);
    }

    #[test]
    fn test_button_active_high() {
        let mut button = ButtonDebouncer::new(false, 5, false, 0);
        assert_eq!(button.update(true, 10), Some(ButtonEdge::Pressed));
    }

    #[test]
    fn test_release_without_latched_press_is_not_click() {
        // Button already held at start-up
        let mut button = ButtonDebouncer::new(true, 30, false, 0);
        assert_eq!(
            button.update(true, 50),
            Some(ButtonEdge::Released { clicked: false })
        );
    }
}
