//! Rotary encoder knob with push button
//!
//! Polled, not interrupt driven: call [`Knob::poll`] every millisecond or
//! so. Pull-ups (`KnobConfig::enable_pullup`) are applied by whoever
//! configures the input pins.

use hygro_core::encoder::{ab_state, ButtonDebouncer, ButtonEdge, QuadratureDecoder};
use hygro_core::KnobConfig;
use hygro_hal::{InputPin, Monotonic};

/// Result of one [`Knob::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobEvent {
    /// +1 / -1 for a completed detent, 0 otherwise
    pub delta: i8,
    /// Button went down
    pub pressed: bool,
    /// Button went up
    pub released: bool,
    /// Release that completed a press
    pub clicked: bool,
    /// Position after this poll
    pub position: i32,
}

impl KnobEvent {
    /// Nothing happened apart from reporting the position
    pub fn is_idle(&self) -> bool {
        self.delta == 0 && !self.pressed && !self.released
    }
}

/// Quadrature knob on CLK/DT with a push button on SW
pub struct Knob<CLK, DT, SW, C> {
    clk: CLK,
    dt: DT,
    sw: SW,
    clock: C,
    decoder: QuadratureDecoder,
    button: ButtonDebouncer,
}

impl<CLK, DT, SW, C> Knob<CLK, DT, SW, C>
where
    CLK: InputPin,
    DT: InputPin,
    SW: InputPin,
    C: Monotonic,
{
    /// Sample the current pin levels as the starting state
    pub fn new(clk: CLK, dt: DT, sw: SW, clock: C, config: KnobConfig) -> Self {
        let ab = ab_state(clk.is_high(), dt.is_high());
        let button = ButtonDebouncer::new(
            config.button_active_low,
            config.debounce_ms(),
            sw.is_high(),
            clock.now_ms() as u32,
        );
        Self {
            clk,
            dt,
            sw,
            clock,
            decoder: QuadratureDecoder::new(ab),
            button,
        }
    }

    /// Sample the pins once
    pub fn poll(&mut self) -> KnobEvent {
        let mut event = KnobEvent {
            delta: self
                .decoder
                .update(ab_state(self.clk.is_high(), self.dt.is_high())),
            ..KnobEvent::default()
        };

        // Wrapping millisecond counter; the debouncer compares differences
        let now_ms = self.clock.now_ms() as u32;
        match self.button.update(self.sw.is_high(), now_ms) {
            Some(ButtonEdge::Pressed) => event.pressed = true,
            Some(ButtonEdge::Released { clicked }) => {
                event.released = true;
                event.clicked = clicked;
            }
            None => {}
        }

        event.position = self.decoder.position();
        event
    }

    /// Logical position in detents
    pub fn position(&self) -> i32 {
        self.decoder.position()
    }

    pub fn set_position(&mut self, position: i32) {
        self.decoder.set_position(position);
    }

    /// Debounced button state
    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    /// Give back the pins and clock
    pub fn release(self) -> (CLK, DT, SW, C) {
        (self.clk, self.dt, self.sw, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePin, FakeTime};

    struct Rig {
        clk: FakePin,
        dt: FakePin,
        sw: FakePin,
        time: FakeTime,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                clk: FakePin::new(true),
                dt: FakePin::new(true),
                sw: FakePin::new(true),
                time: FakeTime::default(),
            }
        }

        fn knob(&self) -> Knob<&FakePin, &FakePin, &FakePin, &FakeTime> {
            Knob::new(&self.clk, &self.dt, &self.sw, &self.time, KnobConfig::default())
        }

        fn set_ab(&self, ab: u8) {
            self.clk.set(ab & 0b10 != 0);
            self.dt.set(ab & 0b01 != 0);
        }

        /// Walk one detent and return the summed deltas
        fn turn(&self, knob: &mut Knob<&FakePin, &FakePin, &FakePin, &FakeTime>, seq: [u8; 4]) -> i32 {
            seq.iter()
                .map(|&ab| {
                    self.set_ab(ab);
                    i32::from(knob.poll().delta)
                })
                .sum()
        }
    }

    /// DT leads
    const CW: [u8; 4] = [0b01, 0b00, 0b10, 0b11];
    /// CLK leads
    const CCW: [u8; 4] = [0b10, 0b00, 0b01, 0b11];

    #[test]
    fn test_rotation_moves_position() {
        let rig = Rig::new();
        let mut knob = rig.knob();

        assert_eq!(rig.turn(&mut knob, CW), 1);
        assert_eq!(rig.turn(&mut knob, CW), 1);
        assert_eq!(rig.turn(&mut knob, CCW), -1);
        assert_eq!(knob.position(), 1);
    }

    #[test]
    fn test_event_reports_position() {
        let rig = Rig::new();
        let mut knob = rig.knob();
        knob.set_position(41);

        rig.set_ab(CW[0]);
        knob.poll();
        rig.set_ab(CW[1]);
        knob.poll();
        rig.set_ab(CW[2]);
        knob.poll();
        rig.set_ab(CW[3]);
        let event = knob.poll();
        assert_eq!(event.delta, 1);
        assert_eq!(event.position, 42);
    }

    #[test]
    fn test_idle_poll() {
        let rig = Rig::new();
        let mut knob = rig.knob();
        let event = knob.poll();
        assert!(event.is_idle());
        assert_eq!(event.position, 0);
    }

    #[test]
    fn test_click_after_debounce() {
        let rig = Rig::new();
        let mut knob = rig.knob();

        rig.time.advance_ms(31);
        rig.sw.set(false);
        let event = knob.poll();
        assert!(event.pressed && !event.released);
        assert!(knob.is_pressed());

        // bounce inside the window is ignored
        rig.time.advance_ms(5);
        rig.sw.set(true);
        assert!(knob.poll().is_idle());
        rig.sw.set(false);

        rig.time.advance_ms(40);
        rig.sw.set(true);
        let event = knob.poll();
        assert!(event.released && event.clicked && !event.pressed);
        assert!(!knob.is_pressed());
    }

    #[test]
    fn test_press_within_debounce_of_start_ignored() {
        let rig = Rig::new();
        let mut knob = rig.knob();
        rig.time.advance_ms(10);
        rig.sw.set(false);
        assert!(knob.poll().is_idle());

        rig.time.advance_ms(20);
        assert!(knob.poll().pressed);
    }
}
