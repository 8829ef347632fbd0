//! GPIO inputs and pin bookkeeping

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use heapless::FnvIndexSet;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Error when claiming a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already claimed by another function
    AlreadyTaken,
}

/// Tracks which GPIOs the board wiring uses
///
/// The firmware claims every pin of its board map through this so that
/// a wiring table with two functions on one pin is caught at start-up.
pub struct GpioAllocator {
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Claim a pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        if pin >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        match self.allocated.insert(pin) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PinError::AlreadyTaken),
            Err(_) => Err(PinError::InvalidPin),
        }
    }

    /// Claim every pin in `pins`, stopping at the first conflict
    pub fn allocate_all(&mut self, pins: &[u8]) -> Result<(), PinError> {
        pins.iter().try_for_each(|&pin| self.allocate(pin))
    }

    pub fn release(&mut self, pin: u8) {
        self.allocated.remove(&pin);
    }

    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains(&pin)
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

/// Polled digital input for the knob contacts and button
pub struct KnobInput<'d> {
    input: Input<'d>,
}

impl<'d> KnobInput<'d> {
    /// Configure `pin` as an input, with the internal pull-up if requested
    pub fn new(pin: Peri<'d, impl Pin>, pullup: bool) -> Self {
        let pull = if pullup { Pull::Up } else { Pull::None };
        Self {
            input: Input::new(pin, pull),
        }
    }
}

impl hygro_hal::InputPin for KnobInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
