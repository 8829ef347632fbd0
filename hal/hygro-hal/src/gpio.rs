//! Polled digital inputs
//!
//! The knob contacts and its button are sampled, never interrupt driven,
//! so reading a level is all the drivers need.

/// Digital input sampled by the caller
pub trait InputPin {
    /// Current level is high
    fn is_high(&self) -> bool;
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}
