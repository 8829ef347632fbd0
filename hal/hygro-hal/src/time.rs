//! Time source abstraction

/// Monotonic clock
///
/// Must never go backwards. Used for sample timestamps, timeout bounds
/// and button debouncing.
pub trait Monotonic {
    /// Microseconds since an arbitrary fixed epoch (usually boot)
    fn now_us(&self) -> u64;

    /// Milliseconds since the same epoch
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
