//! Error types shared by the drivers

/// Errors from display operations
///
/// Degenerate or fully clipped geometry is not an error: drawing calls
/// simply do nothing in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Malformed caller input (bad geometry, short pixel buffer)
    InvalidArgument,
    /// Panel or backlight transaction failed
    Bus,
    /// Scratch buffer could not be allocated
    OutOfMemory,
}

/// Errors from the humidity/temperature sensor and its filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Malformed caller input (e.g. filter alpha outside (0, 1])
    InvalidArgument,
    /// Operation attempted before the sensor was initialized
    InvalidState,
    /// I2C transaction failed
    Bus,
    /// Frame CRC did not match
    CrcMismatch,
    /// Conversion still in progress; retry later
    NotReady,
    /// Bounded wait exceeded
    Timeout,
}

impl SensorError {
    /// Whether the error is transient and the operation may simply be retried
    pub fn is_transient(&self) -> bool {
        matches!(self, SensorError::NotReady)
    }
}
