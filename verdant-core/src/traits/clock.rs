//! Wall clock trait

/// Errors that can occur reading the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// RTC has never been set (e.g. after battery loss)
    NotSet,
    /// RTC did not respond
    Unavailable,
}

/// Trait for real-time clocks
///
/// Implementations wrap the board RTC or a network-synchronized time
/// source.
pub trait WallClock {
    /// Current time in Unix seconds
    ///
    /// Takes `&mut self` because RTC reads typically go over a bus.
    fn now_s(&mut self) -> Result<i64, ClockError>;
}
