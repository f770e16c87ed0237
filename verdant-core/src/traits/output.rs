//! Slot output trait

use verdant_protocol::Period;

use crate::playback::SlotId;

/// Errors that can occur driving a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Output is disabled (door open, maintenance mode)
    Disabled,
    /// Driver reported a fault
    Fault,
}

/// Trait for whatever a slot controls
///
/// Channel slots typically map to an LED driver plus heater and pump
/// targets; the appliance slot to a relay.
pub trait SlotOutput {
    /// Apply the payload of the period now playing on `slot`
    fn apply_period(&mut self, slot: SlotId, period: &Period) -> Result<(), OutputError>;

    /// Put an inactive slot into its resting state
    fn idle(&mut self, slot: SlotId) -> Result<(), OutputError>;
}
