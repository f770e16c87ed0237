//! Slot identifiers

use verdant_protocol::SLOT_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three positional slots of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SlotId {
    /// Upper grow layer
    LayerA = 0,
    /// Lower grow layer
    LayerB = 1,
    /// Appliance (duration only)
    Appliance = 2,
}

impl SlotId {
    /// All slots in playback order
    pub const ALL: [SlotId; SLOT_COUNT] = [SlotId::LayerA, SlotId::LayerB, SlotId::Appliance];

    /// Position of this slot in the recipe
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot for a recipe position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
