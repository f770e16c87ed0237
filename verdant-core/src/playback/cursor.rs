//! Playback cursor
//!
//! Tracks the position of one slot inside its blocks. The position is the
//! triple `(block, inner, repeat)`; [`advance`] moves it by exactly one
//! period and loops back to the first block after the last repetition of
//! the last block. There is no terminal state.

use verdant_protocol::{Block, Period, Schedule, Slot};

use super::SlotId;
use crate::traits::ClockError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from playback operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackError {
    /// Slot has no blocks; check `has_periods` first
    InactiveSlot(SlotId),
    /// Cursor points outside the slot (belongs to another recipe)
    InvalidCursor(SlotId),
    /// Wall clock could not be read
    Clock(ClockError),
}

impl From<ClockError> for PlaybackError {
    fn from(e: ClockError) -> Self {
        PlaybackError::Clock(e)
    }
}

/// Position of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cursor {
    /// Current block
    pub block_index: u8,
    /// Period within the current repetition
    pub inner_index: u8,
    /// Repetition of the current block
    pub repeat_index: u8,
    /// Set once the slot has looped back to its first block
    pub wrapped: bool,
}

impl Cursor {
    /// Cursor at the first period of the first block
    pub const fn new() -> Self {
        Self {
            block_index: 0,
            inner_index: 0,
            repeat_index: 0,
            wrapped: false,
        }
    }

    /// Return to the first period and clear the wrap flag
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check if the cursor is on the first period of the slot
    pub fn at_start(&self) -> bool {
        self.block_index == 0 && self.inner_index == 0 && self.repeat_index == 0
    }
}

/// Resolve the slot, rejecting inactive ones
pub(crate) fn active_slot<'s>(
    schedule: &'s Schedule<'_>,
    slot: SlotId,
) -> Result<&'s Slot, PlaybackError> {
    schedule
        .slot(slot.index())
        .filter(|s| s.has_periods())
        .ok_or(PlaybackError::InactiveSlot(slot))
}

fn current_block<'s>(
    slot_ref: &'s Slot,
    slot: SlotId,
    cursor: &Cursor,
) -> Result<&'s Block, PlaybackError> {
    slot_ref
        .block(cursor.block_index as usize)
        .filter(|b| cursor.inner_index < b.inner_count() && cursor.repeat_index < b.outer_count())
        .ok_or(PlaybackError::InvalidCursor(slot))
}

/// Period the cursor currently points at
pub fn current_period(
    schedule: &Schedule<'_>,
    slot: SlotId,
    cursor: &Cursor,
) -> Result<Period, PlaybackError> {
    let slot_ref = active_slot(schedule, slot)?;
    current_block(slot_ref, slot, cursor)?;
    schedule
        .period(
            slot.index(),
            cursor.block_index as usize,
            cursor.inner_index as usize,
        )
        .ok_or(PlaybackError::InvalidCursor(slot))
}

/// Move the cursor forward by one period
///
/// Rules, first match wins:
/// 1. next period of the same repetition
/// 2. first period of the next repetition of the same block
/// 3. first period of the next block
/// 4. first period of the first block, setting `wrapped`
pub fn advance(
    schedule: &Schedule<'_>,
    slot: SlotId,
    cursor: &mut Cursor,
) -> Result<(), PlaybackError> {
    let slot_ref = active_slot(schedule, slot)?;
    let block = current_block(slot_ref, slot, cursor)?;

    if cursor.inner_index + 1 < block.inner_count() {
        cursor.inner_index += 1;
    } else if cursor.repeat_index + 1 < block.outer_count() {
        cursor.repeat_index += 1;
        cursor.inner_index = 0;
    } else if cursor.block_index + 1 < slot_ref.block_count() {
        cursor.block_index += 1;
        cursor.inner_index = 0;
        cursor.repeat_index = 0;
    } else {
        cursor.block_index = 0;
        cursor.inner_index = 0;
        cursor.repeat_index = 0;
        cursor.wrapped = true;
        trace!("slot {} wrapped", slot);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_protocol::samples::RECIPE_GENERATED;
    use verdant_protocol::{BlockSpec, RecipeSpec};

    fn appliance_recipe(blocks: &[(u8, u8)]) -> heapless::Vec<u8, 256> {
        let mut spec = RecipeSpec::new(7, 0);
        for &(inner, outer) in blocks {
            let mut block = BlockSpec::new(outer);
            for i in 0..inner {
                block.push(Period::appliance(10 + i as u32)).unwrap();
            }
            spec.slots[SlotId::Appliance.index()].push(block).unwrap();
        }
        spec.encode_to_vec().unwrap()
    }

    fn pos(cursor: &Cursor) -> (u8, u8, u8) {
        (cursor.block_index, cursor.inner_index, cursor.repeat_index)
    }

    #[test]
    fn test_single_period_block_repeats_first() {
        let schedule = Schedule::decode(&RECIPE_GENERATED).unwrap();
        let mut cursor = Cursor::new();

        // Block 0 is (inner 1, outer 6): the next repetition, not the next block
        advance(&schedule, SlotId::LayerA, &mut cursor).unwrap();
        assert_eq!(pos(&cursor), (0, 0, 1));
        assert!(!cursor.wrapped);
    }

    #[test]
    fn test_rule_order() {
        let bytes = appliance_recipe(&[(2, 2), (1, 1)]);
        let schedule = Schedule::decode(&bytes).unwrap();
        let mut cursor = Cursor::new();
        let slot = SlotId::Appliance;

        let expected = [(0, 1, 0), (0, 0, 1), (0, 1, 1), (1, 0, 0), (0, 0, 0)];
        for (step, want) in expected.iter().enumerate() {
            advance(&schedule, slot, &mut cursor).unwrap();
            assert_eq!(pos(&cursor), *want, "step {}", step);
        }
        assert!(cursor.wrapped);
    }

    #[test]
    fn test_current_period_follows_cursor() {
        let bytes = appliance_recipe(&[(3, 1)]);
        let schedule = Schedule::decode(&bytes).unwrap();
        let mut cursor = Cursor::new();

        for want in [10, 11, 12, 10] {
            let period = current_period(&schedule, SlotId::Appliance, &cursor).unwrap();
            assert_eq!(period.duration_s, want);
            advance(&schedule, SlotId::Appliance, &mut cursor).unwrap();
        }
    }

    #[test]
    fn test_inactive_slot_rejected() {
        let schedule = Schedule::decode(&RECIPE_GENERATED).unwrap();
        let mut cursor = Cursor::new();

        assert_eq!(
            advance(&schedule, SlotId::Appliance, &mut cursor),
            Err(PlaybackError::InactiveSlot(SlotId::Appliance))
        );
        assert_eq!(
            current_period(&schedule, SlotId::Appliance, &cursor),
            Err(PlaybackError::InactiveSlot(SlotId::Appliance))
        );
        assert_eq!(cursor, Cursor::new());
    }

    #[test]
    fn test_foreign_cursor_rejected() {
        let schedule = Schedule::decode(&RECIPE_GENERATED).unwrap();
        let mut cursor = Cursor {
            block_index: 5,
            ..Cursor::new()
        };
        assert_eq!(
            advance(&schedule, SlotId::LayerB, &mut cursor),
            Err(PlaybackError::InvalidCursor(SlotId::LayerB))
        );

        // Block 0 has a single period
        let cursor = Cursor {
            inner_index: 1,
            ..Cursor::new()
        };
        assert_eq!(
            current_period(&schedule, SlotId::LayerB, &cursor),
            Err(PlaybackError::InvalidCursor(SlotId::LayerB))
        );
    }

    #[test]
    fn test_reset() {
        let mut cursor = Cursor {
            block_index: 1,
            inner_index: 1,
            repeat_index: 40,
            wrapped: true,
        };
        assert!(!cursor.at_start());
        cursor.reset();
        assert!(cursor.at_start());
        assert!(!cursor.wrapped);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn advance_is_total(blocks in proptest::collection::vec((1u8..5, 1u8..5), 1..6)) {
                let bytes = appliance_recipe(&blocks);
                let schedule = Schedule::decode(&bytes).unwrap();
                let slot = SlotId::Appliance;
                let cycle = schedule.slots()[slot.index()].cycle_periods();

                let mut cursor = Cursor::new();
                for step in 1..=cycle {
                    advance(&schedule, slot, &mut cursor).unwrap();
                    if step < cycle {
                        prop_assert!(!cursor.wrapped);
                        prop_assert!(!cursor.at_start());
                    }
                }
                prop_assert!(cursor.wrapped);
                prop_assert!(cursor.at_start());
            }
        }
    }
}
