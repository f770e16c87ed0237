//! Recipe player
//!
//! Owns the active recipe and one cursor per slot, and answers "what is
//! every slot doing now, and when does the next change happen?" for the
//! firmware's control loop.

use verdant_protocol::{Period, Schedule, SLOT_COUNT};

use super::cursor::{current_period, Cursor, PlaybackError};
use super::resolver::{time_in_current_period, time_reference};
use super::SlotId;
use crate::config::{ClockPolicy, PlaybackConfig};
use crate::traits::{OutputError, SlotOutput, WallClock};

/// State of one slot at the resolved time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotStatus {
    /// Slot has no blocks
    Inactive,
    /// Slot is playing `period`
    Active {
        period: Period,
        /// Seconds until the period ends
        remaining_s: u32,
        cursor: Cursor,
    },
}

impl SlotStatus {
    /// Period being played, if any
    pub fn period(&self) -> Option<&Period> {
        match self {
            SlotStatus::Active { period, .. } => Some(period),
            SlotStatus::Inactive => None,
        }
    }

    /// Seconds until this slot changes, if it is active
    pub fn remaining_s(&self) -> Option<u32> {
        match self {
            SlotStatus::Active { remaining_s, .. } => Some(*remaining_s),
            SlotStatus::Inactive => None,
        }
    }
}

/// Result of resolving every slot at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackStatus {
    /// Time the recipe was resolved at (after offset and clock policy)
    pub reference_s: i64,
    pub slots: [SlotStatus; SLOT_COUNT],
}

impl PlaybackStatus {
    pub fn slot(&self, slot: SlotId) -> &SlotStatus {
        &self.slots[slot.index()]
    }

    /// Seconds until the first slot changes
    ///
    /// `None` if no slot is active.
    pub fn next_wakeup_s(&self) -> Option<u32> {
        self.slots.iter().filter_map(SlotStatus::remaining_s).min()
    }
}

/// Plays one recipe
#[derive(Debug, Clone)]
pub struct RecipePlayer<'a> {
    schedule: Schedule<'a>,
    cursors: [Cursor; SLOT_COUNT],
}

impl<'a> RecipePlayer<'a> {
    /// Select a recipe; every cursor starts on its first period
    pub fn new(schedule: Schedule<'a>) -> Self {
        Self {
            schedule,
            cursors: [Cursor::new(); SLOT_COUNT],
        }
    }

    pub fn schedule(&self) -> &Schedule<'a> {
        &self.schedule
    }

    pub fn cursor(&self, slot: SlotId) -> &Cursor {
        &self.cursors[slot.index()]
    }

    /// Move every cursor back to the first period
    pub fn reset(&mut self) {
        for cursor in &mut self.cursors {
            cursor.reset();
        }
    }

    /// Resolve every slot at an explicit time
    ///
    /// Cursors restart from the beginning of the cycle on every call, so the
    /// result depends only on `reference_s`.
    pub fn resolve_at(&mut self, reference_s: i64) -> Result<PlaybackStatus, PlaybackError> {
        self.reset();

        let mut slots = [SlotStatus::Inactive; SLOT_COUNT];
        for slot in SlotId::ALL {
            if !self.schedule.has_periods(slot.index()) {
                continue;
            }
            let cursor = &mut self.cursors[slot.index()];
            let remaining_s = time_in_current_period(&self.schedule, slot, cursor, reference_s)?;
            let period = current_period(&self.schedule, slot, cursor)?;
            slots[slot.index()] = SlotStatus::Active {
                period,
                remaining_s,
                cursor: *cursor,
            };
        }

        let status = PlaybackStatus { reference_s, slots };
        debug!(
            "recipe {} resolved at {}, next change in {}s",
            self.schedule.recipe_id(),
            reference_s,
            status.next_wakeup_s()
        );
        Ok(status)
    }

    /// Resolve every slot for a wall-clock time
    ///
    /// The reference time is picked by the recipe id: see
    /// [`time_reference`].
    pub fn sync(&mut self, now_s: i64, total_offset_s: i32) -> Result<PlaybackStatus, PlaybackError> {
        let reference_s = time_reference(self.schedule.recipe_id(), total_offset_s, now_s);
        self.resolve_at(reference_s)
    }

    /// Resolve every slot using the clock collaborator and persisted config
    pub fn sync_with<C: WallClock>(
        &mut self,
        clock: &mut C,
        config: &PlaybackConfig,
    ) -> Result<PlaybackStatus, PlaybackError> {
        match config.clock_policy {
            ClockPolicy::Frozen => self.resolve_at(0),
            ClockPolicy::WallClock => {
                let now_s = clock.now_s()?;
                self.resolve_at(now_s + config.total_offset_s as i64)
            }
            ClockPolicy::RecipeId => {
                let now_s = clock.now_s()?;
                self.sync(now_s, config.total_offset_s)
            }
        }
    }

    /// Hand every slot's state to the output driver
    pub fn apply<O: SlotOutput>(
        &self,
        status: &PlaybackStatus,
        output: &mut O,
    ) -> Result<(), OutputError> {
        for slot in SlotId::ALL {
            match status.slot(slot) {
                SlotStatus::Active { period, .. } => output.apply_period(slot, period)?,
                SlotStatus::Inactive => output.idle(slot)?,
            }
        }
        Ok(())
    }
}
