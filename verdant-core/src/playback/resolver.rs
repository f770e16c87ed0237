//! Elapsed-time resolver
//!
//! Walks a slot's cursor forward until it sits on the period active at a
//! given time and reports how long that period has left.

use verdant_protocol::Schedule;

use super::cursor::{active_slot, advance, current_period, Cursor, PlaybackError};
use super::SlotId;

/// Fixed anchor between a recipe's epoch and the start of playback.
///
/// Part of the format: playback starts one day after the nominal epoch.
pub const ANCHOR_OFFSET_S: i64 = 86_400;

/// Recipe id reserved for the cabinet's built-in wall-clock recipe
pub const BUILTIN_RECIPE_ID: u32 = 1;

/// Highest id of the static, clock-independent recipes
pub const MAX_STATIC_RECIPE_ID: u32 = 0xFE;

/// Check if a recipe follows the wall clock
///
/// Id 1 and ids above 0xFE (downloaded recipes use their creation
/// timestamp as id) track the wall clock; the remaining small ids are
/// static recipes that always sit on their first period.
pub const fn follows_wall_clock(recipe_id: u32) -> bool {
    recipe_id == BUILTIN_RECIPE_ID || recipe_id > MAX_STATIC_RECIPE_ID
}

/// Time at which a recipe should be resolved
///
/// `total_offset_s` is the persisted day-start offset added to the wall
/// clock. Static recipes resolve at time 0, before any anchor.
pub fn time_reference(recipe_id: u32, total_offset_s: i32, now_s: i64) -> i64 {
    if follows_wall_clock(recipe_id) {
        now_s + total_offset_s as i64
    } else {
        0
    }
}

/// Total duration of one full pass over a slot's blocks
pub fn cycle_duration_s(schedule: &Schedule<'_>, slot: SlotId) -> Result<u64, PlaybackError> {
    let slot_ref = active_slot(schedule, slot)?;
    let mut total = 0u64;
    for (b, block) in slot_ref.blocks().iter().enumerate() {
        let mut once = 0u64;
        for p in 0..block.inner_count() as usize {
            let period = schedule
                .period(slot.index(), b, p)
                .ok_or(PlaybackError::InvalidCursor(slot))?;
            once += period.duration_s as u64;
        }
        total += once * block.outer_count() as u64;
    }
    Ok(total)
}

/// Seconds left in the period active at `now_s`
///
/// Moves `cursor` onto that period. Resolution continues from wherever the
/// cursor currently is, so reset it to resolve from the start of the
/// cycle.
///
/// - Before the anchor (`epoch + 1 day`) the current period is reported
///   whole and the cursor is left untouched.
/// - Landing exactly on a period boundary reports the full duration of the
///   period that starts there, never zero.
pub fn time_in_current_period(
    schedule: &Schedule<'_>,
    slot: SlotId,
    cursor: &mut Cursor,
    now_s: i64,
) -> Result<u32, PlaybackError> {
    let mut duration = current_period(schedule, slot, cursor)?.duration_s;
    let mut elapsed = now_s - schedule.epoch_s() as i64 - ANCHOR_OFFSET_S;

    if elapsed < 0 {
        return Ok(duration);
    }

    // Skip whole cycles; the cursor ends where a full pass would leave it
    if cursor.at_start() {
        let cycle_s = cycle_duration_s(schedule, slot)? as i64;
        if elapsed > cycle_s {
            let cycles = (elapsed - 1) / cycle_s;
            elapsed -= cycles * cycle_s;
            cursor.wrapped = true;
        }
    }

    let mut consumed = 0u32;
    while elapsed > 0 {
        duration = current_period(schedule, slot, cursor)?.duration_s;
        if elapsed > duration as i64 {
            advance(schedule, slot, cursor)?;
        }
        elapsed -= duration as i64;
        consumed += 1;
    }

    let remaining = if elapsed < 0 {
        (-elapsed) as u32
    } else {
        // Exact boundary: the period that just ended is behind us
        if consumed > 0 {
            advance(schedule, slot, cursor)?;
        }
        current_period(schedule, slot, cursor)?.duration_s
    };

    trace!(
        "slot {}: {} periods consumed, {}s remaining",
        slot,
        consumed,
        remaining
    );
    Ok(remaining)
}
