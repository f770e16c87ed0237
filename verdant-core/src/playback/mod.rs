//! Recipe playback
//!
//! Cursor state machine, elapsed-time resolution and the player that ties
//! them to a decoded recipe.

pub mod cursor;
pub mod player;
pub mod resolver;
pub mod slot;

pub use cursor::{advance, current_period, Cursor, PlaybackError};
pub use player::{PlaybackStatus, RecipePlayer, SlotStatus};
pub use resolver::{
    cycle_duration_s, follows_wall_clock, time_in_current_period, time_reference,
    ANCHOR_OFFSET_S,
};
pub use slot::SlotId;
