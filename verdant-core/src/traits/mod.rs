//! Collaborator traits
//!
//! These traits define the interface between recipe playback and the
//! board: where the time comes from and what the active periods drive.

pub mod clock;
pub mod output;

pub use clock::{ClockError, WallClock};
pub use output::{OutputError, SlotOutput};
