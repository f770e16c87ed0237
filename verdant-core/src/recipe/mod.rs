//! Recipe generation
//!
//! Builds owned recipes that the protocol crate encodes for the device.

pub mod daynight;

pub use daynight::{cycle_start_s, day_night_recipe, DayNightParams, RecipeError};
