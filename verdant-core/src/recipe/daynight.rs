//! Day/night recipe generation
//!
//! Builds the standard grow recipe: one week of "skip" days with the
//! lights off, then alternating day and night periods.

use verdant_protocol::{BlockSpec, ChannelPayload, EncodeError, Period, RecipeSpec, SlotSpec};

use crate::playback::SlotId;

/// Length of a recipe day in seconds (DST is handled by the total offset)
pub const DAY_S: u32 = 86_400;

/// Days between the cycle start and the recipe creation
pub const CYCLE_START_DAYS_AGO: u8 = 7;

/// Repetitions of long-running blocks
pub const LONG_REPEAT: u8 = 100;

/// All light channels off
pub const LEVELS_OFF: [u8; 4] = [0; 4];

/// Water delay marker for skip days
pub const NO_WATER_DELAY: u16 = 0xFFFF;

/// Errors that can occur generating a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecipeError {
    /// Day length must be between 1 s and 24 h exclusive
    InvalidDayLength,
    /// Recipe does not fit the owned representation
    Encode(EncodeError),
}

impl From<EncodeError> for RecipeError {
    fn from(e: EncodeError) -> Self {
        RecipeError::Encode(e)
    }
}

/// Parameters of a day/night recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DayNightParams {
    /// Creation time (Unix seconds); also the recipe id
    pub as_of_s: i64,
    /// Light levels during the day
    pub levels: [u8; 4],
    /// Day temperature target (°C × 100)
    pub temp_day_c_x100: i16,
    /// Night temperature target (°C × 100)
    pub temp_night_c_x100: i16,
    /// Water target during the day
    pub water_target: u16,
    /// Delay before watering (seconds)
    pub water_delay_s: u16,
    /// Length of the lit part of the day (seconds)
    pub day_length_s: u32,
    pub layer_a_active: bool,
    pub layer_b_active: bool,
}

impl Default for DayNightParams {
    fn default() -> Self {
        Self {
            as_of_s: 0,
            levels: [0xff; 4],
            temp_day_c_x100: 2300,
            temp_night_c_x100: 2000,
            water_target: 70,
            water_delay_s: 8 * 3600,
            day_length_s: 15 * 3600,
            layer_a_active: true,
            layer_b_active: true,
        }
    }
}

/// Cycle start for a recipe created at `as_of_s`
///
/// `CYCLE_START_DAYS_AGO` days earlier, truncated to UTC midnight.
pub fn cycle_start_s(as_of_s: i64) -> i64 {
    let start = as_of_s - CYCLE_START_DAYS_AGO as i64 * DAY_S as i64;
    start - start.rem_euclid(DAY_S as i64)
}

/// Generate a day/night recipe
///
/// Active layers play the skip day `CYCLE_START_DAYS_AGO - 1` times and
/// then (day, night) `LONG_REPEAT` times. Inactive layers play the skip day
/// only. The appliance slot stays empty.
///
/// # Returns
/// The recipe, or an error if the day length leaves no day or no night
pub fn day_night_recipe(params: &DayNightParams) -> Result<RecipeSpec, RecipeError> {
    if params.day_length_s == 0 || params.day_length_s >= DAY_S {
        return Err(RecipeError::InvalidDayLength);
    }

    let temp_day = params.temp_day_c_x100 as u16;
    let temp_night = params.temp_night_c_x100 as u16;

    let skip = Period::channel(
        DAY_S,
        ChannelPayload {
            levels: LEVELS_OFF,
            target_a: temp_day,
            target_b: params.water_target,
            target_c: NO_WATER_DELAY,
        },
    );
    let day = Period::channel(
        params.day_length_s,
        ChannelPayload {
            levels: params.levels,
            target_a: temp_day,
            target_b: params.water_target,
            target_c: params.water_delay_s,
        },
    );
    let night = Period::channel(
        DAY_S - params.day_length_s,
        ChannelPayload {
            levels: LEVELS_OFF,
            target_a: temp_night,
            target_b: 0,
            target_c: params.water_delay_s,
        },
    );

    let active = {
        let mut slot = SlotSpec::inactive();
        slot.push(BlockSpec::from_periods(&[skip], CYCLE_START_DAYS_AGO - 1)?)?;
        slot.push(BlockSpec::from_periods(&[day, night], LONG_REPEAT)?)?;
        slot
    };
    let inactive = {
        let mut slot = SlotSpec::inactive();
        slot.push(BlockSpec::from_periods(&[skip], LONG_REPEAT)?)?;
        slot
    };

    let mut recipe = RecipeSpec::new(
        params.as_of_s as u32,
        cycle_start_s(params.as_of_s) as i32,
    );
    recipe.slots[SlotId::LayerA.index()] = if params.layer_a_active {
        active.clone()
    } else {
        inactive.clone()
    };
    recipe.slots[SlotId::LayerB.index()] = if params.layer_b_active {
        active
    } else {
        inactive
    };

    debug!(
        "generated day/night recipe {}: day {}s, layers {}/{}",
        recipe.recipe_id,
        params.day_length_s,
        params.layer_a_active,
        params.layer_b_active
    );
    Ok(recipe)
}
