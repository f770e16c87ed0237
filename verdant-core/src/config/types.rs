//! Playback configuration types
//!
//! The config is stored in flash either as `key = value` text or as
//! postcard-serialized binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current config format version
pub const CONFIG_VERSION: u8 = 1;

/// Maximum serialized config size (binary)
pub const MAX_CONFIG_SIZE: usize = 32;

/// How the player picks the time a recipe is resolved at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockPolicy {
    /// Wall clock for id 1 and downloaded recipes, time 0 otherwise
    #[default]
    RecipeId,
    /// Always follow the wall clock
    WallClock,
    /// Always resolve at time 0 (first period, bring-up and demos)
    Frozen,
}

/// Persisted playback settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaybackConfig {
    /// Config format version
    pub version: u8,
    /// Day-start offset added to the wall clock (seconds)
    ///
    /// Shifts the recipe's day so that "morning" matches the user's
    /// sunrise, e.g. 68400 for a 07:00 start in Europe/Berlin.
    pub total_offset_s: i32,
    pub clock_policy: ClockPolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackConfig {
    /// Default config: no offset, clock picked by recipe id
    pub const fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            total_offset_s: 0,
            clock_policy: ClockPolicy::RecipeId,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is not `key = value`
    InvalidLine,
    /// Key is not a known setting
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Binary serialization failed (buffer too small)
    Serialize,
    /// Binary deserialization failed
    Deserialize,
    /// Config version mismatch
    VersionMismatch,
}
