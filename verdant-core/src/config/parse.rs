//! Text config parser
//!
//! A minimal `key = value` parser for the playback settings file. It does
//! NOT support the full TOML spec.
//!
//! Supported:
//! - `key = value` pairs (string, integer)
//! - an optional `[playback]` section header
//! - comments (`# ...`), including after a value
//!
//! ```text
//! [playback]
//! version = 1
//! total_offset_s = 68400   # 07:00 sunrise
//! clock = "recipe"         # recipe | wall | frozen
//! ```

use super::types::{ClockPolicy, ConfigError, PlaybackConfig};

/// Parse the text form into a PlaybackConfig
///
/// Keys that are not present keep their default value.
pub fn parse_config(input: &str) -> Result<PlaybackConfig, ConfigError> {
    let mut config = PlaybackConfig::new();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if line[1..line.len() - 1].trim() != "playback" {
                return Err(ConfigError::InvalidLine);
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidLine)?;
        match key {
            "version" => config.version = parse_int(value)?,
            "total_offset_s" => config.total_offset_s = parse_int(value)?,
            "clock" => config.clock_policy = parse_clock_policy(value)?,
            _ => return Err(ConfigError::UnknownKey),
        }
    }

    Ok(config)
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments outside of strings
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_clock_policy(value: &str) -> Result<ClockPolicy, ConfigError> {
    match parse_string(value) {
        "recipe" => Ok(ClockPolicy::RecipeId),
        "wall" => Ok(ClockPolicy::WallClock),
        "frozen" => Ok(ClockPolicy::Frozen),
        _ => Err(ConfigError::InvalidValue),
    }
}
