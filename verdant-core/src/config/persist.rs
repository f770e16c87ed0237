//! Configuration persistence
//!
//! Encodes the playback config for flash and picks the stored copy to use
//! at boot. Reading and writing flash is left to the firmware.

use super::parse::parse_config;
use super::types::{ConfigError, PlaybackConfig, CONFIG_VERSION};

impl PlaybackConfig {
    /// Serialize into `buffer` with postcard
    ///
    /// Returns the used part of the buffer.
    #[cfg(feature = "serde")]
    pub fn to_slice<'b>(&self, buffer: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize from postcard bytes
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: PlaybackConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.check_version()?;
        Ok(config)
    }

    /// Parse the text form
    pub fn from_text(text: &str) -> Result<Self, ConfigError> {
        let config = parse_config(text)?;
        config.check_version()?;
        Ok(config)
    }

    fn check_version(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                self.version,
                CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }
        Ok(())
    }

    /// Pick the config to run with
    ///
    /// Tries the text copy first, then the binary copy, and falls back to
    /// defaults if neither is present and valid.
    pub fn load(text: Option<&str>, binary: Option<&[u8]>) -> Self {
        if let Some(text) = text {
            match Self::from_text(text) {
                Ok(config) => {
                    debug!("Loaded playback config from text");
                    return config;
                }
                Err(e) => warn!("Failed to parse text config: {:?}, trying binary", e),
            }
        }

        #[cfg(feature = "serde")]
        if let Some(bytes) = binary {
            match Self::from_bytes(bytes) {
                Ok(config) => {
                    debug!("Loaded playback config from binary");
                    return config;
                }
                Err(e) => warn!("Failed to load binary config: {:?}", e),
            }
        }
        #[cfg(not(feature = "serde"))]
        let _ = binary;

        debug!("Using default playback config");
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockPolicy;

    #[cfg(feature = "serde")]
    use crate::config::MAX_CONFIG_SIZE;

    fn custom() -> PlaybackConfig {
        PlaybackConfig {
            total_offset_s: 68_400,
            clock_policy: ClockPolicy::WallClock,
            ..PlaybackConfig::new()
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_binary_persistence() {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let bytes = custom().to_slice(&mut buffer).unwrap();
        assert_eq!(PlaybackConfig::from_bytes(bytes), Ok(custom()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_binary_errors() {
        let mut tiny = [0u8; 1];
        assert_eq!(custom().to_slice(&mut tiny), Err(ConfigError::Serialize));
        assert_eq!(PlaybackConfig::from_bytes(&[]), Err(ConfigError::Deserialize));

        let old = PlaybackConfig {
            version: 0,
            ..custom()
        };
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let bytes = old.to_slice(&mut buffer).unwrap();
        assert_eq!(
            PlaybackConfig::from_bytes(bytes),
            Err(ConfigError::VersionMismatch)
        );
    }

    #[test]
    fn test_text_version_checked() {
        assert_eq!(
            PlaybackConfig::from_text("version = 2"),
            Err(ConfigError::VersionMismatch)
        );
    }

    #[test]
    fn test_load_prefers_text() {
        let config = PlaybackConfig::load(Some("total_offset_s = 10"), None);
        assert_eq!(config.total_offset_s, 10);
    }

    #[test]
    fn test_load_defaults() {
        assert_eq!(PlaybackConfig::load(None, None), PlaybackConfig::default());
        assert_eq!(
            PlaybackConfig::load(Some("garbage"), Some(&[0xffu8][..])),
            PlaybackConfig::default()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_load_falls_back_to_binary() {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let bytes: &[u8] = custom().to_slice(&mut buffer).unwrap();

        assert_eq!(PlaybackConfig::load(Some("clock = sundial"), Some(bytes)), custom());
        assert_eq!(PlaybackConfig::load(None, Some(bytes)), custom());
    }
}
