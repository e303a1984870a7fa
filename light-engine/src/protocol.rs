//! Two-byte serial protocol understood by the light controller.
//!
//! Every channel is sent as `[header, brightness]`. Headers count down from
//! `max_header` (`255 - channel` in the reference setup) and brightness never
//! exceeds `max_brightness`, so the controller can resynchronise on any byte
//! above `max_brightness`.

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct ProtocolConfig {
    pub max_header: u8,
    pub max_brightness: u8,
}

impl ProtocolConfig {
    /// Headers for `channels` channels must all stay above `max_brightness`.
    pub fn validate(&self, channels: usize) -> Result<(), ConfigError> {
        let header_space = self.max_header.saturating_sub(self.max_brightness) as usize;
        if channels > header_space {
            return Err(ConfigError::Protocol {
                channels,
                max_header: self.max_header,
                max_brightness: self.max_brightness,
            });
        }
        Ok(())
    }

    /// Frame `level` for `channel`. Only meaningful for channel indices
    /// accepted by [`validate`](Self::validate).
    pub fn message(&self, channel: usize, level: u8) -> LightMessage {
        LightMessage {
            header: self.max_header.wrapping_sub(channel as u8),
            brightness: level.min(self.max_brightness),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct LightMessage {
    pub header: u8,
    pub brightness: u8,
}

impl LightMessage {
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.header, self.brightness]
    }
}
