// Audio sink: fire-and-forget sound effects

use log::debug;

/// Volume used for every sound effect
pub const SFX_VOLUME: f32 = 0.5;

/// Sound effects the simulation can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Player got hurt
    Hit,
    /// An attack landed
    Punch,
    /// An attack or miss whooshed through the air
    Swoosh,
}

impl Sound {
    /// Asset path of the sound effect
    pub fn asset_path(&self) -> &'static str {
        match self {
            Self::Hit => "sfx/hit.wav",
            Self::Punch => "sfx/punch.wav",
            Self::Swoosh => "sfx/swoosh.wav",
        }
    }

    /// Parse the payload of a "sound" animation event
    pub fn from_event_payload(payload: &str) -> Option<Self> {
        match payload {
            "hit" => Some(Self::Hit),
            "punch" => Some(Self::Punch),
            "swoosh" => Some(Self::Swoosh),
            _ => None,
        }
    }
}

/// Plays sounds; completion and failure are never reported back
pub trait AudioSink {
    fn play_sound(&mut self, sound: Sound, volume: f32);
}

/// Sink that only logs what would have been played
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_sound(&mut self, sound: Sound, volume: f32) {
        debug!("play {} at volume {volume:.2}", sound.asset_path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        assert_eq!(Sound::Hit.asset_path(), "sfx/hit.wav");
        assert_eq!(Sound::Punch.asset_path(), "sfx/punch.wav");
        assert_eq!(Sound::Swoosh.asset_path(), "sfx/swoosh.wav");
    }

    #[test]
    fn test_event_payload_parsing() {
        assert_eq!(Sound::from_event_payload("swoosh"), Some(Sound::Swoosh));
        assert_eq!(Sound::from_event_payload("boing"), None);
    }
}
