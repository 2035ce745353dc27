use std::time::Duration;

use crate::tts::language::DEFAULT_LANGUAGE;
use crate::tts::{Pitch, Volume, DEFAULT_VOICE_TIMEOUT};

/// Settings a [`PlaybackSession`](super::PlaybackSession) applies to every utterance.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// The pitch of every utterance.
    pub pitch: Pitch,
    /// The volume of every utterance.
    pub volume: Volume,
    /// The language tag used when a request leaves its language blank.
    pub default_language: String,
    /// How long [`load_voices`](super::PlaybackSession::load_voices) waits for the platform to
    /// report its voices.
    pub voice_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pitch: Pitch::default(),
            volume: Volume::default(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            voice_timeout: DEFAULT_VOICE_TIMEOUT,
        }
    }
}
