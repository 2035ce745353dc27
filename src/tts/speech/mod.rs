use crate::{Error, Result};

use super::language::DEFAULT_LANGUAGE;
use super::{SessionConfig, Voice};

mod ssml;
mod types;

pub use types::{Pitch, Rate, Volume};

/// Something to speak, as requested by the caller of a
/// [`PlaybackSession`](super::PlaybackSession).
///
/// A request is created fresh for every playback action. Starting a new request supersedes the
/// previous one; requests are never merged or queued.
#[derive(Debug, PartialEq, Clone)]
pub struct PlaybackRequest {
    /// The text to speak. Must contain something other than whitespace.
    pub text: String,
    /// The voice to speak with, or `None` to use the platform's default voice.
    pub voice: Option<Voice>,
    /// The language tag of the text, e.g. `en-US`.
    pub language: String,
    /// The speed of the speech.
    pub rate: Rate,
}

impl PlaybackRequest {
    /// Creates a request to speak the given text in the default language, at normal speed, with
    /// the platform's default voice.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            voice: None,
            language: DEFAULT_LANGUAGE.to_string(),
            rate: Rate::default(),
        }
    }

    /// Sets the voice to speak with.
    pub fn with_voice(mut self, voice: Option<Voice>) -> Self {
        self.voice = voice;
        self
    }

    /// Sets the language of the text.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the speed of the speech.
    pub fn with_rate<R: Into<Rate>>(mut self, rate: R) -> Self {
        self.rate = rate.into();
        self
    }

    /// Checks that the request has something to say.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            Err(Error::EmptyText)
        } else {
            Ok(())
        }
    }

    /// Returns the name of the requested voice, or `"Default"` when the platform's default voice
    /// will be used.
    pub fn voice_label(&self) -> &str {
        self.voice.as_ref().map(Voice::name).unwrap_or("Default")
    }
}

/// A single request to the speech engine to render some text.
#[derive(Debug, PartialEq, Clone)]
pub struct Utterance {
    /// The text to render, without leading or trailing whitespace.
    pub text: String,
    /// The language tag of the text.
    pub language: String,
    /// The speed of the speech.
    pub rate: Rate,
    /// The pitch of the voice.
    pub pitch: Pitch,
    /// The volume of the speech.
    pub volume: Volume,
    /// The voice to use, or `None` for the engine's default voice.
    pub voice: Option<Voice>,
}

impl Utterance {
    pub(crate) fn from_request(request: &PlaybackRequest, config: &SessionConfig) -> Self {
        let language = match request.language.trim() {
            "" => config.default_language.clone(),
            language => language.to_string(),
        };
        Self {
            text: request.text.trim().to_string(),
            language,
            rate: request.rate,
            pitch: config.pitch,
            volume: config.volume,
            voice: request.voice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(PlaybackRequest::new("Hello").validate().is_ok());
        assert!(matches!(PlaybackRequest::new(" \n\t").validate(), Err(Error::EmptyText)));
    }

    #[test]
    fn test_voice_label() {
        let request = PlaybackRequest::new("Hello");
        assert_eq!(request.voice_label(), "Default");
        let request = request.with_voice(Some(Voice::new("Moira", "en-IE")));
        assert_eq!(request.voice_label(), "Moira");
    }

    #[test]
    fn test_utterance_defaults() {
        let config = SessionConfig {
            volume: Volume::new(0.8),
            default_language: "fr-FR".to_string(),
            ..Default::default()
        };
        let request =
            PlaybackRequest::new("  Bonjour  ").with_language(" ").with_rate(Rate::new(1.5));
        let utterance = Utterance::from_request(&request, &config);
        assert_eq!(utterance.text, "Bonjour");
        assert_eq!(utterance.language, "fr-FR");
        assert_eq!(utterance.rate.value(), 1.5);
        assert_eq!(utterance.pitch.value(), 1.0);
        assert_eq!(utterance.volume.value(), 0.8);
        assert!(utterance.voice.is_none());
    }
}
