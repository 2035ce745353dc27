//! Voice selection and speech playback.

pub mod language;
mod provider;
mod session;
mod speech;
mod voice;

pub use self::provider::{
    load_voices_blocking, VoiceProvider, VoicesChangedHandler, DEFAULT_VOICE_TIMEOUT,
};
pub use self::session::{
    EndReason, EngineSink, PlaybackEvent, PlaybackObserver, PlaybackSession, PlaybackState,
    SessionConfig, SpeechEngine, UtteranceId,
};
pub use self::speech::{Pitch, PlaybackRequest, Rate, Utterance, Volume};
pub use self::voice::{select_voice, MatchTier, Voice, VoiceGender, VoiceRequest, VoiceSelector};
