#![cfg_attr(docsrs, doc(cfg(feature = "tokio-tts")))]
//! Support for async operations running on Tokio.

mod tts;
mod voices;

pub use tts::{AsyncPlaybackSession, PlaybackOutcome};
pub use voices::load_voices;
