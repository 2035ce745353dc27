#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Voice selection and single-utterance playback control for platform speech engines.
//!
//! # Features
//!
//! The goal of this crate is to put a small, predictable layer between an application and the
//! text-to-speech engine its platform provides (for example, a browser's speech synthesis API).
//! The engine itself is not part of this crate. It is plugged in through the
//! [`SpeechEngine`](tts::SpeechEngine) and [`VoiceProvider`](tts::VoiceProvider) traits, which
//! keeps everything here testable without any audio hardware.
//!
//! ## Choosing a voice
//!
//! Platforms describe their voices with little more than a display name and a language tag. The
//! [`VoiceSelector`](tts::VoiceSelector) picks the best voice for a requested language and gender
//! by scanning the voice list in a fixed series of tiers, falling back to less specific matches
//! until something is found. Gender is guessed from well-known substrings of the voice name,
//! since platforms do not report it.
//!
//! Voice lists are often empty until the engine has finished loading. Use
//! [`load_voices_blocking`](tts::load_voices_blocking) or, with the `tokio-tts` feature,
//! [`tokio::load_voices`] to wait for the list with a timeout.
//!
//! ## Playing speech
//!
//! A [`PlaybackSession`](tts::PlaybackSession) owns the engine. It makes sure at most one
//! utterance is audible at any time: starting a new request cancels whatever is playing. Every
//! attempt is reported to the registered observers as a start event followed by exactly one
//! terminal event, even when the engine itself never reports the end of a cancelled utterance.
//!
//! # Logging
//!
//! This crate logs through the [`log`](https://docs.rs/log) facade and never installs a logger.

mod error;
pub mod tts;

#[cfg(feature = "tokio-tts")]
pub mod tokio;

pub use error::{Error, Result};
