use std::fmt;
use std::sync::Arc;

use strum_macros::{Display, IntoStaticStr};

use crate::Error;

/// Identifies one call to [`PlaybackSession::start`](super::PlaybackSession::start).
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct UtteranceId(pub(crate) u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a playback attempt ended without an error.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum EndReason {
    /// The engine finished speaking.
    Finished,
    /// The playback was stopped with [`PlaybackSession::stop`](super::PlaybackSession::stop).
    Stopped,
    /// A newer request took over the engine.
    Superseded,
}

/// A change in the playback state, as delivered to a [`PlaybackObserver`].
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// The engine started speaking the given utterance.
    Started(UtteranceId),
    /// The playback ended. The identifier is `None` when the session was stopped while idle.
    Ended(Option<UtteranceId>, EndReason),
    /// The engine failed to speak the given utterance.
    Failed(UtteranceId, Arc<Error>),
}

impl PlaybackEvent {
    /// Returns `true` if no more events will follow for this utterance.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Started(_))
    }

    /// Returns the utterance this event refers to, if any.
    pub fn id(&self) -> Option<UtteranceId> {
        match self {
            Self::Started(id) | Self::Failed(id, _) => Some(*id),
            Self::Ended(id, _) => *id,
        }
    }
}

/// Receives the playback events of a [`PlaybackSession`](super::PlaybackSession).
///
/// Every playback attempt produces at most one `on_start`, followed by exactly one `on_end` or
/// `on_error`. Observers may be called from the thread that drives the speech engine. They may
/// call back into the session; any events that causes are delivered after the current callback
/// returns.
///
/// Closures taking a [`PlaybackEvent`] implement this trait.
pub trait PlaybackObserver: Send + Sync {
    /// Called when the engine starts speaking.
    fn on_start(&self, _id: UtteranceId) {}

    /// Called when the playback finishes, is stopped, or is superseded.
    fn on_end(&self, _id: Option<UtteranceId>, _reason: EndReason) {}

    /// Called when the engine reports a failure, or when the request was rejected.
    fn on_error(&self, _id: UtteranceId, _error: &Error) {}

    /// Called for every event. Dispatches to the other methods by default.
    fn on_event(&self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::Started(id) => self.on_start(*id),
            PlaybackEvent::Ended(id, reason) => self.on_end(*id, *reason),
            PlaybackEvent::Failed(id, error) => self.on_error(*id, error),
        }
    }
}

impl<F: Fn(PlaybackEvent) + Send + Sync> PlaybackObserver for F {
    fn on_event(&self, event: &PlaybackEvent) {
        self(event.clone())
    }
}
