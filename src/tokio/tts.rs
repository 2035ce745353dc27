use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot::{channel, Sender};

use crate::tts::{
    EndReason, PlaybackEvent, PlaybackRequest, PlaybackSession, SessionConfig, SpeechEngine,
    UtteranceId, Voice, VoiceProvider,
};
use crate::Error;

/// How a playback request ended.
#[derive(Debug, Clone)]
pub enum PlaybackOutcome {
    /// The engine finished speaking.
    Finished,
    /// The playback was stopped.
    Stopped,
    /// A newer request took over the engine.
    Superseded,
    /// The request was rejected or the engine failed.
    Failed(Arc<Error>),
}

impl From<EndReason> for PlaybackOutcome {
    fn from(reason: EndReason) -> Self {
        match reason {
            EndReason::Finished => Self::Finished,
            EndReason::Stopped => Self::Stopped,
            EndReason::Superseded => Self::Superseded,
        }
    }
}

type PendingMap = Arc<Mutex<HashMap<UtteranceId, Sender<PlaybackOutcome>>>>;

#[cfg_attr(docsrs, doc(cfg(feature = "tokio-tts")))]
/// A playback session that returns a future for every request it plays.
///
/// Requests started through the wrapped [`PlaybackSession`] (via `Deref`) play normally, but
/// their outcome can only be observed through a subscribed observer.
pub struct AsyncPlaybackSession {
    base: PlaybackSession,
    pending: PendingMap,
}

impl AsyncPlaybackSession {
    /// Creates a session that will drive the given engine with the default settings.
    pub fn new<E: SpeechEngine + 'static>(engine: E) -> Self {
        Self::with_config(engine, SessionConfig::default())
    }

    /// Creates a session that will drive the given engine with the given settings.
    pub fn with_config<E: SpeechEngine + 'static>(engine: E, config: SessionConfig) -> Self {
        let pending = PendingMap::default();
        let base = PlaybackSession::with_config(engine, config);
        base.subscribe({
            let pending = pending.clone();
            move |event: PlaybackEvent| {
                let (id, outcome) = match event {
                    PlaybackEvent::Ended(Some(id), reason) => (id, reason.into()),
                    PlaybackEvent::Failed(id, error) => (id, PlaybackOutcome::Failed(error)),
                    _ => return,
                };
                let waiting = lock(&pending).remove(&id);
                if let Some(tx) = waiting {
                    let _ = tx.send(outcome);
                }
            }
        });
        Self {
            base,
            pending,
        }
    }

    /// Starts speaking the given request and completes when its playback ends, for whatever
    /// reason.
    pub async fn speak(&self, request: &PlaybackRequest) -> PlaybackOutcome {
        let (tx, rx) = channel();
        self.base.start_tracked(request, |id| self.await_outcome(id, tx));
        rx.await.unwrap_or(PlaybackOutcome::Stopped)
    }

    /// Starts speaking the given request and forgets about it.
    ///
    /// Note that this function can be used from both async and synchronous code. The request will
    /// be played, but there is no way to await its completion.
    pub fn speak_and_forget(&self, request: &PlaybackRequest) -> UtteranceId {
        self.base.start(request)
    }

    /// Speaks the last accepted request again and completes when its playback ends. Fails with
    /// [`Error::EmptyText`] if no request has been accepted yet.
    pub async fn replay(&self) -> PlaybackOutcome {
        let (tx, rx) = channel();
        self.base.replay_tracked(|id| self.await_outcome(id, tx));
        rx.await.unwrap_or(PlaybackOutcome::Stopped)
    }

    /// Completes with the voices the provider offers, waiting at most the configured
    /// [`voice_timeout`](SessionConfig::voice_timeout) for them to be loaded.
    pub async fn load_voices<P: VoiceProvider + ?Sized>(&self, provider: &P) -> Vec<Voice> {
        super::load_voices(provider, self.base.config().voice_timeout).await
    }

    fn await_outcome(&self, id: UtteranceId, tx: Sender<PlaybackOutcome>) {
        lock(&self.pending).insert(id, tx);
    }
}

impl Deref for AsyncPlaybackSession {
    type Target = PlaybackSession;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
