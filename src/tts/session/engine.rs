use std::sync::{Arc, Weak};

use crate::tts::Utterance;
use crate::{Error, Result};

use super::{Shared, UtteranceId};

/// The platform's speech synthesis engine.
///
/// The engine renders one utterance at a time. A [`PlaybackSession`](super::PlaybackSession)
/// takes ownership of the engine and is the only thing that should ever call it.
pub trait SpeechEngine: Send + Sync {
    /// Starts rendering the given utterance. The engine reports the progress of the utterance
    /// through the given sink, from any thread, either before or after this method returns.
    ///
    /// Returning an error has the same effect as calling [`EngineSink::failed`].
    fn speak(&self, utterance: &Utterance, sink: EngineSink) -> Result<()>;

    /// Cancels the utterance the engine is currently rendering, if any. The engine does not need
    /// to report anything for the cancelled utterance.
    fn cancel(&self);
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Arc<E> {
    fn speak(&self, utterance: &Utterance, sink: EngineSink) -> Result<()> {
        (**self).speak(utterance, sink)
    }

    fn cancel(&self) {
        (**self).cancel()
    }
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Box<E> {
    fn speak(&self, utterance: &Utterance, sink: EngineSink) -> Result<()> {
        (**self).speak(utterance, sink)
    }

    fn cancel(&self) {
        (**self).cancel()
    }
}

pub(super) enum EngineNotice {
    Started,
    Finished,
    Failed(Error),
}

/// The channel through which a [`SpeechEngine`] reports the progress of one utterance.
///
/// Reports about an utterance that has since been stopped or superseded are ignored, as are
/// reports that arrive after the session has been dropped.
#[derive(Clone)]
pub struct EngineSink {
    id: UtteranceId,
    shared: Weak<Shared>,
}

impl EngineSink {
    pub(super) fn new(id: UtteranceId, shared: &Arc<Shared>) -> Self {
        Self {
            id,
            shared: Arc::downgrade(shared),
        }
    }

    /// Returns the identifier of the utterance this sink reports on.
    pub fn id(&self) -> UtteranceId {
        self.id
    }

    /// Reports that the engine has started speaking.
    pub fn started(&self) {
        self.notify(EngineNotice::Started)
    }

    /// Reports that the engine has finished speaking.
    pub fn finished(&self) {
        self.notify(EngineNotice::Finished)
    }

    /// Reports that the engine could not speak the utterance.
    pub fn failed<S: Into<String>>(&self, reason: S) {
        self.notify(EngineNotice::Failed(Error::Engine(reason.into())))
    }

    fn notify(&self, notice: EngineNotice) {
        if let Some(shared) = self.shared.upgrade() {
            shared.on_engine_notice(self.id, notice);
        }
    }
}
