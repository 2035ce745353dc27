use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, trace, warn};
use strum_macros::{Display, IntoStaticStr};

use crate::tts::{load_voices_blocking, PlaybackRequest, Utterance, Voice, VoiceProvider};
use crate::Error;

mod config;
mod engine;
mod event;

use engine::EngineNotice;

pub use config::SessionConfig;
pub use engine::{EngineSink, SpeechEngine};
pub use event::{EndReason, PlaybackEvent, PlaybackObserver, UtteranceId};

/// The state of a [`PlaybackSession`].
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing is being spoken.
    Idle,
    /// An utterance was handed to the engine, which has not started speaking yet.
    Pending,
    /// The engine is speaking.
    Playing,
}

/// Owns the platform's speech engine and makes sure at most one utterance is audible at a time.
///
/// Starting a new request always cancels whatever is currently playing. The session reports the
/// progress of every request to its observers: an `on_start` once the engine starts speaking,
/// then exactly one `on_end` or `on_error`. When a request is stopped or superseded, the session
/// delivers its terminal event itself, since engines often stay silent about cancelled speech.
/// The terminal event of a superseded request is always delivered before anything about the
/// request that replaced it.
///
/// None of the operations fail. Problems are reported to the observers as `on_error`.
///
/// Dropping the session cancels the engine and reports a live request as stopped.
pub struct PlaybackSession {
    engine: Box<dyn SpeechEngine>,
    config: SessionConfig,
    shared: Arc<Shared>,
}

impl PlaybackSession {
    /// Creates a session that will drive the given engine with the default settings.
    pub fn new<E: SpeechEngine + 'static>(engine: E) -> Self {
        Self::with_config(engine, SessionConfig::default())
    }

    /// Creates a session that will drive the given engine with the given settings.
    pub fn with_config<E: SpeechEngine + 'static>(engine: E, config: SessionConfig) -> Self {
        Self {
            engine: Box::new(engine),
            config,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Returns the settings applied to every utterance.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Registers an observer that will receive all subsequent playback events.
    pub fn subscribe<O: PlaybackObserver + 'static>(&self, observer: O) {
        lock(&self.shared.observers).push(Arc::new(observer));
    }

    /// Returns the current state of the playback.
    pub fn state(&self) -> PlaybackState {
        lock(&self.shared.inner).current.map_or(PlaybackState::Idle, |current| current.state)
    }

    /// Returns the identifier of the request currently being played, if any.
    pub fn current(&self) -> Option<UtteranceId> {
        lock(&self.shared.inner).current.map(|current| current.id)
    }

    /// Cancels whatever is playing and starts speaking the given request.
    ///
    /// A request with no text is rejected with an `on_error` carrying
    /// [`Error::EmptyText`](crate::Error::EmptyText), and leaves the current playback untouched.
    /// Callers should [validate](PlaybackRequest::validate) requests beforehand.
    pub fn start(&self, request: &PlaybackRequest) -> UtteranceId {
        self.start_tracked(request, |_| ())
    }

    /// Starts speaking the last request this session accepted again, with the same voice,
    /// language and rate.
    ///
    /// If no request has been accepted yet, there is nothing to replay and the observers get an
    /// `on_error` carrying [`Error::EmptyText`](crate::Error::EmptyText).
    pub fn replay(&self) -> UtteranceId {
        self.replay_tracked(|_| ())
    }

    /// Returns the last request this session accepted, which is what [`replay`](Self::replay)
    /// will speak.
    pub fn last_request(&self) -> Option<PlaybackRequest> {
        lock(&self.shared.inner).last_request.clone()
    }

    /// Returns the voices the provider offers, waiting at most the configured
    /// [`voice_timeout`](SessionConfig::voice_timeout) for them to be loaded.
    pub fn load_voices<P: VoiceProvider + ?Sized>(&self, provider: &P) -> Vec<Voice> {
        load_voices_blocking(provider, self.config.voice_timeout)
    }

    // Hands the new id to `on_id` before any event about it can be delivered.
    pub(crate) fn start_tracked<F: FnOnce(UtteranceId)>(
        &self,
        request: &PlaybackRequest,
        on_id: F,
    ) -> UtteranceId {
        let id = self.shared.next_id();
        on_id(id);

        if let Err(err) = request.validate() {
            self.reject(id, err);
            return id;
        }

        let utterance = Utterance::from_request(request, &self.config);
        {
            let _command = self.shared.begin_command();
            {
                let mut inner = lock(&self.shared.inner);
                inner.last_request = Some(request.clone());
                let previous = inner.current.replace(Current {
                    id,
                    state: PlaybackState::Pending,
                });
                if let Some(previous) = previous {
                    debug!("utterance {} superseded by {}", previous.id, id);
                    inner
                        .queue
                        .push_back(PlaybackEvent::Ended(Some(previous.id), EndReason::Superseded));
                }
            }

            self.engine.cancel();
            debug!(
                "speaking utterance {} ({} chars, voice: {}, language: {})",
                id,
                utterance.text.chars().count(),
                request.voice_label(),
                utterance.language
            );
            if let Err(err) = self.engine.speak(&utterance, EngineSink::new(id, &self.shared)) {
                self.shared.apply_notice(id, EngineNotice::Failed(err));
            }
        }
        self.shared.dispatch();
        id
    }

    pub(crate) fn replay_tracked<F: FnOnce(UtteranceId)>(&self, on_id: F) -> UtteranceId {
        let last = self.last_request();
        match last {
            Some(request) => self.start_tracked(&request, on_id),
            None => {
                let id = self.shared.next_id();
                on_id(id);
                self.reject(id, Error::EmptyText);
                id
            }
        }
    }

    fn reject(&self, id: UtteranceId, err: Error) {
        warn!("rejecting playback request {}: {}", id, err);
        self.shared.enqueue(PlaybackEvent::Failed(id, Arc::new(err)));
        self.shared.dispatch();
    }

    /// Cancels whatever the engine is speaking and notifies the observers that the playback was
    /// stopped. Does the same even if nothing is playing.
    pub fn stop(&self) {
        {
            let _command = self.shared.begin_command();
            {
                let mut inner = lock(&self.shared.inner);
                let previous = inner.current.take().map(|current| current.id);
                debug!("stopping playback (current: {:?})", previous);
                inner.queue.push_back(PlaybackEvent::Ended(previous, EndReason::Stopped));
            }
            self.engine.cancel();
        }
        self.shared.dispatch();
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        let previous = lock(&self.shared.inner).current.take();
        if let Some(previous) = previous {
            debug!("session dropped while utterance {} was live", previous.id);
            self.shared.enqueue(PlaybackEvent::Ended(Some(previous.id), EndReason::Stopped));
            self.engine.cancel();
            self.shared.dispatch();
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Current {
    id: UtteranceId,
    state: PlaybackState,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    current: Option<Current>,
    last_request: Option<PlaybackRequest>,
    queue: VecDeque<PlaybackEvent>,
    dispatching: bool,
    in_command: bool,
}

#[derive(Default)]
struct Shared {
    inner: Mutex<Inner>,
    observers: Mutex<Vec<Arc<dyn PlaybackObserver>>>,
    command: Mutex<()>,
}

impl Shared {
    fn next_id(&self) -> UtteranceId {
        let mut inner = lock(&self.inner);
        inner.next_id += 1;
        UtteranceId(inner.next_id)
    }

    fn enqueue(&self, event: PlaybackEvent) {
        lock(&self.inner).queue.push_back(event);
    }

    // Serializes the commands sent to the engine. Events are not delivered while the guard is
    // alive, so that an observer calling back into the session cannot deadlock.
    fn begin_command(&self) -> CommandGuard<'_> {
        let lock_guard = lock(&self.command);
        lock(&self.inner).in_command = true;
        CommandGuard {
            shared: self,
            _lock: lock_guard,
        }
    }

    fn on_engine_notice(&self, id: UtteranceId, notice: EngineNotice) {
        self.apply_notice(id, notice);
        self.dispatch();
    }

    fn apply_notice(&self, id: UtteranceId, notice: EngineNotice) {
        let mut inner = lock(&self.inner);
        let current = match inner.current {
            Some(current) if current.id == id => current,
            _ => {
                trace!("ignoring engine report for stale utterance {}", id);
                return;
            }
        };

        match notice {
            EngineNotice::Started => {
                if current.state == PlaybackState::Pending {
                    inner.current = Some(Current {
                        id,
                        state: PlaybackState::Playing,
                    });
                    inner.queue.push_back(PlaybackEvent::Started(id));
                }
            }
            EngineNotice::Finished => {
                inner.current = None;
                inner.queue.push_back(PlaybackEvent::Ended(Some(id), EndReason::Finished));
            }
            EngineNotice::Failed(error) => {
                warn!("utterance {} failed: {}", id, error);
                inner.current = None;
                inner.queue.push_back(PlaybackEvent::Failed(id, Arc::new(error)));
            }
        }
    }

    fn dispatch(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.dispatching || inner.in_command {
                return;
            }
            inner.dispatching = true;
        }

        // Clears the flag even if an observer panics, so later events still get delivered.
        let mut guard = DispatchGuard {
            shared: self,
            armed: true,
        };
        loop {
            let event = {
                let mut inner = lock(&self.inner);
                match inner.queue.pop_front() {
                    Some(event) => event,
                    None => {
                        inner.dispatching = false;
                        guard.armed = false;
                        return;
                    }
                }
            };
            trace!("delivering {:?}", event);
            let observers = lock(&self.observers).clone();
            for observer in observers.iter() {
                observer.on_event(&event);
            }
        }
    }
}

struct DispatchGuard<'s> {
    shared: &'s Shared,
    armed: bool,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock(&self.shared.inner).dispatching = false;
        }
    }
}

struct CommandGuard<'s> {
    shared: &'s Shared,
    _lock: MutexGuard<'s, ()>,
}

impl Drop for CommandGuard<'_> {
    fn drop(&mut self) {
        lock(&self.shared.inner).in_command = false;
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
