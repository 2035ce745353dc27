#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use pictone_voice::tts::{
    EndReason, EngineSink, PlaybackEvent, PlaybackSession, SpeechEngine, Utterance, UtteranceId,
};
use pictone_voice::{Error, Result};

/// Routes the crate's log output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What a [`MockEngine`] was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Speak(Utterance),
    Cancel,
}

/// An engine that records its commands and lets the test report progress.
#[derive(Default)]
pub struct MockEngine {
    commands: Mutex<Vec<Command>>,
    sinks: Mutex<Vec<EngineSink>>,
    fail_next: Mutex<Option<String>>,
    start_immediately: AtomicBool,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes the engine report the start of every utterance from inside `speak`.
    pub fn starting_immediately() -> Arc<Self> {
        let engine = Self::new();
        engine.start_immediately.store(true, Ordering::SeqCst);
        engine
    }

    pub fn fail_next_speak(&self, reason: &str) {
        *self.fail_next.lock().unwrap() = Some(reason.to_string());
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                Command::Speak(utterance) => Some(utterance),
                Command::Cancel => None,
            })
            .collect()
    }

    pub fn sink(&self, id: UtteranceId) -> EngineSink {
        self.sinks.lock().unwrap().iter().find(|sink| sink.id() == id).cloned().unwrap()
    }
}

impl SpeechEngine for MockEngine {
    fn speak(&self, utterance: &Utterance, sink: EngineSink) -> Result<()> {
        if let Some(reason) = self.fail_next.lock().unwrap().take() {
            return Err(Error::engine(reason));
        }
        self.commands.lock().unwrap().push(Command::Speak(utterance.clone()));
        self.sinks.lock().unwrap().push(sink.clone());
        if self.start_immediately.load(Ordering::SeqCst) {
            sink.started();
        }
        Ok(())
    }

    fn cancel(&self) {
        self.commands.lock().unwrap().push(Command::Cancel);
    }
}

/// A comparable summary of a [`PlaybackEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Start(UtteranceId),
    End(Option<UtteranceId>, EndReason),
    Error(UtteranceId, String),
}

impl From<PlaybackEvent> for Seen {
    fn from(event: PlaybackEvent) -> Self {
        match event {
            PlaybackEvent::Started(id) => Self::Start(id),
            PlaybackEvent::Ended(id, reason) => Self::End(id, reason),
            PlaybackEvent::Failed(id, error) => Self::Error(id, error.to_string()),
        }
    }
}

pub type Recording = Arc<Mutex<Vec<Seen>>>;

/// Subscribes an observer that records every event the session delivers.
pub fn record(session: &PlaybackSession) -> Recording {
    init_logging();
    let recording = Recording::default();
    session.subscribe({
        let recording = recording.clone();
        move |event: PlaybackEvent| recording.lock().unwrap().push(event.into())
    });
    recording
}

pub fn seen(recording: &Recording) -> Vec<Seen> {
    recording.lock().unwrap().clone()
}
