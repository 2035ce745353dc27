use std::sync::mpsc::sync_channel;
use std::time::Duration;

use log::{debug, warn};

use super::Voice;

/// How long to wait for the platform to report its voices before giving up.
pub const DEFAULT_VOICE_TIMEOUT: Duration = Duration::from_secs(2);

/// A one-shot callback the [`VoiceProvider`] calls once its voice list has changed.
pub type VoicesChangedHandler = Box<dyn FnOnce() + Send + 'static>;

/// Enumerates the voices installed on the platform.
///
/// Many platforms load their voices lazily, so [`voices`](VoiceProvider::voices) may return an
/// empty list at first and become populated later. Providers announce that moment through
/// [`on_voices_changed`](VoiceProvider::on_voices_changed).
pub trait VoiceProvider: Send + Sync {
    /// Returns the voices that are currently available.
    fn voices(&self) -> Vec<Voice>;

    /// Registers a handler to call once the voice list changes. The provider may call the
    /// handler from any thread, and may drop it without calling it.
    fn on_voices_changed(&self, handler: VoicesChangedHandler);
}

/// Returns the available voices, blocking the thread until the provider reports them or until
/// the given timeout expires.
///
/// If the provider already has voices, they are returned immediately. Otherwise, whatever the
/// provider reports after the first of the change notification or the timeout is returned
/// as-is, which may still be an empty list.
pub fn load_voices_blocking<P: VoiceProvider + ?Sized>(
    provider: &P,
    timeout: Duration,
) -> Vec<Voice> {
    let voices = provider.voices();
    if !voices.is_empty() {
        return voices;
    }

    let (tx, rx) = sync_channel::<()>(1);
    provider.on_voices_changed(Box::new(move || {
        let _ = tx.try_send(());
    }));
    // The list may have been populated before the handler was registered.
    if provider.voices().is_empty() && rx.recv_timeout(timeout).is_err() {
        debug!("no voice change notification within {:?}", timeout);
    }

    let voices = provider.voices();
    if voices.is_empty() {
        warn!("no voices available, falling back to the platform default");
    }
    voices
}
