use std::time::Duration;

use log::{debug, warn};
use tokio::sync::oneshot::channel;

use crate::tts::{Voice, VoiceProvider};

/// Completes with the available voices once the provider reports them or the given timeout
/// expires, whichever happens first.
///
/// This is the async counterpart of [`load_voices_blocking`](crate::tts::load_voices_blocking).
/// The returned list may be empty, in which case the platform's default voice should be used.
pub async fn load_voices<P: VoiceProvider + ?Sized>(
    provider: &P,
    timeout: Duration,
) -> Vec<Voice> {
    let voices = provider.voices();
    if !voices.is_empty() {
        return voices;
    }

    let (tx, rx) = channel::<()>();
    provider.on_voices_changed(Box::new(move || {
        let _ = tx.send(());
    }));
    // The list may have been populated before the handler was registered.
    if provider.voices().is_empty() && tokio::time::timeout(timeout, rx).await.is_err() {
        debug!("no voice change notification within {:?}", timeout);
    }

    let voices = provider.voices();
    if voices.is_empty() {
        warn!("no voices available, falling back to the platform default");
    }
    voices
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::tts::VoicesChangedHandler;

    use super::*;

    #[derive(Default)]
    struct LazyProvider {
        voices: Mutex<Vec<Voice>>,
        handler: Mutex<Option<VoicesChangedHandler>>,
    }

    impl LazyProvider {
        fn publish(&self, voices: Vec<Voice>) {
            *self.voices.lock().unwrap() = voices;
            if let Some(handler) = self.handler.lock().unwrap().take() {
                handler();
            }
        }
    }

    impl VoiceProvider for LazyProvider {
        fn voices(&self) -> Vec<Voice> {
            self.voices.lock().unwrap().clone()
        }

        fn on_voices_changed(&self, handler: VoicesChangedHandler) {
            *self.handler.lock().unwrap() = Some(handler);
        }
    }

    #[tokio::test]
    async fn test_notification_wins() {
        let provider = Arc::new(LazyProvider::default());
        let publisher = {
            let provider = provider.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                provider.publish(vec![Voice::new("Fiona", "en-GB")]);
            })
        };

        let voices = load_voices(&*provider, Duration::from_secs(30)).await;
        publisher.await.unwrap();
        assert_eq!(voices, vec![Voice::new("Fiona", "en-GB")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_wins() {
        let provider = LazyProvider::default();
        let voices = load_voices(&provider, crate::tts::DEFAULT_VOICE_TIMEOUT).await;
        assert!(voices.is_empty());
        assert!(provider.handler.lock().unwrap().is_some());
    }
}
