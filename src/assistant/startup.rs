//! Wake phrase resolution and first-run setup.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;

use crate::config::WakePhraseFile;
use crate::voice::VoiceIo;

pub const SETUP_PROMPT: &str = "Welcome. Please say your custom wake phrase after the beep.";
pub const SETUP_RETRY: &str = "I didn't catch that. Try again.";

/// Shortest gap between two first-run capture attempts
pub const SETUP_RETRY_DELAY: Duration = Duration::from_secs(2);

pub fn greeting(phrase: &str) -> String {
    format!("Hi, I'm Mesmerizer. Say '{}' to start.", phrase)
}

/// Stored wake phrase, or capture and persist one on first run.
///
/// First-run capture keeps asking until something is heard. Attempts are at
/// least `retry_delay` apart, so a missing microphone does not spin.
pub fn resolve_wake_phrase(
    file: &WakePhraseFile,
    default_phrase: &str,
    voice: &VoiceIo,
    timeout: Duration,
    retry_delay: Duration,
) -> Result<String> {
    if let Some(phrase) = file.load_phrase(default_phrase)? {
        info!("Wake phrase loaded from {}", file.path().display());
        return Ok(phrase);
    }

    info!("No wake phrase yet; running first-time setup");
    voice.speak(SETUP_PROMPT);
    let heard = loop {
        let started = Instant::now();
        match voice.listen_command(timeout) {
            Some(phrase) if !phrase.trim().is_empty() => break phrase,
            _ => {
                if let Some(rest) = retry_delay.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
                voice.speak(SETUP_RETRY);
            }
        }
    };

    let phrase = file.save_once(&heard)?;
    voice.speak(&format!("Got it! I'll respond to '{}' from now on.", phrase));
    Ok(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::{CaptureError, CommandRecognizer, Speaker};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Spoken(Mutex<Vec<String>>);

    impl Speaker for Spoken {
        fn speak(&self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    struct Script(Mutex<VecDeque<Result<String, CaptureError>>>);

    impl CommandRecognizer for Script {
        fn capture(&self, _timeout: Duration) -> Result<String, CaptureError> {
            self.0.lock().unwrap().pop_front().unwrap()
        }
    }

    /// Fails with a device error a fixed number of times, then hears a phrase
    struct NoMicrophone {
        failures: usize,
        attempts: AtomicUsize,
    }

    impl CommandRecognizer for NoMicrophone {
        fn capture(&self, _timeout: Duration) -> Result<String, CaptureError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                Err(CaptureError::Device("rec not found".into()))
            } else {
                Ok("hello reader".into())
            }
        }
    }

    fn voice(script: Vec<Result<String, CaptureError>>) -> (VoiceIo, Arc<Spoken>) {
        let spoken = Arc::new(Spoken::default());
        let io = VoiceIo::new(spoken.clone(), Arc::new(Script(Mutex::new(script.into()))));
        (io, spoken)
    }

    fn resolve(file: &WakePhraseFile, io: &VoiceIo) -> Result<String> {
        resolve_wake_phrase(
            file,
            "hey mesmerizer",
            io,
            Duration::from_secs(1),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_existing_phrase_skips_setup() {
        let dir = tempfile::tempdir().unwrap();
        let file = WakePhraseFile::new(dir.path().join("user_config.json"));
        file.save_once("ok computer").unwrap();
        let (io, spoken) = voice(vec![]);

        let phrase = resolve(&file, &io).unwrap();
        assert_eq!(phrase, "ok computer");
        assert!(spoken.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_first_run_retries_then_saves() {
        let dir = tempfile::tempdir().unwrap();
        let file = WakePhraseFile::new(dir.path().join("user_config.json"));
        let (io, spoken) = voice(vec![
            Err(CaptureError::Timeout),
            Ok("wake up reader".to_string()),
        ]);

        let phrase = resolve(&file, &io).unwrap();
        assert_eq!(phrase, "wake up reader");
        assert_eq!(
            *spoken.0.lock().unwrap(),
            vec![
                SETUP_PROMPT.to_string(),
                SETUP_RETRY.to_string(),
                "Got it! I'll respond to 'wake up reader' from now on.".to_string(),
            ]
        );
        assert_eq!(
            file.load_phrase("hey mesmerizer").unwrap().as_deref(),
            Some("wake up reader")
        );
    }

    #[test]
    fn test_failing_microphone_waits_between_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let file = WakePhraseFile::new(dir.path().join("user_config.json"));
        let recognizer = Arc::new(NoMicrophone {
            failures: 3,
            attempts: AtomicUsize::new(0),
        });
        let io = VoiceIo::new(Arc::new(Spoken::default()), recognizer.clone());
        let delay = Duration::from_millis(50);

        let started = Instant::now();
        let phrase =
            resolve_wake_phrase(&file, "hey mesmerizer", &io, Duration::from_secs(1), delay)
                .unwrap();

        assert_eq!(phrase, "hello reader");
        assert_eq!(recognizer.attempts.load(Ordering::SeqCst), 4);
        assert!(started.elapsed() >= delay * 3);
    }

    #[test]
    fn test_greeting() {
        assert_eq!(
            greeting("hey mesmerizer"),
            "Hi, I'm Mesmerizer. Say 'hey mesmerizer' to start."
        );
    }
}
