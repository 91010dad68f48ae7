//! The voice command loop
//!
//! One iteration per wake event: announce, capture one command, classify it,
//! act, report. Nothing that goes wrong inside an iteration ends the loop.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::{error, info, warn};

use super::intent::Intent;
use super::signal::ListeningSignal;
use crate::config::Config;
use crate::domain::{LogEvent, truncate_chars};
use crate::library::{DocumentStore, FilePicker, UploadOutcome, upload_pdf};
use crate::voice::{GateOutcome, VoiceIo, WakeSource};

pub const LISTENING_PROMPT: &str = "Listening now.";
pub const UPLOAD_PROMPT: &str = "Opening file dialog. Please choose your PDF.";
pub const NO_FILE_SELECTED: &str = "No file selected.";
pub const EMPTY_LIBRARY: &str = "You don't have any PDFs saved yet.";
pub const READ_TRUNCATED: &str = "Reading truncated. You can ask for specific sections later.";
pub const UPLOAD_FAILED: &str = "Sorry, I couldn't upload that file.";
pub const LIBRARY_FAILED: &str = "Sorry, I couldn't reach your PDF library.";

/// Messages from the dispatcher thread to the GUI
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Append a line to the log pane
    Log(LogEvent),
    /// Stored documents changed; refresh the dropdown
    LibraryChanged,
}

/// Dispatcher tuning, taken from the settings file
#[derive(Debug, Clone, Copy)]
pub struct DispatchSettings {
    pub command_timeout: Duration,
    pub read_preview_chars: usize,
    pub tick_interval: Duration,
}

impl DispatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            command_timeout: Duration::from_secs_f32(
                config.settings.voice.command_timeout.max(0.1),
            ),
            read_preview_chars: config.settings.assistant.read_preview_chars,
            tick_interval: Duration::from_millis(50),
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from_config(&Config::with_defaults())
    }
}

pub struct CommandDispatcher<W> {
    wake: W,
    voice: VoiceIo,
    store: DocumentStore,
    picker: Arc<dyn FilePicker>,
    signal: ListeningSignal,
    events: Sender<AppEvent>,
    settings: DispatchSettings,
}

impl<W: WakeSource> CommandDispatcher<W> {
    pub fn new(
        wake: W,
        voice: VoiceIo,
        store: DocumentStore,
        picker: Arc<dyn FilePicker>,
        signal: ListeningSignal,
        events: Sender<AppEvent>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            wake,
            voice,
            store,
            picker,
            signal,
            events,
            settings,
        }
    }

    /// Loop until the wake source closes (the microphone source never does)
    pub fn run(&mut self) {
        while self.run_once() {}
        info!("Wake source closed; voice assistant stopped");
        self.log(LogEvent::system("Voice assistant stopped"));
    }

    /// Wait for one wake event and handle it. Returns false once the wake
    /// source has closed.
    pub fn run_once(&mut self) -> bool {
        match self.wake.wait_for_wake() {
            GateOutcome::Fired { .. } => {
                self.handle_wake();
                true
            }
            GateOutcome::Closed => false,
        }
    }

    fn handle_wake(&mut self) {
        self.signal.start(self.settings.tick_interval);
        self.voice.speak(LISTENING_PROMPT);
        let command = self.voice.listen_command(self.settings.command_timeout);
        self.signal.stop();

        let Some(command) = command else {
            return;
        };
        self.log(LogEvent::voice(format!("Heard: {}", command)));

        match Intent::classify(&command) {
            Intent::Upload => self.upload(),
            Intent::ReadLatest => self.read_latest(),
            Intent::Echo(text) => self.voice.speak(&format!("I heard: {}", text)),
        }
    }

    fn upload(&mut self) {
        self.voice.speak(UPLOAD_PROMPT);
        let Some(path) = self.picker.pick_pdf() else {
            self.log(LogEvent::upload(NO_FILE_SELECTED));
            self.voice.speak(NO_FILE_SELECTED);
            return;
        };

        match upload_pdf(&self.store, &path) {
            Ok(outcome) => {
                let message = outcome.message();
                self.log(LogEvent::upload(message.clone()));
                if matches!(outcome, UploadOutcome::Stored { .. }) {
                    self.send(AppEvent::LibraryChanged);
                }
                self.voice.speak(&message);
            }
            Err(e) => {
                error!("Upload of {} failed: {}", path.display(), e);
                self.log(LogEvent::error(e.to_string()));
                self.voice.speak(UPLOAD_FAILED);
            }
        }
    }

    fn read_latest(&mut self) {
        let names = match self.store.list() {
            Ok(names) => names,
            Err(e) => return self.library_failed(e),
        };
        let Some(latest) = names.first() else {
            self.voice.speak(EMPTY_LIBRARY);
            return;
        };

        let content = match self.store.fetch(latest) {
            Ok(Some(content)) => content,
            Ok(None) => {
                // deleted from the GUI between list and fetch
                warn!("'{}' vanished before it could be read", latest);
                self.voice.speak(EMPTY_LIBRARY);
                return;
            }
            Err(e) => return self.library_failed(e),
        };

        self.log(LogEvent::load(format!("Reading {} aloud", latest)));
        self.voice.speak(&format!("Reading the latest file: {}", latest));
        self.voice
            .speak(truncate_chars(&content, self.settings.read_preview_chars));
        self.voice.speak(READ_TRUNCATED);
    }

    fn library_failed(&mut self, e: impl std::fmt::Display) {
        error!("Document store failed: {}", e);
        self.log(LogEvent::error(e.to_string()));
        self.voice.speak(LIBRARY_FAILED);
    }

    fn log(&self, event: LogEvent) {
        self.send(AppEvent::Log(event));
    }

    fn send(&self, event: AppEvent) {
        // GUI already closed; nothing left to inform
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::{CaptureError, CommandRecognizer, Speaker};
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::mpsc;

    struct Wakes(usize);

    impl WakeSource for Wakes {
        fn wait_for_wake(&mut self) -> GateOutcome {
            if self.0 == 0 {
                return GateOutcome::Closed;
            }
            self.0 -= 1;
            GateOutcome::Fired {
                utterance: "hey mesmerizer".into(),
            }
        }
    }

    #[derive(Default)]
    struct Spoken(Mutex<Vec<String>>);

    impl Speaker for Spoken {
        fn speak(&self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    struct Commands(Mutex<VecDeque<Result<String, CaptureError>>>);

    impl CommandRecognizer for Commands {
        fn capture(&self, _timeout: Duration) -> Result<String, CaptureError> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(CaptureError::Timeout))
        }
    }

    struct NoPick;

    impl FilePicker for NoPick {
        fn pick_pdf(&self) -> Option<PathBuf> {
            None
        }
    }

    fn dispatcher(
        commands: Vec<&str>,
        store: DocumentStore,
    ) -> (
        CommandDispatcher<Wakes>,
        Arc<Spoken>,
        mpsc::Receiver<AppEvent>,
    ) {
        let spoken = Arc::new(Spoken::default());
        let recognizer = Commands(Mutex::new(
            commands.iter().map(|c| Ok(c.to_string())).collect(),
        ));
        let (tx, rx) = mpsc::channel();
        let d = CommandDispatcher::new(
            Wakes(commands.len()),
            VoiceIo::new(spoken.clone(), Arc::new(recognizer)),
            store,
            Arc::new(NoPick),
            ListeningSignal::new(),
            tx,
            DispatchSettings {
                command_timeout: Duration::from_secs(1),
                read_preview_chars: 5,
                tick_interval: Duration::from_millis(1),
            },
        );
        (d, spoken, rx)
    }

    fn spoken(s: &Spoken) -> Vec<String> {
        s.0.lock().unwrap().clone()
    }

    #[test]
    fn test_echo() {
        let store = DocumentStore::open_in_memory().unwrap();
        let (mut d, s, _rx) = dispatcher(vec!["hello there"], store);
        d.run();
        assert_eq!(spoken(&s), vec![LISTENING_PROMPT, "I heard: hello there"]);
    }

    #[test]
    fn test_read_on_empty_store() {
        let (mut d, s, _rx) = dispatcher(vec!["read"], DocumentStore::open_in_memory().unwrap());
        d.run();
        assert_eq!(spoken(&s), vec![LISTENING_PROMPT, EMPTY_LIBRARY]);
    }

    #[test]
    fn test_read_latest_truncates() {
        let store = DocumentStore::open_in_memory().unwrap();
        store.insert("old.pdf", "old content").unwrap();
        store.insert("new.pdf", "0123456789").unwrap();
        let (mut d, s, _rx) = dispatcher(vec!["open my file"], store);
        d.run();
        assert_eq!(
            spoken(&s),
            vec![
                LISTENING_PROMPT,
                "Reading the latest file: new.pdf",
                "01234",
                READ_TRUNCATED
            ]
        );
    }

    #[test]
    fn test_upload_without_selection() {
        let (mut d, s, rx) = dispatcher(vec!["upload"], DocumentStore::open_in_memory().unwrap());
        d.run();
        assert_eq!(
            spoken(&s),
            vec![LISTENING_PROMPT, UPLOAD_PROMPT, NO_FILE_SELECTED]
        );
        assert!(rx.try_iter().all(|e| !matches!(e, AppEvent::LibraryChanged)));
    }

    #[test]
    fn test_read_with_broken_store_apologizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");
        let store = DocumentStore::open(&path).unwrap();
        store.insert("a.pdf", "content").unwrap();
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE pdfs")
            .unwrap();

        let (mut d, s, rx) = dispatcher(vec!["read", "hello"], store);
        d.run();

        assert_eq!(
            spoken(&s),
            vec![LISTENING_PROMPT, LIBRARY_FAILED, LISTENING_PROMPT, "I heard: hello"]
        );
        let errors: Vec<String> = rx
            .try_iter()
            .filter_map(|e| match e {
                AppEvent::Log(log) if log.kind == crate::domain::LogEventKind::Error => {
                    Some(log.display_line())
                }
                _ => None,
            })
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("[ERROR]"));
    }

    #[test]
    fn test_timeout_goes_back_to_waiting() {
        let (mut d, s, _rx) = dispatcher(vec![], DocumentStore::open_in_memory().unwrap());
        d.wake = Wakes(2);
        assert!(d.run_once());
        assert!(d.run_once());
        assert!(!d.run_once());
        assert_eq!(spoken(&s), vec![LISTENING_PROMPT, LISTENING_PROMPT]);
        assert!(!d.signal.is_active());
    }
}
