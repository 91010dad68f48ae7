//! Wiring for the background voice assistant thread.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use super::dispatcher::{AppEvent, CommandDispatcher, DispatchSettings};
use super::signal::ListeningSignal;
use super::startup::{SETUP_RETRY_DELAY, greeting, resolve_wake_phrase};
use crate::config::{Config, WakePhraseFile};
use crate::domain::LogEvent;
use crate::library::{DocumentStore, NativePdfPicker};
use crate::voice::{
    AudioInput, CommandCapture, MicInput, MicWakeSource, SystemSpeaker, Transcriber, VoiceIo,
    check_availability, transcriber_from_config,
};

/// Start the wake word loop on its own thread
pub fn spawn_assistant(
    config: Config,
    store: DocumentStore,
    signal: ListeningSignal,
    events: Sender<AppEvent>,
) -> Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("voice-assistant".to_string())
        .spawn(move || {
            if let Err(e) = run_assistant(&config, store, signal, events.clone()) {
                error!("Voice assistant stopped: {:#}", e);
                let _ = events.send(AppEvent::Log(LogEvent::error(format!(
                    "Voice assistant stopped: {:#}",
                    e
                ))));
            }
        })
        .context("Failed to start voice assistant thread")
}

fn run_assistant(
    config: &Config,
    store: DocumentStore,
    signal: ListeningSignal,
    events: Sender<AppEvent>,
) -> Result<()> {
    let voice_settings = &config.settings.voice;

    let (ready, status) = check_availability(config);
    if !ready {
        warn!("{}", status);
        let _ = events.send(AppEvent::Log(LogEvent::error(status)));
    }

    let input: Arc<dyn AudioInput> = Arc::new(MicInput::new(voice_settings.sample_rate));
    let transcriber: Arc<dyn Transcriber> = Arc::from(transcriber_from_config(config));
    let speaker = Arc::new(SystemSpeaker::new(
        voice_settings.tts_rate,
        voice_settings.tts_voice.clone(),
    ));
    let recognizer = Arc::new(CommandCapture::new(
        Arc::clone(&input),
        Arc::clone(&transcriber),
        voice_settings.clone(),
    ));
    let voice = VoiceIo::new(speaker, recognizer);
    let settings = DispatchSettings::from_config(config);

    let phrase = resolve_wake_phrase(
        &WakePhraseFile::global(),
        &config.settings.assistant.default_wake_phrase,
        &voice,
        settings.command_timeout.max(Duration::from_secs(1)),
        SETUP_RETRY_DELAY,
    )
    .context("Failed to resolve wake phrase")?;

    info!("Wake phrase: '{}'", phrase);
    let _ = events.send(AppEvent::Log(LogEvent::system(format!(
        "Say '{}' to start",
        phrase
    ))));
    voice.speak(&greeting(&phrase));

    let wake = MicWakeSource::new(input, transcriber, phrase, voice_settings);
    CommandDispatcher::new(
        wake,
        voice,
        store,
        Arc::new(NativePdfPicker),
        signal,
        events,
        settings,
    )
    .run();
    Ok(())
}
