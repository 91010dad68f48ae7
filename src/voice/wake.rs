//! Wake word gate
//!
//! Pulls fixed-size chunks from an audio source, hands them to an utterance
//! decoder and fires when a finished utterance contains the wake phrase.
//! There is no timeout; the gate only returns on a match or when the stream
//! ends.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::audio::{AudioInput, AudioSource, chunks_for};
use super::endpoint::{EndpointConfig, EndpointEvent, Endpointer};
use super::transcription::Transcriber;
use super::types::CaptureError;
use crate::config::VoiceSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Armed,
    Fired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// A finished utterance contained the wake phrase
    Fired { utterance: String },
    /// The audio stream ended
    Closed,
}

/// Non-fatal decoder trouble; the gate logs it and keeps listening
#[derive(Debug, thiserror::Error)]
pub enum DecoderWarning {
    #[error("Segment could not be transcribed: {0}")]
    Transcription(CaptureError),
}

/// Incremental speech decoder: chunks in, finished utterances out
pub trait UtteranceDecoder: Send {
    fn accept_chunk(&mut self, chunk: &[i16]) -> Result<Option<String>, DecoderWarning>;

    /// Drop any partial utterance
    fn reset(&mut self);
}

/// Energy endpointer followed by speech-to-text on each segment
pub struct SegmentDecoder {
    endpointer: Endpointer,
    transcriber: Arc<dyn Transcriber>,
    sample_rate: u32,
}

impl SegmentDecoder {
    pub fn new(
        endpoint: EndpointConfig,
        transcriber: Arc<dyn Transcriber>,
        sample_rate: u32,
    ) -> Self {
        Self {
            endpointer: Endpointer::new(endpoint),
            transcriber,
            sample_rate,
        }
    }

    pub fn from_settings(settings: &VoiceSettings, transcriber: Arc<dyn Transcriber>) -> Self {
        let chunk = settings.wake_chunk_samples;
        let rate = settings.sample_rate;
        Self::new(
            EndpointConfig {
                threshold: settings.energy_threshold,
                silence_chunks: chunks_for(settings.silence_duration, chunk, rate),
                max_chunks: chunks_for(settings.max_utterance, chunk, rate),
            },
            transcriber,
            rate,
        )
    }
}

impl UtteranceDecoder for SegmentDecoder {
    fn accept_chunk(&mut self, chunk: &[i16]) -> Result<Option<String>, DecoderWarning> {
        let EndpointEvent::Finished(samples) = self.endpointer.push(chunk) else {
            return Ok(None);
        };
        match self.transcriber.transcribe(&samples, self.sample_rate) {
            Ok(text) => Ok(Some(text)),
            // Noise that decodes to nothing is normal while idle
            Err(CaptureError::Unintelligible) => Ok(None),
            Err(e) => Err(DecoderWarning::Transcription(e)),
        }
    }

    fn reset(&mut self) {
        self.endpointer.reset();
    }
}

/// Lowercase, punctuation to spaces, single-spaced
pub fn normalize_phrase(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive containment, ignoring punctuation ("Hey, Mesmerizer!")
pub fn contains_wake_phrase(utterance: &str, phrase: &str) -> bool {
    let phrase = normalize_phrase(phrase);
    if phrase.is_empty() {
        return false;
    }
    normalize_phrase(utterance).contains(&phrase)
}

pub struct WakeWordGate<D> {
    phrase: String,
    decoder: D,
    state: GateState,
}

impl<D: UtteranceDecoder> WakeWordGate<D> {
    pub fn new(phrase: impl Into<String>, decoder: D) -> Self {
        Self {
            phrase: phrase.into(),
            decoder,
            state: GateState::Idle,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Block until the wake phrase is heard or the stream ends
    pub fn run(&mut self, source: &mut dyn AudioSource) -> GateOutcome {
        self.state = GateState::Armed;
        self.decoder.reset();

        loop {
            let chunk = match source.next_chunk() {
                Ok(Some(chunk)) => chunk,
                Ok(None) => {
                    self.state = GateState::Idle;
                    return GateOutcome::Closed;
                }
                Err(e) => {
                    warn!("Wake word stream failed: {}", e);
                    self.state = GateState::Idle;
                    return GateOutcome::Closed;
                }
            };

            match self.decoder.accept_chunk(&chunk) {
                Ok(Some(utterance)) => {
                    if contains_wake_phrase(&utterance, &self.phrase) {
                        info!("Wake word detected in: {:?}", utterance);
                        self.state = GateState::Fired;
                        self.decoder.reset();
                        return GateOutcome::Fired { utterance };
                    }
                    debug!("Ignoring utterance: {:?}", utterance);
                }
                Ok(None) => {}
                Err(warning) => warn!("{}", warning),
            }
        }
    }
}

/// Something the dispatcher can block on until the user says the wake phrase
pub trait WakeSource: Send {
    fn wait_for_wake(&mut self) -> GateOutcome;
}

/// Always-on microphone listener. The stream is opened per wait and closed
/// once the gate fires, so command capture gets the device to itself.
pub struct MicWakeSource {
    input: Arc<dyn AudioInput>,
    gate: WakeWordGate<SegmentDecoder>,
    chunk_samples: usize,
    retry_delay: Duration,
}

impl MicWakeSource {
    pub fn new(
        input: Arc<dyn AudioInput>,
        transcriber: Arc<dyn Transcriber>,
        phrase: impl Into<String>,
        settings: &VoiceSettings,
    ) -> Self {
        Self {
            input,
            gate: WakeWordGate::new(phrase, SegmentDecoder::from_settings(settings, transcriber)),
            chunk_samples: settings.wake_chunk_samples,
            retry_delay: Duration::from_secs(2),
        }
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl WakeSource for MicWakeSource {
    fn wait_for_wake(&mut self) -> GateOutcome {
        loop {
            match self.input.open(self.chunk_samples) {
                Ok(mut source) => {
                    debug!("Listening for wake phrase '{}'", self.gate.phrase());
                    if let outcome @ GateOutcome::Fired { .. } = self.gate.run(source.as_mut()) {
                        return outcome;
                    }
                    warn!("Microphone stream ended; reopening");
                }
                Err(e) => warn!("Cannot open microphone: {}", e),
            }
            std::thread::sleep(self.retry_delay);
        }
    }
}
