//! Bounded capture of one spoken command.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::audio::{AudioInput, AudioSource, chunks_for, rms};
use super::endpoint::{EndpointConfig, EndpointEvent, Endpointer};
use super::transcription::Transcriber;
use super::types::CaptureError;
use crate::config::VoiceSettings;

/// Lowest threshold calibration may produce; keeps a silent room from
/// turning every click into speech
const MIN_THRESHOLD: f32 = 50.0;

/// Records and transcribes one command
pub trait CommandRecognizer: Send + Sync {
    /// Lowercased transcript of the next utterance that starts within `timeout`
    fn capture(&self, timeout: Duration) -> Result<String, CaptureError>;
}

/// Microphone + endpointer + speech-to-text
pub struct CommandCapture {
    input: Arc<dyn AudioInput>,
    transcriber: Arc<dyn Transcriber>,
    settings: VoiceSettings,
}

impl CommandCapture {
    pub fn new(
        input: Arc<dyn AudioInput>,
        transcriber: Arc<dyn Transcriber>,
        settings: VoiceSettings,
    ) -> Self {
        Self {
            input,
            transcriber,
            settings,
        }
    }

    fn chunks(&self, secs: f32) -> usize {
        chunks_for(
            secs,
            self.settings.capture_chunk_samples,
            self.input.sample_rate(),
        )
    }

    /// Measure ambient noise and derive the speech threshold from it
    fn calibrate(&self, source: &mut dyn AudioSource) -> Result<f32, CaptureError> {
        if self.settings.ambient_calibration <= 0.0 {
            return Ok(self.settings.energy_threshold);
        }

        let mut total = 0.0f32;
        let mut count = 0usize;
        for _ in 0..self.chunks(self.settings.ambient_calibration) {
            match source.next_chunk()? {
                Some(chunk) => {
                    total += rms(&chunk);
                    count += 1;
                }
                None => break,
            }
        }

        if count == 0 {
            return Ok(self.settings.energy_threshold);
        }
        let ambient = total / count as f32;
        let threshold = (ambient * self.settings.dynamic_energy_ratio).max(MIN_THRESHOLD);
        debug!("Ambient level {:.1}, speech threshold {:.1}", ambient, threshold);
        Ok(threshold)
    }

    fn record(
        &self,
        source: &mut dyn AudioSource,
        threshold: f32,
        timeout: Duration,
    ) -> Result<Vec<i16>, CaptureError> {
        let mut endpointer = Endpointer::new(EndpointConfig {
            threshold,
            silence_chunks: self.chunks(self.settings.silence_duration),
            max_chunks: self.chunks(self.settings.phrase_limit),
        });
        let wait_chunks = self.chunks(timeout.as_secs_f32());
        let mut waited = 0usize;

        loop {
            let Some(chunk) = source.next_chunk()? else {
                return match endpointer.flush() {
                    Some(samples) => Ok(samples),
                    None => Err(CaptureError::Device("microphone stream ended".to_string())),
                };
            };

            match endpointer.push(&chunk) {
                EndpointEvent::Finished(samples) => return Ok(samples),
                EndpointEvent::Quiet => {
                    waited += 1;
                    if waited >= wait_chunks {
                        return Err(CaptureError::Timeout);
                    }
                }
                EndpointEvent::SpeechStarted | EndpointEvent::Speaking => {}
            }
        }
    }
}

impl CommandRecognizer for CommandCapture {
    fn capture(&self, timeout: Duration) -> Result<String, CaptureError> {
        let sample_rate = self.input.sample_rate();
        let samples = {
            let mut source = self.input.open(self.settings.capture_chunk_samples)?;
            let threshold = self.calibrate(source.as_mut())?;
            self.record(source.as_mut(), threshold, timeout)?
            // microphone released here, before the decoder runs
        };
        debug!("Captured {} samples", samples.len());

        let text = self.transcriber.transcribe(&samples, sample_rate)?;
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return Err(CaptureError::Unintelligible);
        }
        Ok(text)
    }
}
