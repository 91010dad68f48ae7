//! Scripted audio and decoders for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::audio::{AudioInput, AudioSource};
use super::transcription::Transcriber;
use super::types::{AudioError, CaptureError};

pub fn loud(len: usize) -> Vec<i16> {
    (0..len).map(|i| if i % 2 == 0 { 3000 } else { -3000 }).collect()
}

pub fn quiet(len: usize) -> Vec<i16> {
    (0..len).map(|i| if i % 2 == 0 { 5 } else { -5 }).collect()
}

/// Plays back pre-recorded chunks, then ends
pub struct FakeSource {
    sample_rate: u32,
    chunks: VecDeque<Vec<i16>>,
}

impl FakeSource {
    pub fn new(sample_rate: u32, chunks: Vec<Vec<i16>>) -> Self {
        Self {
            sample_rate,
            chunks: chunks.into(),
        }
    }
}

impl AudioSource for FakeSource {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn next_chunk(&mut self) -> Result<Option<Vec<i16>>, AudioError> {
        Ok(self.chunks.pop_front())
    }
}

/// Hands out one scripted stream per `open`; fails once they run out
pub struct FakeInput {
    sample_rate: u32,
    streams: Mutex<VecDeque<Vec<Vec<i16>>>>,
}

impl FakeInput {
    pub fn new(sample_rate: u32, streams: Vec<Vec<Vec<i16>>>) -> Self {
        Self {
            sample_rate,
            streams: Mutex::new(streams.into()),
        }
    }
}

impl AudioInput for FakeInput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open(&self, _chunk_samples: usize) -> Result<Box<dyn AudioSource>, AudioError> {
        match self.streams.lock().unwrap().pop_front() {
            Some(chunks) => Ok(Box::new(FakeSource::new(self.sample_rate, chunks))),
            None => Err(AudioError::Spawn(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no microphone",
            ))),
        }
    }
}

/// Returns scripted results in order, then `Unintelligible`
pub struct ScriptedTranscriber {
    results: Mutex<VecDeque<Result<String, CaptureError>>>,
}

impl ScriptedTranscriber {
    pub fn new(results: Vec<Result<String, CaptureError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }
}

impl Transcriber for ScriptedTranscriber {
    fn transcribe(&self, _samples: &[i16], _sample_rate: u32) -> Result<String, CaptureError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CaptureError::Unintelligible))
    }
}
