//! Microphone audio as a stream of fixed-size chunks.

use std::io::{ErrorKind, Read};
use std::process::{Child, ChildStdout};

use tracing::debug;

use super::recording::{start_stream_process, terminate_recording_process};
use super::types::AudioError;

/// A live stream of 16-bit mono samples
pub trait AudioSource: Send {
    fn sample_rate(&self) -> u32;

    /// Block until the next chunk is available; `Ok(None)` once the stream has ended
    fn next_chunk(&mut self) -> Result<Option<Vec<i16>>, AudioError>;
}

/// Something that can open audio streams (the microphone, or a fake in tests)
pub trait AudioInput: Send + Sync {
    fn sample_rate(&self) -> u32;

    fn open(&self, chunk_samples: usize) -> Result<Box<dyn AudioSource>, AudioError>;
}

/// Default microphone via sox
#[derive(Debug, Clone, Copy)]
pub struct MicInput {
    sample_rate: u32,
}

impl MicInput {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl AudioInput for MicInput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open(&self, chunk_samples: usize) -> Result<Box<dyn AudioSource>, AudioError> {
        Ok(Box::new(MicStream::open(self.sample_rate, chunk_samples)?))
    }
}

/// A running `rec` process read chunk by chunk. The process is stopped on drop.
pub struct MicStream {
    process: Option<Child>,
    stdout: ChildStdout,
    sample_rate: u32,
    buffer: Vec<u8>,
}

impl MicStream {
    pub fn open(sample_rate: u32, chunk_samples: usize) -> Result<Self, AudioError> {
        let mut process = start_stream_process(sample_rate)?;
        let Some(stdout) = process.stdout.take() else {
            terminate_recording_process(process);
            return Err(AudioError::Spawn(std::io::Error::new(
                ErrorKind::BrokenPipe,
                "recording process has no stdout",
            )));
        };
        debug!("Microphone stream opened at {} Hz", sample_rate);

        Ok(Self {
            process: Some(process),
            stdout,
            sample_rate,
            buffer: vec![0u8; chunk_samples.max(1) * 2],
        })
    }
}

impl AudioSource for MicStream {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn next_chunk(&mut self) -> Result<Option<Vec<i16>>, AudioError> {
        match self.stdout.read_exact(&mut self.buffer) {
            Ok(()) => Ok(Some(decode_le_samples(&self.buffer))),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(AudioError::Read(e)),
        }
    }
}

impl Drop for MicStream {
    fn drop(&mut self) {
        if let Some(process) = self.process.take() {
            terminate_recording_process(process);
        }
    }
}

/// Little-endian byte pairs to samples
pub fn decode_le_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Root mean square level of a chunk
pub fn rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

/// Number of chunks covering `secs` seconds (at least one)
pub fn chunks_for(secs: f32, chunk_samples: usize, sample_rate: u32) -> usize {
    let samples = (secs.max(0.0) * sample_rate as f32).ceil() as usize;
    samples.div_ceil(chunk_samples.max(1)).max(1)
}
