//! Energy-based utterance endpointing
//!
//! Chunks above the threshold open an utterance; a run of quiet chunks (or the
//! length cap) closes it. One chunk of pre-roll is kept so the first syllable
//! is not clipped.

use super::audio::rms;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointConfig {
    /// RMS level that counts as speech
    pub threshold: f32,
    /// Consecutive quiet chunks that end an utterance
    pub silence_chunks: usize,
    /// Longest utterance, in chunks
    pub max_chunks: usize,
}

/// What a pushed chunk did to the segmenter
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointEvent {
    /// Still waiting for speech
    Quiet,
    /// This chunk opened an utterance
    SpeechStarted,
    /// Inside an utterance
    Speaking,
    /// The utterance ended; carries its samples
    Finished(Vec<i16>),
}

#[derive(Debug)]
pub struct Endpointer {
    config: EndpointConfig,
    pre_roll: Option<Vec<i16>>,
    segment: Vec<i16>,
    in_speech: bool,
    quiet_run: usize,
    chunks: usize,
}

impl Endpointer {
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            config,
            pre_roll: None,
            segment: Vec::new(),
            in_speech: false,
            quiet_run: 0,
            chunks: 0,
        }
    }

    pub fn in_speech(&self) -> bool {
        self.in_speech
    }

    pub fn push(&mut self, chunk: &[i16]) -> EndpointEvent {
        let loud = rms(chunk) >= self.config.threshold;

        if !self.in_speech {
            if !loud {
                self.pre_roll = Some(chunk.to_vec());
                return EndpointEvent::Quiet;
            }
            self.in_speech = true;
            self.quiet_run = 0;
            self.chunks = 1;
            self.segment.clear();
            if let Some(pre) = self.pre_roll.take() {
                self.segment.extend_from_slice(&pre);
            }
            self.segment.extend_from_slice(chunk);
            if self.chunks >= self.config.max_chunks {
                return EndpointEvent::Finished(self.take_segment());
            }
            return EndpointEvent::SpeechStarted;
        }

        self.segment.extend_from_slice(chunk);
        self.chunks += 1;
        if loud {
            self.quiet_run = 0;
        } else {
            self.quiet_run += 1;
        }

        if self.quiet_run >= self.config.silence_chunks || self.chunks >= self.config.max_chunks {
            EndpointEvent::Finished(self.take_segment())
        } else {
            EndpointEvent::Speaking
        }
    }

    /// Close an open utterance early (end of stream)
    pub fn flush(&mut self) -> Option<Vec<i16>> {
        if self.in_speech {
            Some(self.take_segment())
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.pre_roll = None;
        self.segment.clear();
        self.in_speech = false;
        self.quiet_run = 0;
        self.chunks = 0;
    }

    fn take_segment(&mut self) -> Vec<i16> {
        self.in_speech = false;
        self.quiet_run = 0;
        self.chunks = 0;
        self.pre_roll = None;
        std::mem::take(&mut self.segment)
    }
}
