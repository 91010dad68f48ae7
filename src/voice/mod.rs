//! Voice input and output
//!
//! - Microphone audio comes from sox `rec` streaming raw PCM
//! - Utterances are cut by an energy endpointer and decoded by `whisper-cli`
//!   or a whisper-compatible HTTP server
//! - Replies go through the platform speech engine
//! - The wake word gate and command capture sit on top of those

mod adapter;
mod audio;
mod availability;
mod capture;
mod endpoint;
mod recording;
mod speech;
mod transcription;
mod types;
mod wake;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{NETWORK_REPLY, UNINTELLIGIBLE_REPLY, VoiceIo};
pub use audio::{AudioInput, AudioSource, MicInput, MicStream, chunks_for, decode_le_samples, rms};
pub use availability::check_availability;
pub use capture::{CommandCapture, CommandRecognizer};
pub use endpoint::{EndpointConfig, EndpointEvent, Endpointer};
pub use speech::{Speaker, SystemSpeaker};
pub use transcription::{
    HttpTranscriber, Transcriber, WhisperCli, clean_transcript, encode_wav, transcriber_from_config,
};
pub use types::{AudioError, CaptureError};
pub use wake::{
    DecoderWarning, GateOutcome, GateState, MicWakeSource, SegmentDecoder, UtteranceDecoder,
    WakeSource, WakeWordGate, contains_wake_phrase, normalize_phrase,
};
