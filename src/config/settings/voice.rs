//! Voice capture, speech-to-text and text-to-speech settings

use serde::{Deserialize, Serialize};

/// Which speech-to-text engine decodes recorded speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SttBackend {
    /// Local `whisper-cli` binary from whisper.cpp
    #[default]
    WhisperCli,
    /// Whisper-compatible HTTP server (audio posted as WAV, JSON `{"text": ...}` back)
    Http,
}

/// Voice settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Speech-to-text backend: "whisper_cli" or "http"
    #[serde(default)]
    pub stt_backend: SttBackend,

    /// Whisper model for transcription (tiny, base, small, medium, large)
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    /// Language passed to the decoder (en, de, auto, ...)
    #[serde(default = "default_language")]
    pub language: String,

    /// Endpoint for the "http" backend
    #[serde(default = "default_stt_endpoint")]
    pub stt_endpoint: String,

    /// Request timeout for the "http" backend (in seconds)
    #[serde(default = "default_http_timeout")]
    pub http_timeout: f32,

    /// Microphone sample rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Samples per chunk fed to the wake word decoder
    #[serde(default = "default_wake_chunk_samples")]
    pub wake_chunk_samples: usize,

    /// Samples per chunk while capturing a command
    #[serde(default = "default_capture_chunk_samples")]
    pub capture_chunk_samples: usize,

    /// RMS level above which audio counts as speech while waiting for the wake phrase
    #[serde(default = "default_energy_threshold")]
    pub energy_threshold: f32,

    /// Multiplier applied to the ambient noise level measured before a command
    #[serde(default = "default_dynamic_energy_ratio")]
    pub dynamic_energy_ratio: f32,

    /// Seconds of ambient noise sampled before each command
    #[serde(default = "default_ambient_calibration")]
    pub ambient_calibration: f32,

    /// Seconds to wait for a command to begin
    #[serde(default = "default_command_timeout")]
    pub command_timeout: f32,

    /// Maximum length of a single command (in seconds)
    #[serde(default = "default_phrase_limit")]
    pub phrase_limit: f32,

    /// Trailing silence that ends an utterance (in seconds)
    #[serde(default = "default_silence_duration")]
    pub silence_duration: f32,

    /// Maximum length of an utterance while waiting for the wake phrase (in seconds)
    #[serde(default = "default_max_utterance")]
    pub max_utterance: f32,

    /// Speaking rate in words per minute
    #[serde(default = "default_tts_rate")]
    pub tts_rate: u32,

    /// Voice name passed to the speech engine; empty = engine default
    #[serde(default)]
    pub tts_voice: String,
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_stt_endpoint() -> String {
    "http://127.0.0.1:8080/inference".to_string()
}

fn default_http_timeout() -> f32 {
    30.0
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_wake_chunk_samples() -> usize {
    8000 // half a second at 16 kHz
}

fn default_capture_chunk_samples() -> usize {
    1600 // 100 ms at 16 kHz
}

fn default_energy_threshold() -> f32 {
    300.0
}

fn default_dynamic_energy_ratio() -> f32 {
    1.5
}

fn default_ambient_calibration() -> f32 {
    1.2
}

fn default_command_timeout() -> f32 {
    7.0
}

fn default_phrase_limit() -> f32 {
    15.0
}

fn default_silence_duration() -> f32 {
    0.8
}

fn default_max_utterance() -> f32 {
    10.0
}

fn default_tts_rate() -> u32 {
    170
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stt_backend: SttBackend::default(),
            whisper_model: default_whisper_model(),
            language: default_language(),
            stt_endpoint: default_stt_endpoint(),
            http_timeout: default_http_timeout(),
            sample_rate: default_sample_rate(),
            wake_chunk_samples: default_wake_chunk_samples(),
            capture_chunk_samples: default_capture_chunk_samples(),
            energy_threshold: default_energy_threshold(),
            dynamic_energy_ratio: default_dynamic_energy_ratio(),
            ambient_calibration: default_ambient_calibration(),
            command_timeout: default_command_timeout(),
            phrase_limit: default_phrase_limit(),
            silence_duration: default_silence_duration(),
            max_utterance: default_max_utterance(),
            tts_rate: default_tts_rate(),
            tts_voice: String::new(),
        }
    }
}
