//! Speech-to-text backends.
//!
//! Both backends take a finished segment of 16-bit mono samples. `whisper-cli`
//! reads a scratch WAV from disk; the HTTP backend posts the same WAV bytes to
//! a whisper-compatible server.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::types::CaptureError;
use crate::config::{Config, SttBackend};

/// Turns one recorded segment into text
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, samples: &[i16], sample_rate: u32) -> Result<String, CaptureError>;
}

/// Build the transcriber selected in the settings
pub fn transcriber_from_config(config: &Config) -> Box<dyn Transcriber> {
    let voice = &config.settings.voice;
    match voice.stt_backend {
        SttBackend::WhisperCli => Box::new(WhisperCli::new(
            config.whisper_model_path(),
            voice.language.clone(),
        )),
        SttBackend::Http => Box::new(HttpTranscriber::new(
            voice.stt_endpoint.clone(),
            voice.language.clone(),
            Duration::from_secs_f32(voice.http_timeout.max(1.0)),
        )),
    }
}

/// Local whisper.cpp binary
#[derive(Debug, Clone)]
pub struct WhisperCli {
    binary: String,
    model_path: PathBuf,
    language: String,
    scratch_dir: PathBuf,
}

impl WhisperCli {
    pub fn new(model_path: PathBuf, language: String) -> Self {
        Self {
            binary: "whisper-cli".to_string(),
            model_path,
            language,
            scratch_dir: std::env::temp_dir(),
        }
    }

    fn run(&self, audio_path: &Path) -> Result<String, CaptureError> {
        let output = Command::new(&self.binary)
            .arg("-m")
            .arg(&self.model_path)
            .arg("-f")
            .arg(audio_path)
            .args(["--no-timestamps", "-l", &self.language])
            .output()
            .map_err(|e| CaptureError::Decoder(format!("Failed to run whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaptureError::Decoder(format!("Whisper failed: {}", stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Transcriber for WhisperCli {
    fn transcribe(&self, samples: &[i16], sample_rate: u32) -> Result<String, CaptureError> {
        let wav = encode_wav(samples, sample_rate)?;
        let audio_path = scratch_path(&self.scratch_dir);
        std::fs::write(&audio_path, wav)
            .map_err(|e| CaptureError::Decoder(format!("Failed to write audio: {}", e)))?;

        let result = self.run(&audio_path);
        let _ = std::fs::remove_file(&audio_path);

        let text = clean_transcript(&result?);
        debug!("whisper-cli: {:?}", text);
        if text.is_empty() {
            return Err(CaptureError::Unintelligible);
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    #[serde(default)]
    text: String,
}

/// Whisper-compatible HTTP server (e.g. whisper.cpp `server`)
pub struct HttpTranscriber {
    endpoint: String,
    language: String,
    agent: ureq::Agent,
}

impl HttpTranscriber {
    pub fn new(endpoint: String, language: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint,
            language,
            agent,
        }
    }
}

impl Transcriber for HttpTranscriber {
    fn transcribe(&self, samples: &[i16], sample_rate: u32) -> Result<String, CaptureError> {
        let wav = encode_wav(samples, sample_rate)?;
        let (content_type, body) = multipart_body(&wav, &self.language);

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", &content_type)
            .send_bytes(&body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    CaptureError::Decoder(format!("Speech service returned HTTP {}", code))
                }
                ureq::Error::Transport(t) => CaptureError::Network(t.to_string()),
            })?;

        let parsed: InferenceResponse = response
            .into_json()
            .map_err(|e| CaptureError::Decoder(format!("Invalid response: {}", e)))?;

        let text = clean_transcript(&parsed.text);
        if text.is_empty() {
            return Err(CaptureError::Unintelligible);
        }
        Ok(text)
    }
}

const BOUNDARY: &str = "mesmerizer-audio-boundary";

fn multipart_body(wav: &[u8], language: &str) -> (String, Vec<u8>) {
    let mut body = Vec::with_capacity(wav.len() + 512);
    for (name, value) in [("response_format", "json"), ("language", language)] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"audio.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(wav);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// 16-bit mono PCM WAV in memory
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, CaptureError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let to_err = |e: hound::Error| CaptureError::Decoder(format!("Failed to encode audio: {}", e));

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(to_err)?;
        for &sample in samples {
            writer.write_sample(sample).map_err(to_err)?;
        }
        writer.finalize().map_err(to_err)?;
    }
    Ok(cursor.into_inner())
}

/// Strip decoder annotations such as `[BLANK_AUDIO]` or `(wind blowing)` and
/// collapse whitespace
pub fn clean_transcript(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn scratch_path(dir: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.join(format!("mesmerizer-{}-{}.wav", std::process::id(), n))
}
