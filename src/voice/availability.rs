//! Voice tool availability checking.

use std::path::Path;
use std::process::Command;

use crate::config::{Config, SttBackend};

fn on_path(binary: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(binary)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check availability and return detailed status
pub fn check_availability(config: &Config) -> (bool, String) {
    if !on_path("rec") {
        return (
            false,
            "sox not found. Install with: brew install sox (or apt install sox)".to_string(),
        );
    }

    if config.settings.voice.stt_backend == SttBackend::WhisperCli {
        if !on_path("whisper-cli") {
            return (
                false,
                "whisper-cli not found. Install with: brew install whisper-cpp".to_string(),
            );
        }
        if let Some(message) = missing_model(&config.whisper_model_path()) {
            return (false, message);
        }
    }

    (true, "Voice input ready".to_string())
}

fn missing_model(model_path: &Path) -> Option<String> {
    if model_path.exists() {
        None
    } else {
        Some(format!("Whisper model not found at {}", model_path.display()))
    }
}
