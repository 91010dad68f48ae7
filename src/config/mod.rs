//! Configuration loading and management
//!
//! Two files live in `~/.mesmerizer/`:
//! - `config.toml`: settings, auto-created with defaults on first start
//! - `user_config.json`: the wake phrase, written once on first run

mod io;
mod settings;
mod wake_phrase;

pub use settings::{
    AssistantSettings, GuiSettings, Settings, StorageSettings, SttBackend, VoiceSettings,
};
pub use wake_phrase::{WakePhraseFile, WakePhraseRecord};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Create a config with sensible defaults
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Database location, honouring the `[settings.storage]` override
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("mesmerizer.db"))
    }

    /// Location of the whisper.cpp model selected in the voice settings
    pub fn whisper_model_path(&self) -> PathBuf {
        Self::global_config_dir()
            .join("whisper-models")
            .join(format!("ggml-{}.bin", self.settings.voice.whisper_model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [settings.voice]
            command_timeout = 5.0
            stt_backend = "http"

            [settings.gui]
            delete_confirmation = "Really remove {name}?"
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.voice.command_timeout, 5.0);
        assert_eq!(config.settings.voice.stt_backend, SttBackend::Http);
        assert_eq!(config.settings.voice.sample_rate, 16000);
        assert_eq!(config.settings.assistant.read_preview_chars, 500);
        assert_eq!(
            config.settings.gui.delete_prompt("a.pdf"),
            "Really remove a.pdf?"
        );
    }

    #[test]
    fn test_database_path_override() {
        let mut config = Config::with_defaults();
        assert!(config.database_path().ends_with("mesmerizer.db"));

        config.settings.storage.database_path = Some(PathBuf::from("/tmp/other.db"));
        assert_eq!(config.database_path(), PathBuf::from("/tmp/other.db"));
    }
}
