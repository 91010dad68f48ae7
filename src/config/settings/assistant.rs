//! Voice assistant behaviour

use serde::{Deserialize, Serialize};

/// Voice assistant settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// Run the wake word loop alongside the GUI
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Wake phrase used when the wake phrase file has no entry
    #[serde(default = "default_wake_phrase")]
    pub default_wake_phrase: String,

    /// Characters of the newest document read aloud by the "read" command
    #[serde(default = "default_read_preview_chars")]
    pub read_preview_chars: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_wake_phrase() -> String {
    "hey mesmerizer".to_string()
}

fn default_read_preview_chars() -> usize {
    500 // keeps text-to-speech output short
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default_wake_phrase: default_wake_phrase(),
            read_preview_chars: default_read_preview_chars(),
        }
    }
}
