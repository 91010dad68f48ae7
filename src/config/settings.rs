//! Settings configuration types

mod assistant;
mod gui;
mod voice;

pub use assistant::AssistantSettings;
pub use gui::GuiSettings;
pub use voice::{SttBackend, VoiceSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Voice capture and speech engine settings
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Voice assistant behaviour
    #[serde(default)]
    pub assistant: AssistantSettings,

    /// GUI settings
    #[serde(default)]
    pub gui: GuiSettings,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Where documents are persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Database file; defaults to ~/.mesmerizer/mesmerizer.db
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}
