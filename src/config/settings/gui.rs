//! GUI-specific settings

use serde::{Deserialize, Serialize};

/// GUI-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiSettings {
    /// Characters of a document shown in the log pane by "Load"
    #[serde(default = "default_load_preview_chars")]
    pub load_preview_chars: usize,

    /// Confirmation text for "Delete"; `{name}` is replaced by the filename
    #[serde(default = "default_delete_confirmation")]
    pub delete_confirmation: String,

    /// Maximum number of matching lines shown by search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Initial window size [width, height]
    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
}

fn default_load_preview_chars() -> usize {
    2000
}

fn default_delete_confirmation() -> String {
    "Delete '{name}'?".to_string()
}

fn default_search_limit() -> usize {
    crate::library::DEFAULT_SEARCH_LIMIT
}

fn default_window_size() -> [f32; 2] {
    [800.0, 650.0]
}

impl GuiSettings {
    /// Confirmation copy for deleting `name`
    pub fn delete_prompt(&self, name: &str) -> String {
        self.delete_confirmation.replace("{name}", name)
    }
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            load_preview_chars: default_load_preview_chars(),
            delete_confirmation: default_delete_confirmation(),
            search_limit: default_search_limit(),
            window_size: default_window_size(),
        }
    }
}
