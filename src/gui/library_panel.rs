//! Library panel state and actions
//!
//! Everything the window's buttons do, kept free of egui so it can be
//! tested against an in-memory store.

use std::path::Path;

use tracing::{error, info};

use crate::config::GuiSettings;
use crate::domain::{DeleteOutcome, LogEvent, truncate_chars};
use crate::library::{DocumentStore, FilePicker, upload_pdf};

pub const NO_SELECTION: &str = "No PDF selected.";

#[derive(Debug, Default)]
pub struct LibraryPanel {
    /// Stored filenames, newest first
    pub names: Vec<String>,
    pub selected: Option<String>,
    /// Name waiting for delete confirmation
    pub pending_delete: Option<String>,
    pub search_query: String,
    /// Result of the last upload, shown under the button
    pub info_line: String,
    pub logs: Vec<LogEvent>,
}

impl LibraryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the dropdown. Selection stays if the name still exists,
    /// otherwise falls back to the newest document.
    pub fn refresh(&mut self, store: &DocumentStore) {
        match store.list() {
            Ok(names) => {
                let keep = self
                    .selected
                    .as_ref()
                    .filter(|name| names.contains(name))
                    .cloned();
                self.selected = keep.or_else(|| names.first().cloned());
                self.names = names;
            }
            Err(e) => {
                error!("Failed to list documents: {}", e);
                self.push(LogEvent::error(format!("Failed to list documents: {}", e)));
            }
        }
    }

    /// Select the newest document after an upload
    fn refresh_to_newest(&mut self, store: &DocumentStore) {
        self.selected = None;
        self.refresh(store);
    }

    pub fn upload_with(&mut self, store: &DocumentStore, picker: &dyn FilePicker) {
        match picker.pick_pdf() {
            Some(path) => self.upload_path(store, &path),
            None => self.info_line = "No file selected.".to_string(),
        }
    }

    pub fn upload_path(&mut self, store: &DocumentStore, path: &Path) {
        match upload_pdf(store, path) {
            Ok(outcome) => {
                let message = outcome.message();
                info!("{}", message);
                self.info_line = message.clone();
                self.push(LogEvent::upload(message));
                self.refresh_to_newest(store);
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.info_line = format!("Upload failed: {}", e);
                self.push(LogEvent::error(e.to_string()));
            }
        }
    }

    /// Append the first characters of the selected document to the log
    pub fn load_selected(&mut self, store: &DocumentStore, settings: &GuiSettings) {
        let Some(name) = self.selected.clone() else {
            self.push(LogEvent::warning(NO_SELECTION));
            return;
        };

        match store.fetch(&name) {
            Ok(Some(content)) => {
                let preview = truncate_chars(&content, settings.load_preview_chars);
                self.push(
                    LogEvent::load(format!("Loaded {}", name))
                        .with_content(format!("--- {} ---\n{}\n...", name, preview)),
                );
            }
            Ok(None) => {
                self.push(LogEvent::error(format!("No content found in {}.", name)));
                self.refresh(store);
            }
            Err(e) => self.push(LogEvent::error(e.to_string())),
        }
    }

    /// Ask for confirmation before deleting the selection
    pub fn request_delete(&mut self) {
        match self.selected.clone() {
            Some(name) => self.pending_delete = Some(name),
            None => self.push(LogEvent::warning(NO_SELECTION)),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self, store: &DocumentStore) {
        let Some(name) = self.pending_delete.take() else {
            return;
        };
        match store.delete(&name) {
            Ok(DeleteOutcome::Deleted) => self.push(LogEvent::delete(format!("Removed {}", name))),
            Ok(DeleteOutcome::NotFound) => {
                self.push(LogEvent::db(format!("{} was already removed", name)))
            }
            Err(e) => self.push(LogEvent::error(e.to_string())),
        }
        self.refresh(store);
    }

    pub fn search(&mut self, store: &DocumentStore, settings: &GuiSettings) {
        let keyword = self.search_query.trim().to_string();
        if keyword.is_empty() {
            return;
        }
        let Some(name) = self.selected.clone() else {
            self.push(LogEvent::warning(NO_SELECTION));
            return;
        };

        match store.search(&name, &keyword, settings.search_limit) {
            Ok(outcome) => self.push(
                LogEvent::search(format!("'{}' in {}", keyword, name))
                    .with_content(outcome.describe(&name, &keyword)),
            ),
            Err(e) => self.push(LogEvent::error(e.to_string())),
        }
    }

    pub fn push(&mut self, event: LogEvent) {
        self.logs.push(event);
    }
}
