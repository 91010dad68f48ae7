//! Upload flow shared by the GUI button and the voice command

use std::path::Path;

use tracing::info;

use super::{DocumentStore, LibraryError, extract_pdf_text};
use crate::domain::InsertOutcome;

/// What happened to an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored { filename: String, id: i64 },
    AlreadyExists { filename: String },
}

impl UploadOutcome {
    /// Sentence spoken back to the user / shown in the info line
    pub fn message(&self) -> String {
        match self {
            UploadOutcome::Stored { filename, .. } => {
                format!("'{}' uploaded and stored.", filename)
            }
            UploadOutcome::AlreadyExists { filename } => {
                format!("'{}' is already uploaded.", filename)
            }
        }
    }
}

/// Extract a PDF and store it under its base file name.
///
/// The existence check runs before extraction so an already-stored file is
/// never parsed again. The final insert repeats the check under the store
/// lock, so a concurrent upload of the same name still reports
/// `AlreadyExists` instead of failing.
pub fn upload_pdf(store: &DocumentStore, path: &Path) -> Result<UploadOutcome, LibraryError> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| LibraryError::UnsupportedFile(path.display().to_string()))?;

    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(LibraryError::UnsupportedFile(filename));
    }

    if store.contains(&filename)? {
        return Ok(UploadOutcome::AlreadyExists { filename });
    }

    let content = extract_pdf_text(path)?;

    match store.insert(&filename, &content)? {
        InsertOutcome::Inserted { id } => {
            info!("Stored {} ({} chars)", filename, content.chars().count());
            Ok(UploadOutcome::Stored { filename, id })
        }
        InsertOutcome::AlreadyExists => Ok(UploadOutcome::AlreadyExists { filename }),
    }
}
