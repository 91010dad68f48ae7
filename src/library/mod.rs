//! PDF library: storage, text extraction and the upload flow
//!
//! Both the GUI and the voice assistant reach the persisted documents only
//! through [`DocumentStore`]. The upload flow is shared between the "Upload
//! PDF" button and the spoken "upload" command.

mod db;
mod extract;
pub mod picker;
mod upload;

pub use db::{DEFAULT_SEARCH_LIMIT, DocumentStore};
pub use extract::extract_pdf_text;
pub use picker::{FilePicker, NativePdfPicker};
pub use upload::{UploadOutcome, upload_pdf};

/// Errors from the document store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the upload flow (extraction or persistence)
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Only PDF files can be uploaded: {0}")]
    UnsupportedFile(String),

    #[error("Failed to read PDF '{name}': {reason}")]
    Extraction { name: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
