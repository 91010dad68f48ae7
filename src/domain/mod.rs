//! Core domain types for Mesmerizer

mod document;
mod log_event;
mod text;

pub use document::{DeleteOutcome, InsertOutcome, SearchOutcome, StoredDocument};
pub use log_event::{LogEvent, LogEventKind};
pub use text::truncate_chars;
