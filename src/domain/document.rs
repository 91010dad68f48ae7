/// A PDF whose extracted text lives in the document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Auto-assigned row id, stable for the lifetime of the record
    pub id: i64,
    /// Base name of the uploaded file; unique across the store
    pub filename: String,
    /// Full extracted text
    pub content: String,
}

/// Result of inserting a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { id: i64 },
    /// A record with the same filename exists; its content was left untouched
    AlreadyExists,
}

/// Result of deleting a document by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Result of a keyword search inside one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    DocumentNotFound,
    NoMatches,
    /// Matching lines in document order
    Matches(Vec<String>),
}

impl SearchOutcome {
    /// Human readable summary used by the log pane
    pub fn describe(&self, filename: &str, keyword: &str) -> String {
        match self {
            SearchOutcome::DocumentNotFound => format!("No content found in {}.", filename),
            SearchOutcome::NoMatches => {
                format!("No matches found for '{}' in {}.", keyword, filename)
            }
            SearchOutcome::Matches(lines) => lines.join("\n\n"),
        }
    }
}
