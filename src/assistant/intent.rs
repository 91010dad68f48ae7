//! Keyword classification of a spoken command.

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Pick a PDF and store it
    Upload,
    /// Read the newest stored document aloud
    ReadLatest,
    /// Anything else is repeated back
    Echo(String),
}

const UPLOAD_KEYWORDS: &[&str] = &["upload"];
const READ_KEYWORDS: &[&str] = &["read", "access", "open"];

impl Intent {
    /// Substring match with fixed priority: upload, then read/access/open,
    /// then echo. Matching is on substrings, so "already" counts as "read".
    pub fn classify(command: &str) -> Self {
        let lower = command.to_lowercase();
        let has_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if has_any(UPLOAD_KEYWORDS) {
            Intent::Upload
        } else if has_any(READ_KEYWORDS) {
            Intent::ReadLatest
        } else {
            Intent::Echo(command.to_string())
        }
    }
}
