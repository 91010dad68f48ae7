use chrono::{DateTime, Local};

/// The kind of line shown in the log pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEventKind {
    /// Store bookkeeping (duplicates, refreshes)
    Db,
    /// A document was stored
    Upload,
    /// A document was removed
    Delete,
    /// A document preview was loaded
    Load,
    /// Something heard or said by the voice assistant
    Voice,
    /// Search results
    Search,
    /// A request that could not be carried out as asked
    Warning,
    /// Something failed; the app keeps running
    Error,
    /// Startup, configuration and other housekeeping
    System,
}

impl std::fmt::Display for LogEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEventKind::Db => write!(f, "DB"),
            LogEventKind::Upload => write!(f, "UPLOAD"),
            LogEventKind::Delete => write!(f, "DELETE"),
            LogEventKind::Load => write!(f, "LOAD"),
            LogEventKind::Voice => write!(f, "VOICE"),
            LogEventKind::Search => write!(f, "SEARCH"),
            LogEventKind::Warning => write!(f, "WARN"),
            LogEventKind::Error => write!(f, "ERROR"),
            LogEventKind::System => write!(f, "SYSTEM"),
        }
    }
}

/// A single line of the append-only log pane
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// When this event occurred
    pub timestamp: DateTime<Local>,

    /// The kind of event
    pub kind: LogEventKind,

    /// Short summary (e.g., "Stored report.pdf")
    pub summary: String,

    /// Multi-line body shown below the summary (document previews, search hits)
    pub content: Option<String>,
}

impl LogEvent {
    /// Create a new log event
    pub fn new(kind: LogEventKind, summary: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
            summary: summary.into(),
            content: None,
        }
    }

    pub fn db(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Db, summary)
    }

    pub fn upload(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Upload, summary)
    }

    pub fn delete(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Delete, summary)
    }

    pub fn load(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Load, summary)
    }

    pub fn voice(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Voice, summary)
    }

    pub fn search(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Search, summary)
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Warning, summary)
    }

    pub fn error(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Error, summary)
    }

    pub fn system(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::System, summary)
    }

    /// Add content to the event
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Render as the tagged line shown in the log pane, e.g. `[UPLOAD] Stored a.pdf`
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.kind, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_line_uses_kind_tag() {
        assert_eq!(
            LogEvent::upload("Stored a.pdf").display_line(),
            "[UPLOAD] Stored a.pdf"
        );
        assert_eq!(LogEvent::db("x").display_line(), "[DB] x");
    }

    #[test]
    fn test_with_content() {
        let event = LogEvent::load("a.pdf").with_content("body");
        assert_eq!(event.content.as_deref(), Some("body"));
        assert_eq!(event.kind, LogEventKind::Load);
    }
}
