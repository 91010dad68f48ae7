//! Voice error types.

/// Why a capture (or the transcription of one segment) produced no text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// Nobody started speaking within the timeout
    #[error("No speech detected before the timeout")]
    Timeout,

    /// Speech was recorded but the decoder could not make words of it
    #[error("Speech was not intelligible")]
    Unintelligible,

    /// The remote decoder could not be reached
    #[error("Speech service unreachable: {0}")]
    Network(String),

    /// The decoder ran but failed
    #[error("Speech decoder failed: {0}")]
    Decoder(String),

    /// The microphone could not be opened or read
    #[error("Microphone unavailable: {0}")]
    Device(String),
}

/// Errors from the microphone stream
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Failed to start recording: {0}")]
    Spawn(std::io::Error),

    #[error("Failed to read audio: {0}")]
    Read(#[from] std::io::Error),
}

impl From<AudioError> for CaptureError {
    fn from(e: AudioError) -> Self {
        CaptureError::Device(e.to_string())
    }
}
