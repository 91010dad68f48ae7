//! Speak / listen facade used by the dispatcher.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::capture::CommandRecognizer;
use super::speech::Speaker;
use super::types::CaptureError;

pub const UNINTELLIGIBLE_REPLY: &str = "Sorry, I couldn't understand that.";
pub const NETWORK_REPLY: &str = "Network error occurred.";

#[derive(Clone)]
pub struct VoiceIo {
    speaker: Arc<dyn Speaker>,
    recognizer: Arc<dyn CommandRecognizer>,
}

impl VoiceIo {
    pub fn new(speaker: Arc<dyn Speaker>, recognizer: Arc<dyn CommandRecognizer>) -> Self {
        Self {
            speaker,
            recognizer,
        }
    }

    /// Blocks until playback ends; engine failures are logged, never returned
    pub fn speak(&self, text: &str) {
        info!("Assistant: {}", text);
        self.speaker.speak(text);
    }

    /// One bounded capture. Every failure collapses to `None` after being
    /// logged; unintelligible audio and network failures are also announced.
    pub fn listen_command(&self, timeout: Duration) -> Option<String> {
        match self.recognizer.capture(timeout) {
            Ok(text) => {
                info!("You said: {}", text);
                Some(text)
            }
            Err(CaptureError::Timeout) => {
                info!("Listening timed out");
                None
            }
            Err(CaptureError::Unintelligible) => {
                info!("Could not understand audio");
                self.speak(UNINTELLIGIBLE_REPLY);
                None
            }
            Err(CaptureError::Network(e)) => {
                warn!("Speech service request failed: {}", e);
                self.speak(NETWORK_REPLY);
                None
            }
            Err(e @ (CaptureError::Decoder(_) | CaptureError::Device(_))) => {
                warn!("Capture failed: {}", e);
                None
            }
        }
    }
}
