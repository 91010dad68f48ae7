//! Voice assistant: first-run setup, the command loop and the listening
//! indicator it drives.

mod dispatcher;
mod intent;
mod session;
mod signal;
mod startup;

pub use dispatcher::{
    AppEvent, CommandDispatcher, DispatchSettings, EMPTY_LIBRARY, LIBRARY_FAILED,
    LISTENING_PROMPT, NO_FILE_SELECTED, READ_TRUNCATED, UPLOAD_FAILED, UPLOAD_PROMPT,
};
pub use intent::Intent;
pub use session::spawn_assistant;
pub use signal::ListeningSignal;
pub use startup::{
    SETUP_PROMPT, SETUP_RETRY, SETUP_RETRY_DELAY, greeting, resolve_wake_phrase,
};
