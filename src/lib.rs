//! Mesmerizer - PDF voice assistant
//!
//! Upload PDFs once, keep their text in a local SQLite library and get it
//! back through a desktop window or by voice: say the wake phrase, then
//! "upload", "read" or anything else.
//!
//! ## Layout
//!
//! - `library`: document store, PDF extraction, upload flow, file picker
//! - `voice`: microphone, speech-to-text, text-to-speech, wake word gate
//! - `assistant`: the command loop driven by the wake word
//! - `gui`: the egui window
//! - `config`: `~/.mesmerizer/config.toml` and the wake phrase file

pub mod assistant;
pub mod config;
pub mod domain;
pub mod gui;
pub mod library;
pub mod voice;

pub use domain::*;
