//! GUI module for Mesmerizer
//!
//! One window: upload button, dropdown of stored PDFs, load / delete /
//! search, and an append-only log pane. The pulse circle and waveform bar
//! animate while the voice assistant is listening for a command.

pub mod animations;
pub mod app;
pub mod library_panel;
pub mod runner;
pub mod theme;

pub use app::{MesmerizerApp, WINDOW_TITLE};
pub use library_panel::LibraryPanel;
pub use runner::run_gui;
