//! Shared test utilities: scripted voice collaborators and PDF fixtures

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use mesmerizer::library::FilePicker;
use mesmerizer::voice::{CaptureError, CommandRecognizer, GateOutcome, Speaker, VoiceIo, WakeSource};

/// Write a one-page PDF with `text` drawn in Courier
pub fn write_pdf(path: &Path, text: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 18.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("Failed to encode content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("Failed to save test PDF");
}

/// Fires a fixed number of times, then closes
pub struct CountedWakes(pub usize);

impl WakeSource for CountedWakes {
    fn wait_for_wake(&mut self) -> GateOutcome {
        if self.0 == 0 {
            return GateOutcome::Closed;
        }
        self.0 -= 1;
        GateOutcome::Fired {
            utterance: "hey mesmerizer".to_string(),
        }
    }
}

/// Records everything said
#[derive(Default)]
pub struct RecordingSpeaker {
    lines: Mutex<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

/// Returns scripted captures in order, then times out
pub struct ScriptedCommands(Mutex<VecDeque<Result<String, CaptureError>>>);

impl ScriptedCommands {
    pub fn new(commands: &[&str]) -> Self {
        Self(Mutex::new(
            commands.iter().map(|c| Ok(c.to_string())).collect(),
        ))
    }

    pub fn from_results(results: Vec<Result<String, CaptureError>>) -> Self {
        Self(Mutex::new(results.into()))
    }
}

impl CommandRecognizer for ScriptedCommands {
    fn capture(&self, _timeout: Duration) -> Result<String, CaptureError> {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CaptureError::Timeout))
    }
}

/// Hands out queued paths; `None` once empty (user cancelled)
#[derive(Default)]
pub struct QueuedPicker(Mutex<VecDeque<PathBuf>>);

impl QueuedPicker {
    pub fn with(paths: Vec<PathBuf>) -> Self {
        Self(Mutex::new(paths.into()))
    }
}

impl FilePicker for QueuedPicker {
    fn pick_pdf(&self) -> Option<PathBuf> {
        self.0.lock().unwrap().pop_front()
    }
}

pub fn voice_io(commands: ScriptedCommands) -> (VoiceIo, Arc<RecordingSpeaker>) {
    let speaker = Arc::new(RecordingSpeaker::default());
    (VoiceIo::new(speaker.clone(), Arc::new(commands)), speaker)
}
