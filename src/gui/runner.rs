//! GUI runner - opens the library, starts the voice assistant thread and
//! launches the window

use std::sync::Arc;
use std::sync::mpsc;

use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;

use super::app::{MesmerizerApp, WINDOW_TITLE};
use crate::assistant::{AppEvent, ListeningSignal, spawn_assistant};
use crate::config::Config;
use crate::library::{DocumentStore, NativePdfPicker};

/// Run the main GUI application
pub fn run_gui(config: Config) -> Result<()> {
    let db_path = config.database_path();
    let store = DocumentStore::open(&db_path)
        .with_context(|| format!("Failed to open document store at {}", db_path.display()))?;
    info!("Document store ready at {}", db_path.display());

    let (event_tx, event_rx): (mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) =
        mpsc::channel();
    let signal = ListeningSignal::new();

    if config.settings.assistant.enabled {
        // Runs until the process exits
        let _assistant = spawn_assistant(config.clone(), store.clone(), signal.clone(), event_tx)?;
    } else {
        info!("Voice assistant disabled in settings");
    }

    let [width, height] = config.settings.gui.window_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([width, height])
            .with_min_inner_size([600.0, 450.0])
            .with_decorations(true)
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    let app = MesmerizerApp::new(
        store,
        Arc::new(NativePdfPicker),
        signal.clone(),
        event_rx,
        config.settings.gui.clone(),
    );

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            MesmerizerApp::apply_theme(&cc.egui_ctx);
            let ctx = cc.egui_ctx.clone();
            signal.set_waker(move || ctx.request_repaint());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}
