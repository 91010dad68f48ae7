//! Main application window

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use eframe::egui::{self, RichText, Stroke, Vec2};

use super::animations::{animated_button, listening_pulse, waveform_bar};
use super::library_panel::LibraryPanel;
use super::theme::{
    ACCENT_CYAN, ACCENT_GREEN, ACCENT_RED, ACCENT_VIOLET, ACCENT_YELLOW, BG_HIGHLIGHT, BG_PRIMARY,
    BG_SECONDARY, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::assistant::{AppEvent, ListeningSignal};
use crate::config::GuiSettings;
use crate::domain::{LogEvent, LogEventKind};
use crate::library::{DocumentStore, FilePicker};

pub const WINDOW_TITLE: &str = "Mesmerizer - PDF Voice Assistant";
const TAGLINE: &str = "Upload once. Retrieve anytime. Talk to your PDFs.";

pub struct MesmerizerApp {
    store: DocumentStore,
    picker: Arc<dyn FilePicker>,
    signal: ListeningSignal,
    events: Receiver<AppEvent>,
    settings: GuiSettings,
    panel: LibraryPanel,
}

impl MesmerizerApp {
    pub fn new(
        store: DocumentStore,
        picker: Arc<dyn FilePicker>,
        signal: ListeningSignal,
        events: Receiver<AppEvent>,
        settings: GuiSettings,
    ) -> Self {
        let mut panel = LibraryPanel::new();
        panel.refresh(&store);
        panel.push(LogEvent::db(format!(
            "{} PDF(s) in the library",
            panel.names.len()
        )));
        Self {
            store,
            picker,
            signal,
            events,
            settings,
            panel,
        }
    }

    /// Apply the dark theme to the egui context.
    pub(crate) fn apply_theme(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        style.visuals.dark_mode = true;
        style.visuals.panel_fill = BG_PRIMARY;
        style.visuals.window_fill = BG_PRIMARY;
        style.visuals.extreme_bg_color = BG_SECONDARY;
        style.visuals.widgets.noninteractive.bg_fill = BG_SECONDARY;
        style.visuals.widgets.inactive.bg_fill = BG_SECONDARY;
        style.visuals.widgets.hovered.bg_fill = BG_HIGHLIGHT;
        style.visuals.widgets.active.bg_fill = BG_HIGHLIGHT;
        style.visuals.selection.bg_fill = BG_HIGHLIGHT;
        style.visuals.selection.stroke = Stroke::new(1.0, ACCENT_VIOLET);
        ctx.set_style(style);
    }

    /// Drain messages from the assistant thread
    fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AppEvent::Log(log) => self.panel.push(log),
                AppEvent::LibraryChanged => self.panel.refresh(&self.store),
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new("Mesmerizer")
                    .size(28.0)
                    .strong()
                    .color(TEXT_PRIMARY),
            );
            ui.label(RichText::new(TAGLINE).color(TEXT_DIM));
            ui.add_space(8.0);

            let active = self.signal.is_active();
            listening_pulse(ui, ACCENT_VIOLET, 72.0, active);
            let status = if active { "Listening..." } else { "Idle" };
            ui.label(RichText::new(status).small().color(TEXT_MUTED));
        });
        waveform_bar(ui, ACCENT_VIOLET, 28.0, self.signal.is_active());
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if animated_button(ui, "Upload PDF", ACCENT_GREEN, "upload_btn").clicked() {
                self.panel.upload_with(&self.store, self.picker.as_ref());
            }
            ui.label(RichText::new(&self.panel.info_line).color(TEXT_DIM));
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let selected_text = self
                .panel
                .selected
                .clone()
                .unwrap_or_else(|| "No PDFs yet".to_string());
            egui::ComboBox::from_id_salt("pdf_selector")
                .width(320.0)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for name in &self.panel.names {
                        ui.selectable_value(&mut self.panel.selected, Some(name.clone()), name);
                    }
                });

            if animated_button(ui, "Load", ACCENT_CYAN, "load_btn").clicked() {
                self.panel.load_selected(&self.store, &self.settings);
            }
            if animated_button(ui, "Delete", ACCENT_RED, "delete_btn").clicked() {
                self.panel.request_delete();
            }
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.panel.search_query)
                    .hint_text("Search the selected PDF")
                    .desired_width(320.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if animated_button(ui, "Search", ACCENT_YELLOW, "search_btn").clicked() || submitted {
                self.panel.search(&self.store, &self.settings);
            }
        });
    }

    fn render_log(&self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .fill(BG_SECONDARY)
            .corner_radius(4.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for event in &self.panel.logs {
                            ui.label(
                                RichText::new(format!(
                                    "{} {}",
                                    event.timestamp.format("%H:%M:%S"),
                                    event.display_line()
                                ))
                                .monospace()
                                .color(kind_color(event.kind)),
                            );
                            if let Some(content) = &event.content {
                                ui.label(RichText::new(content).monospace().color(TEXT_DIM));
                            }
                        }
                    });
            });
    }

    fn render_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(name) = self.panel.pending_delete.clone() else {
            return;
        };

        egui::Window::new("Delete")
            .collapsible(false)
            .resizable(false)
            .fixed_size(Vec2::new(320.0, 110.0))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new(self.settings.delete_prompt(&name)).color(TEXT_PRIMARY));
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if animated_button(ui, "Cancel", TEXT_DIM, "confirm_cancel_btn").clicked() {
                        self.panel.cancel_delete();
                    }
                    ui.add_space(8.0);
                    if animated_button(ui, "Delete", ACCENT_RED, "confirm_delete_btn").clicked() {
                        self.panel.confirm_delete(&self.store);
                    }
                });
            });
    }
}

fn kind_color(kind: LogEventKind) -> egui::Color32 {
    match kind {
        LogEventKind::Error => ACCENT_RED,
        LogEventKind::Upload => ACCENT_GREEN,
        LogEventKind::Delete | LogEventKind::Warning => ACCENT_YELLOW,
        LogEventKind::Voice => ACCENT_VIOLET,
        LogEventKind::Load | LogEventKind::Search => ACCENT_CYAN,
        LogEventKind::Db | LogEventKind::System => TEXT_MUTED,
    }
}

impl eframe::App for MesmerizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });
        egui::TopBottomPanel::top("controls")
            .frame(egui::Frame::NONE.fill(BG_PRIMARY).inner_margin(10.0))
            .show(ctx, |ui| {
                self.render_controls(ui);
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_log(ui);
        });

        self.render_delete_confirmation(ctx);

        // Assistant messages arrive without input events
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
