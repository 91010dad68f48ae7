//! Listening indicators and button effects
//!
//! The pulse circle and the waveform bar only move while the listening
//! signal is on; otherwise they are drawn at rest.

use eframe::egui::{self, Color32, Id, Pos2, Rect, Response, RichText, Sense, Stroke, Ui, Vec2};

pub const PULSE_SPEED: f64 = 3.0;
pub const WAVE_SPEED: f64 = 6.0;
const WAVE_BARS: usize = 32;

/// Pulsing circle with expanding rings while listening
pub fn listening_pulse(ui: &mut Ui, color: Color32, size: f32, active: bool) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
    let center = rect.center();
    let base = size * 0.22;

    if !active {
        ui.painter().circle_filled(center, base, with_alpha(color, 90));
        return;
    }

    let time = ui.ctx().input(|i| i.time);
    let pulse = ((time * PULSE_SPEED).sin() * 0.5 + 0.5) as f32;

    // Two rings travelling outwards, half a cycle apart
    for offset in [0.0, 0.5] {
        let t = (((time * PULSE_SPEED / std::f64::consts::TAU) + offset) % 1.0) as f32;
        let radius = base + t * (size * 0.5 - base);
        let alpha = ((1.0 - t) * 120.0) as u8;
        ui.painter()
            .circle_stroke(center, radius, Stroke::new(2.0, with_alpha(color, alpha)));
    }

    ui.painter()
        .circle_filled(center, base * (1.6 + pulse * 0.4), with_alpha(color, (pulse * 80.0) as u8));
    ui.painter()
        .circle_filled(center, base, with_alpha(color, 150 + (pulse * 105.0) as u8));

    ui.ctx().request_repaint();
}

/// Bar heights in 0..=1 for a given animation time
pub fn wave_heights(time: f64, bars: usize) -> Vec<f32> {
    (0..bars)
        .map(|i| {
            let x = i as f64 * 0.55;
            let v = (time * WAVE_SPEED + x).sin() * 0.5
                + (time * WAVE_SPEED * 0.37 + x * 1.7).sin() * 0.3;
            (0.2 + (v.abs() as f32) * 0.8).clamp(0.05, 1.0)
        })
        .collect()
}

/// Horizontal waveform strip
pub fn waveform_bar(ui: &mut Ui, color: Color32, height: f32, active: bool) {
    let desired_size = Vec2::new(ui.available_width(), height);
    let (rect, _response) = ui.allocate_exact_size(desired_size, Sense::hover());
    let mid = rect.center().y;

    if !active {
        ui.painter().line_segment(
            [Pos2::new(rect.min.x, mid), Pos2::new(rect.max.x, mid)],
            Stroke::new(1.0, with_alpha(color, 70)),
        );
        return;
    }

    let time = ui.ctx().input(|i| i.time);
    let slot = rect.width() / WAVE_BARS as f32;
    for (i, h) in wave_heights(time, WAVE_BARS).into_iter().enumerate() {
        let bar_height = h * rect.height();
        let x = rect.min.x + slot * (i as f32 + 0.5);
        let bar = Rect::from_center_size(Pos2::new(x, mid), Vec2::new(slot * 0.6, bar_height));
        ui.painter().rect_filled(bar, 2.0, with_alpha(color, 120 + (h * 135.0) as u8));
    }

    ui.ctx().request_repaint();
}

/// Animated button with hover glow effect
pub fn animated_button(
    ui: &mut Ui,
    text: impl Into<RichText>,
    base_color: Color32,
    id_salt: impl std::hash::Hash,
) -> Response {
    let text = text.into();
    let id = Id::new(id_salt);

    let was_hovered = ui
        .ctx()
        .memory(|mem| mem.data.get_temp::<bool>(id).unwrap_or(false));
    let hover_anim = ui
        .ctx()
        .animate_bool_with_time(id.with("anim"), was_hovered, 0.15);

    let button = egui::Button::new(text.color(base_color))
        .fill(with_alpha(base_color, (hover_anim * 40.0) as u8))
        .stroke(Stroke::new(
            1.0,
            with_alpha(base_color, (60.0 + hover_anim * 120.0) as u8),
        ));
    let response = ui.add(button);

    let is_hovered = response.hovered();
    ui.ctx().memory_mut(|mem| {
        mem.data.insert_temp(id, is_hovered);
    });

    if is_hovered != was_hovered || hover_anim > 0.01 && hover_anim < 0.99 {
        ui.ctx().request_repaint();
    }

    response
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
