//! GUI Theme: "Night Reader" - dark panels with a violet listening glow
//!
//! Color constants for the Mesmerizer window.

use eframe::egui::Color32;

// ═══════════════════════════════════════════════════════════════════════════
// BACKGROUNDS
// ═══════════════════════════════════════════════════════════════════════════

/// Background: deep slate
pub const BG_PRIMARY: Color32 = Color32::from_rgb(18, 20, 26);
/// Secondary background for panels and the log pane
pub const BG_SECONDARY: Color32 = Color32::from_rgb(26, 29, 38);
/// Hovered / active widgets
pub const BG_HIGHLIGHT: Color32 = Color32::from_rgb(38, 44, 60);

// ═══════════════════════════════════════════════════════════════════════════
// TEXT COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 230, 240);
pub const TEXT_DIM: Color32 = Color32::from_rgb(160, 165, 185);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 105, 125);

// ═══════════════════════════════════════════════════════════════════════════
// ACCENT COLORS
// ═══════════════════════════════════════════════════════════════════════════

/// Listening pulse and waveform
pub const ACCENT_VIOLET: Color32 = Color32::from_rgb(160, 110, 255);
pub const ACCENT_CYAN: Color32 = Color32::from_rgb(0, 210, 200);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(80, 220, 120);
pub const ACCENT_RED: Color32 = Color32::from_rgb(255, 90, 90);
pub const ACCENT_YELLOW: Color32 = Color32::from_rgb(255, 200, 60);
