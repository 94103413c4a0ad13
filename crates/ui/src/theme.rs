use bevy_egui::{egui, EguiContexts};

pub const PANEL: egui::Color32 = egui::Color32::from_rgba_premultiplied(18, 20, 28, 210);
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(240, 240, 240);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(255, 200, 60);

/// Dashboard look: dark translucent panels, bright text, rounded corners.
pub fn apply_dashboard_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let inactive = egui::Color32::from_rgb(50, 55, 65);
    let hover = egui::Color32::from_rgb(80, 85, 100);
    let active = egui::Color32::from_rgb(220, 70, 60);

    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.active.weak_bg_fill = active;
    style.visuals.override_text_color = Some(TEXT);

    style.visuals.window_fill = PANEL;
    style.visuals.panel_fill = PANEL;
    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    for font in style.text_styles.values_mut() {
        font.size *= 1.15;
    }

    ctx.set_style(style);
}
