//! In-game dashboard: score panel, speedometer dial and the screen flash.
//!
//! Everything here reads the published [`HudSnapshot`] and [`ScreenFlash`];
//! nothing writes back into the simulation.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::hud::{ArcBand, HudSnapshot, NEEDLE_MAX_DEG, NEEDLE_MIN_DEG};
use simulation::score::{FlashTint, ScreenFlash};

use crate::theme;

const DIAL_RADIUS: f32 = 70.0;
const ARC_STEPS: usize = 48;

pub fn band_color(band: ArcBand) -> egui::Color32 {
    match band {
        ArcBand::Cruise => egui::Color32::from_rgb(80, 200, 120),
        ArcBand::Fast => egui::Color32::from_rgb(250, 190, 50),
        ArcBand::Redline => egui::Color32::from_rgb(235, 60, 50),
    }
}

pub fn flash_color(tint: FlashTint, alpha: f32) -> egui::Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 110.0) as u8;
    match tint {
        FlashTint::Impact => egui::Color32::from_rgba_unmultiplied(255, 30, 30, a),
        FlashTint::Violation => egui::Color32::from_rgba_unmultiplied(255, 140, 0, a),
    }
}

/// Screen-space point on the dial at `deg` (0 is straight up, clockwise).
fn dial_point(center: egui::Pos2, radius: f32, deg: f32) -> egui::Pos2 {
    let rad = deg.to_radians() - FRAC_PI_2;
    center + egui::vec2(rad.cos(), rad.sin()) * radius
}

fn arc_points(center: egui::Pos2, radius: f32, from_deg: f32, to_deg: f32) -> Vec<egui::Pos2> {
    (0..=ARC_STEPS)
        .map(|i| {
            let t = i as f32 / ARC_STEPS as f32;
            dial_point(center, radius, from_deg + (to_deg - from_deg) * t)
        })
        .collect()
}

pub fn score_panel_ui(mut contexts: EguiContexts, hud: Res<HudSnapshot>) {
    let ctx = contexts.ctx_mut();
    egui::Window::new("score_panel")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("Score {}", hud.score))
                    .size(26.0)
                    .color(theme::ACCENT)
                    .strong(),
            );
            ui.label(format!("Distance {} m", hud.distance_display));
            ui.separator();
            egui::Grid::new("counters").num_columns(2).show(ui, |ui| {
                ui.label("Overtakes");
                ui.label(hud.vehicles_overtaken.to_string());
                ui.end_row();
                ui.label("Near misses");
                ui.label(hud.near_misses.to_string());
                ui.end_row();
                ui.label("Pedestrians avoided");
                ui.label(hud.pedestrians_avoided.to_string());
                ui.end_row();
                ui.label("Red lights run");
                ui.label(hud.ran_red_lights.to_string());
                ui.end_row();
            });
            if hud.on_side_road {
                ui.colored_label(theme::ACCENT, "Side road");
            }
        });
}

pub fn speedometer_ui(mut contexts: EguiContexts, hud: Res<HudSnapshot>) {
    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("speedometer"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
        .show(ctx, |ui| {
            let size = egui::vec2(DIAL_RADIUS * 2.4, DIAL_RADIUS * 2.2);
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            let painter = ui.painter_at(rect);
            let center = rect.center() + egui::vec2(0.0, DIAL_RADIUS * 0.1);

            painter.circle_filled(center, DIAL_RADIUS * 1.1, theme::PANEL);
            painter.add(egui::Shape::line(
                arc_points(center, DIAL_RADIUS, NEEDLE_MIN_DEG, NEEDLE_MAX_DEG),
                egui::Stroke::new(8.0, egui::Color32::from_gray(60)),
            ));
            if hud.arc_fraction > 0.0 {
                let end = NEEDLE_MIN_DEG + (NEEDLE_MAX_DEG - NEEDLE_MIN_DEG) * hud.arc_fraction;
                painter.add(egui::Shape::line(
                    arc_points(center, DIAL_RADIUS, NEEDLE_MIN_DEG, end),
                    egui::Stroke::new(8.0, band_color(hud.arc_band)),
                ));
            }

            painter.line_segment(
                [center, dial_point(center, DIAL_RADIUS * 0.85, hud.needle_deg)],
                egui::Stroke::new(3.0, egui::Color32::from_rgb(255, 70, 50)),
            );
            painter.circle_filled(center, 5.0, theme::TEXT);
            painter.text(
                center + egui::vec2(0.0, DIAL_RADIUS * 0.45),
                egui::Align2::CENTER_CENTER,
                hud.speed_display.to_string(),
                egui::FontId::proportional(24.0),
                theme::TEXT,
            );
            painter.text(
                center + egui::vec2(0.0, DIAL_RADIUS * 0.7),
                egui::Align2::CENTER_CENTER,
                "km/h",
                egui::FontId::proportional(12.0),
                theme::TEXT,
            );
        });
}

pub fn flash_overlay_ui(mut contexts: EguiContexts, flash: Res<ScreenFlash>) {
    let Some(tint) = flash.tint else {
        return;
    };
    let alpha = flash.alpha();
    if alpha <= 0.0 {
        return;
    }
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("screen_flash"),
    ))
    .rect_filled(screen, egui::CornerRadius::ZERO, flash_color(tint, alpha));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dial_zero_points_up() {
        let center = egui::pos2(100.0, 100.0);
        let top = dial_point(center, 10.0, 0.0);
        assert!((top.x - 100.0).abs() < 1e-4);
        assert!((top.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_dial_sweep_is_symmetric() {
        let center = egui::pos2(0.0, 0.0);
        let low = dial_point(center, 10.0, NEEDLE_MIN_DEG);
        let high = dial_point(center, 10.0, NEEDLE_MAX_DEG);
        assert!((low.x + high.x).abs() < 1e-4);
        assert!((low.y - high.y).abs() < 1e-4);
        assert!(low.y > 0.0, "dial ends sit below the centre");
    }

    #[test]
    fn test_flash_fades_with_alpha() {
        let bright = flash_color(FlashTint::Impact, 1.0);
        let faint = flash_color(FlashTint::Impact, 0.2);
        assert!(bright.a() > faint.a());
        assert_eq!(flash_color(FlashTint::Violation, 0.0).a(), 0);
    }

    #[test]
    fn test_arc_has_every_step() {
        let points = arc_points(egui::pos2(0.0, 0.0), 1.0, -135.0, 135.0);
        assert_eq!(points.len(), ARC_STEPS + 1);
    }
}
