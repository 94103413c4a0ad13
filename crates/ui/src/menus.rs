//! Start screen and pause menu.
//!
//! Both only send requests to the session layer: a [`NewGameEvent`] to start
//! or restart, or a `NextState` to resume.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::app_state::{AppState, NewGameEvent};
use simulation::hud::HudSnapshot;

use crate::theme;

const BUTTON_SIZE: egui::Vec2 = egui::Vec2::new(200.0, 36.0);

fn dim_screen(ctx: &egui::Context, id: &str) {
    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new(id))
        .fixed_pos(screen.min)
        .order(egui::Order::Background)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, egui::CornerRadius::ZERO, egui::Color32::from_black_alpha(140));
            ui.allocate_rect(screen, egui::Sense::hover());
        });
}

pub fn start_menu_ui(
    mut contexts: EguiContexts,
    mut new_game: EventWriter<NewGameEvent>,
    #[cfg(not(target_arch = "wasm32"))] mut exit: EventWriter<AppExit>,
) {
    let ctx = contexts.ctx_mut();
    dim_screen(ctx, "start_overlay");

    egui::Window::new("Curveway")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.spacing_mut().item_spacing.y = 10.0;
                ui.add_space(8.0);
                ui.label(egui::RichText::new("CURVEWAY").size(36.0).color(theme::ACCENT).strong());
                ui.label("W / Up to accelerate, S / Down to brake");
                ui.label("A D or arrows to steer, turn at crossroads");
                ui.label("Esc or P to pause");
                ui.add_space(8.0);

                if ui.add_sized(BUTTON_SIZE, egui::Button::new("Start Driving")).clicked() {
                    new_game.send(NewGameEvent);
                }

                #[cfg(not(target_arch = "wasm32"))]
                {
                    if ui.add_sized(BUTTON_SIZE, egui::Button::new("Quit")).clicked() {
                        exit.send(AppExit::Success);
                    }
                }
                ui.add_space(8.0);
            });
        });
}

pub fn pause_menu_ui(
    mut contexts: EguiContexts,
    hud: Res<HudSnapshot>,
    mut next_state: ResMut<NextState<AppState>>,
    mut new_game: EventWriter<NewGameEvent>,
    #[cfg(not(target_arch = "wasm32"))] mut exit: EventWriter<AppExit>,
) {
    let ctx = contexts.ctx_mut();
    dim_screen(ctx, "pause_overlay");

    egui::Window::new("Paused")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.spacing_mut().item_spacing.y = 10.0;
                ui.add_space(8.0);
                ui.heading("Paused");
                ui.label(format!("Score {}  |  {} m", hud.score, hud.distance_display));
                ui.add_space(8.0);

                if ui.add_sized(BUTTON_SIZE, egui::Button::new("Resume")).clicked() {
                    next_state.set(AppState::Playing);
                }
                if ui.add_sized(BUTTON_SIZE, egui::Button::new("Restart")).clicked() {
                    new_game.send(NewGameEvent);
                }

                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.separator();
                    if ui.add_sized(BUTTON_SIZE, egui::Button::new("Quit")).clicked() {
                        exit.send(AppExit::Success);
                    }
                }
                ui.add_space(8.0);
            });
        });
}
