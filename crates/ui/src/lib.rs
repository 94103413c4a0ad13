use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::app_state::AppState;

pub mod hud;
pub mod menus;
pub mod theme;

mod plugin_registration;

/// HUD and menus, drawn with egui on top of the 3D view.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_dashboard_theme);

        plugin_registration::register_ui_systems(app);
    }
}

/// The dashboard stays on screen while the world is visible.
fn world_visible(state: Res<State<AppState>>) -> bool {
    matches!(state.get(), AppState::Playing | AppState::Paused)
}
