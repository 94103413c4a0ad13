use bevy::prelude::*;

use simulation::app_state::AppState;

use crate::*;

/// Register all UI systems.
pub(crate) fn register_ui_systems(app: &mut App) {
    app.add_systems(
        Update,
        (hud::score_panel_ui, hud::speedometer_ui, hud::flash_overlay_ui)
            .run_if(world_visible)
            .after(simulation::DriveSet::Publish),
    );

    app.add_systems(Update, menus::start_menu_ui.run_if(in_state(AppState::MainMenu)));
    app.add_systems(Update, menus::pause_menu_ui.run_if(in_state(AppState::Paused)));
}
