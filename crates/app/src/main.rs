use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::WinitSettings;

use simulation::config::DrivingConfig;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "CURVEWAY_CONFIG";

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Curveway".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings::game());

    // Inserted before SimulationPlugin so its init_resource keeps this value.
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        app.insert_resource(DrivingConfig::load_or_default(path));
    }

    app.add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}
