use bevy::prelude::*;

use crate::*;

/// Register all driving feature plugins.
///
/// Each plugin is registered on its own line; ordering between them comes
/// from [`DriveSet`], not from registration order.
pub(crate) fn register_feature_plugins(app: &mut App) {
    // Session and frame plumbing
    app.add_plugins(app_state::SessionPlugin);
    app.add_plugins(clock::ClockPlugin);
    app.add_plugins(input::DriverInputPlugin);
    app.add_plugins(audio_cues::AudioCuesPlugin);

    // Player
    app.add_plugins(player::PlayerPlugin);

    // World
    app.add_plugins(streaming::StreamingPlugin);
    app.add_plugins(traffic_light::TrafficLightPlugin);
    app.add_plugins(pedestrian::PedestrianPlugin);
    app.add_plugins(vehicle::VehiclePlugin);

    // Scoring and presentation
    app.add_plugins(collision::CollisionPlugin);
    app.add_plugins(hud::HudPlugin);
}
