use bevy::prelude::*;

pub mod audio_playback;
pub mod camera;
pub mod ground;
pub mod visuals;

mod plugin_registration;

/// Everything the player sees: chase camera, sky, ground, and a primitive
/// model for every simulated entity. Reads simulation state only.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(camera::SKY))
            .insert_resource(AmbientLight {
                color: Color::srgb(0.85, 0.9, 1.0),
                brightness: 400.0,
            });

        plugin_registration::register_rendering_systems(app);
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.96, 0.9),
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));
}
