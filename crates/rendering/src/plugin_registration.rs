use bevy::prelude::*;

use simulation::DriveSet;

use crate::*;

/// Register all rendering plugins and systems.
///
/// Presentation runs after [`DriveSet::Publish`] so it always sees the
/// frame the simulation just finished.
pub(crate) fn register_rendering_systems(app: &mut App) {
    app.add_systems(
        Startup,
        (
            camera::setup_camera,
            super::setup_lighting,
            ground::spawn_ground,
            visuals::setup_visual_library,
        ),
    );

    app.add_systems(
        Update,
        (
            visuals::attach_visuals,
            visuals::sync_pose_transforms,
            visuals::swap_lamp_materials,
            camera::follow_player,
            ground::follow_ground,
        )
            .chain()
            .after(DriveSet::Publish),
    );

    app.add_plugins(audio_playback::AudioPlaybackPlugin);
}
