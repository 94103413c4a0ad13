use bevy::prelude::*;

pub mod app_state;
pub mod audio_cues;
pub mod clock;
pub mod collision;
pub mod config;
pub mod crossroad;
pub mod curve;
pub mod hud;
pub mod input;
pub mod pedestrian;
pub mod player;
pub mod road;
pub mod scenery;
pub mod score;
pub mod sim_rng;
pub mod simulation_sets;
pub mod streaming;
pub mod traffic_light;
pub mod vehicle;
pub mod visual;

mod plugin_registration;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::DriveSet;

use app_state::AppState;
use config::DrivingConfig;
use sim_rng::SimRng;

/// The driving core: every drive system, chained through [`DriveSet`] and
/// frozen outside [`AppState::Playing`].
///
/// Insert a [`DrivingConfig`] before adding the plugin to override defaults.
/// Nothing spawns until a [`app_state::NewGameEvent`] is sent.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrivingConfig>().init_resource::<SimRng>();

        app.configure_sets(
            Update,
            (
                DriveSet::Input,
                DriveSet::Player,
                DriveSet::Streaming,
                DriveSet::Behaviour,
                DriveSet::Collision,
                DriveSet::Publish,
            )
                .chain()
                .run_if(in_state(AppState::Playing)),
        );

        plugin_registration::register_feature_plugins(app);
    }
}
