//! # TestDrive: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` for running driving scenarios
//! without a window, renderer or keyboard. The harness starts a game, so the
//! first [`TestDrive::frame`] call runs one full drive frame.

mod assertions;
mod queries;
mod setup;
mod spawning;

pub use queries::WorldCensus;

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::app_state::NewGameEvent;
use crate::config::DrivingConfig;
use crate::SimulationPlugin;

/// Seed used by every harness constructor so scenarios are reproducible.
pub const TEST_SEED: u64 = 7;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to place the player and hand-spawn entities, then
/// call `frame()` to advance and query/assert on the resulting state.
pub struct TestDrive {
    app: App,
}

impl Default for TestDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDrive {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A **quiet** road: the ring of segments and the player, no streamed
    /// scenery, pedestrians, traffic or crossroads. Score moves only on events.
    pub fn new() -> Self {
        Self::with_config(DrivingConfig::default().quiet().event_scoring())
    }

    /// A fully streamed world with default tunables.
    pub fn streaming() -> Self {
        Self::with_config(DrivingConfig::default())
    }

    pub fn with_config(mut config: DrivingConfig) -> Self {
        if config.seed.is_none() {
            config.seed = Some(TEST_SEED);
        }

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        // Insert BEFORE SimulationPlugin so init_resource keeps it.
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);

        // Startup, then the new-game reset, then enter Playing.
        app.update();
        app.world_mut().send_event(NewGameEvent);
        app.update();
        app.world_mut().run_schedule(StateTransition);

        Self { app }
    }
}
