//! Top-level session flow: menu, driving, paused, and the new-game reset.
//!
//! Drive systems are gated behind `in_state(AppState::Playing)`, so the world
//! is frozen in both `MainMenu` and `Paused`. Sending [`NewGameEvent`] from
//! any state tears down every streamed entity, resets all session resources
//! and enters `Playing`.

use bevy::prelude::*;

use crate::audio_cues::{AudioCue, PlayCueEvent};
use crate::clock::SimClock;
use crate::config::{DrivingConfig, PLAYER_START_Z};
use crate::crossroad::{Crossroad, SideRoadStub};
use crate::input::{DriveAction, DriveBindings, DriverInput};
use crate::pedestrian::Pedestrian;
use crate::player::{Player, PlayerCar};
use crate::road::{spawn_road_ring, RoadSegment};
use crate::scenery::{spawn_scenery_batch, Scenery};
use crate::score::{ScreenFlash, Scoreboard};
use crate::sim_rng::{random_seed, SimRng};
use crate::streaming::{SpawnCursors, PREROLLED_SCENERY_BATCHES, SCENERY_CURSOR_START};
use crate::traffic_light::TrafficLight;
use crate::vehicle::Vehicle;
use crate::visual::{Visual, VisualKind};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Start screen; nothing simulates.
    #[default]
    MainMenu,
    Playing,
    /// World visible but frozen.
    Paused,
}

/// Start (or restart) a session.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NewGameEvent;

type SessionEntityFilter = Or<(
    With<RoadSegment>,
    With<Scenery>,
    With<Pedestrian>,
    With<Vehicle>,
    With<Crossroad>,
    With<TrafficLight>,
    With<SideRoadStub>,
    With<PlayerCar>,
)>;

#[allow(clippy::too_many_arguments)]
pub(crate) fn start_new_game(
    mut events: EventReader<NewGameEvent>,
    mut commands: Commands,
    config: Res<DrivingConfig>,
    session_entities: Query<Entity, SessionEntityFilter>,
    mut player: ResMut<Player>,
    mut scoreboard: ResMut<Scoreboard>,
    mut cursors: ResMut<SpawnCursors>,
    mut rng: ResMut<SimRng>,
    mut clock: ResMut<SimClock>,
    mut input: ResMut<DriverInput>,
    mut flash: ResMut<ScreenFlash>,
    mut next_state: ResMut<NextState<AppState>>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    if events.read().count() == 0 {
        return;
    }

    for entity in &session_entities {
        commands.entity(entity).despawn_recursive();
    }

    let seed = config.seed.unwrap_or_else(random_seed);
    rng.reseed(seed);
    *player = Player::new(&config.handling);
    *scoreboard = Scoreboard::default();
    *cursors = SpawnCursors::new(PLAYER_START_Z, &config.streaming);
    *clock = SimClock::new(config.clock);
    *input = DriverInput::default();
    *flash = ScreenFlash::default();

    let streaming = &config.streaming;
    spawn_road_ring(&mut commands, streaming.segment_count, streaming.recycle_distance);
    commands.spawn((PlayerCar, Visual::new(VisualKind::PlayerCar, 0), player.pose()));
    if streaming.spawn_scenery {
        for i in 0..PREROLLED_SCENERY_BATCHES {
            let z = SCENERY_CURSOR_START - i as f32 * streaming.scenery.spacing;
            spawn_scenery_batch(&mut commands, &mut rng.0, z);
        }
    }

    cues.send(PlayCueEvent::new(AudioCue::StartupRev));
    next_state.set(AppState::Playing);
    info!("New game started (seed {})", seed);
}

/// Pause key flips between `Playing` and `Paused`.
pub(crate) fn toggle_pause(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<DriveBindings>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !bindings.just_pressed(DriveAction::TogglePause, &keys) {
        return;
    }
    match state.get() {
        AppState::Playing => next_state.set(AppState::Paused),
        AppState::Paused => next_state.set(AppState::Playing),
        AppState::MainMenu => {}
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_event::<NewGameEvent>()
            .add_systems(
                Update,
                (toggle_pause, start_new_game).before(crate::DriveSet::Input),
            );
    }
}
