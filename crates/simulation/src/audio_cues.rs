//! Fire-and-forget audio cues and the continuous engine hum.
//!
//! Drive systems send [`PlayCueEvent`]s; playback is handled downstream in
//! the rendering crate. The engine hum is not an event but a resource
//! recomputed every frame from speed and held keys.

use bevy::prelude::*;

use crate::config::DrivingConfig;
use crate::input::DriverInput;
use crate::player::Player;

/// Discrete cues the driving core can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    StartupRev,
    AccelerationBurst,
    BrakeSqueal,
    PedestrianImpact,
    VehicleCrash { oncoming: bool },
    RedLightViolation,
    NearMiss,
    Overtake,
    TurnSignal,
    TurnComplete,
}

#[derive(Event, Debug, Clone)]
pub struct PlayCueEvent {
    pub cue: AudioCue,
    /// Volume multiplier in `[0, 1]`.
    pub volume_scale: f32,
}

impl PlayCueEvent {
    pub fn new(cue: AudioCue) -> Self {
        Self { cue, volume_scale: 1.0 }
    }

    pub fn with_volume(cue: AudioCue, volume_scale: f32) -> Self {
        Self {
            cue,
            volume_scale: volume_scale.clamp(0.0, 1.0),
        }
    }
}

/// Minimum speed at which a freshly pressed brake squeals.
const BRAKE_SQUEAL_MIN_SPEED: f32 = 0.2;
/// Minimum speed above which steering adds tire squeal.
const TIRE_SQUEAL_MIN_SPEED: f32 = 0.3;

/// Continuous engine, tire and wind levels for the audio collaborator.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineHum {
    /// Speed divided by max speed.
    pub normalized_speed: f32,
    pub throttle: bool,
    pub braking: bool,
    pub pitch_hz: f32,
    pub volume: f32,
    pub tire: f32,
    pub wind: f32,
}

impl EngineHum {
    pub fn compute(normalized_speed: f32, throttle: bool, braking: bool, steering: bool, speed: f32) -> Self {
        let n = normalized_speed.clamp(0.0, 1.0);
        let mut volume = 0.15 + n * 0.25;
        if throttle {
            volume += 0.15;
        }
        if braking {
            volume *= 0.6;
        }
        let mut tire = n * 0.12;
        if steering && speed > TIRE_SQUEAL_MIN_SPEED {
            tire += 0.08;
        }
        Self {
            normalized_speed: n,
            throttle,
            braking,
            pitch_hz: 80.0 + n * 320.0,
            volume,
            tire,
            wind: n * n * 0.15,
        }
    }
}

/// Edge-triggered throttle and brake cues.
pub(crate) fn emit_pedal_cues(
    input: Res<DriverInput>,
    player: Res<Player>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    if input.accelerate_just_pressed() {
        cues.send(PlayCueEvent::new(AudioCue::AccelerationBurst));
    }
    if input.brake_just_pressed() && player.speed > BRAKE_SQUEAL_MIN_SPEED {
        cues.send(PlayCueEvent::new(AudioCue::BrakeSqueal));
    }
}

pub(crate) fn update_engine_hum(
    input: Res<DriverInput>,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    mut hum: ResMut<EngineHum>,
) {
    let max = config.handling.max_speed.max(f32::EPSILON);
    *hum = EngineHum::compute(
        player.speed / max,
        input.held.accelerate,
        input.held.brake,
        input.held.steering(),
        player.speed,
    );
}

pub struct AudioCuesPlugin;

impl Plugin for AudioCuesPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayCueEvent>()
            .init_resource::<EngineHum>()
            .add_systems(
                Update,
                emit_pedal_cues
                    .in_set(crate::DriveSet::Player)
                    .before(crate::player::drive_player),
            )
            .add_systems(Update, update_engine_hum.in_set(crate::DriveSet::Publish));
    }
}
