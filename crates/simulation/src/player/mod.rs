//! The player's car: pose, speed and the drive-mode state machine.
//!
//! ```text
//! OnRoad ──(junction capture + steer held)──▶ Turning ──(progress = 1)──▶ OnSideRoad
//!    ▲                                                                        │
//!    └──────────────────(side road length reached, rejoin 100 ahead)──────────┘
//! ```
//!
//! Lane physics only exist in [`DriveMode::OnRoad`]; the turn arc and side
//! road carry their own state, so an illegal combination (steering while
//! turning, a lane offset on a side road) cannot be represented.

pub mod handling;
pub mod junction;

use std::f32::consts::PI;

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::audio_cues::{AudioCue, PlayCueEvent};
use crate::clock::SimClock;
use crate::config::{DrivingConfig, HandlingConfig, PLAYER_HALF_EXTENTS, PLAYER_START_Z};
use crate::crossroad::Crossroad;
use crate::curve::{curve_heading, curve_offset};
use crate::input::DriverInput;
use crate::score::Scoreboard;
use crate::visual::Pose;

/// Marker for the drawable player car entity.
#[derive(Component, Debug, Default)]
pub struct PlayerCar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Sign of the world-X motion this turn produces.
    pub fn world_sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn from_steer(direction: f32) -> Option<Self> {
        if direction < 0.0 {
            Some(Self::Left)
        } else if direction > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Lane physics while on the main road.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaneState {
    pub lane_offset: f32,
    pub steer_angle: f32,
    pub velocity_x: f32,
}

/// Quarter-circle turn in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnState {
    pub direction: TurnDirection,
    /// Elapsed nominal frames since the turn began.
    pub elapsed: f32,
    pub start: Vec2,
    pub start_heading: f32,
    /// Centre `(x, z)` of the junction being turned at.
    pub junction: Vec2,
}

impl TurnState {
    pub fn progress(&self) -> f32 {
        (self.elapsed * crate::config::TURN_RATE).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideRoadState {
    pub direction: TurnDirection,
    /// Junction of departure.
    pub junction: Vec2,
    pub travelled: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveMode {
    OnRoad(LaneState),
    Turning(TurnState),
    OnSideRoad(SideRoadState),
}

/// Single player car, mutated only by the drive systems in this module.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Player {
    /// `y` carries the suspension offset.
    pub position: Vec3,
    /// Tangent angle; `0` drives straight toward -Z, positive leans left.
    pub heading: f32,
    pub speed: f32,
    pub body_tilt: f32,
    pub suspension: f32,
    pub mode: DriveMode,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&HandlingConfig::default())
    }
}

impl Player {
    /// Fresh car at the start line in the near same-direction lane.
    pub fn new(handling: &HandlingConfig) -> Self {
        Self::on_road_at(PLAYER_START_Z, handling.start_lane, handling.base_speed)
    }

    pub fn on_road_at(z: f32, lane_offset: f32, speed: f32) -> Self {
        Self {
            position: Vec3::new(curve_offset(z) + lane_offset, 0.0, z),
            heading: curve_heading(z),
            speed,
            body_tilt: 0.0,
            suspension: 0.0,
            mode: DriveMode::OnRoad(LaneState {
                lane_offset,
                ..Default::default()
            }),
        }
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }

    pub fn xz(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub fn lane_offset(&self) -> Option<f32> {
        match self.mode {
            DriveMode::OnRoad(lane) => Some(lane.lane_offset),
            _ => None,
        }
    }

    pub fn turning(&self) -> Option<TurnDirection> {
        match self.mode {
            DriveMode::Turning(turn) => Some(turn.direction),
            _ => None,
        }
    }

    pub fn is_on_road(&self) -> bool {
        matches!(self.mode, DriveMode::OnRoad(_))
    }

    pub fn is_on_side_road(&self) -> bool {
        matches!(self.mode, DriveMode::OnSideRoad(_))
    }

    /// Collision footprint; lengthwise along X while on a side road.
    pub fn half_extents(&self) -> Vec2 {
        if self.is_on_side_road() {
            Vec2::new(PLAYER_HALF_EXTENTS.y, PLAYER_HALF_EXTENTS.x)
        } else {
            PLAYER_HALF_EXTENTS
        }
    }

    pub fn aabb(&self) -> Aabb2d {
        Aabb2d::new(self.xz(), self.half_extents())
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            yaw: PI + self.heading,
            roll: self.body_tilt,
        }
    }
}

/// Advance the player one frame: speed, then the active drive mode.
pub(crate) fn drive_player(
    clock: Res<SimClock>,
    input: Res<DriverInput>,
    config: Res<DrivingConfig>,
    crossroads: Query<&Crossroad>,
    mut player: ResMut<Player>,
    mut scoreboard: ResMut<Scoreboard>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    let step = clock.step();
    let handling = &config.handling;
    let held = input.held;

    player.speed = handling::update_speed(player.speed, held, handling, step);

    let mut mode = player.mode;
    if let DriveMode::OnRoad(_) = mode {
        let junctions = crossroads.iter().map(|c| c.center);
        if let Some(turn) = junction::try_begin_turn(&player, held, junctions) {
            info!(
                "Turning {:?} at junction ({:.1}, {:.1})",
                turn.direction, turn.junction.x, turn.junction.y
            );
            cues.send(PlayCueEvent::new(AudioCue::TurnSignal));
            mode = DriveMode::Turning(turn);
        }
    }

    mode = match mode {
        DriveMode::OnRoad(mut lane) => {
            handling::drive_on_road(&mut player, &mut lane, held, handling, step);
            DriveMode::OnRoad(lane)
        }
        DriveMode::Turning(mut turn) => {
            if junction::advance_turn(&mut player, &mut turn, step) {
                scoreboard.award(config.scoring.turn_complete);
                cues.send(PlayCueEvent::new(AudioCue::TurnComplete));
                info!("Turn complete, now on side road");
                junction::enter_side_road(&mut player, &turn)
            } else {
                DriveMode::Turning(turn)
            }
        }
        DriveMode::OnSideRoad(mut side) => {
            if junction::advance_side_road(&mut player, &mut side, step) {
                scoreboard.award(config.scoring.side_road_return);
                info!("Rejoined main road at z={:.1}", side.junction.y - crate::config::REJOIN_AHEAD);
                junction::rejoin_main_road(&mut player, &side, handling)
            } else {
                DriveMode::OnSideRoad(side)
            }
        }
    };
    player.mode = mode;

    let travelled = player.speed * step;
    scoreboard.distance += travelled;
    if config.scoring.distance_rate > 0.0 {
        scoreboard.award(travelled * config.scoring.distance_rate);
    }
}

pub(crate) fn sync_player_pose(player: Res<Player>, mut cars: Query<&mut Pose, With<PlayerCar>>) {
    for mut pose in &mut cars {
        *pose = player.pose();
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Player>()
            .add_systems(Update, drive_player.in_set(crate::DriveSet::Player))
            .add_systems(Update, sync_player_pose.in_set(crate::DriveSet::Publish));
    }
}
