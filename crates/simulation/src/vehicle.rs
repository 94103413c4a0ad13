//! Autonomous traffic: same-direction cars pulling away from the player and
//! oncoming cars closing on it.
//!
//! Vehicles move only along Z and track their lane on the curve with a 10%
//! per-frame ease. Overtakes and oncoming near misses are scored here; hits
//! are resolved by the collision pass.

use std::f32::consts::PI;

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use rand::Rng;

use crate::audio_cues::{AudioCue, PlayCueEvent};
use crate::clock::{ease_factor, SimClock};
use crate::config::DrivingConfig;
use crate::curve::{curve_heading, curve_offset};
use crate::player::Player;
use crate::score::Scoreboard;
use crate::visual::{Pose, Visual, VisualKind};

const LANE_TRACKING_RATE: f32 = 0.1;
/// Distance past a same-direction car at which it counts as overtaken.
const OVERTAKE_MARGIN: f32 = 3.0;
const NEAR_MISS_MIN_GAP: f32 = 1.5;
const NEAR_MISS_MAX_GAP: f32 = 2.5;
const NEAR_MISS_DEPTH: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Sedan,
    Hatchback,
    Van,
    Truck,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [Self::Sedan, Self::Hatchback, Self::Van, Self::Truck];

    /// Collision half extents on X/Z.
    pub fn half_extents(self) -> Vec2 {
        match self {
            Self::Sedan => Vec2::new(0.9, 2.0),
            Self::Hatchback => Vec2::new(0.85, 1.7),
            Self::Van => Vec2::new(1.0, 2.5),
            Self::Truck => Vec2::new(1.2, 3.4),
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub kind: VehicleType,
    /// Target offset from the curve centre.
    pub lane: f32,
    /// Z units per nominal frame.
    pub speed: f32,
    pub oncoming: bool,
    pub passed: bool,
    pub hit: bool,
    pub near_miss_triggered: bool,
}

impl Vehicle {
    pub fn new(kind: VehicleType, lane: f32, speed: f32, oncoming: bool) -> Self {
        Self {
            kind,
            lane,
            speed,
            oncoming,
            passed: false,
            hit: false,
            near_miss_triggered: false,
        }
    }

    pub fn aabb(&self, pose: &Pose) -> Aabb2d {
        Aabb2d::new(pose.xz(), self.kind.half_extents())
    }

    /// Yaw for a car on the curve at `z`; same-direction cars face away.
    pub fn yaw_at(&self, z: f32) -> f32 {
        let heading = curve_heading(z);
        if self.oncoming {
            heading
        } else {
            heading + PI
        }
    }
}

pub fn spawn_vehicle(commands: &mut Commands, vehicle: Vehicle, z: f32, seed: u32) -> Entity {
    let pose = Pose::ground(curve_offset(z) + vehicle.lane, z, vehicle.yaw_at(z));
    let kind = vehicle.kind;
    commands
        .spawn((vehicle, Visual::new(VisualKind::Vehicle(kind), seed), pose))
        .id()
}

/// Move one vehicle a frame along its lane.
pub fn step_vehicle(vehicle: &Vehicle, pose: &mut Pose, step: f32) {
    if vehicle.hit {
        return;
    }
    let direction = if vehicle.oncoming { 1.0 } else { -1.0 };
    pose.position.z += direction * vehicle.speed * step;
    let target_x = curve_offset(pose.position.z) + vehicle.lane;
    pose.position.x += (target_x - pose.position.x) * ease_factor(LANE_TRACKING_RATE, step);
    pose.yaw = vehicle.yaw_at(pose.position.z);
}

pub fn is_overtaken(vehicle: &Vehicle, pose: &Pose, player_z: f32) -> bool {
    !vehicle.oncoming && !vehicle.passed && !vehicle.hit && player_z < pose.position.z - OVERTAKE_MARGIN
}

pub fn is_near_miss(vehicle: &Vehicle, pose: &Pose, player: Vec2) -> bool {
    if !vehicle.oncoming || vehicle.near_miss_triggered || vehicle.hit {
        return false;
    }
    let dx = (pose.position.x - player.x).abs();
    let dz = (pose.position.z - player.y).abs();
    dx > NEAR_MISS_MIN_GAP && dx < NEAR_MISS_MAX_GAP && dz < NEAR_MISS_DEPTH
}

pub(crate) fn advance_vehicles(clock: Res<SimClock>, mut vehicles: Query<(&Vehicle, &mut Pose)>) {
    let step = clock.step();
    for (vehicle, mut pose) in &mut vehicles {
        step_vehicle(vehicle, &mut pose, step);
    }
}

pub(crate) fn score_vehicle_passes(
    player: Res<Player>,
    config: Res<DrivingConfig>,
    mut vehicles: Query<(&mut Vehicle, &Pose)>,
    mut scoreboard: ResMut<Scoreboard>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    let here = player.xz();
    for (mut vehicle, pose) in &mut vehicles {
        if is_overtaken(&vehicle, pose, here.y) {
            vehicle.passed = true;
            scoreboard.vehicles_overtaken += 1;
            scoreboard.award(config.scoring.overtake);
            cues.send(PlayCueEvent::with_volume(AudioCue::Overtake, 0.6));
        } else if is_near_miss(&vehicle, pose, here) {
            vehicle.near_miss_triggered = true;
            scoreboard.near_misses += 1;
            scoreboard.award(config.scoring.near_miss);
            cues.send(PlayCueEvent::new(AudioCue::NearMiss));
        }
    }
}

pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (advance_vehicles, score_vehicle_passes)
                .chain()
                .in_set(crate::DriveSet::Behaviour),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose_at(x: f32, z: f32) -> Pose {
        Pose::ground(x, z, 0.0)
    }

    #[test]
    fn test_same_direction_moves_away() {
        let car = Vehicle::new(VehicleType::Sedan, 1.75, 0.2, false);
        let mut pose = pose_at(curve_offset(-40.0) + 1.75, -40.0);
        step_vehicle(&car, &mut pose, 1.0);
        assert!((pose.position.z - (-40.2)).abs() < 1e-5);
    }

    #[test]
    fn test_oncoming_moves_toward_player() {
        let car = Vehicle::new(VehicleType::Van, -1.75, 0.3, true);
        let mut pose = pose_at(curve_offset(-80.0) - 1.75, -80.0);
        step_vehicle(&car, &mut pose, 1.0);
        assert!((pose.position.z - (-79.7)).abs() < 1e-4);
    }

    #[test]
    fn test_hit_vehicle_stays_put() {
        let mut car = Vehicle::new(VehicleType::Truck, 5.25, 0.3, false);
        car.hit = true;
        let mut pose = pose_at(0.0, -10.0);
        step_vehicle(&car, &mut pose, 1.0);
        assert_eq!(pose, pose_at(0.0, -10.0));
    }

    #[test]
    fn test_lane_tracking_converges() {
        let car = Vehicle::new(VehicleType::Sedan, 5.25, 0.0, false);
        let mut pose = pose_at(curve_offset(-30.0), -30.0);
        for _ in 0..200 {
            step_vehicle(&car, &mut pose, 1.0);
        }
        assert!((pose.position.x - (curve_offset(-30.0) + 5.25)).abs() < 1e-3);
    }

    #[test]
    fn test_overtake_window() {
        let car = Vehicle::new(VehicleType::Sedan, 1.75, 0.2, false);
        let pose = pose_at(0.0, -40.0);
        assert!(!is_overtaken(&car, &pose, -42.0));
        assert!(is_overtaken(&car, &pose, -43.5));
        let mut passed = car.clone();
        passed.passed = true;
        assert!(!is_overtaken(&passed, &pose, -43.5));
    }

    #[test]
    fn test_near_miss_band() {
        let car = Vehicle::new(VehicleType::Sedan, -1.75, 0.3, true);
        let pose = pose_at(0.0, -20.0);
        assert!(is_near_miss(&car, &pose, Vec2::new(2.0, -22.0)));
        assert!(!is_near_miss(&car, &pose, Vec2::new(1.0, -22.0)));
        assert!(!is_near_miss(&car, &pose, Vec2::new(3.0, -22.0)));
        assert!(!is_near_miss(&car, &pose, Vec2::new(2.0, -26.0)));
        let same_way = Vehicle::new(VehicleType::Sedan, 1.75, 0.3, false);
        assert!(!is_near_miss(&same_way, &pose, Vec2::new(2.0, -22.0)));
    }
}
