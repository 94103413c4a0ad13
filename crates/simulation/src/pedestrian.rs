//! Pedestrians walking the sidewalks, some drifting across the road.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::clock::{ease_factor, SimClock};
use crate::config::PEDESTRIAN_HALF_EXTENTS;
use crate::visual::{Pose, Visual, VisualKind};

const WALK_PHASE_RATE: f32 = 8.0;
const WALK_SCALE: f32 = 0.5;
const CROSS_SCALE: f32 = 0.3;
const TURN_RATE: f32 = 0.1;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Pedestrian {
    /// `+1` walks toward -Z, `-1` toward +Z.
    pub direction: f32,
    pub walk_speed: f32,
    /// Limb animation phase.
    pub walk_phase: f32,
    /// `Some(+1 | -1)` while drifting across the road along X.
    pub crossing: Option<f32>,
    /// Terminal: a hit pedestrian is frozen and ignored by collision.
    pub hit: bool,
}

impl Pedestrian {
    pub fn walking(direction: f32, walk_speed: f32) -> Self {
        Self {
            direction,
            walk_speed,
            walk_phase: 0.0,
            crossing: None,
            hit: false,
        }
    }

    pub fn crossing(direction: f32, walk_speed: f32, cross_direction: f32) -> Self {
        Self {
            crossing: Some(cross_direction),
            ..Self::walking(direction, walk_speed)
        }
    }

    pub fn aabb(pose: &Pose) -> Aabb2d {
        Aabb2d::new(pose.xz(), PEDESTRIAN_HALF_EXTENTS)
    }

    /// Yaw for walking along the sidewalk.
    pub fn walking_yaw(&self) -> f32 {
        if self.direction > 0.0 {
            PI
        } else {
            0.0
        }
    }
}

pub fn spawn_pedestrian(commands: &mut Commands, pedestrian: Pedestrian, x: f32, z: f32, seed: u32) -> Entity {
    let yaw = pedestrian.walking_yaw();
    commands
        .spawn((
            pedestrian,
            Visual::new(VisualKind::Pedestrian, seed),
            Pose::ground(x, z, yaw),
        ))
        .id()
}

/// Advance one pedestrian a frame. Hit pedestrians do not move.
pub fn step_pedestrian(pedestrian: &mut Pedestrian, pose: &mut Pose, step: f32) {
    if pedestrian.hit {
        return;
    }
    pedestrian.walk_phase += pedestrian.walk_speed * WALK_PHASE_RATE * step;
    pose.position.z -= pedestrian.walk_speed * pedestrian.direction * WALK_SCALE * step;
    if let Some(cross) = pedestrian.crossing {
        pose.position.x += cross * pedestrian.walk_speed * CROSS_SCALE * step;
        let target = cross * FRAC_PI_2;
        pose.yaw += (target - pose.yaw) * ease_factor(TURN_RATE, step);
    }
}

pub(crate) fn advance_pedestrians(clock: Res<SimClock>, mut pedestrians: Query<(&mut Pedestrian, &mut Pose)>) {
    let step = clock.step();
    for (mut pedestrian, mut pose) in &mut pedestrians {
        step_pedestrian(&mut pedestrian, &mut pose, step);
    }
}

pub struct PedestrianPlugin;

impl Plugin for PedestrianPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_pedestrians.in_set(crate::DriveSet::Behaviour));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walker_moves_along_sidewalk() {
        let mut ped = Pedestrian::walking(1.0, 0.02);
        let mut pose = Pose::ground(8.0, -50.0, ped.walking_yaw());
        step_pedestrian(&mut ped, &mut pose, 1.0);
        assert!((pose.position.z - (-50.01)).abs() < 1e-5);
        assert_eq!(pose.position.x, 8.0);
        assert!((ped.walk_phase - 0.16).abs() < 1e-6);
    }

    #[test]
    fn test_crosser_drifts_and_turns() {
        let mut ped = Pedestrian::crossing(-1.0, 0.03, -1.0);
        let mut pose = Pose::ground(8.0, -50.0, 0.0);
        for _ in 0..100 {
            step_pedestrian(&mut ped, &mut pose, 1.0);
        }
        assert!((pose.position.x - (8.0 - 0.9)).abs() < 1e-3);
        assert!(pose.position.z > -50.0);
        assert!((pose.yaw + FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_hit_pedestrian_is_frozen() {
        let mut ped = Pedestrian::walking(1.0, 0.03);
        ped.hit = true;
        let mut pose = Pose::ground(1.0, 2.0, 0.0);
        step_pedestrian(&mut ped, &mut pose, 1.0);
        assert_eq!(pose, Pose::ground(1.0, 2.0, 0.0));
        assert_eq!(ped.walk_phase, 0.0);
    }
}
