//! Player collisions and red-light violations.
//!
//! Runs after every entity has moved for the frame. Boxes are axis-aligned
//! on the ground plane; hit pedestrians and vehicles are flagged and never
//! tested again. Every penalty floors the score at zero.

use bevy::math::bounding::IntersectsVolume;
use bevy::prelude::*;

use crate::audio_cues::{AudioCue, PlayCueEvent};
use crate::config::{DrivingConfig, RED_LIGHT_MIN_SPEED};
use crate::pedestrian::Pedestrian;
use crate::player::Player;
use crate::score::{FlashTint, ScreenFlash, Scoreboard};
use crate::traffic_light::{LightFacing, LightState, TrafficLight};
use crate::vehicle::Vehicle;
use crate::visual::Pose;

/// Speed multiplier after striking a pedestrian.
const PEDESTRIAN_HIT_SPEED: f32 = 0.5;
const SAME_DIRECTION_HIT_SPEED: f32 = 0.3;
/// Window just past a light, in Z relative to the light, where it is judged.
const RED_LIGHT_WINDOW: (f32, f32) = (-5.0, -2.0);

/// Whether the car at `car_z` is inside the judging window of a light at `light_z`.
pub fn in_red_light_window(car_z: f32, light_z: f32) -> bool {
    car_z > light_z + RED_LIGHT_WINDOW.0 && car_z < light_z + RED_LIGHT_WINDOW.1
}

pub(crate) fn collide_pedestrians(
    config: Res<DrivingConfig>,
    mut player: ResMut<Player>,
    mut pedestrians: Query<(&mut Pedestrian, &Pose)>,
    mut scoreboard: ResMut<Scoreboard>,
    mut flash: ResMut<ScreenFlash>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    let car = player.aabb();
    for (mut pedestrian, pose) in &mut pedestrians {
        if pedestrian.hit || !car.intersects(&Pedestrian::aabb(pose)) {
            continue;
        }
        pedestrian.hit = true;
        player.speed *= PEDESTRIAN_HIT_SPEED;
        scoreboard.penalize(config.scoring.pedestrian_hit);
        flash.trigger(FlashTint::Impact);
        cues.send(PlayCueEvent::new(AudioCue::PedestrianImpact));
        info!(
            "Pedestrian hit at ({:.1}, {:.1}), score {:.0}",
            pose.position.x, pose.position.z, scoreboard.score
        );
    }
}

pub(crate) fn collide_vehicles(
    config: Res<DrivingConfig>,
    mut player: ResMut<Player>,
    mut vehicles: Query<(&mut Vehicle, &Pose)>,
    mut scoreboard: ResMut<Scoreboard>,
    mut flash: ResMut<ScreenFlash>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    let car = player.aabb();
    for (mut vehicle, pose) in &mut vehicles {
        if vehicle.hit || !car.intersects(&vehicle.aabb(pose)) {
            continue;
        }
        vehicle.hit = true;
        if vehicle.oncoming {
            player.speed = 0.0;
            scoreboard.penalize(config.scoring.oncoming_hit);
        } else {
            player.speed *= SAME_DIRECTION_HIT_SPEED;
            scoreboard.penalize(config.scoring.same_direction_hit);
        }
        flash.trigger(FlashTint::Impact);
        cues.send(PlayCueEvent::new(AudioCue::VehicleCrash {
            oncoming: vehicle.oncoming,
        }));
        info!(
            "{} vehicle hit ({:?}), score {:.0}",
            if vehicle.oncoming { "Oncoming" } else { "Same-direction" },
            vehicle.kind,
            scoreboard.score
        );
    }
}

/// Judge each forward-facing light once, as the car passes it on the main road.
pub(crate) fn check_red_lights(
    config: Res<DrivingConfig>,
    player: Res<Player>,
    mut lights: Query<&mut TrafficLight>,
    mut scoreboard: ResMut<Scoreboard>,
    mut flash: ResMut<ScreenFlash>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    if !player.is_on_road() {
        return;
    }
    let car_z = player.z();
    for mut light in &mut lights {
        if light.facing != LightFacing::Forward || light.passed || !in_red_light_window(car_z, light.world_z) {
            continue;
        }
        light.passed = true;
        if light.state() == LightState::Red && player.speed > RED_LIGHT_MIN_SPEED {
            scoreboard.ran_red_lights += 1;
            scoreboard.penalize(config.scoring.red_light);
            flash.trigger(FlashTint::Violation);
            cues.send(PlayCueEvent::new(AudioCue::RedLightViolation));
            info!("Ran a red light at z={:.1} (total {})", light.world_z, scoreboard.ran_red_lights);
        }
    }
}

pub(crate) fn decay_screen_flash(clock: Res<crate::clock::SimClock>, mut flash: ResMut<ScreenFlash>) {
    if flash.tint.is_some() {
        flash.decay(clock.dt);
    }
}

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scoreboard>()
            .init_resource::<ScreenFlash>()
            .add_systems(
                Update,
                (decay_screen_flash, collide_pedestrians, collide_vehicles, check_red_lights)
                    .chain()
                    .in_set(crate::DriveSet::Collision),
            );
    }
}
