use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use simulation::player::Player;

pub const SKY: Color = Color::srgb(0.53, 0.81, 0.92);

const TRAIL_DISTANCE: f32 = 6.0;
const BASE_HEIGHT: f32 = 2.0;
/// Extra height per unit of speed; the camera lifts as the car speeds up.
const SPEED_LIFT: f32 = 0.3;
const LOOK_AHEAD: f32 = 8.0;
const LOOK_HEIGHT: f32 = 0.5;
const FOG_START: f32 = 30.0;
const FOG_END: f32 = 120.0;

/// Marks the single chase camera.
#[derive(Component, Debug, Default)]
pub struct ChaseCamera;

/// Unit vector the car is driving along on the ground plane.
pub fn forward_of(heading: f32) -> Vec3 {
    Vec3::new(-heading.sin(), 0.0, -heading.cos())
}

/// Eye position and look-at target trailing `player`.
pub fn chase_view(player: &Player) -> (Vec3, Vec3) {
    let forward = forward_of(player.heading);
    let ground = Vec3::new(player.position.x, 0.0, player.position.z);
    let eye = ground - forward * TRAIL_DISTANCE + Vec3::Y * (BASE_HEIGHT + player.speed * SPEED_LIFT);
    let target = ground + forward * LOOK_AHEAD + Vec3::Y * LOOK_HEIGHT;
    (eye, target)
}

pub fn setup_camera(mut commands: Commands, player: Res<Player>) {
    let (eye, target) = chase_view(&player);
    commands.spawn((
        ChaseCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(eye).looking_at(target, Vec3::Y),
        DistanceFog {
            color: SKY,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
    ));
}

pub fn follow_player(player: Res<Player>, mut camera: Query<&mut Transform, With<ChaseCamera>>) {
    let Ok(mut transform) = camera.get_single_mut() else {
        return;
    };
    let (eye, target) = chase_view(&player);
    *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}
