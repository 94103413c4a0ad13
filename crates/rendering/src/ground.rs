use bevy::prelude::*;

use simulation::player::Player;

const GROUND_SIZE: f32 = 400.0;
const GRASS: Color = Color::srgb(0.3, 0.55, 0.22);

/// Grass plane that slides along with the car.
#[derive(Component, Debug, Default)]
pub struct Ground;

pub fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GRASS,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.02, 0.0),
    ));
}

pub fn follow_ground(player: Res<Player>, mut ground: Query<&mut Transform, With<Ground>>) {
    let Ok(mut transform) = ground.get_single_mut() else {
        return;
    };
    transform.translation.x = player.position.x;
    transform.translation.z = player.position.z;
}
