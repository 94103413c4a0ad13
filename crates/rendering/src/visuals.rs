//! Placeholder visuals for every simulated entity.
//!
//! Each [`VisualKind`] maps to a handful of primitive parts built once at
//! startup. When a `Visual` appears, its parts are spawned as children; the
//! entity's `Transform` then follows its `Pose`. Despawning the entity
//! removes the parts with it.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use simulation::config::{
    PLAYER_HALF_EXTENTS, ROAD_HALF_WIDTH, SEGMENT_LENGTH, SIDEWALK_INNER, SIDEWALK_OUTER,
    SIDE_ROAD_LENGTH, SIDE_ROAD_OFFSET,
};
use simulation::traffic_light::{Lamp, LightState};
use simulation::vehicle::VehicleType;
use simulation::visual::{Pose, Visual, VisualKind};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

const ASPHALT: Color = Color::srgb(0.2, 0.2, 0.22);
const CONCRETE: Color = Color::srgb(0.62, 0.62, 0.6);
const LANE_PAINT: Color = Color::srgb(0.95, 0.95, 0.95);
const TRUNK: Color = Color::srgb(0.35, 0.23, 0.1);
const POLE: Color = Color::srgb(0.25, 0.25, 0.25);
const GLASS: Color = Color::srgb(0.53, 0.81, 0.92);
const TIRE: Color = Color::srgb(0.1, 0.1, 0.1);

const FOLIAGE: [Color; 3] = [
    Color::srgb(0.18, 0.31, 0.09),
    Color::srgb(0.23, 0.42, 0.12),
    Color::srgb(0.1, 0.29, 0.06),
];
const WALLS: [Color; 5] = [
    Color::srgb(0.91, 0.86, 0.78),
    Color::srgb(0.83, 0.77, 0.66),
    Color::srgb(0.79, 0.72, 0.59),
    Color::srgb(0.75, 0.68, 0.53),
    Color::srgb(0.96, 0.92, 0.88),
];
const ROOFS: [Color; 5] = [
    Color::srgb(0.55, 0.27, 0.07),
    Color::srgb(0.63, 0.32, 0.18),
    Color::srgb(0.42, 0.23, 0.06),
    Color::srgb(0.4, 0.26, 0.13),
    Color::srgb(0.8, 0.27, 0.27),
];
const TOWERS: [Color; 5] = [
    Color::srgb(0.5, 0.5, 0.5),
    Color::srgb(0.41, 0.41, 0.41),
    Color::srgb(0.47, 0.53, 0.6),
    Color::srgb(0.35, 0.35, 0.35),
    Color::srgb(0.42, 0.48, 0.54),
];
const SHOPS: [Color; 5] = [
    Color::srgb(1.0, 0.84, 0.0),
    Color::srgb(1.0, 0.42, 0.42),
    Color::srgb(0.31, 0.8, 0.77),
    Color::srgb(0.58, 0.88, 0.83),
    Color::srgb(0.95, 0.5, 0.5),
];
const CAR_PAINT: [Color; 6] = [
    Color::srgb(0.12, 0.3, 0.7),
    Color::srgb(0.9, 0.9, 0.9),
    Color::srgb(0.15, 0.15, 0.15),
    Color::srgb(0.6, 0.6, 0.62),
    Color::srgb(0.2, 0.5, 0.25),
    Color::srgb(0.85, 0.55, 0.1),
];
const CLOTHES: [Color; 4] = [
    Color::srgb(0.2, 0.3, 0.6),
    Color::srgb(0.6, 0.2, 0.2),
    Color::srgb(0.3, 0.5, 0.3),
    Color::srgb(0.5, 0.4, 0.6),
];

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// One primitive piece of a visual. `materials` holds the colour variants;
/// the entity's seed picks one.
struct Part {
    mesh: Handle<Mesh>,
    materials: Vec<Handle<StandardMaterial>>,
    transform: Transform,
    bulb: Option<LightState>,
}

/// Marks a traffic light lamp child lit when its parent shows `.0`.
#[derive(Component, Debug, Clone, Copy)]
pub struct LampBulb(pub LightState);

/// Lit and unlit materials for the three lamp colours.
struct BulbMaterials {
    lit: [Handle<StandardMaterial>; 3],
    dark: Handle<StandardMaterial>,
}

impl BulbMaterials {
    fn for_state(&self, bulb: LightState, showing: LightState) -> Handle<StandardMaterial> {
        if bulb != showing {
            return self.dark.clone();
        }
        let index = match bulb {
            LightState::Red => 0,
            LightState::Yellow => 1,
            LightState::Green => 2,
        };
        self.lit[index].clone()
    }
}

/// Mesh and material handles for every visual kind, built at startup.
#[derive(Resource)]
pub struct VisualLibrary {
    parts: HashMap<VisualKind, Vec<Part>>,
    bulbs: BulbMaterials,
}

/// Collects parts for one kind while the library is built.
struct KindBuilder<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    parts: Vec<Part>,
}

impl<'a> KindBuilder<'a> {
    fn new(meshes: &'a mut Assets<Mesh>, materials: &'a mut Assets<StandardMaterial>) -> Self {
        Self {
            meshes,
            materials,
            parts: Vec::new(),
        }
    }

    fn part(&mut self, mesh: impl Into<Mesh>, colors: &[Color], transform: Transform) -> &mut Self {
        let mesh = self.meshes.add(mesh);
        let materials = colors
            .iter()
            .map(|&color| {
                self.materials.add(StandardMaterial {
                    base_color: color,
                    perceptual_roughness: 0.8,
                    ..default()
                })
            })
            .collect();
        self.parts.push(Part {
            mesh,
            materials,
            transform,
            bulb: None,
        });
        self
    }

    fn bulb(&mut self, state: LightState, transform: Transform) -> &mut Self {
        let mesh = self.meshes.add(Sphere::new(0.15));
        self.parts.push(Part {
            mesh,
            materials: Vec::new(),
            transform,
            bulb: Some(state),
        });
        self
    }

    fn finish(self) -> Vec<Part> {
        self.parts
    }
}

fn at(x: f32, y: f32, z: f32) -> Transform {
    Transform::from_xyz(x, y, z)
}

fn road_segment(b: &mut KindBuilder) {
    let sidewalk_width = SIDEWALK_OUTER - SIDEWALK_INNER;
    let sidewalk_x = (SIDEWALK_INNER + SIDEWALK_OUTER) * 0.5;
    b.part(
        Cuboid::new(ROAD_HALF_WIDTH * 2.0, 0.02, SEGMENT_LENGTH),
        &[ASPHALT],
        at(0.0, 0.0, 0.0),
    )
    .part(Cuboid::new(0.15, 0.03, SEGMENT_LENGTH * 0.5), &[LANE_PAINT], at(0.0, 0.01, 0.0))
    .part(Cuboid::new(0.1, 0.03, 3.0), &[LANE_PAINT], at(3.5, 0.01, 0.0))
    .part(Cuboid::new(0.1, 0.03, 3.0), &[LANE_PAINT], at(-3.5, 0.01, 0.0))
    .part(
        Cuboid::new(sidewalk_width, 0.15, SEGMENT_LENGTH),
        &[CONCRETE],
        at(sidewalk_x, 0.075, 0.0),
    )
    .part(
        Cuboid::new(sidewalk_width, 0.15, SEGMENT_LENGTH),
        &[CONCRETE],
        at(-sidewalk_x, 0.075, 0.0),
    );
}

fn vehicle_body(b: &mut KindBuilder, half: Vec2, height: f32, paint: &[Color]) {
    let wheel = Cylinder::new(0.3, 0.2);
    let wheel_turn = Quat::from_rotation_z(FRAC_PI_2);
    b.part(
        Cuboid::new(half.x * 2.0, height * 0.5, half.y * 2.0),
        paint,
        at(0.0, 0.3 + height * 0.25, 0.0),
    )
    .part(
        Cuboid::new(half.x * 1.7, height * 0.4, half.y * 1.0),
        &[GLASS],
        at(0.0, 0.3 + height * 0.7, -half.y * 0.15),
    );
    for (x, z) in [(1.0, 0.65), (-1.0, 0.65), (1.0, -0.65), (-1.0, -0.65)] {
        b.part(
            wheel,
            &[TIRE],
            at(x * half.x, 0.3, z * half.y).with_rotation(wheel_turn),
        );
    }
}

fn vehicle(b: &mut KindBuilder, kind: VehicleType) {
    let height = match kind {
        VehicleType::Sedan => 1.2,
        VehicleType::Hatchback => 1.3,
        VehicleType::Van => 1.9,
        VehicleType::Truck => 2.4,
    };
    vehicle_body(b, kind.half_extents(), height, &CAR_PAINT);
}

fn tree(b: &mut KindBuilder, kind: VisualKind) {
    b.part(Cylinder::new(0.2, 2.0), &[TRUNK], at(0.0, 1.0, 0.0));
    match kind {
        VisualKind::PineTree => {
            b.part(Cone::new(1.2, 3.0), &FOLIAGE, at(0.0, 3.2, 0.0));
        }
        VisualKind::PalmTree => {
            b.part(Cylinder::new(0.15, 2.5), &[TRUNK], at(0.0, 3.2, 0.0))
                .part(Cuboid::new(3.0, 0.1, 0.6), &FOLIAGE, at(0.0, 4.5, 0.0))
                .part(Cuboid::new(0.6, 0.1, 3.0), &FOLIAGE, at(0.0, 4.5, 0.0));
        }
        VisualKind::BirchTree => {
            b.part(Sphere::new(1.1), &FOLIAGE, at(0.0, 2.9, 0.0));
        }
        _ => {
            b.part(Sphere::new(1.5), &FOLIAGE, at(0.0, 3.0, 0.0));
        }
    }
}

fn building(b: &mut KindBuilder, kind: VisualKind) {
    let pyramid = |radius: f32, height: f32| Cone::new(radius, height).mesh().resolution(4).build();
    match kind {
        VisualKind::House => {
            b.part(Cuboid::new(5.0, 3.0, 5.0), &WALLS, at(0.0, 1.5, 0.0)).part(
                pyramid(3.8, 2.0),
                &ROOFS,
                at(0.0, 4.0, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_2 * 0.5)),
            );
        }
        VisualKind::TallBuilding => {
            b.part(Cuboid::new(6.0, 14.0, 6.0), &TOWERS, at(0.0, 7.0, 0.0))
                .part(Cuboid::new(6.1, 0.4, 6.1), &[GLASS], at(0.0, 10.0, 0.0));
        }
        VisualKind::Barn => {
            b.part(Cuboid::new(6.0, 4.0, 8.0), &[ROOFS[4]], at(0.0, 2.0, 0.0)).part(
                pyramid(5.0, 2.5),
                &[ROOFS[2]],
                at(0.0, 5.25, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_2 * 0.5)),
            );
        }
        _ => {
            b.part(Cuboid::new(6.0, 3.5, 5.0), &SHOPS, at(0.0, 1.75, 0.0))
                .part(Cuboid::new(6.4, 0.3, 1.2), &[CONCRETE], at(0.0, 3.0, 3.0));
        }
    }
}

fn build_kind(kind: VisualKind, b: &mut KindBuilder) {
    match kind {
        VisualKind::RoadSegment => road_segment(b),
        VisualKind::Crossroad => {
            b.part(
                Cuboid::new(ROAD_HALF_WIDTH * 4.0, 0.025, ROAD_HALF_WIDTH * 2.0),
                &[ASPHALT],
                at(0.0, 0.0, 0.0),
            );
        }
        VisualKind::SideRoad => {
            let length = SIDE_ROAD_OFFSET - ROAD_HALF_WIDTH + SIDE_ROAD_LENGTH;
            b.part(Cuboid::new(8.0, 0.02, length), &[ASPHALT], at(0.0, 0.0, 0.0));
        }
        VisualKind::PineTree | VisualKind::OakTree | VisualKind::BirchTree | VisualKind::PalmTree => {
            tree(b, kind)
        }
        VisualKind::Bush => {
            b.part(Sphere::new(0.7), &FOLIAGE, at(0.0, 0.5, 0.0));
        }
        VisualKind::Rock => {
            b.part(Sphere::new(0.5).mesh().uv(6, 4), &[CONCRETE], at(0.0, 0.3, 0.0));
        }
        VisualKind::House | VisualKind::TallBuilding | VisualKind::Barn | VisualKind::Shop => {
            building(b, kind)
        }
        VisualKind::Pedestrian => {
            b.part(Capsule3d::new(0.25, 0.9), &CLOTHES, at(0.0, 0.9, 0.0))
                .part(Sphere::new(0.18), &[Color::srgb(0.87, 0.72, 0.6)], at(0.0, 1.65, 0.0));
        }
        VisualKind::Vehicle(vehicle_kind) => vehicle(b, vehicle_kind),
        VisualKind::TrafficLight => {
            b.part(Cylinder::new(0.08, 3.0), &[POLE], at(0.0, 1.5, 0.0))
                .part(Cuboid::new(0.45, 1.2, 0.35), &[POLE], at(0.0, 3.4, 0.0))
                .bulb(LightState::Red, at(0.0, 3.8, 0.18))
                .bulb(LightState::Yellow, at(0.0, 3.4, 0.18))
                .bulb(LightState::Green, at(0.0, 3.0, 0.18));
        }
        VisualKind::PlayerCar => {
            vehicle_body(b, PLAYER_HALF_EXTENTS, 1.1, &[Color::srgb(0.8, 0.1, 0.1)]);
        }
    }
}

/// Every kind the library must cover.
fn all_kinds() -> impl Iterator<Item = VisualKind> {
    [
        VisualKind::RoadSegment,
        VisualKind::Crossroad,
        VisualKind::SideRoad,
        VisualKind::PineTree,
        VisualKind::OakTree,
        VisualKind::BirchTree,
        VisualKind::PalmTree,
        VisualKind::Bush,
        VisualKind::Rock,
        VisualKind::House,
        VisualKind::TallBuilding,
        VisualKind::Barn,
        VisualKind::Shop,
        VisualKind::Pedestrian,
        VisualKind::TrafficLight,
        VisualKind::PlayerCar,
    ]
    .into_iter()
    .chain(VehicleType::ALL.map(VisualKind::Vehicle))
}

pub fn setup_visual_library(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut parts = HashMap::new();
    for kind in all_kinds() {
        let mut builder = KindBuilder::new(&mut meshes, &mut materials);
        build_kind(kind, &mut builder);
        parts.insert(kind, builder.finish());
    }

    let mut lamp = |color: Color| {
        materials.add(StandardMaterial {
            base_color: color,
            emissive: LinearRgba::from(color) * 4.0,
            ..default()
        })
    };
    let bulbs = BulbMaterials {
        lit: [
            lamp(Color::srgb(1.0, 0.1, 0.1)),
            lamp(Color::srgb(1.0, 0.8, 0.1)),
            lamp(Color::srgb(0.1, 1.0, 0.2)),
        ],
        dark: materials.add(Color::srgb(0.12, 0.12, 0.12)),
    };

    commands.insert_resource(VisualLibrary { parts, bulbs });
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// World transform for a pose; roll is applied about the model's own Z.
pub fn pose_transform(pose: &Pose) -> Transform {
    Transform::from_translation(pose.position)
        .with_rotation(Quat::from_rotation_y(pose.yaw) * Quat::from_rotation_z(pose.roll))
}

/// Attach primitive parts to newly spawned visuals.
pub fn attach_visuals(
    mut commands: Commands,
    library: Option<Res<VisualLibrary>>,
    added: Query<(Entity, &Visual, &Pose, Option<&Lamp>), Added<Visual>>,
) {
    let Some(library) = library else {
        return;
    };
    for (entity, visual, pose, lamp) in &added {
        let Some(parts) = library.parts.get(&visual.kind) else {
            warn!("No visual parts for {:?}", visual.kind);
            continue;
        };
        let showing = lamp.map(|l| l.0).unwrap_or_default();
        commands
            .entity(entity)
            .insert((pose_transform(pose), Visibility::default()))
            .with_children(|parent| {
                for part in parts {
                    match part.bulb {
                        Some(state) => {
                            parent.spawn((
                                LampBulb(state),
                                Mesh3d(part.mesh.clone()),
                                MeshMaterial3d(library.bulbs.for_state(state, showing)),
                                part.transform,
                            ));
                        }
                        None => {
                            let variant = visual.seed as usize % part.materials.len().max(1);
                            let Some(material) = part.materials.get(variant) else {
                                continue;
                            };
                            parent.spawn((
                                Mesh3d(part.mesh.clone()),
                                MeshMaterial3d(material.clone()),
                                part.transform,
                            ));
                        }
                    }
                }
            });
    }
}

/// Copy moved poses onto transforms.
pub fn sync_pose_transforms(mut moved: Query<(&Pose, &mut Transform), Changed<Pose>>) {
    for (pose, mut transform) in &mut moved {
        *transform = pose_transform(pose);
    }
}

/// Relight bulbs when a traffic light changes colour.
pub fn swap_lamp_materials(
    library: Option<Res<VisualLibrary>>,
    lights: Query<(&Lamp, &Children), Changed<Lamp>>,
    mut bulbs: Query<(&LampBulb, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    let Some(library) = library else {
        return;
    };
    for (lamp, children) in &lights {
        for &child in children.iter() {
            if let Ok((bulb, mut material)) = bulbs.get_mut(child) {
                material.0 = library.bulbs.for_state(bulb.0, lamp.0);
            }
        }
    }
}
