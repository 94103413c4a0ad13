//! Opaque visual handle and pose shared with the render collaborator.
//!
//! The simulation never touches meshes. It tags drawable entities with a
//! [`Visual`] (what to build, with which seed) and keeps their [`Pose`]
//! current; the rendering crate does the rest. Despawning the entity removes
//! the visual.

use bevy::prelude::*;

use crate::vehicle::VehicleType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    RoadSegment,
    Crossroad,
    SideRoad,
    PineTree,
    OakTree,
    BirchTree,
    PalmTree,
    Bush,
    Rock,
    House,
    TallBuilding,
    Barn,
    Shop,
    Pedestrian,
    Vehicle(VehicleType),
    TrafficLight,
    PlayerCar,
}

/// Request for a visual of `kind`, varied by `seed`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub kind: VisualKind,
    pub seed: u32,
}

impl Visual {
    pub fn new(kind: VisualKind, seed: u32) -> Self {
        Self { kind, seed }
    }
}

/// World placement of a drawable entity.
///
/// `yaw` rotates about +Y a model whose front faces +Z; the player car,
/// driving toward -Z, therefore sits at `PI + heading`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
    /// Body roll about the local forward axis.
    pub roll: f32,
}

impl Pose {
    pub fn ground(x: f32, z: f32, yaw: f32) -> Self {
        Self {
            position: Vec3::new(x, 0.0, z),
            yaw,
            roll: 0.0,
        }
    }

    /// Ground-plane position as `(x, z)`.
    #[inline]
    pub fn xz(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }
}
