//! Hand-placed entities for scenarios.
//!
//! These reuse the same spawn helpers the streaming manager calls, through
//! the world's command queue.

use bevy::prelude::*;

use crate::crossroad::spawn_crossroad;
use crate::curve::curve_offset;
use crate::pedestrian::{spawn_pedestrian, Pedestrian};
use crate::player::Player;
use crate::vehicle::{spawn_vehicle, Vehicle, VehicleType};

use super::TestDrive;

impl TestDrive {
    fn spawn_with(&mut self, f: impl FnOnce(&mut Commands) -> Entity) -> Entity {
        let world = self.app.world_mut();
        let entity = {
            let mut commands = world.commands();
            f(&mut commands)
        };
        world.flush();
        entity
    }

    pub fn spawn_vehicle(&mut self, z: f32, lane: f32, speed: f32, oncoming: bool) -> Entity {
        let vehicle = Vehicle::new(VehicleType::Sedan, lane, speed, oncoming);
        self.spawn_with(|commands| spawn_vehicle(commands, vehicle, z, 0))
    }

    pub fn spawn_pedestrian(&mut self, pedestrian: Pedestrian, x: f32, z: f32) -> Entity {
        self.spawn_with(|commands| spawn_pedestrian(commands, pedestrian, x, z, 0))
    }

    /// A slow walker standing exactly where the player is.
    pub fn spawn_pedestrian_on_player(&mut self) -> Entity {
        let at = self.app.world().resource::<Player>().xz();
        self.spawn_pedestrian(Pedestrian::walking(1.0, 0.02), at.x, at.y)
    }

    /// A walker on the road at `z`, `lane` units from the centre.
    pub fn spawn_pedestrian_in_lane(&mut self, z: f32, lane: f32) -> Entity {
        self.spawn_pedestrian(Pedestrian::walking(1.0, 0.02), curve_offset(z) + lane, z)
    }

    pub fn spawn_crossroad(&mut self, z: f32) -> Entity {
        self.spawn_with(|commands| spawn_crossroad(commands, z, 0))
    }
}
