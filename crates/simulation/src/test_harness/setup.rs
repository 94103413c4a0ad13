//! Builder methods for placing the player and holding inputs.

use bevy::prelude::*;

use crate::input::{DriverInput, HeldKeys};
use crate::player::Player;
use crate::score::Scoreboard;

use super::TestDrive;

impl TestDrive {
    // -----------------------------------------------------------------------
    // Player placement
    // -----------------------------------------------------------------------

    /// Put the car on the main road at `z`, `lane` units from the centre,
    /// keeping its current speed.
    pub fn with_player_at(mut self, z: f32, lane: f32) -> Self {
        self.place_player(z, lane);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.set_speed(speed);
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.app.world_mut().resource_mut::<Scoreboard>().score = score;
        self
    }

    pub fn place_player(&mut self, z: f32, lane: f32) {
        let world = self.app.world_mut();
        let speed = world.resource::<Player>().speed;
        *world.resource_mut::<Player>() = Player::on_road_at(z, lane, speed);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.app.world_mut().resource_mut::<Player>().speed = speed;
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn hold(&mut self, keys: HeldKeys) {
        self.app.world_mut().resource_mut::<DriverInput>().held = keys;
    }

    pub fn hold_accelerate(&mut self) {
        self.hold(HeldKeys {
            accelerate: true,
            ..Default::default()
        });
    }

    pub fn hold_left(&mut self) {
        self.hold(HeldKeys {
            steer_left: true,
            ..Default::default()
        });
    }

    pub fn release(&mut self) {
        self.hold(HeldKeys::default());
    }
}
