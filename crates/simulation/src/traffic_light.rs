//! Timed traffic-light cycle.
//!
//! Each light owns a private timer advanced by the frame delta. The lamp
//! colour is a pure function of `timer mod 12`: `[0,5)` green, `[5,7)`
//! yellow, `[7,12)` red. Cross-traffic lights start six units into the
//! cycle. Nothing enforces mutual exclusion between perpendicular greens.

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::config::{LIGHT_CYCLE, LIGHT_GREEN_END, LIGHT_YELLOW_END};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LightState {
    #[default]
    Green,
    Yellow,
    Red,
}

/// Which traffic stream a light faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightFacing {
    /// Faces the player's direction of travel.
    Forward,
    Oncoming,
    CrossLeft,
    CrossRight,
}

impl LightFacing {
    pub const ALL: [LightFacing; 4] = [
        Self::Forward,
        Self::Oncoming,
        Self::CrossLeft,
        Self::CrossRight,
    ];

    pub fn is_cross_traffic(self) -> bool {
        matches!(self, Self::CrossLeft | Self::CrossRight)
    }
}

/// Lamp colour derived from a cycle timer.
pub fn light_state_at(timer: f32) -> LightState {
    let t = timer.rem_euclid(LIGHT_CYCLE);
    if t < LIGHT_GREEN_END {
        LightState::Green
    } else if t < LIGHT_YELLOW_END {
        LightState::Yellow
    } else {
        LightState::Red
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct TrafficLight {
    pub facing: LightFacing,
    pub timer: f32,
    pub world_z: f32,
    /// Set once the player has driven past; a passed light is never re-checked.
    pub passed: bool,
}

impl TrafficLight {
    pub fn new(facing: LightFacing, world_z: f32, timer: f32) -> Self {
        Self {
            facing,
            timer: timer.rem_euclid(LIGHT_CYCLE),
            world_z,
            passed: false,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.timer = (self.timer + dt).rem_euclid(LIGHT_CYCLE);
    }

    pub fn state(&self) -> LightState {
        light_state_at(self.timer)
    }
}

/// Currently lit lamp. Written only when the colour changes so the render
/// collaborator can react to `Changed<Lamp>`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lamp(pub LightState);

pub(crate) fn cycle_traffic_lights(
    clock: Res<SimClock>,
    mut lights: Query<(&mut TrafficLight, &mut Lamp)>,
) {
    for (mut light, mut lamp) in &mut lights {
        light.advance(clock.dt);
        let state = light.state();
        lamp.set_if_neq(Lamp(state));
    }
}

pub struct TrafficLightPlugin;

impl Plugin for TrafficLightPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, cycle_traffic_lights.in_set(crate::DriveSet::Behaviour));
    }
}
