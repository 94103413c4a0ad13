//! Crossroads: a junction on the curve with four lights and two side-road stubs.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use crate::config::{
    CROSS_PHASE_OFFSET, LIGHT_SETBACK, ROAD_HALF_WIDTH, SIDEWALK_INNER, SIDE_ROAD_LENGTH,
    SIDE_ROAD_OFFSET,
};
use crate::curve::{curve_heading, curve_offset};
use crate::player::TurnDirection;
use crate::traffic_light::{Lamp, LightFacing, TrafficLight};
use crate::visual::{Pose, Visual, VisualKind};

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Crossroad {
    /// `(curve_x, world_z)` of the junction centre.
    pub center: Vec2,
    pub lights: [Entity; 4],
    pub stubs: [Entity; 2],
}

impl Crossroad {
    pub fn z(&self) -> f32 {
        self.center.y
    }

    /// Every entity owned by this crossroad, itself excluded.
    pub fn owned(&self) -> impl Iterator<Item = Entity> + '_ {
        self.lights.iter().chain(self.stubs.iter()).copied()
    }
}

/// Decorative spur drawn beside a crossroad.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SideRoadStub {
    pub direction: TurnDirection,
    pub length: f32,
}

/// Ground position and yaw of the light facing `facing` at a junction.
pub fn light_placement(center: Vec2, facing: LightFacing) -> (Vec2, f32) {
    let (side, along, yaw) = match facing {
        LightFacing::Forward => (1.0, LIGHT_SETBACK, 0.0),
        LightFacing::Oncoming => (-1.0, -LIGHT_SETBACK, PI),
        LightFacing::CrossLeft => (-1.0, LIGHT_SETBACK, -FRAC_PI_2),
        LightFacing::CrossRight => (1.0, -LIGHT_SETBACK, FRAC_PI_2),
    };
    (Vec2::new(center.x + side * SIDEWALK_INNER, center.y + along), yaw)
}

/// Spawn a crossroad at `z` along with its lights and stubs.
pub fn spawn_crossroad(commands: &mut Commands, z: f32, seed: u32) -> Entity {
    let center = Vec2::new(curve_offset(z), z);

    let lights = LightFacing::ALL.map(|facing| {
        let (at, yaw) = light_placement(center, facing);
        let timer = if facing.is_cross_traffic() {
            CROSS_PHASE_OFFSET
        } else {
            0.0
        };
        let light = TrafficLight::new(facing, at.y, timer);
        let lamp = Lamp(light.state());
        commands
            .spawn((
                light,
                lamp,
                Visual::new(VisualKind::TrafficLight, seed),
                Pose::ground(at.x, at.y, yaw),
            ))
            .id()
    });

    let stub_length = SIDE_ROAD_OFFSET - ROAD_HALF_WIDTH + SIDE_ROAD_LENGTH;
    let stubs = [TurnDirection::Left, TurnDirection::Right].map(|direction| {
        let x = center.x + direction.world_sign() * (ROAD_HALF_WIDTH + stub_length * 0.5);
        commands
            .spawn((
                SideRoadStub {
                    direction,
                    length: stub_length,
                },
                Visual::new(VisualKind::SideRoad, seed),
                Pose::ground(x, z, FRAC_PI_2),
            ))
            .id()
    });

    commands
        .spawn((
            Crossroad { center, lights, stubs },
            Visual::new(VisualKind::Crossroad, seed),
            Pose::ground(center.x, z, curve_heading(z)),
        ))
        .id()
}
