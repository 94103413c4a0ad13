//! World streaming: spawn cursors ahead of the player and despawn margins
//! behind it.
//!
//! Each entity class keeps a cursor. Once the player is more than one
//! `spacing` past the cursor, a batch is rolled `lead` units ahead of the
//! cursor and the cursor steps forward by `spacing`, at most one batch per
//! class per frame. When the player jumps ahead (the side-road rejoin), the
//! cursor catches up and batches that would land behind the car are dropped.
//! Despawn margins are matched to the leads so the live working set stays
//! bounded however far the player drives.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{
    clamp_chance, DrivingConfig, SpawnRule, MIN_SPACING, StreamingConfig, ONCOMING_LANES, SAME_DIRECTION_LANES, SIDEWALK_INNER,
    SIDEWALK_OUTER,
};
use crate::crossroad::{spawn_crossroad, Crossroad};
use crate::curve::curve_offset;
use crate::pedestrian::{spawn_pedestrian, Pedestrian};
use crate::player::handling::forward_rate;
use crate::player::Player;
use crate::scenery::{spawn_scenery_batch, Scenery};
use crate::score::Scoreboard;
use crate::sim_rng::SimRng;
use crate::vehicle::{spawn_vehicle, Vehicle, VehicleType};
use crate::visual::Pose;

/// Scenery cursor at the start of a game; the first batches are pre-rolled.
pub const SCENERY_CURSOR_START: f32 = 10.0;
pub const PREROLLED_SCENERY_BATCHES: usize = 20;

const PEDESTRIAN_JITTER: f32 = 3.0;
const VEHICLE_JITTER: f32 = 5.0;
const WALK_SPEED: (f32, f32) = (0.02, 0.04);
/// Same-direction traffic, as a fraction of the player's cruising rate.
const SAME_DIRECTION_SPEED: (f32, f32) = (0.4, 0.8);
const ONCOMING_SPEED: (f32, f32) = (0.2, 0.4);

/// A batch must land this far ahead of the car, clear of spawn jitter and
/// the overtake margin.
pub const SPAWN_CLEARANCE: f32 = 10.0;

/// Last spawn position per streamed class.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpawnCursors {
    pub scenery: f32,
    pub pedestrians: f32,
    pub same_direction: f32,
    pub oncoming: f32,
    pub crossroads: f32,
}

impl Default for SpawnCursors {
    fn default() -> Self {
        Self::new(crate::config::PLAYER_START_Z, &StreamingConfig::default())
    }
}

impl SpawnCursors {
    /// Cursors for a player starting at `start_z`.
    pub fn new(start_z: f32, streaming: &StreamingConfig) -> Self {
        Self {
            scenery: SCENERY_CURSOR_START,
            pedestrians: start_z + streaming.pedestrians.spacing,
            same_direction: start_z + streaming.same_direction.spacing,
            oncoming: start_z + streaming.oncoming.spacing,
            crossroads: start_z + streaming.crossroads.spacing,
        }
    }
}

/// Consume one batch from `cursor` if the player has crossed it, returning
/// the batch Z. Batches that would land behind the car are skipped.
pub fn take_batch(cursor: &mut f32, player_z: f32, rule: &SpawnRule) -> Option<f32> {
    let spacing = rule.spacing.max(MIN_SPACING);
    while player_z < *cursor - spacing {
        let z = *cursor - rule.lead;
        *cursor -= spacing;
        if z < player_z - SPAWN_CLEARANCE {
            return Some(z);
        }
    }
    None
}

/// Roll a probability taken from config. Out-of-range values clamp.
pub fn roll(rng: &mut impl Rng, chance: f32) -> bool {
    rng.gen_bool(clamp_chance(chance))
}

/// Whether something at `z` has fallen `margin` units behind the player.
#[inline]
pub fn is_behind(z: f32, player_z: f32, margin: f32) -> bool {
    z > player_z + margin
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

pub(crate) fn stream_scenery(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    mut cursors: ResMut<SpawnCursors>,
    mut rng: ResMut<SimRng>,
) {
    let streaming = &config.streaming;
    if !streaming.spawn_scenery {
        return;
    }
    let Some(z) = take_batch(&mut cursors.scenery, player.z(), &streaming.scenery) else {
        return;
    };
    if roll(&mut rng.0, streaming.scenery.chance) {
        let count = spawn_scenery_batch(&mut commands, &mut rng.0, z);
        trace!("Scenery batch at z={:.1}: {} objects", z, count);
    }
}

pub(crate) fn stream_pedestrians(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    mut cursors: ResMut<SpawnCursors>,
    mut rng: ResMut<SimRng>,
) {
    let streaming = &config.streaming;
    if !streaming.spawn_pedestrians {
        return;
    }
    let Some(z) = take_batch(&mut cursors.pedestrians, player.z(), &streaming.pedestrians) else {
        return;
    };
    let rng = &mut rng.0;
    let mut count = 0;
    for side in [-1.0f32, 1.0] {
        if !roll(rng, streaming.pedestrians.chance) {
            continue;
        }
        let pz = z + rng.gen_range(-PEDESTRIAN_JITTER..PEDESTRIAN_JITTER);
        let x = curve_offset(pz) + side * rng.gen_range(SIDEWALK_INNER..SIDEWALK_OUTER);
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let walker = Pedestrian::walking(direction, rng.gen_range(WALK_SPEED.0..WALK_SPEED.1));
        spawn_pedestrian(&mut commands, walker, x, pz, rng.gen());
        count += 1;
    }
    if roll(rng, streaming.crossing_chance) {
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let x = curve_offset(z) + side * SIDEWALK_INNER;
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let crosser = Pedestrian::crossing(direction, rng.gen_range(WALK_SPEED.0..WALK_SPEED.1), -side);
        spawn_pedestrian(&mut commands, crosser, x, z, rng.gen());
        count += 1;
    }
    trace!("Pedestrian batch at z={:.1}: {}", z, count);
}

fn roll_vehicle(
    commands: &mut Commands,
    rng: &mut impl Rng,
    z: f32,
    chance: f32,
    oncoming: bool,
    cruise: f32,
) -> Option<Entity> {
    if !roll(rng, chance) {
        return None;
    }
    let (lanes, speed) = if oncoming {
        (ONCOMING_LANES, ONCOMING_SPEED)
    } else {
        let (lo, hi) = SAME_DIRECTION_SPEED;
        (SAME_DIRECTION_LANES, (lo * cruise, hi * cruise))
    };
    let lane = *lanes.choose(rng)?;
    let vehicle = Vehicle::new(VehicleType::random(rng), lane, rng.gen_range(speed.0..speed.1), oncoming);
    let vz = z + rng.gen_range(-VEHICLE_JITTER..VEHICLE_JITTER);
    Some(spawn_vehicle(commands, vehicle, vz, rng.gen()))
}

pub(crate) fn stream_traffic(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    mut cursors: ResMut<SpawnCursors>,
    mut rng: ResMut<SimRng>,
) {
    let streaming = &config.streaming;
    if !streaming.spawn_vehicles {
        return;
    }
    let cruise = forward_rate(config.handling.base_speed);
    if let Some(z) = take_batch(&mut cursors.same_direction, player.z(), &streaming.same_direction) {
        if roll_vehicle(&mut commands, &mut rng.0, z, streaming.same_direction.chance, false, cruise).is_some() {
            trace!("Same-direction vehicle at z={:.1}", z);
        }
    }
    if let Some(z) = take_batch(&mut cursors.oncoming, player.z(), &streaming.oncoming) {
        if roll_vehicle(&mut commands, &mut rng.0, z, streaming.oncoming.chance, true, cruise).is_some() {
            trace!("Oncoming vehicle at z={:.1}", z);
        }
    }
}

pub(crate) fn stream_crossroads(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    mut cursors: ResMut<SpawnCursors>,
    mut rng: ResMut<SimRng>,
) {
    let streaming = &config.streaming;
    if !streaming.spawn_crossroads {
        return;
    }
    let Some(z) = take_batch(&mut cursors.crossroads, player.z(), &streaming.crossroads) else {
        return;
    };
    if roll(&mut rng.0, streaming.crossroads.chance) {
        spawn_crossroad(&mut commands, z, rng.0.gen());
        trace!("Crossroad at z={:.1}", z);
    }
}

// ---------------------------------------------------------------------------
// Despawning
// ---------------------------------------------------------------------------

pub(crate) fn despawn_passed_scenery(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    scenery: Query<(Entity, &Pose), With<Scenery>>,
) {
    let margin = config.streaming.scenery_margin;
    for (entity, pose) in &scenery {
        if is_behind(pose.position.z, player.z(), margin) {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Pedestrians left behind unharmed count as avoided.
pub(crate) fn despawn_passed_pedestrians(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    pedestrians: Query<(Entity, &Pedestrian, &Pose)>,
    mut scoreboard: ResMut<Scoreboard>,
) {
    let margin = config.streaming.pedestrian_margin;
    for (entity, pedestrian, pose) in &pedestrians {
        if is_behind(pose.position.z, player.z(), margin) {
            if !pedestrian.hit {
                scoreboard.pedestrians_avoided += 1;
            }
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Vehicles live inside a window around the player, not just ahead of it.
pub(crate) fn despawn_distant_vehicles(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    vehicles: Query<(Entity, &Pose), With<Vehicle>>,
) {
    let streaming = &config.streaming;
    let z = player.z();
    for (entity, pose) in &vehicles {
        let vz = pose.position.z;
        if is_behind(vz, z, streaming.vehicle_margin_behind) || vz < z - streaming.vehicle_margin_ahead {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// A crossroad takes its lights and stubs with it.
pub(crate) fn despawn_passed_crossroads(
    mut commands: Commands,
    player: Res<Player>,
    config: Res<DrivingConfig>,
    crossroads: Query<(Entity, &Crossroad)>,
) {
    let margin = config.streaming.crossroad_margin;
    for (entity, crossroad) in &crossroads {
        if is_behind(crossroad.z(), player.z(), margin) {
            for owned in crossroad.owned() {
                if let Some(e) = commands.get_entity(owned) {
                    e.despawn_recursive();
                }
            }
            commands.entity(entity).despawn_recursive();
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct StreamingPlugin;

impl Plugin for StreamingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnCursors>().add_systems(
            Update,
            (
                crate::road::recycle_road_segments,
                stream_scenery,
                stream_pedestrians,
                stream_traffic,
                stream_crossroads,
                despawn_passed_scenery,
                despawn_passed_pedestrians,
                despawn_distant_vehicles,
                despawn_passed_crossroads,
            )
                .chain()
                .in_set(crate::DriveSet::Streaming),
        );
    }
}
