//! Junction turns and side-road travel.
//!
//! A turn follows a fixed quarter circle of radius [`TURN_RADIUS`] whose
//! progress is `elapsed_frames * TURN_RATE`, so a full turn always takes the
//! same number of frames regardless of speed. Finishing the arc snaps the car
//! onto the side road; driving its full length teleports the car back onto
//! the main road ahead of the junction.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::clock::ease_factor;
use crate::config::{
    HandlingConfig, JUNCTION_CAPTURE_X, JUNCTION_CAPTURE_Z, REJOIN_AHEAD, SIDE_ROAD_LENGTH,
    SIDE_ROAD_OFFSET, TURN_MAX_SPEED, TURN_MIN_SPEED, TURN_RADIUS, TURN_ROLL,
};
use crate::curve::{curve_heading, curve_offset};
use crate::input::HeldKeys;

use super::{DriveMode, LaneState, Player, SideRoadState, TurnDirection, TurnState};

const TURN_HEADING_RATE: f32 = 0.2;
const TURN_ROLL_RATE: f32 = 0.1;
const SIDE_ROAD_SCALE: f32 = 0.5;

/// Whether `point` lies inside the capture box of a junction at `center`.
pub fn in_capture_box(point: Vec2, center: Vec2) -> bool {
    (point.y - center.y).abs() < JUNCTION_CAPTURE_Z && (point.x - center.x).abs() < JUNCTION_CAPTURE_X
}

/// Start a turn if the player is on the main road inside a junction's capture
/// box, within the turning speed band, with a steer key held.
pub fn try_begin_turn(
    player: &Player,
    held: HeldKeys,
    junctions: impl IntoIterator<Item = Vec2>,
) -> Option<TurnState> {
    if !player.is_on_road() {
        return None;
    }
    if player.speed <= TURN_MIN_SPEED || player.speed >= TURN_MAX_SPEED {
        return None;
    }
    let direction = TurnDirection::from_steer(held.steer_direction())?;
    let here = player.xz();
    let junction = junctions.into_iter().find(|&center| in_capture_box(here, center))?;
    Some(TurnState {
        direction,
        elapsed: 0.0,
        start: here,
        start_heading: player.heading,
        junction,
    })
}

/// Point on the turn arc at `progress` in `[0, 1]`.
pub fn arc_point(start: Vec2, direction: TurnDirection, progress: f32) -> Vec2 {
    let theta = progress.clamp(0.0, 1.0) * FRAC_PI_2;
    let sign = direction.world_sign();
    Vec2::new(
        start.x + sign * TURN_RADIUS * (1.0 - theta.cos()),
        start.y - TURN_RADIUS * theta.sin(),
    )
}

/// Heading of the arc tangent at `progress`.
pub fn arc_heading(start_heading: f32, direction: TurnDirection, progress: f32) -> f32 {
    start_heading - direction.world_sign() * progress.clamp(0.0, 1.0) * FRAC_PI_2
}

/// Advance one frame along the arc. Returns `true` once the turn is complete.
pub fn advance_turn(player: &mut Player, turn: &mut TurnState, step: f32) -> bool {
    turn.elapsed += step;
    let progress = turn.progress();
    let point = arc_point(turn.start, turn.direction, progress);
    player.position.x = point.x;
    player.position.z = point.y;

    let target = arc_heading(turn.start_heading, turn.direction, progress);
    player.heading += (target - player.heading) * ease_factor(TURN_HEADING_RATE, step);
    let roll = -turn.direction.world_sign() * TURN_ROLL;
    player.body_tilt += (roll - player.body_tilt) * ease_factor(TURN_ROLL_RATE, step);

    progress >= 1.0
}

/// Snap onto the side road next to the junction.
pub fn enter_side_road(player: &mut Player, turn: &TurnState) -> DriveMode {
    let sign = turn.direction.world_sign();
    player.position.x = turn.junction.x + sign * SIDE_ROAD_OFFSET;
    player.position.z = turn.junction.y;
    player.heading = arc_heading(turn.start_heading, turn.direction, 1.0);
    DriveMode::OnSideRoad(SideRoadState {
        direction: turn.direction,
        junction: turn.junction,
        travelled: 0.0,
    })
}

/// Drive along world X. Returns `true` once the side road is used up.
pub fn advance_side_road(player: &mut Player, side: &mut SideRoadState, step: f32) -> bool {
    let dx = side.direction.world_sign() * player.speed * SIDE_ROAD_SCALE * step;
    player.position.x += dx;
    side.travelled += dx.abs();
    player.body_tilt += (0.0 - player.body_tilt) * ease_factor(TURN_ROLL_RATE, step);
    side.travelled >= SIDE_ROAD_LENGTH
}

/// Teleport back onto the main road ahead of the departure junction.
pub fn rejoin_main_road(player: &mut Player, side: &SideRoadState, handling: &HandlingConfig) -> DriveMode {
    let z = side.junction.y - REJOIN_AHEAD;
    let lane_offset = handling.start_lane;
    player.position = Vec3::new(curve_offset(z) + lane_offset, player.suspension, z);
    player.heading = curve_heading(z);
    player.body_tilt = 0.0;
    DriveMode::OnRoad(LaneState {
        lane_offset,
        ..Default::default()
    })
}
