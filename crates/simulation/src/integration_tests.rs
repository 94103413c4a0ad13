//! Integration tests for curveway using the `TestDrive` harness.
//!
//! These tests spin up a headless Bevy App with `SimulationPlugin` and drive
//! whole frames through every system in `DriveSet` order.

mod handling_tests;
mod streaming_tests;
mod traffic_light_tests;

use crate::app_state::AppState;
use crate::config::{PLAYER_START_Z, SAME_DIRECTION_LANES};
use crate::hud::HudSnapshot;
use crate::player::PlayerCar;
use crate::road::RoadSegment;
use crate::test_harness::TestDrive;
use crate::visual::Pose;

// ===========================================================================
// Harness bootstrap tests
// ===========================================================================

#[test]
fn harness_starts_in_playing_state() {
    let drive = TestDrive::new();
    assert_eq!(drive.state(), AppState::Playing);
}

#[test]
fn new_game_places_car_at_start_line() {
    let drive = TestDrive::new();
    let player = drive.player();
    assert_eq!(player.z(), PLAYER_START_Z);
    assert_eq!(player.lane_offset(), Some(SAME_DIRECTION_LANES[0]));
    assert_eq!(player.speed, 0.1);
    drive.assert_score(0.0);
}

#[test]
fn new_game_spawns_full_road_ring() {
    let mut drive = TestDrive::new();
    assert_eq!(drive.count::<bevy::prelude::With<RoadSegment>>(), 60);
}

#[test]
fn quiet_road_has_nothing_but_road_and_car() {
    let mut drive = TestDrive::new();
    drive.frame(120);
    let census = drive.census();
    assert_eq!(census.scenery, 0);
    assert_eq!(census.pedestrians, 0);
    assert_eq!(census.vehicles, 0);
    assert_eq!(census.crossroads, 0);
    assert_eq!(drive.count::<bevy::prelude::With<PlayerCar>>(), 1);
}

#[test]
fn player_car_pose_follows_player() {
    let mut drive = TestDrive::new();
    drive.hold_accelerate();
    drive.frame(30);
    let z = drive.player().z();
    let world = drive.world_mut();
    let pose = *world
        .query_filtered::<&Pose, bevy::prelude::With<PlayerCar>>()
        .single(world);
    assert_eq!(pose.position.z, z);
}

#[test]
fn cruising_car_moves_down_the_road() {
    let mut drive = TestDrive::new();
    drive.frame(60);
    // 0.1 speed covers 0.05 Z units per frame.
    assert!((drive.player().z() - (PLAYER_START_Z - 3.0)).abs() < 1e-3);
    assert!((drive.scoreboard().distance - 6.0).abs() < 1e-3);
}

#[test]
fn hud_snapshot_tracks_speed_and_score() {
    let mut drive = TestDrive::new().with_score(42.9);
    drive.hold_accelerate();
    drive.frame(200);
    let hud = *drive.resource::<HudSnapshot>();
    assert_eq!(hud.speed_display, 120);
    assert_eq!(hud.score, 42);
    assert!(!hud.on_side_road);
}
