//! Streaming keeps the world populated ahead and bounded behind.

use bevy::prelude::*;

use crate::config::{DrivingConfig, SEGMENT_LENGTH};
use crate::pedestrian::Pedestrian;
use crate::road::RoadSegment;
use crate::test_harness::{TestDrive, WorldCensus};
use crate::traffic_light::TrafficLight;
use crate::vehicle::Vehicle;
use crate::visual::Pose;

const CEILING: WorldCensus = WorldCensus {
    road_segments: 60,
    scenery: 250,
    pedestrians: 40,
    vehicles: 20,
    crossroads: 3,
    traffic_lights: 12,
};

#[test]
fn working_set_stays_bounded_on_a_long_drive() {
    let mut drive = TestDrive::streaming();
    drive.hold_accelerate();
    for _ in 0..30 {
        drive.frame(100);
        drive.assert_census_within(CEILING);
    }
    assert!(drive.player().z() < -500.0, "car only reached {}", drive.player().z());
}

#[test]
fn road_ring_follows_the_car() {
    let mut drive = TestDrive::new();
    drive.hold_accelerate();
    drive.frame(600);

    let z = drive.player().z();
    let ring = 60.0 * SEGMENT_LENGTH;
    let world = drive.world_mut();
    for segment in world.query::<&RoadSegment>().iter(world) {
        assert!(segment.world_z <= z + 30.0, "segment {segment:?} left behind");
        assert!(segment.world_z > z + 30.0 - ring - 1e-3, "segment {segment:?} too far ahead");
    }
}

#[test]
fn recycled_segments_sit_on_the_curve() {
    let mut drive = TestDrive::new();
    drive.hold_accelerate();
    drive.frame(300);
    let world = drive.world_mut();
    for (segment, pose) in world.query::<(&RoadSegment, &Pose)>().iter(world) {
        assert_eq!(*pose, segment.pose());
    }
}

#[test]
fn traffic_appears_ahead_of_the_car() {
    let mut drive = TestDrive::streaming();
    drive.hold_accelerate();
    drive.frame(200);
    assert!(drive.count::<With<Vehicle>>() > 0);
    assert!(drive.census().crossroads > 0);
}

#[test]
fn vehicles_live_only_near_the_car() {
    let mut drive = TestDrive::streaming();
    drive.hold_accelerate();
    drive.frame(500);
    let z = drive.player().z();
    let world = drive.world_mut();
    for pose in world.query_filtered::<&Pose, With<Vehicle>>().iter(world) {
        let vz = pose.position.z;
        assert!(vz <= z + 50.0 + 1.0 && vz >= z - 150.0 - 1.0, "vehicle at {vz}, car at {z}");
    }
}

#[test]
fn passed_pedestrians_count_as_avoided() {
    let mut drive = TestDrive::new();
    let walker = drive.spawn_pedestrian(Pedestrian::walking(1.0, 0.02), 100.0, -10.0);
    drive.hold_accelerate();
    let frames = drive.frame_until(300, |d| d.component::<Pedestrian>(walker).is_none());
    assert!(frames.is_some(), "pedestrian was never despawned");
    assert_eq!(drive.scoreboard().pedestrians_avoided, 1);
}

#[test]
fn quiet_streaming_still_despawns_passed_crossroads() {
    let mut drive = TestDrive::new();
    let crossroad = drive.spawn_crossroad(-20.0);
    let lights = drive.lights_of(crossroad);
    drive.hold_accelerate();
    drive.frame(300);
    assert_eq!(drive.census().crossroads, 0);
    for light in lights {
        assert!(drive.component::<TrafficLight>(light).is_none());
    }
}

#[test]
fn out_of_range_chances_keep_streaming() {
    let mut config = DrivingConfig::default();
    config.streaming.pedestrians.chance = 1.5;
    config.streaming.crossing_chance = -1.0;
    config.streaming.oncoming.chance = f32::NAN;
    let mut drive = TestDrive::with_config(config);
    drive.hold_accelerate();
    drive.frame(200);
    assert!(drive.count::<With<Pedestrian>>() > 0);
    let world = drive.world_mut();
    assert!(world.query::<&Vehicle>().iter(world).all(|v| !v.oncoming));
}

#[test]
fn same_direction_traffic_is_slower_than_a_cruising_car() {
    let mut config = DrivingConfig::default();
    config.streaming.same_direction.chance = 1.0;
    let mut drive = TestDrive::with_config(config);
    drive.hold_accelerate();
    drive.frame(300);
    let cruise = crate::player::handling::forward_rate(DrivingConfig::default().handling.base_speed);
    let world = drive.world_mut();
    let mut seen = 0;
    for vehicle in world.query::<&Vehicle>().iter(world).filter(|v| !v.oncoming) {
        assert!(vehicle.speed < cruise, "{vehicle:?} outruns a cruising car");
        seen += 1;
    }
    assert!(seen > 0, "no same-direction traffic spawned");
}
