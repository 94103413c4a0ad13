//! Whole-frame handling: throttle, brake, and lane limits.

use crate::audio_cues::{AudioCue, EngineHum};
use crate::config::SAME_DIRECTION_LANES;
use crate::input::HeldKeys;
use crate::test_harness::TestDrive;

#[test]
fn throttle_reaches_top_speed() {
    let mut drive = TestDrive::new();
    drive.hold_accelerate();
    drive.frame(60);
    drive.assert_speed(1.2);
}

#[test]
fn released_throttle_settles_to_cruise() {
    let mut drive = TestDrive::new().with_speed(1.2);
    drive.frame(300);
    drive.assert_speed(0.1);
}

#[test]
fn brake_can_stop_the_car() {
    let mut drive = TestDrive::new().with_speed(0.6);
    drive.hold(HeldKeys {
        brake: true,
        ..Default::default()
    });
    drive.frame(20);
    drive.assert_speed(0.0);

    let z = drive.player().z();
    drive.frame(10);
    assert_eq!(drive.player().z(), z);
}

#[test]
fn braking_at_speed_squeals() {
    let mut drive = TestDrive::new().with_speed(1.0);
    drive.hold(HeldKeys {
        brake: true,
        ..Default::default()
    });
    drive.frame(1);
    assert!(drive.cues_this_frame().contains(&AudioCue::BrakeSqueal));
}

#[test]
fn lane_offset_clamps_at_road_edge() {
    let mut drive = TestDrive::new();
    drive.hold(HeldKeys {
        accelerate: true,
        steer_left: true,
        ..Default::default()
    });
    drive.frame(600);
    for _ in 0..60 {
        drive.frame(1);
        let lane = drive.player().lane_offset().expect("on the main road");
        assert!(lane >= -6.0, "lane offset {lane} left the road");
    }
    drive.assert_lane(-6.0);
}

#[test]
fn lane_keeping_nudges_back_from_the_median() {
    let mut drive = TestDrive::new().with_player_at(2.0, 0.0);
    drive.frame(200);
    let lane = drive.player().lane_offset().expect("on the main road");
    assert!(lane > 0.0, "lane offset {lane} did not drift right");
}

#[test]
fn released_steering_holds_lane() {
    let mut drive = TestDrive::new();
    drive.frame(200);
    drive.assert_lane(SAME_DIRECTION_LANES[0]);
}

#[test]
fn engine_hum_rises_with_speed() {
    let mut drive = TestDrive::new();
    drive.frame(1);
    let idle = *drive.resource::<EngineHum>();
    drive.hold_accelerate();
    drive.frame(60);
    let flat_out = *drive.resource::<EngineHum>();
    assert!(flat_out.pitch_hz > idle.pitch_hz);
    assert!(flat_out.volume > idle.volume);
}
