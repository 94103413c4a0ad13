//! Traffic light cycling and red-light enforcement.

use crate::audio_cues::AudioCue;
use crate::config::{CROSS_PHASE_OFFSET, LIGHT_SETBACK};
use crate::score::{FlashTint, ScreenFlash};
use crate::test_harness::TestDrive;
use crate::traffic_light::{Lamp, LightFacing, LightState, TrafficLight};

/// Far enough ahead that the car never reaches it during a test.
const DISTANT_Z: f32 = -1000.0;

fn set_all_timers(drive: &mut TestDrive, crossroad: bevy::prelude::Entity, timer: f32) {
    for light in drive.lights_of(crossroad) {
        drive
            .world_mut()
            .get_mut::<TrafficLight>(light)
            .expect("light exists")
            .timer = timer;
    }
}

fn lamp(drive: &TestDrive, light: bevy::prelude::Entity) -> LightState {
    drive.component::<Lamp>(light).expect("light has a lamp").0
}

#[test]
fn lights_cycle_green_yellow_red_green() {
    let mut drive = TestDrive::new();
    let crossroad = drive.spawn_crossroad(DISTANT_Z);
    let forward = drive.lights_of(crossroad)[0];
    assert_eq!(lamp(&drive, forward), LightState::Green);

    // Sixty frames make one time unit.
    drive.frame(310);
    assert_eq!(lamp(&drive, forward), LightState::Yellow);

    drive.frame(120);
    assert_eq!(lamp(&drive, forward), LightState::Red);

    drive.frame(300);
    assert_eq!(lamp(&drive, forward), LightState::Green);
}

#[test]
fn cross_lights_run_half_a_cycle_apart() {
    let mut drive = TestDrive::new();
    let crossroad = drive.spawn_crossroad(DISTANT_Z);
    let lights = drive.lights_of(crossroad);

    for light in lights {
        let state = drive.component::<TrafficLight>(light).expect("light exists");
        let expected = if state.facing.is_cross_traffic() {
            CROSS_PHASE_OFFSET
        } else {
            0.0
        };
        assert_eq!(state.timer, expected);
    }
    assert_eq!(lamp(&drive, lights[0]), LightState::Green);
    assert_eq!(lamp(&drive, lights[2]), LightState::Yellow);
}

#[test]
fn forward_light_stands_past_the_junction() {
    let mut drive = TestDrive::new();
    let crossroad = drive.spawn_crossroad(-50.0);
    let forward = drive
        .component::<TrafficLight>(drive.lights_of(crossroad)[0])
        .expect("light exists");
    assert_eq!(forward.facing, LightFacing::Forward);
    assert_eq!(forward.world_z, -50.0 + LIGHT_SETBACK);
}

#[test]
fn running_a_red_light_is_penalized_once() {
    let mut drive = TestDrive::new().with_speed(1.2).with_score(200.0);
    drive.hold_accelerate();
    let crossroad = drive.spawn_crossroad(-30.0);
    set_all_timers(&mut drive, crossroad, 8.0);

    let frames = drive.frame_until(200, |d| d.scoreboard().ran_red_lights > 0);
    assert!(frames.is_some(), "red light was never judged");
    drive.assert_score(150.0);
    assert!(drive.cues_this_frame().contains(&AudioCue::RedLightViolation));
    assert_eq!(drive.resource::<ScreenFlash>().tint, Some(FlashTint::Violation));

    // The car is still inside the judging window for a few more frames.
    drive.frame(20);
    assert_eq!(drive.scoreboard().ran_red_lights, 1);
    drive.assert_score(150.0);
}

#[test]
fn green_light_passes_clean() {
    let mut drive = TestDrive::new().with_speed(1.2).with_score(200.0);
    drive.hold_accelerate();
    let crossroad = drive.spawn_crossroad(-30.0);
    let forward = drive.lights_of(crossroad)[0];

    drive.frame(80);

    assert_eq!(drive.scoreboard().ran_red_lights, 0);
    drive.assert_score(200.0);
    let light = drive.component::<TrafficLight>(forward).expect("light exists");
    assert!(light.passed);
}

#[test]
fn creeping_through_red_is_allowed() {
    let mut drive = TestDrive::new().with_player_at(-25.0, 1.75).with_score(200.0);
    let crossroad = drive.spawn_crossroad(-30.0);
    set_all_timers(&mut drive, crossroad, 8.0);

    drive.frame(100);

    assert_eq!(drive.scoreboard().ran_red_lights, 0);
    drive.assert_score(200.0);
}
