//! Main-road handling: throttle, steering, lateral momentum and body motion.
//!
//! All rates are per nominal frame and scaled by `step`.

use crate::clock::ease_factor;
use crate::config::HandlingConfig;
use crate::curve::{curve_heading, curve_offset};
use crate::input::HeldKeys;

use super::{LaneState, Player};

const TILT_RATE: f32 = 0.1;
const SUSPENSION_RATE: f32 = 0.1;
const HEADING_RATE: f32 = 0.1;
const FORWARD_SCALE: f32 = 0.5;

/// World units per frame the car covers along the road at `speed`.
#[inline]
pub fn forward_rate(speed: f32) -> f32 {
    speed * FORWARD_SCALE
}

/// Throttle raises speed to the cap; no throttle settles toward base speed at
/// half rate; the brake subtracts twice the acceleration and wins over both.
pub fn update_speed(speed: f32, held: HeldKeys, handling: &HandlingConfig, step: f32) -> f32 {
    let accel = handling.acceleration * step;
    let mut speed = if held.accelerate {
        (speed + accel).min(handling.max_speed)
    } else if speed > handling.base_speed {
        (speed - accel * 0.5).max(handling.base_speed)
    } else {
        (speed + accel * 0.5).min(handling.base_speed)
    };
    if held.brake {
        speed = (speed - accel * 2.0).max(0.0);
    }
    speed
}

/// Ease the steering angle toward the held direction, returning to centre
/// at `steer_return` when released.
pub fn update_steering(steer: f32, direction: f32, speed: f32, handling: &HandlingConfig, step: f32) -> f32 {
    let target = direction * handling.max_steer_angle * (1.0 + speed * 0.5);
    let rate = if direction != 0.0 {
        handling.steer_response
    } else {
        handling.steer_return
    };
    steer + (target - steer) * ease_factor(rate, step)
}

/// Integrate lateral velocity into the lane offset, bouncing off the edges.
pub fn integrate_lateral(lane: &mut LaneState, speed: f32, steering: bool, handling: &HandlingConfig, step: f32) {
    let lateral_accel = lane.steer_angle * speed * handling.lateral_gain;
    lane.velocity_x += lateral_accel * step;
    if !steering && lane.lane_offset < handling.median_soft_min {
        lane.velocity_x += handling.lane_keep_push * step;
    }
    lane.velocity_x *= handling.lateral_drag.powf(step);
    lane.lane_offset += lane.velocity_x * step;

    let max = handling.max_lane_offset;
    if lane.lane_offset < -max {
        lane.lane_offset = -max;
        lane.velocity_x *= -handling.edge_bounce;
    } else if lane.lane_offset > max {
        lane.lane_offset = max;
        lane.velocity_x *= -handling.edge_bounce;
    }
}

/// Target suspension compression from lateral load plus a high-speed bonus.
pub fn suspension_target(velocity_x: f32, speed: f32, max_speed: f32) -> f32 {
    let n = speed / max_speed.max(f32::EPSILON);
    velocity_x.abs() * 0.5 + n * n * 0.03
}

/// One frame of main-road driving.
pub fn drive_on_road(
    player: &mut Player,
    lane: &mut LaneState,
    held: HeldKeys,
    handling: &HandlingConfig,
    step: f32,
) {
    lane.steer_angle = update_steering(lane.steer_angle, held.steer_direction(), player.speed, handling, step);
    integrate_lateral(lane, player.speed, held.steering(), handling, step);

    player.body_tilt += (-lane.velocity_x * handling.tilt_gain - player.body_tilt) * ease_factor(TILT_RATE, step);
    let target = suspension_target(lane.velocity_x, player.speed, handling.max_speed);
    player.suspension += (target - player.suspension) * ease_factor(SUSPENSION_RATE, step);

    let z = player.position.z - forward_rate(player.speed) * step;
    player.position = bevy::math::Vec3::new(curve_offset(z) + lane.lane_offset, player.suspension, z);

    let heading_target = curve_heading(z) - lane.steer_angle * handling.heading_steer_gain;
    player.heading += (heading_target - player.heading) * ease_factor(HEADING_RATE, step);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(accelerate: bool, brake: bool, left: bool, right: bool) -> HeldKeys {
        HeldKeys {
            accelerate,
            brake,
            steer_left: left,
            steer_right: right,
        }
    }

    #[test]
    fn test_throttle_caps_at_max_speed() {
        let h = HandlingConfig::default();
        let mut speed = 1.19;
        for _ in 0..5 {
            speed = update_speed(speed, held(true, false, false, false), &h, 1.0);
        }
        assert_eq!(speed, h.max_speed);
    }

    #[test]
    fn test_coasting_settles_at_base_speed() {
        let h = HandlingConfig::default();
        let mut speed = 0.5;
        for _ in 0..100 {
            speed = update_speed(speed, HeldKeys::default(), &h, 1.0);
        }
        assert_eq!(speed, h.base_speed);
        let mut speed = 0.0;
        for _ in 0..100 {
            speed = update_speed(speed, HeldKeys::default(), &h, 1.0);
        }
        assert_eq!(speed, h.base_speed);
    }

    #[test]
    fn test_brake_dominates_throttle() {
        let h = HandlingConfig::default();
        let speed = update_speed(0.5, held(true, true, false, false), &h, 1.0);
        assert!(speed < 0.5);
        let mut speed = 0.3;
        for _ in 0..50 {
            speed = update_speed(speed, held(false, true, false, false), &h, 1.0);
        }
        assert_eq!(speed, 0.0);
    }

    #[test]
    fn test_steering_returns_faster_than_it_engages() {
        let h = HandlingConfig::default();
        let engaged = update_steering(0.0, 1.0, 0.0, &h, 1.0);
        let full = h.max_steer_angle;
        let released = update_steering(full, 0.0, 0.0, &h, 1.0);
        assert!(engaged / full < (full - released) / full);
    }

    #[test]
    fn test_lane_bounces_off_right_edge() {
        let h = HandlingConfig::default();
        let mut lane = LaneState {
            lane_offset: 5.9,
            steer_angle: 0.0,
            velocity_x: 0.5,
        };
        integrate_lateral(&mut lane, 0.5, true, &h, 1.0);
        assert_eq!(lane.lane_offset, h.max_lane_offset);
        assert!(lane.velocity_x < 0.0);
    }

    #[test]
    fn test_hard_left_settles_on_left_edge() {
        let h = HandlingConfig::default();
        let mut player = Player::default();
        player.speed = 1.2;
        let mut lane = LaneState {
            lane_offset: 3.0,
            ..Default::default()
        };
        let keys = held(false, false, true, false);
        for _ in 0..600 {
            drive_on_road(&mut player, &mut lane, keys, &h, 1.0);
        }
        for _ in 0..120 {
            drive_on_road(&mut player, &mut lane, keys, &h, 1.0);
            assert_eq!(lane.lane_offset, -h.max_lane_offset);
        }
    }

    #[test]
    fn test_lane_keep_pushes_back_across_median() {
        let h = HandlingConfig::default();
        let mut player = Player::default();
        let mut lane = LaneState {
            lane_offset: -1.0,
            ..Default::default()
        };
        for _ in 0..600 {
            drive_on_road(&mut player, &mut lane, HeldKeys::default(), &h, 1.0);
        }
        assert!(lane.lane_offset >= h.median_soft_min - 0.1, "lane {}", lane.lane_offset);
    }

    #[test]
    fn test_forward_motion_follows_curve() {
        let h = HandlingConfig::default();
        let mut player = Player::default();
        player.speed = 1.0;
        let mut lane = LaneState {
            lane_offset: 1.75,
            ..Default::default()
        };
        let z0 = player.z();
        drive_on_road(&mut player, &mut lane, HeldKeys::default(), &h, 1.0);
        assert!((player.z() - (z0 - 0.5)).abs() < 1e-5);
        assert!((player.position.x - (curve_offset(player.z()) + lane.lane_offset)).abs() < 1e-4);
    }

    #[test]
    fn test_tilt_leans_into_left_steer() {
        let h = HandlingConfig::default();
        let mut player = Player::default();
        player.speed = 1.0;
        let mut lane = LaneState {
            lane_offset: 1.75,
            ..Default::default()
        };
        for _ in 0..20 {
            drive_on_road(&mut player, &mut lane, held(false, false, true, false), &h, 1.0);
        }
        assert!(lane.velocity_x < 0.0);
        assert!(player.body_tilt > 0.0);
    }
}
