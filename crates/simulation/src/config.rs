//! Fixed geometry constants and the tunable [`DrivingConfig`] resource.
//!
//! Geometry (road width, lanes, curve terms, light timing) is baked in as
//! `pub const`s. Everything a player or tester might want to tweak lives in
//! [`DrivingConfig`], which can be loaded from a JSON file and falls back to
//! defaults on any error.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Road geometry
// ---------------------------------------------------------------------------

/// Nominal frame delta in game-time units. Timers advance by this much per frame.
pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;

pub const ROAD_HALF_WIDTH: f32 = 7.0;
pub const SIDEWALK_INNER: f32 = 7.5;
pub const SIDEWALK_OUTER: f32 = 8.5;

/// Lane centres measured from the curve centre. Positive X is the player's side.
pub const SAME_DIRECTION_LANES: [f32; 2] = [1.75, 5.25];
pub const ONCOMING_LANES: [f32; 2] = [-1.75, -5.25];

pub const SEGMENT_LENGTH: f32 = 10.0;

/// `(amplitude, frequency, phase)` for each sine term of the road centreline.
pub const CURVE_TERMS: [(f32, f32, f32); 3] = [(20.0, 0.005, 0.0), (12.0, 0.013, 1.3), (4.0, 0.031, 0.7)];

/// Half step of the symmetric finite difference used for headings.
pub const HEADING_STEP: f32 = 0.1;

// ---------------------------------------------------------------------------
// Traffic lights
// ---------------------------------------------------------------------------

pub const LIGHT_CYCLE: f32 = 12.0;
pub const LIGHT_GREEN_END: f32 = 5.0;
pub const LIGHT_YELLOW_END: f32 = 7.0;
/// Initial timer of the two cross-traffic lights at a crossroad.
pub const CROSS_PHASE_OFFSET: f32 = 6.0;
/// Distance of the lights from the crossroad centreline, along the road.
pub const LIGHT_SETBACK: f32 = 4.0;
pub const RED_LIGHT_MIN_SPEED: f32 = 0.3;

// ---------------------------------------------------------------------------
// Junctions and side roads
// ---------------------------------------------------------------------------

pub const JUNCTION_CAPTURE_Z: f32 = 5.0;
pub const JUNCTION_CAPTURE_X: f32 = 8.0;
pub const TURN_MIN_SPEED: f32 = 0.1;
pub const TURN_MAX_SPEED: f32 = 0.8;
pub const TURN_RADIUS: f32 = 8.0;
/// Turn progress gained per nominal frame; a full turn takes 50 frames.
pub const TURN_RATE: f32 = 0.02;
pub const TURN_ROLL: f32 = 0.05;
pub const SIDE_ROAD_OFFSET: f32 = 12.0;
pub const SIDE_ROAD_LENGTH: f32 = 50.0;
/// How far ahead of the departure junction the player rejoins the main road.
pub const REJOIN_AHEAD: f32 = 100.0;

// ---------------------------------------------------------------------------
// Collision footprints (half extents on X/Z)
// ---------------------------------------------------------------------------

/// Nominal player footprint shrunk by 0.2 laterally and 0.3 longitudinally.
pub const PLAYER_HALF_EXTENTS: Vec2 = Vec2::new(0.6, 1.05);
pub const PEDESTRIAN_HALF_EXTENTS: Vec2 = Vec2::new(0.3, 0.3);

pub const PLAYER_START_Z: f32 = 2.0;
/// Floor for spawn spacing; a zero spacing would never advance a cursor.
pub const MIN_SPACING: f32 = 1.0;
pub const SCREEN_FLASH_DURATION: f32 = 0.3;

// ---------------------------------------------------------------------------
// Tunables
// ---------------------------------------------------------------------------

/// Longitudinal and lateral handling of the player car. Per-frame values are
/// expressed for one nominal frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlingConfig {
    pub base_speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub max_steer_angle: f32,
    pub steer_response: f32,
    pub steer_return: f32,
    pub lateral_gain: f32,
    pub lateral_drag: f32,
    pub max_lane_offset: f32,
    /// Soft minimum keeping the car on its own side of the median.
    pub median_soft_min: f32,
    pub lane_keep_push: f32,
    pub edge_bounce: f32,
    pub tilt_gain: f32,
    pub heading_steer_gain: f32,
    pub start_lane: f32,
}

impl Default for HandlingConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.1,
            max_speed: 1.2,
            acceleration: 0.02,
            max_steer_angle: 0.008,
            steer_response: 0.15,
            steer_return: 0.25,
            lateral_gain: 2.0,
            lateral_drag: 0.92,
            max_lane_offset: 6.0,
            median_soft_min: 0.5,
            lane_keep_push: 0.002,
            edge_bounce: 0.3,
            tilt_gain: 1.5,
            heading_steer_gain: 0.8,
            start_lane: 1.75,
        }
    }
}

/// Spawn cadence for one streamed entity class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Longitudinal distance between batches.
    pub spacing: f32,
    /// How far ahead of the cursor a batch is placed.
    pub lead: f32,
    /// Probability gate for each candidate in a batch. Scenery and crossroads
    /// gate the whole batch.
    pub chance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    pub segment_count: usize,
    pub recycle_distance: f32,
    pub scenery: SpawnRule,
    pub pedestrians: SpawnRule,
    pub crossing_chance: f32,
    pub same_direction: SpawnRule,
    pub oncoming: SpawnRule,
    pub crossroads: SpawnRule,
    pub scenery_margin: f32,
    pub pedestrian_margin: f32,
    pub vehicle_margin_behind: f32,
    pub vehicle_margin_ahead: f32,
    pub crossroad_margin: f32,
    pub spawn_scenery: bool,
    pub spawn_pedestrians: bool,
    pub spawn_vehicles: bool,
    pub spawn_crossroads: bool,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            segment_count: 60,
            recycle_distance: 30.0,
            scenery: SpawnRule { spacing: 5.0, lead: 100.0, chance: 1.0 },
            pedestrians: SpawnRule { spacing: 15.0, lead: 90.0, chance: 0.6 },
            crossing_chance: 0.3,
            same_direction: SpawnRule { spacing: 40.0, lead: 120.0, chance: 0.7 },
            oncoming: SpawnRule { spacing: 35.0, lead: 140.0, chance: 0.6 },
            crossroads: SpawnRule { spacing: 150.0, lead: 250.0, chance: 1.0 },
            scenery_margin: 20.0,
            pedestrian_margin: 30.0,
            vehicle_margin_behind: 50.0,
            vehicle_margin_ahead: 150.0,
            crossroad_margin: 40.0,
            spawn_scenery: true,
            spawn_pedestrians: true,
            spawn_vehicles: true,
            spawn_crossroads: true,
        }
    }
}

/// Rewards (positive) and penalties (subtracted, score floored at zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub overtake: f32,
    pub near_miss: f32,
    pub turn_complete: f32,
    pub side_road_return: f32,
    pub pedestrian_hit: f32,
    pub oncoming_hit: f32,
    pub same_direction_hit: f32,
    pub red_light: f32,
    /// Score earned per unit of distance driven, on top of the event rewards.
    pub distance_rate: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            overtake: 10.0,
            near_miss: 25.0,
            turn_complete: 50.0,
            side_road_return: 100.0,
            pedestrian_hit: 100.0,
            oncoming_hit: 150.0,
            same_direction_hit: 75.0,
            red_light: 50.0,
            distance_rate: 0.5,
        }
    }
}

/// How the frame delta is sourced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockMode {
    /// Every frame advances by exactly [`NOMINAL_FRAME_DT`].
    #[default]
    FrameLocked,
    /// Frames advance by the measured wall-clock delta, clamped.
    Measured,
}

/// Top-level tunables, inserted as a resource before `SimulationPlugin`.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivingConfig {
    pub handling: HandlingConfig,
    pub streaming: StreamingConfig,
    pub scoring: ScoringConfig,
    pub clock: ClockMode,
    /// Fixed world seed. `None` seeds each new game from the system clock.
    pub seed: Option<u64>,
}

/// Probabilities from config clamp into `[0, 1]`; NaN counts as never.
pub fn clamp_chance(chance: f32) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        f64::from(chance.clamp(0.0, 1.0))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DrivingConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp out-of-range values loaded from a file instead of rejecting them.
    pub fn sanitized(mut self) -> Self {
        let s = &mut self.streaming;
        for rule in [&mut s.scenery, &mut s.pedestrians, &mut s.same_direction, &mut s.oncoming, &mut s.crossroads] {
            let chance = clamp_chance(rule.chance) as f32;
            if chance != rule.chance {
                warn!("DrivingConfig: spawn chance {} clamped to {}", rule.chance, chance);
                rule.chance = chance;
            }
            if rule.spacing.is_nan() || rule.spacing < MIN_SPACING {
                warn!("DrivingConfig: spawn spacing {} raised to {}", rule.spacing, MIN_SPACING);
                rule.spacing = MIN_SPACING;
            }
        }
        s.crossing_chance = clamp_chance(s.crossing_chance) as f32;
        self.handling.max_speed = self.handling.max_speed.max(self.handling.base_speed);
        self
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load from `path`, logging a warning and returning defaults on failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded driving config from {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "DrivingConfig: {} ({}), falling back to defaults",
                    e,
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Disable all streamed content. Used by scenario tests that place
    /// entities by hand.
    pub fn quiet(mut self) -> Self {
        self.streaming.spawn_scenery = false;
        self.streaming.spawn_pedestrians = false;
        self.streaming.spawn_vehicles = false;
        self.streaming.spawn_crossroads = false;
        self
    }

    /// Score only from events, not from distance. Scenario tests that check
    /// exact score deltas use this.
    pub fn event_scoring(mut self) -> Self {
        self.scoring.distance_rate = 0.0;
        self
    }
}
