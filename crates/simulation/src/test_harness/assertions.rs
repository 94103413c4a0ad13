//! Assertion helpers for `TestDrive` integration tests.

use crate::player::TurnDirection;

use super::queries::WorldCensus;
use super::TestDrive;

const EPSILON: f32 = 1e-4;

impl TestDrive {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert the score equals `expected` (within float tolerance).
    pub fn assert_score(&self, expected: f32) {
        let score = self.score();
        assert!(
            (score - expected).abs() < EPSILON,
            "Expected score {expected}, got {score}"
        );
    }

    pub fn assert_speed(&self, expected: f32) {
        let speed = self.player().speed;
        assert!(
            (speed - expected).abs() < EPSILON,
            "Expected speed {expected}, got {speed}"
        );
    }

    /// Assert the car is on the main road with the given lane offset.
    pub fn assert_lane(&self, expected: f32) {
        match self.player().lane_offset() {
            Some(lane) => assert!(
                (lane - expected).abs() < EPSILON,
                "Expected lane offset {expected}, got {lane}"
            ),
            None => panic!("Expected the car on the main road, mode is {:?}", self.player().mode),
        }
    }

    pub fn assert_on_road(&self) {
        assert!(
            self.player().is_on_road(),
            "Expected the car on the main road, mode is {:?}",
            self.player().mode
        );
    }

    pub fn assert_on_side_road(&self) {
        assert!(
            self.player().is_on_side_road(),
            "Expected the car on a side road, mode is {:?}",
            self.player().mode
        );
    }

    pub fn assert_turning(&self, direction: TurnDirection) {
        assert_eq!(
            self.player().turning(),
            Some(direction),
            "Expected a {direction:?} turn in progress"
        );
    }

    /// Assert no streamed class exceeds its bound in `max`.
    pub fn assert_census_within(&mut self, max: WorldCensus) {
        let census = self.census();
        assert_eq!(
            census.road_segments, max.road_segments,
            "Road ring must keep a fixed size"
        );
        assert!(census.scenery <= max.scenery, "Too much scenery: {census:?}");
        assert!(census.pedestrians <= max.pedestrians, "Too many pedestrians: {census:?}");
        assert!(census.vehicles <= max.vehicles, "Too many vehicles: {census:?}");
        assert!(census.crossroads <= max.crossroads, "Too many crossroads: {census:?}");
        assert!(
            census.traffic_lights <= max.traffic_lights,
            "Too many traffic lights: {census:?}"
        );
    }
}
