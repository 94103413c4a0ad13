//! Pooled ring of road segments.
//!
//! The ring is spawned once per game and never grows. A segment that falls
//! more than `recycle_distance` behind the player jumps forward by the full
//! ring length and is re-posed on the curve.

use bevy::prelude::*;

use crate::config::{DrivingConfig, SEGMENT_LENGTH};
use crate::curve::{curve_heading, curve_offset};
use crate::player::Player;
use crate::visual::{Pose, Visual, VisualKind};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    pub slot: usize,
    pub world_z: f32,
}

impl RoadSegment {
    pub fn pose(&self) -> Pose {
        Pose::ground(curve_offset(self.world_z), self.world_z, curve_heading(self.world_z))
    }
}

/// Initial Z of ring slot `slot`, with the first slot just behind the start line.
pub fn initial_segment_z(slot: usize, recycle_distance: f32) -> f32 {
    recycle_distance - slot as f32 * SEGMENT_LENGTH
}

pub fn spawn_road_ring(commands: &mut Commands, count: usize, recycle_distance: f32) {
    for slot in 0..count {
        let segment = RoadSegment {
            slot,
            world_z: initial_segment_z(slot, recycle_distance),
        };
        commands.spawn((
            segment,
            Visual::new(VisualKind::RoadSegment, slot as u32),
            segment.pose(),
        ));
    }
}

/// Move `segment` forward by whole ring lengths until it is within range.
/// Returns `true` if it moved.
pub fn recycle_segment(segment: &mut RoadSegment, player_z: f32, recycle_distance: f32, ring_length: f32) -> bool {
    if segment.world_z <= player_z + recycle_distance || ring_length <= 0.0 {
        return false;
    }
    while segment.world_z > player_z + recycle_distance {
        segment.world_z -= ring_length;
    }
    true
}

pub(crate) fn recycle_road_segments(
    player: Res<Player>,
    config: Res<DrivingConfig>,
    mut segments: Query<(&mut RoadSegment, &mut Pose)>,
) {
    let streaming = &config.streaming;
    let ring_length = streaming.segment_count as f32 * SEGMENT_LENGTH;
    for (mut segment, mut pose) in &mut segments {
        if recycle_segment(&mut segment, player.z(), streaming.recycle_distance, ring_length) {
            *pose = segment.pose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_ring_layout() {
        assert_eq!(initial_segment_z(0, 30.0), 30.0);
        assert_eq!(initial_segment_z(59, 30.0), 30.0 - 590.0);
    }

    #[test]
    fn test_segment_behind_jumps_one_ring() {
        let mut seg = RoadSegment { slot: 0, world_z: 30.0 };
        assert!(!recycle_segment(&mut seg, 2.0, 30.0, 600.0));
        assert!(recycle_segment(&mut seg, -1.0, 30.0, 600.0));
        assert_eq!(seg.world_z, -570.0);
    }

    #[test]
    fn test_teleported_player_recycles_repeatedly() {
        let mut seg = RoadSegment { slot: 3, world_z: 0.0 };
        assert!(recycle_segment(&mut seg, -2000.0, 30.0, 600.0));
        assert!(seg.world_z <= -1970.0 && seg.world_z > -2570.0);
    }
}
