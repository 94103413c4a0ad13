//! Per-frame snapshot published for the HUD collaborator.

use bevy::prelude::*;

use crate::player::Player;
use crate::score::Scoreboard;

/// Speed at the end of the speedometer dial.
pub const SPEED_DIAL_MAX: f32 = 1.2;
pub const NEEDLE_MIN_DEG: f32 = -135.0;
pub const NEEDLE_MAX_DEG: f32 = 135.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArcBand {
    #[default]
    Cruise,
    Fast,
    Redline,
}

/// Needle angle in degrees for `speed`, sweeping -135..=135.
pub fn needle_angle(speed: f32) -> f32 {
    let fraction = (speed / SPEED_DIAL_MAX).clamp(0.0, 1.0);
    NEEDLE_MIN_DEG + fraction * (NEEDLE_MAX_DEG - NEEDLE_MIN_DEG)
}

/// Colour band of the dial arc.
pub fn arc_band(speed: f32) -> ArcBand {
    let fraction = (speed / SPEED_DIAL_MAX).clamp(0.0, 1.0);
    if fraction < 0.5 {
        ArcBand::Cruise
    } else if fraction < 0.8 {
        ArcBand::Fast
    } else {
        ArcBand::Redline
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HudSnapshot {
    pub speed_display: u32,
    pub distance_display: u32,
    pub score: u32,
    pub pedestrians_avoided: u32,
    pub ran_red_lights: u32,
    pub vehicles_overtaken: u32,
    pub near_misses: u32,
    pub needle_deg: f32,
    /// Filled fraction of the dial arc.
    pub arc_fraction: f32,
    pub arc_band: ArcBand,
    pub on_side_road: bool,
}

impl HudSnapshot {
    pub fn capture(player: &Player, board: &Scoreboard) -> Self {
        let speed = player.speed;
        Self {
            speed_display: (speed * 100.0).floor() as u32,
            distance_display: board.distance.floor() as u32,
            score: board.score.floor() as u32,
            pedestrians_avoided: board.pedestrians_avoided,
            ran_red_lights: board.ran_red_lights,
            vehicles_overtaken: board.vehicles_overtaken,
            near_misses: board.near_misses,
            needle_deg: needle_angle(speed),
            arc_fraction: (speed / SPEED_DIAL_MAX).clamp(0.0, 1.0),
            arc_band: arc_band(speed),
            on_side_road: player.is_on_side_road(),
        }
    }
}

pub(crate) fn publish_hud(player: Res<Player>, board: Res<Scoreboard>, mut hud: ResMut<HudSnapshot>) {
    hud.set_if_neq(HudSnapshot::capture(&player, &board));
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudSnapshot>()
            .add_systems(Update, publish_hud.in_set(crate::DriveSet::Publish));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needle_sweep() {
        assert_eq!(needle_angle(0.0), -135.0);
        assert_eq!(needle_angle(SPEED_DIAL_MAX), 135.0);
        assert!((needle_angle(0.6)).abs() < 1e-4);
        assert_eq!(needle_angle(5.0), 135.0);
    }

    #[test]
    fn test_arc_bands() {
        assert_eq!(arc_band(0.1), ArcBand::Cruise);
        assert_eq!(arc_band(0.7), ArcBand::Fast);
        assert_eq!(arc_band(1.0), ArcBand::Redline);
    }

    #[test]
    fn test_snapshot_floors_values() {
        let mut player = Player::default();
        player.speed = 0.456;
        let board = Scoreboard {
            score: 99.9,
            distance: 12.7,
            near_misses: 2,
            ..Default::default()
        };
        let hud = HudSnapshot::capture(&player, &board);
        assert_eq!(hud.speed_display, 45);
        assert_eq!(hud.distance_display, 12);
        assert_eq!(hud.score, 99);
        assert_eq!(hud.near_misses, 2);
        assert!(!hud.on_side_road);
    }
}
