//! Session score and counters.

use bevy::prelude::*;

/// Score and per-session counters, reset at every new game.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    pub score: f32,
    /// Monotonic distance accumulator (sum of per-frame speed).
    pub distance: f32,
    pub pedestrians_avoided: u32,
    pub ran_red_lights: u32,
    pub vehicles_overtaken: u32,
    pub near_misses: u32,
}

impl Scoreboard {
    pub fn award(&mut self, points: f32) {
        self.score += points;
    }

    /// Subtract `points`, never going below zero.
    pub fn penalize(&mut self, points: f32) {
        self.score = (self.score - points).max(0.0);
    }
}

/// Tint of the full-screen warning flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashTint {
    Impact,
    Violation,
}

/// Short-lived full-screen flash read by the HUD.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenFlash {
    pub tint: Option<FlashTint>,
    pub remaining: f32,
}

impl ScreenFlash {
    pub fn trigger(&mut self, tint: FlashTint) {
        self.tint = Some(tint);
        self.remaining = crate::config::SCREEN_FLASH_DURATION;
    }

    /// Opacity in `[0, 1]`, fading linearly to zero.
    pub fn alpha(&self) -> f32 {
        if self.tint.is_none() {
            return 0.0;
        }
        (self.remaining / crate::config::SCREEN_FLASH_DURATION).clamp(0.0, 1.0)
    }

    pub fn decay(&mut self, dt: f32) {
        if self.tint.is_none() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.tint = None;
        }
    }
}
