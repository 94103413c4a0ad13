//! Explicit per-frame delta threaded through every drive system.

use bevy::prelude::*;

use crate::config::{ClockMode, DrivingConfig, NOMINAL_FRAME_DT};

/// Longest frame a measured clock will integrate in one step.
pub const MAX_MEASURED_FRAMES: f32 = 4.0;

/// Frame delta for the current update, in game-time units.
///
/// In [`ClockMode::FrameLocked`] every frame is exactly one nominal frame, so
/// [`SimClock::step`] is exactly `1.0` and all per-frame constants apply as-is.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    pub mode: ClockMode,
    pub dt: f32,
    pub elapsed: f32,
    pub frame: u64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            mode: ClockMode::FrameLocked,
            dt: NOMINAL_FRAME_DT,
            elapsed: 0.0,
            frame: 0,
        }
    }
}

impl SimClock {
    pub fn new(mode: ClockMode) -> Self {
        Self { mode, ..Default::default() }
    }

    /// Multiplier for constants expressed per nominal frame.
    #[inline]
    pub fn step(&self) -> f32 {
        self.dt / NOMINAL_FRAME_DT
    }

    /// Advance one frame. `measured` is only consulted in measured mode.
    pub fn advance(&mut self, measured: f32) {
        self.dt = match self.mode {
            ClockMode::FrameLocked => NOMINAL_FRAME_DT,
            ClockMode::Measured => measured.clamp(0.0, NOMINAL_FRAME_DT * MAX_MEASURED_FRAMES),
        };
        self.elapsed += self.dt;
        self.frame += 1;
    }
}

/// Exponential easing factor for a per-frame `rate` over `step` frames.
#[inline]
pub fn ease_factor(rate: f32, step: f32) -> f32 {
    if step == 1.0 {
        rate
    } else {
        1.0 - (1.0 - rate).powf(step)
    }
}

pub(crate) fn advance_clock(mut clock: ResMut<SimClock>, time: Res<Time>) {
    clock.advance(time.delta_secs());
}

pub(crate) fn sync_clock_mode(config: Res<DrivingConfig>, mut clock: ResMut<SimClock>) {
    if config.is_changed() && clock.mode != config.clock {
        clock.mode = config.clock;
    }
}

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>().add_systems(
            Update,
            (sync_clock_mode, advance_clock)
                .chain()
                .in_set(crate::DriveSet::Input),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_locked_step_is_exactly_one() {
        let mut clock = SimClock::default();
        clock.advance(0.5);
        assert_eq!(clock.step(), 1.0);
        assert_eq!(clock.dt, NOMINAL_FRAME_DT);
    }

    #[test]
    fn test_measured_clamps_long_frames() {
        let mut clock = SimClock::new(ClockMode::Measured);
        clock.advance(1.0);
        assert!((clock.step() - MAX_MEASURED_FRAMES).abs() < 1e-5);
        clock.advance(NOMINAL_FRAME_DT * 0.5);
        assert!((clock.step() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_sixty_locked_frames_make_one_unit() {
        let mut clock = SimClock::default();
        for _ in 0..60 {
            clock.advance(0.0);
        }
        assert!((clock.elapsed - 1.0).abs() < 1e-4);
        assert_eq!(clock.frame, 60);
    }

    #[test]
    fn test_ease_factor_identity_at_one_step() {
        assert_eq!(ease_factor(0.15, 1.0), 0.15);
        assert!((ease_factor(0.5, 2.0) - 0.75).abs() < 1e-6);
    }
}
