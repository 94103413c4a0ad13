//! Held-key state for the driver, with previous-frame latch for edge cues.
//!
//! Keyboard polling writes [`DriverInput`] each frame when Bevy's
//! `InputPlugin` is present. Headless tests leave the keyboard out and set
//! the held flags directly.

use bevy::prelude::*;

/// Driving actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveAction {
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,
    TogglePause,
}

/// Primary and alternate key for every [`DriveAction`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DriveBindings {
    pub accelerate: [KeyCode; 2],
    pub brake: [KeyCode; 2],
    pub steer_left: [KeyCode; 2],
    pub steer_right: [KeyCode; 2],
    pub toggle_pause: [KeyCode; 2],
}

impl Default for DriveBindings {
    fn default() -> Self {
        Self {
            accelerate: [KeyCode::ArrowUp, KeyCode::KeyW],
            brake: [KeyCode::ArrowDown, KeyCode::KeyS],
            steer_left: [KeyCode::ArrowLeft, KeyCode::KeyA],
            steer_right: [KeyCode::ArrowRight, KeyCode::KeyD],
            toggle_pause: [KeyCode::Escape, KeyCode::KeyP],
        }
    }
}

impl DriveBindings {
    pub fn keys(&self, action: DriveAction) -> [KeyCode; 2] {
        match action {
            DriveAction::Accelerate => self.accelerate,
            DriveAction::Brake => self.brake,
            DriveAction::SteerLeft => self.steer_left,
            DriveAction::SteerRight => self.steer_right,
            DriveAction::TogglePause => self.toggle_pause,
        }
    }

    pub fn pressed(&self, action: DriveAction, keys: &ButtonInput<KeyCode>) -> bool {
        keys.any_pressed(self.keys(action))
    }

    pub fn just_pressed(&self, action: DriveAction, keys: &ButtonInput<KeyCode>) -> bool {
        keys.any_just_pressed(self.keys(action))
    }
}

/// The four held driving keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl HeldKeys {
    /// `-1` for left, `+1` for right, `0` for neither or both.
    pub fn steer_direction(&self) -> f32 {
        match (self.steer_left, self.steer_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn steering(&self) -> bool {
        self.steer_left || self.steer_right
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverInput {
    pub held: HeldKeys,
    /// Held state at the end of the previous frame.
    pub previous: HeldKeys,
}

impl DriverInput {
    pub fn accelerate_just_pressed(&self) -> bool {
        self.held.accelerate && !self.previous.accelerate
    }

    pub fn brake_just_pressed(&self) -> bool {
        self.held.brake && !self.previous.brake
    }
}

/// Copy the keyboard into [`DriverInput`]. No-op when the keyboard resource
/// is absent (headless).
pub(crate) fn poll_keyboard(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<DriveBindings>,
    mut input: ResMut<DriverInput>,
) {
    let Some(keys) = keys else {
        return;
    };
    input.held = HeldKeys {
        accelerate: bindings.pressed(DriveAction::Accelerate, &keys),
        brake: bindings.pressed(DriveAction::Brake, &keys),
        steer_left: bindings.pressed(DriveAction::SteerLeft, &keys),
        steer_right: bindings.pressed(DriveAction::SteerRight, &keys),
    };
}

/// Remember this frame's keys for next frame's edge detection.
pub(crate) fn latch_previous_input(mut input: ResMut<DriverInput>) {
    input.previous = input.held;
}

pub struct DriverInputPlugin;

impl Plugin for DriverInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DriverInput>()
            .init_resource::<DriveBindings>()
            .add_systems(Update, poll_keyboard.in_set(crate::DriveSet::Input))
            .add_systems(Update, latch_previous_input.in_set(crate::DriveSet::Publish));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_direction() {
        let mut held = HeldKeys::default();
        assert_eq!(held.steer_direction(), 0.0);
        held.steer_left = true;
        assert_eq!(held.steer_direction(), -1.0);
        held.steer_right = true;
        assert_eq!(held.steer_direction(), 0.0);
        held.steer_left = false;
        assert_eq!(held.steer_direction(), 1.0);
    }

    #[test]
    fn test_edges_follow_latch() {
        let mut input = DriverInput::default();
        input.held.accelerate = true;
        assert!(input.accelerate_just_pressed());
        input.previous = input.held;
        assert!(!input.accelerate_just_pressed());
    }

    #[test]
    fn test_bindings_match_either_key() {
        let bindings = DriveBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyA);
        assert!(bindings.pressed(DriveAction::SteerLeft, &keys));
        assert!(!bindings.pressed(DriveAction::SteerRight, &keys));
        assert!(bindings.just_pressed(DriveAction::SteerLeft, &keys));
    }
}
