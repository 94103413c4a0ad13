//! Deterministic per-frame ordering via `SystemSet` phases.
//!
//! Every drive system lives in `Update` inside exactly one of these sets.
//! The sets are chained and gated on `AppState::Playing`:
//!
//! ```text
//! Input  →  Player  →  Streaming  →  Behaviour  →  Collision  →  Publish
//! ```
//!
//! * **Input** – advance the frame clock, poll held keys.
//! * **Player** – pedal cues, then speed, lane physics, junction turns and
//!   side-road travel.
//! * **Streaming** – recycle road segments, spawn batches ahead, despawn
//!   entities behind. Commands issued here are applied at the sync point
//!   before `Behaviour`, so nothing despawned this frame is animated or
//!   collided with.
//! * **Behaviour** – traffic lights, pedestrians, vehicles, overtakes and
//!   near misses.
//! * **Collision** – player hits and red-light judging.
//! * **Publish** – write the player pose, HUD snapshot and engine hum; latch
//!   input for next frame's edge detection. Only reads simulation state.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveSet {
    Input,
    Player,
    Streaming,
    Behaviour,
    Collision,
    Publish,
}
