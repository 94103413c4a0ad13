//! Frame stepping and read access to the simulated world.

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

use crate::app_state::{AppState, NewGameEvent};
use crate::audio_cues::{AudioCue, PlayCueEvent};
use crate::crossroad::Crossroad;
use crate::pedestrian::Pedestrian;
use crate::player::Player;
use crate::road::RoadSegment;
use crate::scenery::Scenery;
use crate::score::Scoreboard;
use crate::traffic_light::TrafficLight;
use crate::vehicle::Vehicle;

use super::TestDrive;

/// Entity counts per streamed class at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldCensus {
    pub road_segments: usize,
    pub scenery: usize,
    pub pedestrians: usize,
    pub vehicles: usize,
    pub crossroads: usize,
    pub traffic_lights: usize,
}

impl TestDrive {
    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Run `n` full app updates.
    pub fn frame(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Step until `done` holds or `max_frames` run out. Returns the number
    /// of frames stepped, or `None` if the condition never held.
    pub fn frame_until(&mut self, max_frames: u32, mut done: impl FnMut(&mut Self) -> bool) -> Option<u32> {
        for n in 0..max_frames {
            if done(self) {
                return Some(n);
            }
            self.app.update();
        }
        done(self).then_some(max_frames)
    }

    pub fn new_game(&mut self) {
        self.app.world_mut().send_event(NewGameEvent);
        self.app.update();
        self.app.world_mut().run_schedule(StateTransition);
    }

    pub fn set_state(&mut self, state: AppState) {
        self.app
            .world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(state);
        self.app.world_mut().run_schedule(StateTransition);
    }

    pub fn state(&self) -> AppState {
        *self.app.world().resource::<State<AppState>>().get()
    }

    // -----------------------------------------------------------------------
    // Raw access
    // -----------------------------------------------------------------------

    pub fn app(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn resource_mut<R: Resource>(&mut self) -> Mut<'_, R> {
        self.app.world_mut().resource_mut::<R>()
    }

    pub fn component<C: Component + Clone>(&self, entity: Entity) -> Option<C> {
        self.app.world().get::<C>(entity).cloned()
    }

    // -----------------------------------------------------------------------
    // Session resources
    // -----------------------------------------------------------------------

    pub fn player(&self) -> &Player {
        self.resource::<Player>()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        self.resource::<Scoreboard>()
    }

    pub fn score(&self) -> f32 {
        self.scoreboard().score
    }

    /// Cues sent during the most recent update.
    pub fn cues_this_frame(&self) -> Vec<AudioCue> {
        self.resource::<Events<PlayCueEvent>>()
            .iter_current_update_events()
            .map(|event| event.cue)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn count<F: QueryFilter>(&mut self) -> usize {
        self.app
            .world_mut()
            .query_filtered::<Entity, F>()
            .iter(self.app.world())
            .count()
    }

    pub fn census(&mut self) -> WorldCensus {
        WorldCensus {
            road_segments: self.count::<With<RoadSegment>>(),
            scenery: self.count::<With<Scenery>>(),
            pedestrians: self.count::<With<Pedestrian>>(),
            vehicles: self.count::<With<Vehicle>>(),
            crossroads: self.count::<With<Crossroad>>(),
            traffic_lights: self.count::<With<TrafficLight>>(),
        }
    }

    /// The four lights owned by a crossroad, in [`crate::traffic_light::LightFacing::ALL`] order.
    pub fn lights_of(&self, crossroad: Entity) -> [Entity; 4] {
        self.component::<Crossroad>(crossroad)
            .map(|c| c.lights)
            .unwrap_or_else(|| panic!("{crossroad:?} is not a crossroad"))
    }
}
