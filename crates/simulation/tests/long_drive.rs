//! Long-drive tests proving the streamed world stays bounded.
//!
//! These drive a headless app through the public plugin API for tens of
//! thousands of frames and check that pooled and streamed entity counts
//! never grow with distance.
//!
//! Run: cargo test -p simulation --test long_drive

use std::time::Instant;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use simulation::app_state::{AppState, NewGameEvent};
use simulation::config::DrivingConfig;
use simulation::crossroad::Crossroad;
use simulation::input::{DriverInput, HeldKeys};
use simulation::pedestrian::Pedestrian;
use simulation::player::Player;
use simulation::road::RoadSegment;
use simulation::scenery::Scenery;
use simulation::traffic_light::TrafficLight;
use simulation::vehicle::Vehicle;
use simulation::SimulationPlugin;

fn started_app(seed: u64) -> App {
    let mut config = DrivingConfig::default();
    config.seed = Some(seed);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin);
    app.update();

    app.world_mut().send_event(NewGameEvent);
    app.update();
    app.world_mut().run_schedule(StateTransition);
    assert_eq!(
        *app.world().resource::<State<AppState>>().get(),
        AppState::Playing
    );

    app.world_mut().resource_mut::<DriverInput>().held = HeldKeys {
        accelerate: true,
        ..Default::default()
    };
    app
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<Entity, F>().iter(world).count()
}

// ---------------------------------------------------------------------------
// 1. Entity counts stay flat over a long drive
// ---------------------------------------------------------------------------

#[test]
fn test_long_drive_keeps_working_set_bounded() {
    let mut app = started_app(2024);
    let start = Instant::now();

    let mut peak = [0usize; 5];
    for _ in 0..100 {
        for _ in 0..100 {
            app.update();
        }
        assert_eq!(count::<With<RoadSegment>>(&mut app), 60);
        let now = [
            count::<With<Scenery>>(&mut app),
            count::<With<Pedestrian>>(&mut app),
            count::<With<Vehicle>>(&mut app),
            count::<With<Crossroad>>(&mut app),
            count::<With<TrafficLight>>(&mut app),
        ];
        for (p, n) in peak.iter_mut().zip(now) {
            *p = (*p).max(n);
        }
    }

    let elapsed = start.elapsed();
    let z = app.world().resource::<Player>().z();
    println!("10K frames to z={z:.0} in {elapsed:?}, peaks {peak:?}");

    assert!(z < -2_000.0, "car only reached z={z}");
    assert!(peak[0] <= 250, "scenery peaked at {}", peak[0]);
    assert!(peak[1] <= 40, "pedestrians peaked at {}", peak[1]);
    assert!(peak[2] <= 20, "vehicles peaked at {}", peak[2]);
    assert!(peak[3] <= 3, "crossroads peaked at {}", peak[3]);
    assert_eq!(peak[4], peak[3] * 4);
}

// ---------------------------------------------------------------------------
// 2. Nothing streamed lingers far behind the car
// ---------------------------------------------------------------------------

#[test]
fn test_nothing_lingers_behind_the_car() {
    let mut app = started_app(99);
    for _ in 0..3_000 {
        app.update();
    }
    let z = app.world().resource::<Player>().z();
    let world = app.world_mut();
    let stale = world
        .query_filtered::<&simulation::visual::Pose, Or<(With<Scenery>, With<Pedestrian>, With<Vehicle>)>>()
        .iter(world)
        .filter(|pose| pose.position.z > z + 60.0)
        .count();
    assert_eq!(stale, 0);
}
