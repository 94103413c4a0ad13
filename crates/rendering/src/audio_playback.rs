//! Audio playback that consumes [`PlayCueEvent`]s and the [`EngineHum`].
//!
//! No audio asset files exist, so cues are logged at debug level and the
//! hum at trace level. A missing output device never affects the drive.

use bevy::prelude::*;

use simulation::audio_cues::{AudioCue, EngineHum, PlayCueEvent};

/// Master volume applied on top of each cue's own scale.
#[derive(Resource, Debug, Clone, Copy)]
pub struct AudioMix {
    pub master: f32,
    pub muted: bool,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            master: 0.8,
            muted: false,
        }
    }
}

impl AudioMix {
    pub fn effective(&self, scale: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master * scale).clamp(0.0, 1.0)
        }
    }
}

fn cue_name(cue: AudioCue) -> &'static str {
    match cue {
        AudioCue::StartupRev => "startup_rev",
        AudioCue::AccelerationBurst => "acceleration_burst",
        AudioCue::BrakeSqueal => "brake_squeal",
        AudioCue::PedestrianImpact => "pedestrian_impact",
        AudioCue::VehicleCrash { oncoming: true } => "head_on_crash",
        AudioCue::VehicleCrash { oncoming: false } => "rear_end_crash",
        AudioCue::RedLightViolation => "red_light_horn",
        AudioCue::NearMiss => "near_miss_whoosh",
        AudioCue::Overtake => "overtake_chime",
        AudioCue::TurnSignal => "turn_signal",
        AudioCue::TurnComplete => "turn_complete",
    }
}

fn consume_cue_events(mut events: EventReader<PlayCueEvent>, mix: Res<AudioMix>) {
    for event in events.read() {
        let volume = mix.effective(event.volume_scale);
        if volume == 0.0 {
            continue;
        }
        debug!("SFX: {} vol={:.2}", cue_name(event.cue), volume);
    }
}

fn trace_engine_hum(hum: Res<EngineHum>, mix: Res<AudioMix>) {
    if !hum.is_changed() {
        return;
    }
    trace!(
        "engine {:.0}Hz vol={:.2} tire={:.2} wind={:.2}",
        hum.pitch_hz,
        mix.effective(hum.volume),
        hum.tire,
        hum.wind
    );
}

pub struct AudioPlaybackPlugin;

impl Plugin for AudioPlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioMix>()
            .add_systems(PostUpdate, (consume_cue_events, trace_engine_hum));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_mix_is_silent() {
        let mix = AudioMix {
            master: 1.0,
            muted: true,
        };
        assert_eq!(mix.effective(1.0), 0.0);
    }

    #[test]
    fn test_mix_scales_and_clamps() {
        let mix = AudioMix::default();
        assert!((mix.effective(0.5) - 0.4).abs() < 1e-6);
        let loud = AudioMix {
            master: 2.0,
            muted: false,
        };
        assert_eq!(loud.effective(1.0), 1.0);
    }

    #[test]
    fn test_cues_drain_without_audio_device() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<PlayCueEvent>();
        app.init_resource::<EngineHum>();
        app.add_plugins(AudioPlaybackPlugin);
        app.world_mut().send_event(PlayCueEvent::new(AudioCue::Overtake));
        app.update();
        app.world_mut().resource_mut::<EngineHum>().pitch_hz = 220.0;
        app.update();
        assert!(app.world().contains_resource::<AudioMix>());
    }
}
