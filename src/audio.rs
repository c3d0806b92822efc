//! Sound effects
//!
//! The game only names effects; an `AudioSink` turns them into sound. Output
//! stays muted behind an `AudioGate` until the first user gesture, which is
//! when browsers allow an audio context to start.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    Start,
    /// Key matched a block
    Hit,
    /// Key press with nothing to match
    Fail,
    /// Lives exhausted
    GameOver,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Start => "start",
            SoundEffect::Hit => "hit",
            SoundEffect::Fail => "fail",
            SoundEffect::GameOver => "gameover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(SoundEffect::Start),
            "hit" => Some(SoundEffect::Hit),
            "fail" => Some(SoundEffect::Fail),
            "gameover" => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    /// Effect to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Hit { .. } => Some(SoundEffect::Hit),
            GameEvent::Fail { .. } => Some(SoundEffect::Fail),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Something that can produce named effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Called once output is allowed (after a user gesture)
    fn resume(&mut self) {}
}

/// Holds effects back until explicitly enabled
pub struct AudioGate<S: AudioSink> {
    sink: S,
    enabled: bool,
}

impl<S: AudioSink> AudioGate<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            enabled: false,
        }
    }

    /// Allow output from now on. Idempotent.
    pub fn enable(&mut self) {
        if !self.enabled {
            self.enabled = true;
            self.sink.resume();
            log::info!("Audio enabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Play an effect. Returns false if output is still gated.
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        if !self.enabled {
            return false;
        }
        self.sink.play(effect);
        true
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AudioSink, SoundEffect};
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Procedural Web Audio synthesizer - no asset files
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl WebAudio {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Create an oscillator routed through its own gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Hit - short bright chirp upward
        fn play_hit(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 660.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(660.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1320.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.14).ok();
        }

        /// Fail - low buzz
        fn play_fail(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 140.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(140.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(70.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.22).ok();
        }

        /// Start - rising arpeggio
        fn play_start(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [440.0, 554.0, 659.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Game over - sad descending
        fn play_game_over(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Context can be suspended again by the browser (tab switch)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Start => Self::play_start(ctx, vol),
                SoundEffect::Hit => Self::play_hit(ctx, vol),
                SoundEffect::Fail => Self::play_fail(ctx, vol),
                SoundEffect::GameOver => Self::play_game_over(ctx, vol),
            }
        }

        fn resume(&mut self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }
    }
}
