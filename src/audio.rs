//! Audio system using Web Audio API
//!
//! The three cues are synthesised with oscillators, so no sound files ship
//! with the game. Each cue's live oscillators are tracked so a cue can be cut
//! off early (flap is silenced on score and death).

use std::collections::HashMap;

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{AudioPort, Cue};

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Longest the flap cue may ring (seconds)
    flap_max_secs: f64,
    playing: HashMap<Cue, Vec<OscillatorNode>>,
}

impl AudioManager {
    pub fn new(flap_max_ms: u32) -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            flap_max_secs: flap_max_ms as f64 / 1000.0,
            playing: HashMap::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator with gain envelope
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

    /// Flap - short rising chirp
    fn flap(&self, ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return Vec::new();
        };
        let t = ctx.current_time();
        let length = self.flap_max_secs.min(0.12);

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + length)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + self.flap_max_secs).ok();
        vec![osc]
    }

    /// Score - two-note ding
    fn score(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let mut nodes = Vec::new();
        for (i, freq) in [880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.09;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
                nodes.push(osc);
            }
        }
        nodes
    }

    /// Death - thud followed by a falling whistle
    fn death(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let t = ctx.current_time();
        let mut nodes = Vec::new();

        if let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.8, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
            nodes.push(osc);
        }

        if let Some((osc, gain)) = Self::create_osc(ctx, 900.0, OscillatorType::Sine) {
            let start = t + 0.15;
            gain.gain().set_value_at_time(vol, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.6)
                .ok();
            osc.frequency().set_value_at_time(900.0, start).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(150.0, start + 0.6)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.65).ok();
            nodes.push(osc);
        }
        nodes
    }
}

impl AudioPort for AudioManager {
    fn play_sound(&mut self, cue: Cue, volume: f32) {
        if volume <= 0.0 {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        // A cue restarts rather than layering over itself
        self.stop_sound(cue);
        let nodes = match cue {
            Cue::Flap => self.flap(&ctx, volume),
            Cue::Score => Self::score(&ctx, volume),
            Cue::Death => Self::death(&ctx, volume),
        };
        self.playing.insert(cue, nodes);
    }

    fn stop_sound(&mut self, cue: Cue) {
        if let Some(nodes) = self.playing.remove(&cue) {
            for osc in nodes {
                // Already-finished oscillators reject a second stop
                let _ = osc.stop();
            }
        }
    }
}
