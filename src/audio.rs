//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and music drones - no audio files.
//! The audio context starts suspended until the first user gesture, so
//! hosts call [`AudioManager::unlock`] from their input handlers.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{EventSink, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Quiz answer was right
    Correct,
    /// Quiz answer was wrong
    Wrong,
    /// Shuriken thrown
    Throw,
    /// Shuriken struck the target
    Hit,
    /// Game over
    GameOver,
}

/// Background music
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Quiz,
    Battle,
}

/// Nodes of a playing music drone
struct Music {
    track: MusicTrack,
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    unlocked: bool,
    music: Option<Music>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            unlocked: false,
            music: None,
        }
    }

    /// Resume the audio context; must run inside a user gesture handler
    pub fn unlock(&mut self) {
        if self.unlocked {
            return;
        }
        if let Some(ctx) = &self.ctx {
            match ctx.resume() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    match wasm_bindgen_futures::JsFuture::from(promise).await {
                        Ok(_) => log::info!("Audio unlocked"),
                        Err(e) => log::error!("Audio unlock failed: {:?}", e),
                    }
                }),
                Err(e) => log::error!("Audio unlock failed: {:?}", e),
            }
        }
        self.unlocked = true;
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        match effect {
            SoundEffect::Correct => self.play_correct(ctx, vol),
            SoundEffect::Wrong => self.play_wrong(ctx, vol),
            SoundEffect::Throw => self.play_throw(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Switch background music (restarts nothing if already playing `track`)
    pub fn play_music(&mut self, track: MusicTrack) {
        if self.music.as_ref().is_some_and(|m| m.track == track) {
            return;
        }
        self.stop_music();

        let vol = self.music_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.music = Self::start_drone(ctx, track, vol);
    }

    /// Fade out and stop the background music
    pub fn stop_music(&mut self) {
        let Some(music) = self.music.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        music.gain.gain().set_value_at_time(music.gain.gain().value(), t).ok();
        music.gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();
        for osc in &music.oscillators {
            osc.stop_with_when(t + 0.35).ok();
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Short blip with an exponential decay
    fn blip(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        vol: f32,
        at: f64,
        len: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        // Silent until `at`
        gain.gain().set_value_at_time(0.0001, ctx.current_time()).ok();
        gain.gain().set_value_at_time(vol, at).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, at + len)
            .ok();
        osc.start_with_when(at).ok();
        osc.stop_with_when(at + len + 0.02).ok();
    }

    /// Right answer - rising two-note chime
    fn play_correct(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        self.blip(ctx, 660.0, OscillatorType::Sine, vol * 0.3, t, 0.12);
        self.blip(ctx, 880.0, OscillatorType::Sine, vol * 0.3, t + 0.1, 0.18);
    }

    /// Wrong answer - low buzz
    fn play_wrong(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        self.blip(ctx, 140.0, OscillatorType::Square, vol * 0.15, t, 0.25);
    }

    /// Throw - quick downward whoosh
    fn play_throw(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(1200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(300.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Hit - metallic thunk plus a bright ping
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(70.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        self.blip(ctx, 1760.0, OscillatorType::Square, vol * 0.12, t, 0.1);
    }

    /// Game over - descending arpeggio
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.25, 392.0, 329.63, 261.63].into_iter().enumerate() {
            let at = t + i as f64 * 0.18;
            self.blip(ctx, freq, OscillatorType::Triangle, vol * 0.3, at, 0.3);
        }
    }

    /// Looping drone for a music track
    fn start_drone(ctx: &AudioContext, track: MusicTrack, vol: f32) -> Option<Music> {
        let (freqs, lfo_rate, osc_type): (&[f32], f32, OscillatorType) = match track {
            MusicTrack::Quiz => (&[220.0, 329.63], 0.25, OscillatorType::Sine),
            MusicTrack::Battle => (&[110.0, 164.81, 220.0], 2.0, OscillatorType::Triangle),
        };

        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(vol * 0.08);
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let mut oscillators = Vec::with_capacity(freqs.len() + 1);
        for &freq in freqs {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            osc.start().ok();
            oscillators.push(osc);
        }

        // Tremolo
        let lfo = ctx.create_oscillator().ok()?;
        let depth = ctx.create_gain().ok()?;
        lfo.frequency().set_value(lfo_rate);
        depth.gain().set_value(vol * 0.03);
        lfo.connect_with_audio_node(&depth).ok()?;
        depth.connect_with_audio_param(&gain.gain()).ok()?;
        lfo.start().ok();
        oscillators.push(lfo);

        log::debug!("Music started: {:?}", track);
        Some(Music {
            track,
            oscillators,
            gain,
        })
    }
}

impl EventSink for AudioManager {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Fired { .. } => self.play(SoundEffect::Throw),
            GameEvent::Hit { .. } => self.play(SoundEffect::Hit),
            GameEvent::ProjectileLost { .. } => {}
            GameEvent::GameOver { .. } => {
                self.stop_music();
                self.play(SoundEffect::GameOver);
            }
        }
    }
}
