//! Audio system
//!
//! Procedurally generated sound effects and per-critter ambience, no external
//! files needed. The game only talks to the [`AudioSink`] capability; the Web
//! Audio implementation lives behind `wasm32`.

use rand::Rng;

use crate::catalog::VisualType;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Soft water-drop tap on every accepted touch
    Tap,
    /// Something was caught (crack, kick and ping)
    Catch(VisualType),
    /// Menu button
    UiClick,
    /// Play/pause and other toggles
    UiToggle,
    /// Session start (rising triad)
    UiStart,
}

/// Oscillator shape, independent of the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Parameters of a continuous insect drone: a carrier with a fast flutter
/// modulator and a slow drift modulator on its frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuzzVoice {
    pub wave: Wave,
    pub freq: f32,
    pub gain: f32,
    pub flutter_wave: Wave,
    pub flutter_freq: f32,
    pub flutter_depth: f32,
    pub drift_freq: f32,
    pub drift_depth: f32,
}

/// Background sound bed for a critter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ambience {
    /// Intermittent squeaks
    Squeaks,
    /// Continuous wing buzz
    Buzz(BuzzVoice),
    /// Low rumble with random bubble pops
    Underwater,
    /// Band-passed hiss with a slow breathing swell
    Hiss,
}

impl Ambience {
    /// Ambience for a visual type; laser and emoji toys are silent
    pub fn for_visual(visual: VisualType) -> Option<Self> {
        match visual {
            VisualType::Mouse => Some(Self::Squeaks),
            VisualType::Fly => Some(Self::Buzz(BuzzVoice {
                wave: Wave::Sawtooth,
                freq: 240.0,
                gain: 0.2,
                flutter_wave: Wave::Square,
                flutter_freq: 50.0,
                flutter_depth: 25.0,
                drift_freq: 0.5,
                drift_depth: 40.0,
            })),
            VisualType::Beetle => Some(Self::Buzz(BuzzVoice {
                wave: Wave::Sawtooth,
                freq: 110.0,
                gain: 0.3,
                flutter_wave: Wave::Sine,
                flutter_freq: 30.0,
                flutter_depth: 15.0,
                drift_freq: 0.2,
                drift_depth: 20.0,
            })),
            VisualType::Butterfly => Some(Self::Buzz(BuzzVoice {
                wave: Wave::Triangle,
                freq: 60.0,
                gain: 0.1,
                flutter_wave: Wave::Sine,
                flutter_freq: 10.0,
                flutter_depth: 5.0,
                drift_freq: 0.1,
                drift_depth: 5.0,
            })),
            VisualType::Fish => Some(Self::Underwater),
            VisualType::Snake => Some(Self::Hiss),
            VisualType::Laser | VisualType::Emoji => None,
        }
    }

    /// Range (seconds) between one-shot accents, for ambiences that have them
    pub fn accent_interval(&self) -> Option<(f64, f64)> {
        match self {
            Self::Squeaks => Some((1.0, 3.0)),
            Self::Underwater => Some((0.5, 2.5)),
            Self::Buzz(_) | Self::Hiss => None,
        }
    }
}

/// Schedules one-shot accents (squeaks, bubbles) at random intervals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentClock {
    min: f64,
    max: f64,
    next_at: f64,
}

impl AccentClock {
    /// First accent fires immediately at `now`
    pub fn new((min, max): (f64, f64), now: f64) -> Self {
        Self { min, max, next_at: now }
    }

    /// Whether an accent is due at `now`; schedules the following one if so
    pub fn poll(&mut self, now: f64, rng: &mut impl Rng) -> bool {
        if now < self.next_at {
            return false;
        }
        self.next_at = now + rng.random_range(self.min..self.max);
        true
    }

    pub fn next_at(&self) -> f64 {
        self.next_at
    }
}

/// Uniform white noise in [-1, 1)
pub fn white_noise(len: usize, rng: &mut impl Rng) -> Vec<f32> {
    (0..len).map(|_| rng.random::<f32>() * 2.0 - 1.0).collect()
}

/// Leaky-integrated (brown) noise, scaled up to a usable level
pub fn brown_noise(len: usize, rng: &mut impl Rng) -> Vec<f32> {
    let mut last = 0.0f32;
    (0..len)
        .map(|_| {
            let white = rng.random::<f32>() * 2.0 - 1.0;
            last = (last + 0.02 * white) / 1.02;
            last * 3.5
        })
        .collect()
}

/// Sound capability used by the frame driver
pub trait AudioSink {
    /// Fire-and-forget sound effect
    fn play(&mut self, effect: SoundEffect);
    /// Replace any running ambience with the one for `visual`
    fn start_ambience(&mut self, visual: VisualType);
    fn stop_ambience(&mut self);
    /// Master volume (0.0 - 1.0); 0 silences everything
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    /// Per-frame hook for scheduled accents
    fn update(&mut self) {}
}

/// Silent sink for native builds and tests; remembers what was asked of it
#[derive(Debug, Clone, Default)]
pub struct NullAudio {
    pub volume: f32,
    pub ambience: Option<VisualType>,
    pub played: Vec<SoundEffect>,
}

impl NullAudio {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            ..Default::default()
        }
    }
}

impl AudioSink for NullAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.volume > 0.0 {
            self.played.push(effect);
        }
    }

    fn start_ambience(&mut self, visual: VisualType) {
        self.ambience = None;
        if self.volume > 0.0 {
            self.ambience = Some(visual);
        }
    }

    fn stop_ambience(&mut self) {
        self.ambience = None;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{
        AudioBuffer, AudioContext, AudioContextState, AudioNode, AudioScheduledSourceNode,
        BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
    };

    use super::{
        AccentClock, Ambience, AudioSink, BuzzVoice, SoundEffect, Wave, brown_noise, white_noise,
    };
    use crate::catalog::VisualType;

    impl From<Wave> for OscillatorType {
        fn from(wave: Wave) -> Self {
            match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Nodes of the running ambience
    struct ActiveAmbience {
        kind: Ambience,
        master: GainNode,
        sources: Vec<AudioScheduledSourceNode>,
        accents: Option<AccentClock>,
    }

    /// Web Audio backed sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        ambience: Option<ActiveAmbience>,
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
                ambience: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Context ready to play, or None when silenced/unavailable
        fn live_ctx(&self) -> Option<&AudioContext> {
            if self.volume <= 0.0 {
                return None;
            }
            self.resume();
            self.ctx.as_ref()
        }

        /// Create an oscillator with gain envelope, routed into `out`
        fn create_osc(
            ctx: &AudioContext,
            out: &AudioNode,
            freq: f32,
            wave: Wave,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(wave.into());
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(out).ok()?;

            Some((osc, gain))
        }

        fn noise_buffer(ctx: &AudioContext, seconds: f32, samples: Vec<f32>) -> Option<AudioBuffer> {
            let rate = ctx.sample_rate();
            let len = (rate * seconds) as u32;
            let buffer = ctx.create_buffer(1, len, rate).ok()?;
            let mut samples = samples;
            samples.resize(len as usize, 0.0);
            buffer.copy_to_channel(&mut samples, 0).ok()?;
            Some(buffer)
        }

        fn sample_count(ctx: &AudioContext, seconds: f32) -> usize {
            (ctx.sample_rate() * seconds) as usize
        }

        /// Soft water-drop tap
        fn play_tap(ctx: &AudioContext, vol: f32) {
            let dest: AudioNode = ctx.destination().into();
            let Some((osc, gain)) = Self::create_osc(ctx, &dest, 300.0, Wave::Sine) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(100.0, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(0.1 * vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Catch - filtered noise crack, sub kick and a bright ping
        fn play_catch(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            let Ok(master) = ctx.create_gain() else { return };
            master.gain().set_value(vol);
            if master.connect_with_audio_node(&ctx.destination()).is_err() {
                return;
            }
            let out: &AudioNode = &master;

            // Crack
            let samples = white_noise(Self::sample_count(ctx, 0.5), &mut rand::rng());
            if let (Some(buffer), Ok(noise), Ok(filter), Ok(gain)) = (
                Self::noise_buffer(ctx, 0.5, samples),
                ctx.create_buffer_source(),
                ctx.create_biquad_filter(),
                ctx.create_gain(),
            ) {
                noise.set_buffer(Some(&buffer));
                filter.set_type(BiquadFilterType::Lowpass);
                filter.frequency().set_value_at_time(1500.0, t).ok();
                filter
                    .frequency()
                    .exponential_ramp_to_value_at_time(50.0, t + 0.4)
                    .ok();
                gain.gain().set_value_at_time(0.8, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                noise.connect_with_audio_node(&filter).ok();
                filter.connect_with_audio_node(&gain).ok();
                gain.connect_with_audio_node(out).ok();
                noise.start().ok();
            }

            // Boom
            if let Some((osc, gain)) = Self::create_osc(ctx, out, 150.0, Wave::Sine) {
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.3)
                    .ok();
                gain.gain().set_value_at_time(1.0, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.4).ok();
            }

            // Ping
            if let Some((osc, gain)) = Self::create_osc(ctx, out, 800.0, Wave::Sine) {
                osc.frequency().set_value_at_time(800.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(1600.0, t + 0.1)
                    .ok();
                gain.gain().set_value_at_time(0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }

        fn play_ui(ctx: &AudioContext, effect: SoundEffect, vol: f32) {
            let dest: AudioNode = ctx.destination().into();
            let t = ctx.current_time();
            match effect {
                SoundEffect::UiClick => {
                    let Some((osc, gain)) = Self::create_osc(ctx, &dest, 800.0, Wave::Sine) else {
                        return;
                    };
                    osc.frequency().set_value_at_time(800.0, t).ok();
                    osc.frequency()
                        .exponential_ramp_to_value_at_time(1200.0, t + 0.05)
                        .ok();
                    gain.gain().set_value_at_time(0.05 * vol, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.001, t + 0.05)
                        .ok();
                    osc.start().ok();
                    osc.stop_with_when(t + 0.05).ok();
                }
                SoundEffect::UiToggle => {
                    let Some((osc, gain)) = Self::create_osc(ctx, &dest, 400.0, Wave::Triangle)
                    else {
                        return;
                    };
                    osc.frequency().set_value_at_time(400.0, t).ok();
                    osc.frequency()
                        .linear_ramp_to_value_at_time(600.0, t + 0.1)
                        .ok();
                    gain.gain().set_value_at_time(0.05 * vol, t).ok();
                    gain.gain()
                        .linear_ramp_to_value_at_time(0.001, t + 0.1)
                        .ok();
                    osc.start().ok();
                    osc.stop_with_when(t + 0.1).ok();
                }
                SoundEffect::UiStart => {
                    // C5, E5, G5
                    for (i, freq) in [523.25, 659.25, 783.99].iter().enumerate() {
                        let start = t + i as f64 * 0.05;
                        if let Some((osc, gain)) = Self::create_osc(ctx, &dest, *freq, Wave::Sine) {
                            gain.gain().set_value_at_time(0.0, start).ok();
                            gain.gain()
                                .linear_ramp_to_value_at_time(0.1 * vol, start + 0.05)
                                .ok();
                            gain.gain()
                                .exponential_ramp_to_value_at_time(0.001, start + 0.4)
                                .ok();
                            osc.start_with_when(start).ok();
                            osc.stop_with_when(start + 0.5).ok();
                        }
                    }
                }
                _ => {}
            }
        }

        /// Squeak - quick triangle chirp up and back down
        fn play_squeak(ctx: &AudioContext, out: &AudioNode) {
            let base = 2000.0 + rand::random::<f32>() * 800.0;
            let Some((osc, gain)) = Self::create_osc(ctx, out, base, Wave::Triangle) else {
                return;
            };
            let t = ctx.current_time();
            osc.frequency().set_value_at_time(base, t).ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(base + 600.0, t + 0.05)
                .ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(base, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.3, t + 0.01).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        /// Bubble - short sine pop that pitches up
        fn play_bubble(ctx: &AudioContext, out: &AudioNode) {
            let freq = 400.0 + rand::random::<f32>() * 600.0;
            let Some((osc, gain)) = Self::create_osc(ctx, out, freq, Wave::Sine) else {
                return;
            };
            let t = ctx.current_time();
            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(freq * 2.0, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.3, t + 0.02).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        fn start_buzz(ctx: &AudioContext, out: &AudioNode, v: &BuzzVoice) -> Vec<AudioScheduledSourceNode> {
            let Some((osc, gain)) = Self::create_osc(ctx, out, v.freq, v.wave) else {
                return Vec::new();
            };
            gain.gain().set_value(v.gain);
            let mut sources = Vec::new();

            for (wave, freq, depth) in [
                (v.flutter_wave, v.flutter_freq, v.flutter_depth),
                (Wave::Sine, v.drift_freq, v.drift_depth),
            ] {
                let (Ok(lfo), Ok(depth_gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
                    continue;
                };
                lfo.set_type(wave.into());
                lfo.frequency().set_value(freq);
                depth_gain.gain().set_value(depth);
                lfo.connect_with_audio_node(&depth_gain).ok();
                depth_gain.connect_with_audio_param(&osc.frequency()).ok();
                lfo.start().ok();
                sources.push(lfo.into());
            }

            osc.start().ok();
            sources.push(osc.into());
            sources
        }

        fn start_rumble(ctx: &AudioContext, out: &AudioNode) -> Vec<AudioScheduledSourceNode> {
            let samples = brown_noise(Self::sample_count(ctx, 5.0), &mut rand::rng());
            let (Some(buffer), Ok(noise), Ok(filter), Ok(gain)) = (
                Self::noise_buffer(ctx, 5.0, samples),
                ctx.create_buffer_source(),
                ctx.create_biquad_filter(),
                ctx.create_gain(),
            ) else {
                return Vec::new();
            };
            noise.set_buffer(Some(&buffer));
            noise.set_loop(true);
            filter.set_type(BiquadFilterType::Lowpass);
            filter.frequency().set_value(400.0);
            gain.gain().set_value(0.3);
            noise.connect_with_audio_node(&filter).ok();
            filter.connect_with_audio_node(&gain).ok();
            gain.connect_with_audio_node(out).ok();
            noise.start().ok();
            vec![noise.into()]
        }

        fn start_hiss(ctx: &AudioContext, out: &AudioNode) -> Vec<AudioScheduledSourceNode> {
            let samples = white_noise(Self::sample_count(ctx, 2.0), &mut rand::rng());
            let (Some(buffer), Ok(noise), Ok(filter), Ok(gain), Ok(lfo), Ok(lfo_gain)) = (
                Self::noise_buffer(ctx, 2.0, samples),
                ctx.create_buffer_source(),
                ctx.create_biquad_filter(),
                ctx.create_gain(),
                ctx.create_oscillator(),
                ctx.create_gain(),
            ) else {
                return Vec::new();
            };
            noise.set_buffer(Some(&buffer));
            noise.set_loop(true);
            filter.set_type(BiquadFilterType::Bandpass);
            filter.frequency().set_value(6000.0);
            filter.q().set_value(1.0);
            gain.gain().set_value(0.15);

            // Slow breathing swell
            lfo.set_type(OscillatorType::Sine);
            lfo.frequency().set_value(0.5);
            lfo_gain.gain().set_value(0.1);
            lfo.connect_with_audio_node(&lfo_gain).ok();
            lfo_gain.connect_with_audio_param(&gain.gain()).ok();

            noise.connect_with_audio_node(&filter).ok();
            filter.connect_with_audio_node(&gain).ok();
            gain.connect_with_audio_node(out).ok();
            noise.start().ok();
            lfo.start().ok();
            vec![noise.into(), lfo.into()]
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            let Some(ctx) = self.live_ctx() else { return };
            match effect {
                SoundEffect::Tap => Self::play_tap(ctx, vol),
                SoundEffect::Catch(_) => Self::play_catch(ctx, vol),
                ui => Self::play_ui(ctx, ui, vol),
            }
        }

        fn start_ambience(&mut self, visual: VisualType) {
            self.stop_ambience();
            let Some(kind) = Ambience::for_visual(visual) else {
                return;
            };
            let vol = self.volume;
            let Some(ctx) = self.live_ctx() else { return };
            let Ok(master) = ctx.create_gain() else { return };
            master.gain().set_value(0.6 * vol);
            if master.connect_with_audio_node(&ctx.destination()).is_err() {
                return;
            }

            let out: &AudioNode = &master;
            let sources = match &kind {
                Ambience::Squeaks => Vec::new(),
                Ambience::Buzz(voice) => Self::start_buzz(ctx, out, voice),
                Ambience::Underwater => Self::start_rumble(ctx, out),
                Ambience::Hiss => Self::start_hiss(ctx, out),
            };
            let accents = kind
                .accent_interval()
                .map(|range| AccentClock::new(range, ctx.current_time()));

            log::info!("Ambience started for {}", visual.as_str());
            self.ambience = Some(ActiveAmbience {
                kind,
                master,
                sources,
                accents,
            });
            self.update();
        }

        fn stop_ambience(&mut self) {
            let Some(active) = self.ambience.take() else {
                return;
            };
            for source in &active.sources {
                // Already-stopped sources throw; nothing to do about it
                source.stop().ok();
            }
            active.master.disconnect().ok();
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
            if let Some(active) = &self.ambience {
                active.master.gain().set_value(0.6 * self.volume);
            }
        }

        fn volume(&self) -> f32 {
            self.volume
        }

        fn update(&mut self) {
            let Some(ctx) = self.ctx.as_ref() else { return };
            let Some(active) = self.ambience.as_mut() else {
                return;
            };
            let Some(clock) = active.accents.as_mut() else {
                return;
            };
            if !clock.poll(ctx.current_time(), &mut rand::rng()) {
                return;
            }
            let out: &AudioNode = &active.master;
            match active.kind {
                Ambience::Squeaks => Self::play_squeak(ctx, out),
                Ambience::Underwater => Self::play_bubble(ctx, out),
                _ => {}
            }
        }
    }
}
