//! Frame driver
//!
//! Owns the world and the play/pause state, runs one tick plus one paint per
//! frame, and forwards simulation events to the score and audio collaborators.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::catalog::ToyConfig;
use crate::consts::{MAX_TOY_COUNT, MIN_TOY_COUNT};
use crate::renderer::{Frame, RenderOptions, build_frame};
use crate::score::ScoreListener;
use crate::sim::{GameEvent, InteractionOutcome, Viewport, World, interact, tick};

pub struct FrameDriver<A: AudioSink, L: ScoreListener> {
    world: World,
    count: usize,
    playing: bool,
    options: RenderOptions,
    audio: A,
    score: L,
}

impl<A: AudioSink, L: ScoreListener> FrameDriver<A, L> {
    /// Start a paused session with `count` critters of `toy`
    pub fn new(toy: ToyConfig, count: usize, viewport: Viewport, seed: u64, audio: A, score: L) -> Self {
        let count = count.clamp(MIN_TOY_COUNT, MAX_TOY_COUNT);
        let mut world = World::new(toy.sanitized(), count, viewport, seed);
        world.sound_enabled = audio.volume() > 0.0;
        log::info!(
            "Session started: {}x{} viewport, seed {seed}",
            viewport.width,
            viewport.height
        );
        Self {
            world,
            count,
            playing: false,
            options: RenderOptions::default(),
            audio,
            score,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access (scripted scenarios and tests)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn toy(&self) -> &ToyConfig {
        &self.world.toy
    }

    pub fn toy_count(&self) -> usize {
        self.count
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn score(&self) -> &L {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut L {
        &mut self.score
    }

    pub fn set_render_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Advance one tick without painting
    pub fn step(&mut self) {
        tick(&mut self.world, self.playing);
        self.audio.update();
        self.dispatch();
    }

    /// One tick followed by one paint
    pub fn frame(&mut self) -> Frame {
        self.step();
        build_frame(&self.world, &self.options)
    }

    fn dispatch(&mut self) {
        for event in self.world.drain_events() {
            match event {
                GameEvent::Caught { .. } => self.score.on_catch(),
                GameEvent::Missed => self.score.on_miss(),
                GameEvent::Sound(effect) => self.audio.play(effect),
                GameEvent::Burst { .. } | GameEvent::Teleported { .. } => {}
            }
        }
    }

    fn restart_ambience(&mut self) {
        if self.playing && self.audio.volume() > 0.0 {
            self.audio.start_ambience(self.world.toy.visual_type);
        } else {
            self.audio.stop_ambience();
        }
    }

    /// Switch toys. Always a full reset, even for the same toy.
    pub fn select_toy(&mut self, toy: ToyConfig) {
        log::info!("Toy selected: {} ({})", toy.name, toy.id);
        self.world.reset(toy.sanitized(), self.count);
        self.restart_ambience();
    }

    /// Change the number of critters. Always a full reset, even for the same count.
    pub fn set_toy_count(&mut self, count: usize) {
        self.count = count.clamp(MIN_TOY_COUNT, MAX_TOY_COUNT);
        let toy = self.world.toy.clone();
        self.world.reset(toy, self.count);
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playing == playing {
            return;
        }
        self.playing = playing;
        log::info!("{}", if playing { "Playing" } else { "Paused" });
        self.restart_ambience();
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.set_playing(!self.playing);
        self.playing
    }

    pub fn set_volume(&mut self, volume: f32) {
        let was_audible = self.audio.volume() > 0.0;
        self.audio.set_volume(volume);
        let audible = self.audio.volume() > 0.0;
        self.world.sound_enabled = audible;
        if audible != was_audible {
            self.restart_ambience();
        }
    }

    /// New bounds apply from the next tick on; nothing is moved now
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.viewport = Viewport::new(width, height);
        log::info!("Resized to {width}x{height}");
    }

    /// Tap/click at `point` (simulation pixels). Ignored while paused.
    pub fn interact(&mut self, point: Vec2) -> Option<InteractionOutcome> {
        if !self.playing {
            return None;
        }
        let outcome = interact(&mut self.world, point);
        self.dispatch();
        Some(outcome)
    }

    /// Several simultaneous touches; each is its own interaction
    pub fn interact_many(&mut self, points: &[Vec2]) -> usize {
        points
            .iter()
            .filter_map(|p| self.interact(*p))
            .map(|o| o.caught)
            .sum()
    }

    /// Leave the game view: silence everything and stop simulating entities
    pub fn teardown(&mut self) {
        self.playing = false;
        self.audio.stop_ambience();
        self.world.events.clear();
        log::info!("Session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{NullAudio, SoundEffect};
    use crate::catalog::{VisualType, find_toy};
    use crate::score::ScoreBoard;

    type Driver = FrameDriver<NullAudio, ScoreBoard>;

    fn driver(id: &str, count: usize) -> Driver {
        FrameDriver::new(
            find_toy(id).unwrap(),
            count,
            Viewport::new(800.0, 600.0),
            21,
            NullAudio::new(0.5),
            ScoreBoard::new(),
        )
    }

    #[test]
    fn test_same_count_still_resets() {
        let mut d = driver("mouse_grey", 3);
        d.set_playing(true);
        for _ in 0..20 {
            d.frame();
        }
        let before: Vec<Vec2> = d.world().entities.iter().map(|e| e.pos).collect();
        assert!(d.world().entities.iter().all(|e| !e.trail.is_empty()));

        d.set_toy_count(3);
        assert_eq!(d.world().entities.len(), 3);
        assert!(d.world().entities.iter().all(|e| e.trail.is_empty()));
        let after: Vec<Vec2> = d.world().entities.iter().map(|e| e.pos).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_count_is_clamped() {
        let mut d = driver("mouse_grey", 0);
        assert_eq!(d.toy_count(), 1);
        d.set_toy_count(12);
        assert_eq!(d.toy_count(), MAX_TOY_COUNT);
        assert_eq!(d.world().entities.len(), MAX_TOY_COUNT);
    }

    #[test]
    fn test_reselecting_same_toy_resets() {
        let mut d = driver("beetle_green", 2);
        d.set_playing(true);
        d.frame();
        d.world_mut().particles.clear();
        crate::sim::spawn_particle_burst(d.world_mut(), Vec2::ZERO);
        d.select_toy(find_toy("beetle_green").unwrap());
        assert!(d.world().particles.is_empty());
        assert!(d.world().entities.iter().all(|e| e.trail.is_empty()));
    }

    #[test]
    fn test_interaction_ignored_while_paused() {
        let mut d = driver("mouse_grey", 1);
        let pos = d.world().entities[0].pos;
        assert_eq!(d.interact(pos), None);
        assert!(d.world().ripples.is_empty());
        assert_eq!(d.score().score, 0);
    }

    #[test]
    fn test_catch_scores_and_plays() {
        let mut d = driver("mouse_grey", 1);
        d.set_playing(true);
        let pos = d.world().entities[0].pos;
        let outcome = d.interact(pos).unwrap();
        assert_eq!(outcome.caught, 1);
        assert_eq!(d.score().score, 1);
        assert_eq!(d.score().multiplier, 2);
        assert_eq!(
            d.audio().played,
            vec![SoundEffect::Tap, SoundEffect::Catch(VisualType::Mouse)]
        );
    }

    #[test]
    fn test_miss_resets_multiplier() {
        let mut d = driver("mouse_grey", 1);
        d.set_playing(true);
        d.world_mut().entities[0].pos = Vec2::new(700.0, 500.0);
        d.score_mut().multiplier = 6;
        let outcome = d.interact(Vec2::new(10.0, 10.0)).unwrap();
        assert!(outcome.is_miss());
        assert_eq!(d.score().multiplier, 1);
    }

    #[test]
    fn test_ambience_follows_play_state_and_volume() {
        let mut d = driver("fly_blue", 1);
        assert_eq!(d.audio().ambience, None);
        d.set_playing(true);
        assert_eq!(d.audio().ambience, Some(VisualType::Fly));

        d.set_volume(0.0);
        assert_eq!(d.audio().ambience, None);
        assert!(!d.world().sound_enabled);

        d.set_volume(0.8);
        assert_eq!(d.audio().ambience, Some(VisualType::Fly));

        d.select_toy(find_toy("snake_green").unwrap());
        assert_eq!(d.audio().ambience, Some(VisualType::Snake));

        assert!(!d.toggle_playing());
        assert_eq!(d.audio().ambience, None);
    }

    #[test]
    fn test_muted_taps_are_silent() {
        let mut d = driver("mouse_grey", 1);
        d.set_volume(0.0);
        d.set_playing(true);
        let pos = d.world().entities[0].pos;
        d.interact(pos);
        assert!(d.audio().played.is_empty());
        assert_eq!(d.score().score, 1);
    }

    #[test]
    fn test_resize_applies_next_tick() {
        let mut d = driver("mouse_grey", 1);
        d.set_playing(true);
        d.world_mut().entities[0].pos = Vec2::new(700.0, 500.0);
        d.world_mut().entities[0].vel = Vec2::ZERO;
        d.resize(400.0, 300.0);
        // Not moved by the resize itself
        assert_eq!(d.world().entities[0].pos, Vec2::new(700.0, 500.0));
        d.step();
        let size = d.toy().size;
        assert!(d.world().viewport.contains(d.world().entities[0].pos, size));
    }

    #[test]
    fn test_teardown_silences() {
        let mut d = driver("fish_orange", 1);
        d.set_playing(true);
        assert!(d.audio().ambience.is_some());
        d.teardown();
        assert!(!d.is_playing());
        assert_eq!(d.audio().ambience, None);
    }

    #[test]
    fn test_resume_after_teardown() {
        let mut d = driver("fly_blue", 2);
        d.set_playing(true);
        d.teardown();
        d.set_playing(true);
        assert!(d.is_playing());
        assert_eq!(d.audio().ambience, Some(VisualType::Fly));
        let before = d.world().frame_count;
        d.step();
        assert_eq!(d.world().frame_count, before + 1);
    }

    #[test]
    fn test_multi_touch() {
        let mut d = driver("mouse_grey", 2);
        d.set_playing(true);
        let a = d.world().entities[0].pos;
        let b = d.world().entities[1].pos;
        let caught = d.interact_many(&[a, b]);
        assert!(caught >= 2);
        assert_eq!(d.world().ripples.len(), 2);
    }
}
