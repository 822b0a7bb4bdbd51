//! Simulation state
//!
//! Everything the tick loop and the interaction handler mutate lives in
//! `World`. The renderer only reads it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::SoundEffect;
use crate::catalog::{ToyConfig, VisualType};
use crate::consts::*;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Allowed centre range along one axis for a body of `size`.
    /// `None` when the dimension is degenerate (≤ 0): no clamping on that axis.
    pub fn axis_bounds(dim: f32, size: f32) -> Option<(f32, f32)> {
        if !(dim > 0.0) {
            return None;
        }
        let lo = size / 2.0;
        let hi = dim - size / 2.0;
        if hi < lo {
            // Narrower than the body: pin to the middle
            Some((dim / 2.0, dim / 2.0))
        } else {
            Some((lo, hi))
        }
    }

    pub fn x_bounds(&self, size: f32) -> Option<(f32, f32)> {
        Self::axis_bounds(self.width, size)
    }

    pub fn y_bounds(&self, size: f32) -> Option<(f32, f32)> {
        Self::axis_bounds(self.height, size)
    }

    /// Whether `pos` satisfies the wall constraint for a body of `size`
    pub fn contains(&self, pos: Vec2, size: f32) -> bool {
        let inside = |v: f32, b: Option<(f32, f32)>| b.is_none_or(|(lo, hi)| v >= lo && v <= hi);
        inside(pos.x, self.x_bounds(size)) && inside(pos.y, self.y_bounds(size))
    }

    /// Uniform random position satisfying the wall constraint.
    /// Degenerate axes get 0.
    pub fn random_position(&self, size: f32, rng: &mut impl Rng) -> Vec2 {
        let mut axis = |b: Option<(f32, f32)>| match b {
            Some((lo, hi)) if hi > lo => rng.random_range(lo..=hi),
            Some((lo, _)) => lo,
            None => 0.0,
        };
        let x = axis(self.x_bounds(size));
        let y = axis(self.y_bounds(size));
        Vec2::new(x, y)
    }
}

/// One simulated prey instance
#[derive(Debug, Clone)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians)
    pub angle: f32,
    /// Ticks left standing still (stop-and-go only)
    pub wait_timer: u32,
    /// Squash/stretch factor, relaxes toward 1
    pub scale: Vec2,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Entity {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            angle: vel.y.atan2(vel.x),
            wait_timer: 0,
            scale: Vec2::ONE,
            trail: VecDeque::with_capacity(MAX_TRAIL_LENGTH + 1),
        }
    }

    /// Spawn with a random position and a velocity that is already moving
    pub fn spawn(toy: &ToyConfig, viewport: &Viewport, rng: &mut impl Rng) -> Self {
        let speed = toy.speed;
        let mut component = || {
            let v = (rng.random::<f32>() - 0.5) * speed;
            if v.abs() < 1.0 { speed / 2.0 } else { v }
        };
        let vel = Vec2::new(component(), component());
        let pos = viewport.random_position(toy.size, rng);
        Self::new(pos, vel)
    }

    /// Record current position, dropping the oldest point past the cap
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > MAX_TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A short-lived effect particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 when spawned, removed at ≤ 0
    pub life: f32,
    pub color: [f32; 4],
    pub size: f32,
}

/// An expanding tap ring
#[derive(Debug, Clone)]
pub struct Ripple {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
}

/// Decorative dust mote or bubble; wraps at the edges instead of dying
#[derive(Debug, Clone)]
pub struct AmbientParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

/// A seaweed plant anchored to the floor (fish mode only)
#[derive(Debug, Clone)]
pub struct Seaweed {
    pub x: f32,
    pub height: f32,
    /// Sway phase offset
    pub offset: f32,
}

/// Things the simulation wants the outside world to know about
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An entity was caught (one per entity)
    Caught { pos: Vec2 },
    /// An interaction caught nothing
    Missed,
    /// A particle burst was spawned
    Burst { pos: Vec2 },
    /// A teleport-style entity jumped
    Teleported { from: Vec2, to: Vec2 },
    /// Sound request for the audio collaborator
    Sound(SoundEffect),
}

/// Complete simulation state for one game surface
#[derive(Debug, Clone)]
pub struct World {
    /// Active toy (read-only between resets)
    pub toy: ToyConfig,
    pub viewport: Viewport,
    pub entities: Vec<Entity>,
    pub particles: Vec<Particle>,
    pub ripples: Vec<Ripple>,
    pub ambient: Vec<AmbientParticle>,
    pub seaweed: Vec<Seaweed>,
    /// Simulation ticks while playing (drives body animation)
    pub frame_count: u64,
    /// Ticks including paused ones (drives ambient sway)
    pub ambient_ticks: u64,
    /// Volume > 0; gates sound requests
    pub sound_enabled: bool,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create a world with `count` entities of `toy`
    pub fn new(toy: ToyConfig, count: usize, viewport: Viewport, seed: u64) -> Self {
        let mut world = Self {
            toy: toy.clone(),
            viewport,
            entities: Vec::new(),
            particles: Vec::new(),
            ripples: Vec::new(),
            ambient: Vec::new(),
            seaweed: Vec::new(),
            frame_count: 0,
            ambient_ticks: 0,
            sound_enabled: true,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        world.reset(toy, count);
        world
    }

    /// Rebuild every entity and effect for a (possibly identical) selection.
    /// Always a full reset: nothing is carried over.
    pub fn reset(&mut self, toy: ToyConfig, count: usize) {
        let count = count.clamp(MIN_TOY_COUNT, MAX_TOY_COUNT);
        self.toy = toy;
        self.entities = (0..count)
            .map(|_| Entity::spawn(&self.toy, &self.viewport, &mut self.rng))
            .collect();
        self.particles.clear();
        self.ripples.clear();
        self.events.clear();
        super::effects::build_ambient_field(self);

        log::info!(
            "World reset: {} x '{}' ({}, {})",
            count,
            self.toy.name,
            self.toy.visual_type.as_str(),
            self.toy.movement_style.as_str()
        );
    }

    /// Fish mode swaps dust for bubbles and adds the underwater backdrop
    pub fn is_underwater(&self) -> bool {
        self.toy.visual_type == VisualType::Fish
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queue a sound request if sound is on
    pub(crate) fn request_sound(&mut self, effect: SoundEffect) {
        if self.sound_enabled {
            self.events.push(GameEvent::Sound(effect));
        }
    }

    /// Mutable access to the world RNG (tests and the driver reseed through this)
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
