//! Pounce - a catch-the-critter game for cats
//!
//! Core modules:
//! - `catalog`: Toy archetypes (visual type, movement style, speed, size, color)
//! - `sim`: Per-tick simulation (movement styles, effects, hit-testing)
//! - `renderer`: Display-list painting and the WebGPU pipeline that presents it
//! - `driver`: Frame driver tying ticks, paints and input together
//! - `audio`: Sound effect / ambience capability
//! - `platform`: Browser/native platform abstraction

pub mod audio;
pub mod catalog;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;

pub use catalog::{MovementStyle, ToyConfig, ToyError, VisualType};
pub use driver::FrameDriver;
pub use score::{ScoreBoard, ScoreListener};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Particles spawned per burst
    pub const PARTICLE_COUNT: usize = 12;
    /// Life lost by a particle each tick
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Burst particle speed range (px/tick)
    pub const PARTICLE_MIN_SPEED: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 7.0;

    /// Ripple starting radius and per-tick growth
    pub const RIPPLE_START_SIZE: f32 = 10.0;
    pub const RIPPLE_GROWTH: f32 = 2.0;
    pub const RIPPLE_FADE: f32 = 0.02;

    /// Catch radius = toy size * this
    pub const CATCH_RADIUS_MULTIPLIER: f32 = 1.3;
    /// Startle radius = toy size * this
    pub const SCARED_RADIUS_MULTIPLIER: f32 = 4.0;
    /// Flee speed after a catch, in multiples of toy speed
    pub const CATCH_FLEE_FACTOR: f32 = 3.0;
    /// Startle impulse and speed cap, in multiples of toy speed
    pub const STARTLE_IMPULSE_FACTOR: f32 = 0.5;
    pub const STARTLE_MAX_FACTOR: f32 = 2.0;
    /// Squash applied on catch
    pub const CATCH_SQUASH: (f32, f32) = (1.5, 0.5);

    /// Positions kept per entity trail (long enough for snake bodies)
    pub const MAX_TRAIL_LENGTH: usize = 35;

    /// Squash/stretch recovery per tick and snap threshold
    pub const SCALE_RECOVERY: f32 = 0.15;
    pub const SCALE_EPSILON: f32 = 0.01;
    /// Fraction of the remaining turn applied to the facing angle each tick
    pub const TURN_RATE: f32 = 0.2;

    /// Bounce style physics
    pub const BOUNCE_GRAVITY: f32 = 0.35;
    pub const BOUNCE_AIR_RESISTANCE: f32 = 0.99;
    pub const BOUNCE_FLOOR_DAMPING: f32 = 0.85;

    /// Simultaneous entities allowed
    pub const MIN_TOY_COUNT: usize = 1;
    pub const MAX_TOY_COUNT: usize = 8;

    /// Ambient layer sizes
    pub const DUST_COUNT: usize = 20;
    pub const BUBBLE_COUNT: usize = 30;
    /// Horizontal spacing between seaweed plants
    pub const SEAWEED_SPACING: f32 = 40.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Move `current` a fraction `t` of the way toward `target`, along the shorter arc
#[inline]
pub fn turn_toward(current: f32, target: f32, t: f32) -> f32 {
    current + normalize_angle(target - current) * t
}
