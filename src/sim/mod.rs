//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies (sound is requested via events)

pub mod effects;
pub mod interaction;
pub mod movement;
pub mod state;
pub mod tick;

pub use effects::{spawn_particle_burst, spawn_ripple};
pub use interaction::{Contact, InteractionOutcome, classify, interact};
pub use movement::{advance_entities, teleport};
pub use state::{AmbientParticle, Entity, GameEvent, Particle, Ripple, Seaweed, Viewport, World};
pub use tick::tick;
