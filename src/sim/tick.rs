//! Per-frame simulation tick
//!
//! Advances the world by one step. Paused worlds keep their ambient layer
//! moving; everything else is frozen.

use super::effects::{update_particles, update_ripples};
use super::movement::{advance_entities, update_ambient};
use super::state::World;

/// Advance the world by one tick
pub fn tick(world: &mut World, playing: bool) {
    world.ambient_ticks = world.ambient_ticks.wrapping_add(1);
    update_ambient(world);

    if !playing {
        return;
    }

    world.frame_count = world.frame_count.wrapping_add(1);
    advance_entities(world);
    update_particles(&mut world.particles);
    update_ripples(&mut world.ripples);
}
