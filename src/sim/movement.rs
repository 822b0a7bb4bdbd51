//! Movement engine
//!
//! One step per tick for every entity: style-specific steering, integration,
//! facing, wall collision, squash recovery and trail recording. Ambient dust
//! and bubbles are advanced here too.

use glam::Vec2;
use rand::Rng;

use super::effects::spawn_particle_burst;
use super::state::{Entity, GameEvent, Viewport, World};
use crate::catalog::MovementStyle;
use crate::consts::*;
use crate::turn_toward;

/// What the steering step asks the engine to do afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Continue,
    /// Jump to a random spot (teleport style)
    Teleport,
}

/// Rotate a vector by `angle` radians
#[inline]
fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Scale `v` down to `max` length if it is longer
#[inline]
fn clamp_speed(v: Vec2, max: f32) -> Vec2 {
    let mag = v.length();
    if mag > max { v / mag * max } else { v }
}

fn random_direction(rng: &mut impl Rng, speed: f32) -> Vec2 {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    Vec2::from_angle(angle) * speed
}

/// Update an entity's velocity according to its movement style
pub fn steer(e: &mut Entity, style: MovementStyle, speed: f32, rng: &mut impl Rng) -> Steer {
    match style {
        MovementStyle::Smooth => {
            if rng.random_bool(0.05) {
                let turn = rng.random::<f32>() - 0.5;
                e.vel = rotate(e.vel, turn);
            }
            let mag = e.vel.length();
            if mag < 1.0 {
                e.vel = if mag > f32::EPSILON {
                    e.vel / mag * speed
                } else {
                    Vec2::ONE.normalize() * speed
                };
            }
        }

        MovementStyle::Jittery => {
            if rng.random_bool(0.15) {
                e.vel.x += (rng.random::<f32>() - 0.5) * speed;
                e.vel.y += (rng.random::<f32>() - 0.5) * speed;
                e.vel = clamp_speed(e.vel, speed);
            }
        }

        MovementStyle::StopGo => {
            if e.wait_timer > 0 {
                e.wait_timer -= 1;
                if e.wait_timer == 0 {
                    e.vel = random_direction(rng, speed);
                }
            } else if rng.random_bool(0.02) {
                e.vel = Vec2::ZERO;
                e.wait_timer = rng.random_range(30..=90);
            }
        }

        MovementStyle::Teleport => {
            if rng.random_bool(0.1) {
                e.vel.x += (rng.random::<f32>() - 0.5) * 0.5;
                e.vel.y += (rng.random::<f32>() - 0.5) * 0.5;
                e.vel = clamp_speed(e.vel, speed * 0.3);
            }
            if rng.random_bool(0.01) {
                return Steer::Teleport;
            }
        }

        MovementStyle::Wander => {
            let steer_angle = (rng.random::<f32>() - 0.5) * 0.5;
            e.vel = rotate(e.vel, steer_angle);
            let mag = e.vel.length();
            e.vel = if mag > 0.1 {
                e.vel / mag * speed
            } else {
                random_direction(rng, speed)
            };
        }

        MovementStyle::Bounce => {
            e.vel.y += BOUNCE_GRAVITY;
            e.vel.x *= BOUNCE_AIR_RESISTANCE;
            if e.vel.x.abs() < 0.5 {
                e.vel.x = (rng.random::<f32>() - 0.5) * speed;
            }
        }
    }
    Steer::Continue
}

/// Relax squash/stretch toward 1, snapping once close enough
pub fn relax_scale(e: &mut Entity) {
    let relax = |s: f32| {
        let s = s + (1.0 - s) * SCALE_RECOVERY;
        if (1.0 - s).abs() < SCALE_EPSILON { 1.0 } else { s }
    };
    if e.scale != Vec2::ONE {
        e.scale = Vec2::new(relax(e.scale.x), relax(e.scale.y));
    }
}

/// Integrate position and ease the facing angle toward the heading
pub fn integrate(e: &mut Entity) {
    e.pos += e.vel;
    if e.vel.x.abs() > 0.1 || e.vel.y.abs() > 0.1 {
        let heading = e.vel.y.atan2(e.vel.x);
        e.angle = turn_toward(e.angle, heading, TURN_RATE);
    }
}

/// Keep the entity inside the walls. Velocity is pushed away from any wall
/// touched; bounce style loses energy (and may relaunch) on the floor.
pub fn resolve_walls(
    e: &mut Entity,
    size: f32,
    viewport: &Viewport,
    style: MovementStyle,
    speed: f32,
    rng: &mut impl Rng,
) {
    if let Some((lo, hi)) = viewport.x_bounds(size) {
        if e.pos.x <= lo {
            e.vel.x = e.vel.x.abs();
            e.pos.x = lo;
        } else if e.pos.x >= hi {
            e.vel.x = -e.vel.x.abs();
            e.pos.x = hi;
        }
    }

    if let Some((lo, hi)) = viewport.y_bounds(size) {
        if e.pos.y <= lo {
            e.vel.y = e.vel.y.abs();
            e.pos.y = lo;
        } else if e.pos.y >= hi {
            e.vel.y = -e.vel.y.abs();
            e.pos.y = hi;

            if style == MovementStyle::Bounce {
                e.vel.y *= BOUNCE_FLOOR_DAMPING;
                if e.vel.y.abs() < speed * 0.5 {
                    e.vel.y = -speed * rng.random_range(0.8..1.2);
                    e.vel.x = (rng.random::<f32>() - 0.5) * speed;
                }
            }
        }
    }
}

/// Advance every entity by one step
pub fn advance_entities(world: &mut World) {
    let style = world.toy.movement_style;
    let speed = world.toy.speed;
    let size = world.toy.size;

    for i in 0..world.entities.len() {
        relax_scale(&mut world.entities[i]);

        if steer(&mut world.entities[i], style, speed, &mut world.rng) == Steer::Teleport {
            teleport(world, i);
        }

        let viewport = world.viewport;
        let e = &mut world.entities[i];
        integrate(e);
        resolve_walls(e, size, &viewport, style, speed, &mut world.rng);
        e.record_trail();
    }
}

/// Jump entity `index` to a random in-bounds spot with a burst at both ends.
/// Velocity is zeroed. Out-of-range indices are ignored.
pub fn teleport(world: &mut World, index: usize) {
    let Some(from) = world.entities.get(index).map(|e| e.pos) else {
        return;
    };
    spawn_particle_burst(world, from);

    let to = world.viewport.random_position(world.toy.size, &mut world.rng);
    let e = &mut world.entities[index];
    e.pos = to;
    e.vel = Vec2::ZERO;

    spawn_particle_burst(world, to);
    world.events.push(GameEvent::Teleported { from, to });
    log::debug!("Teleport {from:?} -> {to:?}");
}

/// Drift dust/bubbles and wrap them around the screen edges
pub fn update_ambient(world: &mut World) {
    let underwater = world.is_underwater();
    let t = world.ambient_ticks as f32;
    let Viewport { width, height } = world.viewport;

    for d in world.ambient.iter_mut() {
        d.pos += d.vel;
        if underwater {
            d.pos.x += (d.pos.y * 0.05 + t * 0.05).sin() * 0.5;
        }
        if width > 0.0 {
            if d.pos.x < 0.0 {
                d.pos.x = width;
            } else if d.pos.x > width {
                d.pos.x = 0.0;
            }
        }
        if height > 0.0 {
            if d.pos.y < 0.0 {
                d.pos.y = height;
            } else if d.pos.y > height {
                d.pos.y = 0.0;
            }
        }
    }
}
