//! Transient visual effects: particle bursts, tap ripples and the ambient field

use glam::Vec2;
use rand::Rng;

use super::state::{AmbientParticle, GameEvent, Particle, Ripple, Seaweed, World};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Spawn a burst of `PARTICLE_COUNT` particles in the toy color at `pos`
pub fn spawn_particle_burst(world: &mut World, pos: Vec2) {
    let color = world.toy.rgba();
    for _ in 0..PARTICLE_COUNT {
        let angle = world.rng.random::<f32>() * std::f32::consts::TAU;
        let speed = world.rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        let size = world.rng.random_range(2.0..8.0);
        world.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            color,
            size,
        });
    }
    world.events.push(GameEvent::Burst { pos });
}

/// Spawn a tap ripple at `pos` and request the tap sound
pub fn spawn_ripple(world: &mut World, pos: Vec2) {
    world.ripples.push(Ripple {
        pos,
        size: RIPPLE_START_SIZE,
        alpha: 1.0,
    });
    world.request_sound(SoundEffect::Tap);
}

/// Move particles and fade them; removes those whose life reached zero
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Grow and fade ripples; removes fully faded ones
pub fn update_ripples(ripples: &mut Vec<Ripple>) {
    for r in ripples.iter_mut() {
        r.size += RIPPLE_GROWTH;
        r.alpha -= RIPPLE_FADE;
    }
    ripples.retain(|r| r.alpha > 0.0);
}

/// Populate dust (or bubbles and seaweed underwater) for the current viewport
pub fn build_ambient_field(world: &mut World) {
    let underwater = world.is_underwater();
    let (w, h) = (world.viewport.width.max(0.0), world.viewport.height.max(0.0));
    let rng = &mut world.rng;

    let count = if underwater { BUBBLE_COUNT } else { DUST_COUNT };
    world.ambient = (0..count)
        .map(|_| {
            let pos = Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h);
            let vx = (rng.random::<f32>() - 0.5) * 0.2;
            let vy = if underwater {
                // Float upward
                -(rng.random::<f32>() * 0.5 + 0.2)
            } else {
                (rng.random::<f32>() - 0.5) * 0.2
            };
            let max_size = if underwater { 8.0 } else { 2.0 };
            AmbientParticle {
                pos,
                vel: Vec2::new(vx, vy),
                size: rng.random::<f32>() * max_size + 1.0,
            }
        })
        .collect();

    world.seaweed.clear();
    if underwater {
        let mut x = 0.0;
        while x < w {
            world.seaweed.push(Seaweed {
                x: x + rng.random::<f32>() * 20.0,
                height: 50.0 + rng.random::<f32>() * 100.0,
                offset: rng.random::<f32>() * std::f32::consts::TAU,
            });
            x += SEAWEED_SPACING;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_toy;
    use crate::sim::state::Viewport;

    fn world(toy_id: &str) -> World {
        World::new(find_toy(toy_id).unwrap(), 1, Viewport::new(400.0, 300.0), 42)
    }

    #[test]
    fn test_burst_shape() {
        let mut w = world("beetle_green");
        spawn_particle_burst(&mut w, Vec2::new(50.0, 60.0));
        assert_eq!(w.particles.len(), PARTICLE_COUNT);
        for p in &w.particles {
            assert_eq!(p.life, 1.0);
            assert_eq!(p.pos, Vec2::new(50.0, 60.0));
            let speed = p.vel.length();
            assert!(speed >= PARTICLE_MIN_SPEED - 1e-4 && speed <= PARTICLE_MAX_SPEED + 1e-4);
            assert!(p.size >= 2.0 && p.size < 8.0);
            assert_eq!(p.color, w.toy.rgba());
        }
        assert_eq!(w.events, vec![GameEvent::Burst { pos: Vec2::new(50.0, 60.0) }]);
    }

    #[test]
    fn test_particle_dies_exactly_when_life_runs_out() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.1,
            color: [1.0; 4],
            size: 3.0,
        }];
        let mut ticks = 0;
        let mut last_life = 0.1;
        while !particles.is_empty() {
            update_particles(&mut particles);
            ticks += 1;
            if let Some(p) = particles.first() {
                assert!(p.life > 0.0);
                assert!(p.life < last_life);
                last_life = p.life;
            }
        }
        // 0.1 / 0.02 = 5 ticks, allowing for float rounding on the last step
        assert!((5..=6).contains(&ticks), "removed after {ticks} ticks");
    }

    #[test]
    fn test_full_life_particle_lasts_about_fifty_ticks() {
        let mut w = world("beetle_green");
        spawn_particle_burst(&mut w, Vec2::ZERO);
        for _ in 0..49 {
            update_particles(&mut w.particles);
        }
        assert_eq!(w.particles.len(), PARTICLE_COUNT);
        for _ in 0..2 {
            update_particles(&mut w.particles);
        }
        assert!(w.particles.is_empty());
    }

    #[test]
    fn test_ripple_grows_and_fades() {
        let mut w = world("mouse_grey");
        spawn_ripple(&mut w, Vec2::new(10.0, 10.0));
        assert_eq!(w.events, vec![GameEvent::Sound(SoundEffect::Tap)]);

        let (mut size, mut alpha) = (w.ripples[0].size, w.ripples[0].alpha);
        let mut ticks = 0;
        while !w.ripples.is_empty() {
            update_ripples(&mut w.ripples);
            ticks += 1;
            if let Some(r) = w.ripples.first() {
                assert!(r.size > size);
                assert!(r.alpha < alpha);
                assert!(r.alpha > 0.0);
                size = r.size;
                alpha = r.alpha;
            }
        }
        assert!((50..=51).contains(&ticks));
    }

    #[test]
    fn test_ripple_silent_when_muted() {
        let mut w = world("mouse_grey");
        w.sound_enabled = false;
        spawn_ripple(&mut w, Vec2::ZERO);
        assert_eq!(w.ripples.len(), 1);
        assert!(w.events.is_empty());
    }

    #[test]
    fn test_ambient_field_by_mode() {
        let dry = world("mouse_grey");
        assert_eq!(dry.ambient.len(), DUST_COUNT);
        assert!(dry.seaweed.is_empty());
        assert!(dry.ambient.iter().all(|d| d.size >= 1.0 && d.size <= 3.0));

        let wet = world("fish_orange");
        assert_eq!(wet.ambient.len(), BUBBLE_COUNT);
        assert!(wet.ambient.iter().all(|b| b.vel.y < 0.0));
        // One plant per 40px of a 400px floor
        assert_eq!(wet.seaweed.len(), 10);
    }
}
