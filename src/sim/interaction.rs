//! Hit-testing for taps and clicks
//!
//! A tap always leaves a ripple. Entities inside the hit radius are caught
//! (squash, burst, flee), entities inside the scared radius are pushed away,
//! everything else is left alone.

use glam::Vec2;

use super::effects::{spawn_particle_burst, spawn_ripple};
use super::state::{GameEvent, World};
use crate::audio::SoundEffect;
use crate::catalog::ToyConfig;
use crate::consts::*;

/// How a tap at some distance affects an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Caught,
    Startled,
    Untouched,
}

/// Classify a tap at `distance` from an entity of `toy`
pub fn classify(distance: f32, toy: &ToyConfig) -> Contact {
    if distance < toy.hit_radius() {
        Contact::Caught
    } else if distance < toy.scared_radius() {
        Contact::Startled
    } else {
        Contact::Untouched
    }
}

/// Result of one interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub caught: usize,
    pub startled: usize,
}

impl InteractionOutcome {
    pub fn is_miss(&self) -> bool {
        self.caught == 0
    }
}

/// Unit vector from `point` to `pos`; a random direction when they coincide
fn away_from(point: Vec2, pos: Vec2, world: &mut World) -> Vec2 {
    let delta = pos - point;
    if delta.length_squared() > f32::EPSILON {
        delta.normalize()
    } else {
        use rand::Rng;
        let angle = world.rng.random::<f32>() * std::f32::consts::TAU;
        Vec2::from_angle(angle)
    }
}

/// Apply a tap at `point` (simulation pixels) to every entity
pub fn interact(world: &mut World, point: Vec2) -> InteractionOutcome {
    spawn_ripple(world, point);

    let speed = world.toy.speed;
    let style = world.toy.movement_style;
    let visual = world.toy.visual_type;
    let mut outcome = InteractionOutcome::default();

    for i in 0..world.entities.len() {
        let pos = world.entities[i].pos;
        let distance = point.distance(pos);

        match classify(distance, &world.toy) {
            Contact::Caught => {
                outcome.caught += 1;
                world.events.push(GameEvent::Caught { pos });
                world.request_sound(SoundEffect::Catch(visual));
                spawn_particle_burst(world, pos);

                let flee = away_from(point, pos, world) * speed * CATCH_FLEE_FACTOR;
                let e = &mut world.entities[i];
                e.scale = Vec2::new(CATCH_SQUASH.0, CATCH_SQUASH.1);
                e.vel = flee;

                if style.relocates_on_catch() {
                    let to = world.viewport.random_position(world.toy.size, &mut world.rng);
                    world.entities[i].pos = to;
                }
                log::debug!("Caught {} at {pos:?} (d={distance:.1})", world.toy.name);
            }
            Contact::Startled => {
                outcome.startled += 1;
                let impulse = away_from(point, pos, world) * speed * STARTLE_IMPULSE_FACTOR;
                let e = &mut world.entities[i];
                e.vel += impulse;
                let max = speed * STARTLE_MAX_FACTOR;
                let mag = e.vel.length();
                if mag > max {
                    e.vel = e.vel / mag * max;
                }
            }
            Contact::Untouched => {}
        }
    }

    if outcome.is_miss() {
        world.events.push(GameEvent::Missed);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MovementStyle, find_toy};
    use crate::sim::state::Viewport;

    fn mouse_world() -> World {
        let mut w = World::new(find_toy("mouse_grey").unwrap(), 1, Viewport::new(800.0, 600.0), 9);
        w.entities[0].pos = Vec2::new(100.0, 100.0);
        w.entities[0].vel = Vec2::new(2.0, 0.0);
        w
    }

    #[test]
    fn test_classify_radii() {
        let toy = find_toy("mouse_grey").unwrap();
        // size 70: hit radius 91, scared radius 280
        assert_eq!(classify(0.0, &toy), Contact::Caught);
        assert_eq!(classify(90.9, &toy), Contact::Caught);
        assert_eq!(classify(91.0, &toy), Contact::Startled);
        assert_eq!(classify(279.9, &toy), Contact::Startled);
        assert_eq!(classify(280.0, &toy), Contact::Untouched);
    }

    #[test]
    fn test_tap_near_mouse_catches() {
        let mut w = mouse_world();
        let outcome = interact(&mut w, Vec2::new(150.0, 100.0));
        assert_eq!(outcome, InteractionOutcome { caught: 1, startled: 0 });

        let e = &w.entities[0];
        assert_eq!(e.scale, Vec2::new(1.5, 0.5));
        // Flees directly away from the tap at 3x speed
        assert!((e.vel - Vec2::new(-30.0, 0.0)).length() < 1e-4);

        assert_eq!(w.ripples.len(), 1);
        assert_eq!(w.particles.len(), PARTICLE_COUNT);

        let events = w.drain_events();
        assert_eq!(events[0], GameEvent::Sound(SoundEffect::Tap));
        assert!(events.contains(&GameEvent::Caught { pos: Vec2::new(100.0, 100.0) }));
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Catch(crate::VisualType::Mouse))));
        assert!(!events.contains(&GameEvent::Missed));
    }

    #[test]
    fn test_startle_pushes_away_and_caps() {
        let mut w = mouse_world();
        w.entities[0].vel = Vec2::new(19.0, 0.0);
        let outcome = interact(&mut w, Vec2::new(0.0, 100.0));
        assert_eq!(outcome, InteractionOutcome { caught: 0, startled: 1 });
        // 19 + 5 capped to 2 * 10
        assert!((w.entities[0].vel - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert_eq!(w.entities[0].scale, Vec2::ONE);
    }

    #[test]
    fn test_far_tap_is_a_single_miss() {
        let mut w = World::new(find_toy("mouse_grey").unwrap(), 3, Viewport::new(2000.0, 2000.0), 4);
        for (i, e) in w.entities.iter_mut().enumerate() {
            e.pos = Vec2::new(1500.0 + i as f32 * 10.0, 1500.0);
        }
        let before: Vec<Vec2> = w.entities.iter().map(|e| e.vel).collect();
        let outcome = interact(&mut w, Vec2::new(10.0, 10.0));
        assert!(outcome.is_miss());
        assert_eq!(outcome.startled, 0);
        let after: Vec<Vec2> = w.entities.iter().map(|e| e.vel).collect();
        assert_eq!(before, after);

        let misses = w.events.iter().filter(|e| **e == GameEvent::Missed).count();
        assert_eq!(misses, 1);
    }

    #[test]
    fn test_one_tap_catches_many() {
        let mut w = World::new(find_toy("mouse_grey").unwrap(), 3, Viewport::new(800.0, 600.0), 5);
        for e in w.entities.iter_mut() {
            e.pos = Vec2::new(300.0, 300.0);
        }
        let outcome = interact(&mut w, Vec2::new(310.0, 300.0));
        assert_eq!(outcome.caught, 3);
        let catches = w
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Caught { .. }))
            .count();
        assert_eq!(catches, 3);
        assert!(!w.events.contains(&GameEvent::Missed));
    }

    #[test]
    fn test_teleporters_relocate_on_catch() {
        for style in [MovementStyle::Teleport, MovementStyle::Jittery] {
            let mut toy = find_toy("fly_blue").unwrap();
            toy.movement_style = style;
            let mut w = World::new(toy.clone(), 1, Viewport::new(800.0, 600.0), 6);
            let tap = Vec2::new(400.0, 300.0);
            w.entities[0].pos = tap;
            assert_eq!(interact(&mut w, tap).caught, 1);
            let e = &w.entities[0];
            assert_ne!(e.pos, tap, "{style:?} stayed put");
            assert!(w.viewport.contains(e.pos, toy.size));
            assert!((e.speed() - toy.speed * CATCH_FLEE_FACTOR).abs() < 1e-3);
        }
    }

    #[test]
    fn test_other_styles_stay_put_on_catch() {
        let mut w = mouse_world();
        let pos = w.entities[0].pos;
        assert_eq!(interact(&mut w, pos).caught, 1);
        assert_eq!(w.entities[0].pos, pos);
    }

    #[test]
    fn test_muted_catch_has_no_sound_requests() {
        let mut w = mouse_world();
        w.sound_enabled = false;
        interact(&mut w, Vec2::new(100.0, 100.0));
        assert!(!w.events.iter().any(|e| matches!(e, GameEvent::Sound(_))));
        assert!(w.events.contains(&GameEvent::Caught { pos: Vec2::new(100.0, 100.0) }));
    }
}
