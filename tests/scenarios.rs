//! End-to-end scenarios through the public API

use glam::Vec2;
use pounce::audio::{NullAudio, SoundEffect};
use pounce::catalog::{find_toy, next_toy};
use pounce::sim::{GameEvent, Viewport, World, interact, tick};
use pounce::{FrameDriver, MovementStyle, ScoreBoard, ScoreListener, ToyConfig, VisualType};

fn custom(style: MovementStyle, speed: f32, size: f32) -> ToyConfig {
    let mut toy = find_toy("beetle_green").unwrap();
    toy.movement_style = style;
    toy.speed = speed;
    toy.size = size;
    toy
}

#[test]
fn wander_keeps_cruising_speed_inside_bounds() {
    let mut world = World::new(
        custom(MovementStyle::Wander, 5.0, 50.0),
        1,
        Viewport::new(800.0, 600.0),
        1234,
    );
    for n in 1..=100 {
        tick(&mut world, true);
        let e = &world.entities[0];
        assert!(world.viewport.contains(e.pos, 50.0));
        let speed = e.vel.length();
        assert!((speed - 5.0).abs() < 1e-3, "tick {n}: speed {speed}");
    }
}

#[test]
fn tap_beside_mouse_catches_it() {
    let mut world = World::new(find_toy("mouse_grey").unwrap(), 1, Viewport::new(800.0, 600.0), 9);
    world.entities[0].pos = Vec2::new(100.0, 100.0);
    world.entities[0].vel = Vec2::ZERO;

    let outcome = interact(&mut world, Vec2::new(150.0, 100.0));
    assert_eq!(outcome.caught, 1);

    let e = &world.entities[0];
    assert_eq!(e.scale, Vec2::new(1.5, 0.5));
    // Flung away from the tap at three times cruising speed
    assert!(e.vel.x < 0.0);
    assert!((e.vel.length() - 30.0).abs() < 1e-3);
    assert_eq!(world.ripples.len(), 1);
    assert_eq!(world.particles.len(), pounce::consts::PARTICLE_COUNT);
}

#[test]
fn teleport_leaves_two_bursts_and_stops() {
    let mut world = World::new(
        custom(MovementStyle::Teleport, 10.0, 40.0),
        1,
        Viewport::new(800.0, 600.0),
        77,
    );
    let mut found = None;
    for _ in 0..5000 {
        tick(&mut world, true);
        let events = world.drain_events();
        if let Some(to) = events.iter().find_map(|ev| match ev {
            GameEvent::Teleported { to, .. } => Some(*to),
            _ => None,
        }) {
            let bursts = events
                .iter()
                .filter(|ev| matches!(ev, GameEvent::Burst { .. }))
                .count();
            found = Some((to, bursts));
            break;
        }
    }

    let (to, bursts) = found.expect("a teleport within 5000 ticks");
    assert_eq!(bursts, 2);
    let e = &world.entities[0];
    assert_eq!(e.vel, Vec2::ZERO);
    assert_eq!(e.pos, to);
}

#[test]
fn same_count_selection_is_a_full_reset() {
    let mut driver = FrameDriver::new(
        find_toy("fly_blue").unwrap(),
        3,
        Viewport::new(640.0, 480.0),
        5,
        NullAudio::new(0.5),
        ScoreBoard::new(),
    );
    driver.set_playing(true);
    for _ in 0..30 {
        driver.frame();
    }
    driver.set_toy_count(3);
    assert_eq!(driver.world().entities.len(), 3);
    assert!(driver.world().entities.iter().all(|e| e.trail.is_empty()));
    assert!(driver.world().particles.is_empty());
}

#[test]
fn multiplier_grows_then_resets_on_miss() {
    let mut board = ScoreBoard::new();
    for _ in 0..3 {
        board.on_catch();
    }
    assert_eq!((board.score, board.multiplier), (6, 4));
    board.on_miss();
    assert_eq!(board.multiplier, 1);
    board.on_catch();
    assert_eq!(board.score, 7);
}

#[test]
fn generated_toy_plays_like_a_builtin() {
    let toy = ToyConfig::from_json(
        r##"{"name": "Dust Bunny", "emoji": "🐰", "visualType": "emoji",
            "color": "#e5e7eb", "speed": 6, "size": 55, "movementStyle": "stop-go"}"##,
    )
    .unwrap();
    assert_eq!(toy.id, "custom_dust_bunny");
    assert_eq!(toy.visual_type, VisualType::Emoji);
    assert_eq!(toy.movement_style, MovementStyle::StopGo);

    let mut driver = FrameDriver::new(
        toy,
        2,
        Viewport::new(800.0, 600.0),
        3,
        NullAudio::new(1.0),
        ScoreBoard::new(),
    );
    driver.set_playing(true);
    // Emoji toys have no ambience
    assert_eq!(driver.audio().ambience, None);

    let frame = driver.frame();
    assert_eq!(frame.glyphs.len(), 2);
    assert!(frame.glyphs.iter().all(|g| g.text == "🐰"));

    let pos = driver.world().entities[0].pos;
    driver.interact(pos);
    assert!(driver.score().score >= 1);
    assert!(driver.audio().played.contains(&SoundEffect::Catch(VisualType::Emoji)));
}

#[test]
fn cycling_toys_visits_every_builtin() {
    let first = find_toy("mouse_grey").unwrap();
    let mut id = first.id.clone();
    let mut seen = vec![id.clone()];
    loop {
        id = next_toy(&id).id;
        if id == first.id {
            break;
        }
        seen.push(id.clone());
    }
    assert_eq!(seen.len(), pounce::catalog::default_toys().len());
}
