//! Frame composition
//!
//! Paint order: background, ambient layer, ripples, entities (trail then
//! body), particles.

use glam::Vec2;

use super::bodies::{Glyph, draw_entity};
use super::painter::Painter;
use super::vertex::Vertex;
use super::vertex::colors::{self, with_alpha};
use crate::sim::World;

/// Toggles for optional layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub trails: bool,
    pub particles: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trails: true,
            particles: true,
        }
    }
}

/// Everything needed to present one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Triangle list in screen pixels
    pub vertices: Vec<Vertex>,
    /// Text drawn over the triangles by the host
    pub glyphs: Vec<Glyph>,
    pub clear: [f32; 4],
}

/// Build the display list for the current world state
pub fn build_frame(world: &World, options: &RenderOptions) -> Frame {
    let mut p = Painter::new();
    let mut glyphs = Vec::new();
    let underwater = world.is_underwater();

    let clear = if underwater {
        paint_underwater(&mut p, world);
        colors::WATER_BOTTOM
    } else {
        colors::BACKGROUND
    };

    paint_ambient(&mut p, world, underwater);
    paint_ripples(&mut p, world, underwater);

    let toy = &world.toy;
    for e in &world.entities {
        if options.trails && toy.visual_type.draws_trail() && e.trail.len() > 1 {
            let width = if toy.visual_type == crate::VisualType::Laser {
                toy.size / 4.0
            } else {
                toy.size / 8.0
            };
            let points: Vec<Vec2> = e.trail.iter().copied().collect();
            p.save();
            p.set_alpha(0.3);
            p.stroke_polyline(&points, width, toy.rgba());
            p.restore();
        }
        draw_entity(&mut p, &mut glyphs, e, toy, world.frame_count);
    }

    if options.particles {
        for particle in &world.particles {
            p.save();
            p.set_alpha(particle.life);
            p.fill_circle(particle.pos, particle.size, particle.color);
            p.restore();
        }
    }

    Frame {
        vertices: p.finish(),
        glyphs,
        clear,
    }
}

/// Water gradient and swaying seaweed
fn paint_underwater(p: &mut Painter, world: &World) {
    let (w, h) = (world.viewport.width.max(0.0), world.viewport.height.max(0.0));
    p.fill_vertical_gradient(Vec2::ZERO, Vec2::new(w, h), colors::WATER_TOP, colors::WATER_BOTTOM);

    let t = world.ambient_ticks as f32;
    for plant in &world.seaweed {
        let sway = (t * 0.02 + plant.offset).sin() * 10.0;
        let base = Vec2::new(plant.x, h);
        let tip = Vec2::new(plant.x + sway * 1.5, h - plant.height);
        let mut outline =
            super::shapes::quad_bezier(base, Vec2::new(plant.x + sway, h - plant.height / 2.0), tip, 12);
        outline.extend(super::shapes::quad_bezier(
            tip,
            Vec2::new(plant.x - sway, h - plant.height / 2.0),
            Vec2::new(plant.x - 15.0, h),
            12,
        ));
        p.fill_polygon(&outline, colors::SEAWEED);
    }
}

fn paint_ambient(p: &mut Painter, world: &World, underwater: bool) {
    for d in &world.ambient {
        if underwater {
            p.stroke_circle(d.pos, d.size, 1.0, colors::BUBBLE_RIM);
            p.fill_circle(d.pos - Vec2::splat(d.size * 0.3), d.size * 0.2, colors::BUBBLE_GLINT);
        } else {
            p.fill_circle(d.pos, d.size, colors::DUST);
        }
    }
}

fn paint_ripples(p: &mut Painter, world: &World, underwater: bool) {
    let color = if underwater {
        colors::RIPPLE_UNDERWATER
    } else {
        colors::RIPPLE
    };
    for r in &world.ripples {
        p.stroke_circle(r.pos, r.size, 2.0, with_alpha(color, color[3] * r.alpha.max(0.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_toy;
    use crate::sim::{Viewport, spawn_particle_burst, spawn_ripple, tick};

    fn world(id: &str) -> World {
        World::new(find_toy(id).unwrap(), 2, Viewport::new(400.0, 300.0), 11)
    }

    #[test]
    fn test_clear_color_by_mode() {
        assert_eq!(build_frame(&world("mouse_grey"), &RenderOptions::default()).clear, colors::BACKGROUND);
        assert_eq!(build_frame(&world("fish_orange"), &RenderOptions::default()).clear, colors::WATER_BOTTOM);
    }

    #[test]
    fn test_background_comes_first_underwater() {
        let frame = build_frame(&world("fish_orange"), &RenderOptions::default());
        // Gradient rect is the first two triangles
        assert_eq!(frame.vertices[0].color, colors::WATER_TOP);
        assert_eq!(frame.vertices[0].position, [0.0, 0.0]);
    }

    #[test]
    fn test_particles_drawn_last_and_faded() {
        let mut w = world("beetle_green");
        spawn_particle_burst(&mut w, Vec2::new(10.0, 10.0));
        w.particles.iter_mut().for_each(|p| p.life = 0.5);
        let frame = build_frame(&w, &RenderOptions::default());
        let last = frame.vertices.last().unwrap();
        assert!((last.color[3] - 0.5 * w.toy.rgba()[3]).abs() < 1e-6);

        let without = build_frame(&w, &RenderOptions { particles: false, ..Default::default() });
        assert!(without.vertices.len() < frame.vertices.len());
    }

    #[test]
    fn test_trail_toggle_and_visual_rules() {
        let mut w = world("fly_blue");
        for _ in 0..10 {
            tick(&mut w, true);
        }
        let with = build_frame(&w, &RenderOptions::default()).vertices.len();
        let without = build_frame(&w, &RenderOptions { trails: false, ..Default::default() })
            .vertices
            .len();
        assert!(with > without);

        // Mice never draw a trail
        let mut m = world("mouse_grey");
        for _ in 0..10 {
            tick(&mut m, true);
        }
        let a = build_frame(&m, &RenderOptions::default()).vertices.len();
        let b = build_frame(&m, &RenderOptions { trails: false, ..Default::default() })
            .vertices
            .len();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ripple_alpha_follows_state() {
        let mut w = world("mouse_grey");
        w.ambient.clear();
        w.entities.clear();
        spawn_ripple(&mut w, Vec2::new(50.0, 50.0));
        w.ripples[0].alpha = 0.25;
        let frame = build_frame(&w, &RenderOptions::default());
        assert!(frame.vertices.iter().all(|v| (v.color[3] - 0.25).abs() < 1e-6));
    }
}
