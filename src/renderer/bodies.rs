//! Critter body routines, one per visual type
//!
//! Body routines draw in a local frame: origin at the entity, +x forward.
//! The caller sets up translate -> rotate -> scale before calling them.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use super::painter::Painter;
use super::shapes::{cubic_bezier, quad_bezier};
use super::vertex::colors::{self, darken};
use crate::catalog::{ToyConfig, VisualType};
use crate::sim::Entity;

/// Text the host paints on top of the GPU frame (emoji fallback)
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub pos: Vec2,
    /// Font size in pixels
    pub size: f32,
    pub scale: Vec2,
}

/// Draw one entity (trail excluded) for `toy`
pub fn draw_entity(
    p: &mut Painter,
    glyphs: &mut Vec<Glyph>,
    e: &Entity,
    toy: &ToyConfig,
    frame: u64,
) {
    let size = toy.size;
    let color = toy.rgba();
    let frame = frame as f32;

    match toy.visual_type {
        VisualType::Laser => {
            // Not rotated
            p.save();
            p.translate(e.pos);
            p.scale(e.scale);
            draw_laser(p, size, color);
            p.restore();
        }
        VisualType::Snake => draw_snake(p, e, size, color, frame),
        VisualType::Emoji => glyphs.push(Glyph {
            text: toy.emoji.clone(),
            pos: e.pos,
            size,
            scale: e.scale,
        }),
        visual => {
            p.save();
            p.translate(e.pos);
            p.rotate(e.angle);
            p.scale(e.scale);
            match visual {
                VisualType::Mouse => draw_mouse(p, size, color, frame),
                VisualType::Fly => draw_fly(p, size, frame),
                VisualType::Butterfly => draw_butterfly(p, size, color, frame),
                VisualType::Beetle => draw_beetle(p, size, color, frame),
                VisualType::Fish => draw_fish(p, size, color, frame),
                _ => {}
            }
            p.restore();
        }
    }
}

/// Glowing dot with a white core
pub fn draw_laser(p: &mut Painter, size: f32, color: [f32; 4]) {
    p.fill_radial_gradient(Vec2::ZERO, size / 4.0, size, color, colors::TRANSPARENT_WHITE);
    p.fill_circle(Vec2::ZERO, size / 3.0, colors::WHITE);
}

pub fn draw_mouse(p: &mut Painter, size: f32, color: [f32; 4], frame: f32) {
    p.fill_ellipse(Vec2::ZERO, Vec2::new(size * 0.6, size * 0.4), 0.0, color);

    // Ears
    for side in [-1.0, 1.0] {
        let ear = Vec2::new(size * 0.3, side * size * 0.25);
        p.fill_circle(ear, size * 0.15, color);
        p.fill_circle(ear, size * 0.07, colors::MOUSE_EAR);
    }

    let tail_wiggle = (frame * 0.2).sin() * size * 0.2;
    let tail = quad_bezier(
        Vec2::new(-size * 0.5, 0.0),
        Vec2::new(-size, tail_wiggle),
        Vec2::new(-size * 1.5, 0.0),
        12,
    );
    p.stroke_round(&tail, size * 0.05, color);

    // Whiskers
    let root = Vec2::new(size * 0.6, 0.0);
    p.stroke_line(root - Vec2::new(0.0, size * 0.1), Vec2::new(size * 0.9, -size * 0.3), 1.0, colors::WHISKER);
    p.stroke_line(root, Vec2::new(size * 0.95, 0.0), 1.0, colors::WHISKER);
    p.stroke_line(root + Vec2::new(0.0, size * 0.1), Vec2::new(size * 0.9, size * 0.3), 1.0, colors::WHISKER);
}

pub fn draw_fly(p: &mut Painter, size: f32, frame: f32) {
    p.fill_ellipse(Vec2::ZERO, Vec2::new(size * 0.3, size * 0.2), 0.0, colors::FLY_BODY);

    let wing_scale = (frame * 0.8).sin().abs();
    for side in [-1.0f32, 1.0] {
        p.save();
        p.translate(Vec2::new(-size * 0.1, side * size * 0.1));
        p.rotate(side * FRAC_PI_4);
        p.scale(Vec2::new(1.0, wing_scale));
        p.fill_ellipse(
            Vec2::new(0.0, side * size * 0.4),
            Vec2::new(size * 0.15, size * 0.4),
            0.0,
            colors::FLY_WING,
        );
        p.restore();
    }

    for side in [-1.0, 1.0] {
        p.fill_circle(Vec2::new(size * 0.2, side * size * 0.1), size * 0.08, colors::FLY_EYE);
    }
}

/// Wing flap factor: `0.5 + 0.5 * sin(frame * 0.15)`
pub fn butterfly_flap(frame: f32) -> f32 {
    0.5 + 0.5 * (frame * 0.15).sin()
}

pub fn draw_butterfly(p: &mut Painter, size: f32, color: [f32; 4], frame: f32) {
    p.fill_ellipse(Vec2::ZERO, Vec2::new(size * 0.6, size * 0.05), 0.0, colors::BUTTERFLY_BODY);

    // Antennae
    let base = Vec2::new(size * 0.5, 0.0);
    p.stroke_line(base, Vec2::new(size * 0.7, -size * 0.2), 1.0, colors::BUTTERFLY_BODY);
    p.stroke_line(base, Vec2::new(size * 0.7, size * 0.2), 1.0, colors::BUTTERFLY_BODY);

    p.save();
    p.scale(Vec2::new(1.0, butterfly_flap(frame)));
    for side in [-1.0f32, 1.0] {
        let wing = cubic_bezier(
            Vec2::ZERO,
            Vec2::new(size * 0.5, side * size),
            Vec2::new(size * 1.5, side * size),
            Vec2::ZERO,
            16,
        );
        p.fill_polygon(&wing, color);
    }
    for side in [-1.0f32, 1.0] {
        p.fill_ellipse(
            Vec2::new(-size * 0.2, side * size * 0.4),
            Vec2::new(size * 0.3, size * 0.2),
            side * 0.5,
            colors::BUTTERFLY_SPOT,
        );
    }
    p.restore();
}

pub fn draw_beetle(p: &mut Painter, size: f32, color: [f32; 4], frame: f32) {
    p.fill_ellipse(Vec2::ZERO, Vec2::new(size * 0.5, size * 0.4), 0.0, color);
    // Shell seam
    p.stroke_line(
        Vec2::new(-size * 0.5, 0.0),
        Vec2::new(size * 0.5, 0.0),
        2.0,
        colors::BEETLE_SEAM,
    );
    p.fill_sector(
        Vec2::new(size * 0.5, 0.0),
        size * 0.2,
        -FRAC_PI_2,
        FRAC_PI_2,
        colors::BEETLE_HEAD,
    );

    let leg_wiggle = (frame * 0.5).sin() * 5.0;
    for i in -1..=1 {
        let i = i as f32;
        p.stroke_line(
            Vec2::new(i * size * 0.2, -size * 0.3),
            Vec2::new(i * size * 0.25 + leg_wiggle, -size * 0.6),
            2.0,
            colors::BEETLE_HEAD,
        );
        p.stroke_line(
            Vec2::new(i * size * 0.2, size * 0.3),
            Vec2::new(i * size * 0.25 - leg_wiggle, size * 0.6),
            2.0,
            colors::BEETLE_HEAD,
        );
    }
}

pub fn draw_fish(p: &mut Painter, size: f32, color: [f32; 4], frame: f32) {
    p.fill_ellipse(Vec2::ZERO, Vec2::new(size * 0.6, size * 0.35), 0.0, color);

    let tail_wiggle = (frame * 0.2).sin() * size * 0.1;
    p.fill_polygon(
        &[
            Vec2::new(-size * 0.4, 0.0),
            Vec2::new(-size * 0.9, -size * 0.3 + tail_wiggle),
            Vec2::new(-size * 0.9, size * 0.3 + tail_wiggle),
        ],
        color,
    );

    let fin_flap = (frame * 0.15).sin().abs();
    let fin = quad_bezier(
        Vec2::new(size * 0.1, 0.0),
        Vec2::new(size * 0.1, size * 0.4 * fin_flap),
        Vec2::new(-size * 0.2, size * 0.2),
        10,
    );
    p.fill_polygon(&fin, colors::FISH_FIN);

    p.fill_circle(Vec2::new(size * 0.3, -size * 0.1), size * 0.08, colors::WHITE);
    p.fill_circle(Vec2::new(size * 0.35, -size * 0.1), size * 0.03, colors::BLACK);
}

/// Whether the snake's tongue is out on this frame
pub fn tongue_out(frame: f32) -> bool {
    (frame * 0.25).sin() > 0.7
}

/// Tapering body along the trail (screen space), then the head
pub fn draw_snake(p: &mut Painter, e: &Entity, size: f32, color: [f32; 4], frame: f32) {
    let len = e.trail.len() as f32;
    let shade = darken(color, 0.76);
    for (i, point) in e.trail.iter().enumerate() {
        // Oldest point is the tail
        let seg = size * (0.3 + 0.6 * (i as f32 / len));
        let c = if i % 3 == 0 { shade } else { color };
        p.fill_circle(*point, seg / 2.0, c);
    }

    p.save();
    p.translate(e.pos);
    p.rotate(e.angle);

    p.fill_ellipse(Vec2::ZERO, Vec2::new(size * 0.6, size * 0.5), 0.0, color);
    for side in [-1.0, 1.0] {
        p.fill_circle(Vec2::new(size * 0.2, side * size * 0.2), size * 0.15, colors::WHITE);
        p.fill_circle(Vec2::new(size * 0.25, side * size * 0.2), size * 0.05, colors::BLACK);
    }

    if tongue_out(frame) {
        let fork = Vec2::new(size * 0.9, 0.0);
        p.stroke_round(&[Vec2::new(size * 0.5, 0.0), fork], 3.0, colors::SNAKE_TONGUE);
        p.stroke_round(&[fork, Vec2::new(size * 1.1, -size * 0.15)], 3.0, colors::SNAKE_TONGUE);
        p.stroke_round(&[fork, Vec2::new(size * 1.1, size * 0.15)], 3.0, colors::SNAKE_TONGUE);
    }
    p.restore();
}
