//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in local (untransformed) pixel
//! coordinates; the painter applies the current transform.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;

/// Segments for a round shape of the given radius
pub fn segments_for(radius: f32) -> u32 {
    ((radius.abs() * 0.8) as u32).clamp(8, 48)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    sector(center, radius, 0.0, TAU, color, segments)
}

/// Filled pie slice from `start` to `end` (radians)
pub fn sector(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let span = end - start;

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Filled ellipse with radii `rx`, `ry`, rotated by `rotation`
pub fn ellipse(
    center: Vec2,
    rx: f32,
    ry: f32,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let rot = Vec2::from_angle(rotation);
    let outline: Vec<Vec2> = (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            center + rot.rotate(Vec2::new(rx * theta.cos(), ry * theta.sin()))
        })
        .collect();

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    gradient_ring(center, inner_radius, outer_radius, color, color, segments)
}

/// Ring whose color goes from `inner_color` to `outer_color` across its width
pub fn gradient_ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (d1, d2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        let inner1 = center + d1 * inner_radius;
        let outer1 = center + d1 * outer_radius;
        let inner2 = center + d2 * inner_radius;
        let outer2 = center + d2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Solid disc out to `inner_radius`, then a fade to `outer_color` at `outer_radius`
pub fn radial_gradient_disc(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = circle(center, inner_radius, inner_color, segments);
    vertices.extend(gradient_ring(
        center,
        inner_radius,
        outer_radius,
        inner_color,
        outer_color,
        segments,
    ));
    vertices
}

/// Axis-aligned rectangle fading from `top` to `bottom`
pub fn vertical_gradient_rect(
    min: Vec2,
    max: Vec2,
    top: [f32; 4],
    bottom: [f32; 4],
) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Filled polygon as a fan around its first point (star-shaped outlines)
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let origin = points[0];
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(origin.x, origin.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Thick line through `points`, one quad per segment
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Points along a quadratic Bezier, both ends included
pub fn quad_bezier(p0: Vec2, ctrl: Vec2, p1: Vec2, steps: u32) -> Vec<Vec2> {
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            p0 * (u * u) + ctrl * (2.0 * u * t) + p1 * (t * t)
        })
        .collect()
}

/// Points along a cubic Bezier, both ends included
pub fn cubic_bezier(p0: Vec2, c0: Vec2, c1: Vec2, p1: Vec2, steps: u32) -> Vec<Vec2> {
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            p0 * (u * u * u) + c0 * (3.0 * u * u * t) + c1 * (3.0 * u * t * t) + p1 * (t * t * t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_circle_vertices_on_radius() {
        let verts = circle(Vec2::new(10.0, 20.0), 5.0, RED, 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 20.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(Vec2::new(10.0, 20.0));
                assert!((d - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_ellipse_extents() {
        let verts = ellipse(Vec2::ZERO, 6.0, 2.0, 0.0, RED, 32);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((max_x - 6.0).abs() < 1e-4);
        assert!(max_y <= 2.0 + 1e-4);
    }

    #[test]
    fn test_polyline_width() {
        let verts = polyline(&[Vec2::ZERO, Vec2::new(10.0, 0.0)], 4.0, RED);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| v.position[1].abs() == 2.0));
        assert!(polyline(&[Vec2::ZERO], 4.0, RED).is_empty());
    }

    #[test]
    fn test_polygon_fan() {
        let square = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(polygon(&square, RED).len(), 6);
        assert!(polygon(&square[..2], RED).is_empty());
    }

    #[test]
    fn test_bezier_endpoints() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(9.0, -4.0);
        let quad = quad_bezier(a, Vec2::new(5.0, 10.0), b, 8);
        assert_eq!(quad.len(), 9);
        assert_eq!(quad[0], a);
        assert!((quad[8] - b).length() < 1e-5);

        let cubic = cubic_bezier(a, Vec2::ZERO, Vec2::ONE, b, 4);
        assert_eq!(cubic[0], a);
        assert!((cubic[4] - b).length() < 1e-5);
    }

    #[test]
    fn test_gradient_ring_colors() {
        let verts = gradient_ring(Vec2::ZERO, 2.0, 4.0, RED, [0.0; 4], 8);
        for v in verts {
            let r = Vec2::from(v.position).length();
            if (r - 2.0).abs() < 1e-4 {
                assert_eq!(v.color, RED);
            } else {
                assert_eq!(v.color, [0.0; 4]);
            }
        }
    }
}
