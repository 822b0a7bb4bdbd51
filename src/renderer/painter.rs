//! Immediate-mode painter with a canvas-style transform stack
//!
//! Shapes are built in local coordinates by `shapes` and mapped through the
//! current affine transform into screen pixels as they are appended.

use glam::{Affine2, Vec2};

use super::shapes;
use super::vertex::Vertex;

#[derive(Debug, Clone)]
pub struct Painter {
    vertices: Vec<Vertex>,
    transform: Affine2,
    alpha: f32,
    stack: Vec<(Affine2, f32)>,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            stack: Vec::new(),
        }
    }

    pub fn save(&mut self) {
        self.stack.push((self.transform, self.alpha));
    }

    /// Pop the last saved state; unbalanced restores are ignored
    pub fn restore(&mut self) {
        if let Some((transform, alpha)) = self.stack.pop() {
            self.transform = transform;
            self.alpha = alpha;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    pub fn scale(&mut self, factor: Vec2) {
        self.transform = self.transform * Affine2::from_scale(factor);
    }

    /// Global alpha multiplied into every color
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Map a local point to screen pixels
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        self.transform.transform_point2(p)
    }

    fn emit(&mut self, local: Vec<Vertex>) {
        let (transform, alpha) = (self.transform, self.alpha);
        self.vertices.extend(local.into_iter().map(|v| {
            let p = transform.transform_point2(Vec2::from(v.position));
            let mut color = v.color;
            color[3] *= alpha;
            Vertex::new(p.x, p.y, color)
        }));
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let segments = shapes::segments_for(radius);
        self.emit(shapes::circle(center, radius, color, segments));
    }

    /// Half (or any other slice of a) disc
    pub fn fill_sector(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: [f32; 4]) {
        let segments = (shapes::segments_for(radius) / 2).max(4);
        self.emit(shapes::sector(center, radius, start, end, color, segments));
    }

    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4]) {
        let segments = shapes::segments_for(radii.max_element());
        self.emit(shapes::ellipse(center, radii.x, radii.y, rotation, color, segments));
    }

    pub fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        self.emit(shapes::polygon(points, color));
    }

    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        self.emit(shapes::polyline(points, width, color));
    }

    /// Polyline with round caps at both ends
    pub fn stroke_round(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        self.stroke_polyline(points, width, color);
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            let r = width / 2.0;
            self.emit(shapes::circle(*first, r, color, 8));
            self.emit(shapes::circle(*last, r, color, 8));
        }
    }

    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        self.stroke_polyline(&[from, to], width, color);
    }

    /// Circle outline of `width` centred on `radius`
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: [f32; 4]) {
        let inner = (radius - width / 2.0).max(0.0);
        let outer = radius + width / 2.0;
        let segments = shapes::segments_for(outer);
        self.emit(shapes::ring(center, inner, outer, color, segments));
    }

    pub fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner_color: [f32; 4],
        outer_color: [f32; 4],
    ) {
        let segments = shapes::segments_for(outer_radius);
        self.emit(shapes::radial_gradient_disc(
            center,
            inner_radius,
            outer_radius,
            inner_color,
            outer_color,
            segments,
        ));
    }

    pub fn fill_vertical_gradient(&mut self, min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) {
        self.emit(shapes::vertical_gradient_rect(min, max, top, bottom));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn finish(self) -> Vec<Vertex> {
        self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_translate_rotate_scale_order() {
        let mut p = Painter::new();
        p.translate(Vec2::new(100.0, 50.0));
        p.rotate(FRAC_PI_2);
        p.scale(Vec2::new(2.0, 1.0));
        // Local +x is scaled first, then rotated onto +y, then translated
        let s = p.to_screen(Vec2::new(1.0, 0.0));
        assert!((s - Vec2::new(100.0, 52.0)).length() < 1e-4);
    }

    #[test]
    fn test_save_restore() {
        let mut p = Painter::new();
        p.save();
        p.translate(Vec2::new(5.0, 5.0));
        p.set_alpha(0.5);
        p.restore();
        assert_eq!(p.to_screen(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(p.alpha(), 1.0);
        // Extra restore is harmless
        p.restore();
        assert_eq!(p.alpha(), 1.0);
    }

    #[test]
    fn test_alpha_multiplies_color() {
        let mut p = Painter::new();
        p.set_alpha(0.5);
        p.fill_circle(Vec2::ZERO, 4.0, [1.0, 1.0, 1.0, 0.8]);
        let verts = p.finish();
        assert!(!verts.is_empty());
        assert!(verts.iter().all(|v| (v.color[3] - 0.4).abs() < 1e-6));
    }
}
