//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::draw_list::{DrawList, Shape};
use super::vertex::Vertex;

/// Segments used for rings
const RING_SEGMENTS: u32 = 40;

/// Turn a draw list into a triangle list, in list order
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for shape in &list.shapes {
        match *shape {
            Shape::Rect {
                center,
                half_size,
                color,
            } => vertices.extend(rect(center, half_size, color)),
            Shape::Circle {
                center,
                radius,
                color,
                segments,
            } => vertices.extend(circle(center, radius, color, segments)),
            Shape::Ring {
                center,
                inner,
                outer,
                color,
            } => vertices.extend(ring(center, inner, outer, color, RING_SEGMENTS)),
            Shape::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend(line(from, to, width, color)),
            Shape::Triangle { a, b, c, color } => {
                vertices.push(Vertex::new(a.x, a.y, color));
                vertices.push(Vertex::new(b.x, b.y, color));
                vertices.push(Vertex::new(c.x, c.y, color));
            }
        }
    }
    vertices
}

fn quad(corners: [Vec2; 4], color: [f32; 4]) -> [Vertex; 6] {
    let v = corners.map(|p| Vertex::new(p.x, p.y, color));
    [v[0], v[1], v[2], v[2], v[3], v[0]]
}

/// Axis-aligned rectangle
pub fn rect(center: Vec2, half_size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (lo, hi) = (center - half_size, center + half_size);
    quad(
        [lo, Vec2::new(hi.x, lo.y), hi, Vec2::new(lo.x, hi.y)],
        color,
    )
}

/// Segment of the given width; zero length yields nothing
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    quad([from - perp, to - perp, to + perp, from + perp], color).to_vec()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());
        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}
