//! Backend-agnostic draw lists
//!
//! Scenes describe what to draw as an ordered list of shapes in their own
//! coordinate space (y up). The wgpu renderer and the software canvas both
//! consume the same list.

use glam::Vec2;

use crate::raster::Rgb;

/// One primitive in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect {
        center: Vec2,
        half_size: Vec2,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
        segments: u32,
    },
    Ring {
        center: Vec2,
        inner: f32,
        outer: f32,
        color: [f32; 4],
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    Triangle {
        a: Vec2,
        b: Vec2,
        c: Vec2,
        color: [f32; 4],
    },
}

/// Default segment count for circles
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Ordered shapes plus the visible region of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    /// Bottom-left corner of the visible region
    pub origin: Vec2,
    /// Width and height of the visible region
    pub extent: Vec2,
    pub clear: [f32; 4],
    pub shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new(extent: Vec2, clear: [f32; 4]) -> Self {
        Self {
            origin: Vec2::ZERO,
            extent,
            clear,
            shapes: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn rect(&mut self, center: Vec2, half_size: Vec2, color: [f32; 4]) {
        self.push(Shape::Rect {
            center,
            half_size,
            color,
        });
    }

    /// Rectangle from two corners
    pub fn rect_between(&mut self, min: Vec2, max: Vec2, color: [f32; 4]) {
        self.rect((min + max) * 0.5, (max - min).abs() * 0.5, color);
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.circle_with(center, radius, color, CIRCLE_SEGMENTS);
    }

    pub fn circle_with(&mut self, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
        self.push(Shape::Circle {
            center,
            radius,
            color,
            segments: segments.max(3),
        });
    }

    pub fn ring(&mut self, center: Vec2, inner: f32, outer: f32, color: [f32; 4]) {
        self.push(Shape::Ring {
            center,
            inner,
            outer,
            color,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        self.push(Shape::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.push(Shape::Triangle { a, b, c, color });
    }

    /// Full-extent translucent overlay
    pub fn overlay(&mut self, color: [f32; 4]) {
        self.rect(self.origin + self.extent * 0.5, self.extent * 0.5, color);
    }

    pub fn clear_rgb(&self) -> Rgb {
        Rgb::new(self.clear[0], self.clear[1], self.clear[2])
    }
}

/// Uniform scale and offset that fit a scene into a target, centred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    /// Target-space position of the scene origin
    pub offset: Vec2,
}

impl Letterbox {
    pub fn fit(origin: Vec2, extent: Vec2, target: Vec2) -> Self {
        let scale = if extent.x <= 0.0 || extent.y <= 0.0 {
            1.0
        } else {
            (target.x / extent.x).min(target.y / extent.y)
        };
        let used = extent * scale;
        Self {
            scale,
            offset: (target - used) * 0.5 - origin * scale,
        }
    }

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }

    /// Inverse mapping, used for pointer input
    #[inline]
    pub fn invert(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_wide_target() {
        let fit = Letterbox::fit(Vec2::ZERO, Vec2::new(900.0, 700.0), Vec2::new(1800.0, 700.0));
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.offset, Vec2::new(450.0, 0.0));
        assert_eq!(fit.apply(Vec2::new(900.0, 700.0)), Vec2::new(1350.0, 700.0));
    }

    #[test]
    fn test_letterbox_with_origin_round_trips() {
        let fit = Letterbox::fit(Vec2::splat(-1.0), Vec2::splat(2.0), Vec2::new(400.0, 400.0));
        assert_eq!(fit.apply(Vec2::splat(-1.0)), Vec2::ZERO);
        assert_eq!(fit.apply(Vec2::ZERO), Vec2::splat(200.0));
        let back = fit.invert(Vec2::new(300.0, 100.0));
        assert!((back - Vec2::new(0.5, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_overlay_covers_extent() {
        let mut list = DrawList::new(Vec2::splat(2.0), [0.0; 4]).with_origin(Vec2::splat(-1.0));
        list.overlay([0.0, 0.0, 0.0, 0.5]);
        assert_eq!(
            list.shapes[0],
            Shape::Rect {
                center: Vec2::ZERO,
                half_size: Vec2::ONE,
                color: [0.0, 0.0, 0.0, 0.5]
            }
        );
    }
}
