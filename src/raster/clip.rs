//! Liang-Barsky parametric line clipping

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned clipping rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub min: Vec2,
    pub max: Vec2,
}

impl ClipWindow {
    /// Build a window from any two opposite corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, p: Vec2, eps: f32) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }
}

/// A line segment in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec2 {
        self.start + (self.end - self.start) * t
    }
}

/// Parameter interval `(t0, t1)` of the visible part, if any
pub fn liang_barsky(window: &ClipWindow, p0: Vec2, p1: Vec2) -> Option<(f32, f32)> {
    let d = p1 - p0;
    let p = [-d.x, d.x, -d.y, d.y];
    let q = [
        p0.x - window.min.x,
        window.max.x - p0.x,
        p0.y - window.min.y,
        window.max.y - p0.y,
    ];

    let mut t0: f32 = 0.0;
    let mut t1: f32 = 1.0;
    for (pk, qk) in p.into_iter().zip(q) {
        if pk.abs() < 1e-6 {
            // Parallel to this edge: rejected when fully outside it
            if qk < 0.0 {
                return None;
            }
            continue;
        }
        let t = qk / pk;
        if pk < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

/// Clip a segment to the window
pub fn clip_segment(window: &ClipWindow, segment: &Segment) -> Option<Segment> {
    let (t0, t1) = liang_barsky(window, segment.start, segment.end)?;
    Some(Segment::new(segment.at(t0), segment.at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window() -> ClipWindow {
        ClipWindow::from_corners(Vec2::new(100.0, 100.0), Vec2::new(-100.0, -50.0))
    }

    #[test]
    fn test_from_corners_swaps() {
        let w = window();
        assert_eq!(w.min, Vec2::new(-100.0, -50.0));
        assert_eq!(w.max, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_inside_segment_untouched() {
        let seg = Segment::new(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 20.0));
        assert_eq!(clip_segment(&window(), &seg), Some(seg));
    }

    #[test]
    fn test_crossing_segment_clipped() {
        let seg = Segment::new(Vec2::new(-300.0, 0.0), Vec2::new(300.0, 0.0));
        let clipped = clip_segment(&window(), &seg).unwrap();
        assert!((clipped.start.x + 100.0).abs() < 1e-3);
        assert!((clipped.end.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_outside_segment_rejected() {
        let seg = Segment::new(Vec2::new(150.0, 150.0), Vec2::new(300.0, 120.0));
        assert_eq!(clip_segment(&window(), &seg), None);
    }

    #[test]
    fn test_parallel_outside_rejected() {
        // Vertical line left of the window
        let seg = Segment::new(Vec2::new(-200.0, -40.0), Vec2::new(-200.0, 90.0));
        assert_eq!(liang_barsky(&window(), seg.start, seg.end), None);
    }

    proptest! {
        #[test]
        fn prop_clipped_segment_inside_window(
            x0 in -400f32..400.0, y0 in -400f32..400.0,
            x1 in -400f32..400.0, y1 in -400f32..400.0,
        ) {
            let w = window();
            let seg = Segment::new(Vec2::new(x0, y0), Vec2::new(x1, y1));
            if let Some(c) = clip_segment(&w, &seg) {
                prop_assert!(w.contains(c.start, 1e-2));
                prop_assert!(w.contains(c.end, 1e-2));
            }
        }
    }
}
