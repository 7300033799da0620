//! Midpoint circle variants
//!
//! Every generator returns offsets relative to the circle center. The lab
//! variants differ in their decision-parameter bookkeeping and in which
//! octant points they emit, so each is kept as written rather than merged.

use glam::IVec2;

/// The eight symmetric points of an octant sample
#[inline]
pub fn eight_way(x: i32, y: i32) -> [IVec2; 8] {
    [
        IVec2::new(x, y),
        IVec2::new(-x, y),
        IVec2::new(x, -y),
        IVec2::new(-x, -y),
        IVec2::new(y, x),
        IVec2::new(-y, x),
        IVec2::new(y, -x),
        IVec2::new(-y, -x),
    ]
}

/// Integer midpoint circle, `p = 1 - r`
pub fn midpoint_circle(radius: i32) -> Vec<IVec2> {
    let mut x = 0;
    let mut y = radius;
    let mut p = 1 - radius;

    let mut points = Vec::with_capacity(radius.max(1) as usize * 8);
    points.extend(eight_way(x, y));
    while x < y {
        x += 1;
        if p < 0 {
            p += 2 * x + 1;
        } else {
            y -= 1;
            p += 2 * (x - y) + 1;
        }
        points.extend(eight_way(x, y));
    }
    points
}

/// Midpoint circle that only emits every `every`-th octant step
pub fn dotted_circle(radius: i32, every: u32) -> Vec<IVec2> {
    let every = every.max(1);
    let mut x = 0;
    let mut y = radius;
    let mut d = 1.0 - radius as f32;
    let mut step: u32 = 0;

    let mut points = Vec::new();
    while y >= x {
        if step % every == 0 {
            points.extend(eight_way(x, y));
        }
        if d < 0.0 {
            x += 1;
            d += (2 * x + 1) as f32;
        } else {
            x += 1;
            y -= 1;
            d += (2 * (x - y) + 1) as f32;
        }
        step += 1;
    }
    points
}

/// Midpoint circle with the classic `5/4 - r` decision start
///
/// The first sample `(0, r)` is emitted on its own; mirroring starts with
/// the second step.
pub fn rainbow_circle(radius: i32) -> Vec<IVec2> {
    let mut x = 0;
    let mut y = radius;
    let mut d = 1.25 - radius as f32;

    let mut points = vec![IVec2::new(x, y)];
    while y > x {
        if d < 0.0 {
            x += 1;
            d += (2 * x + 1) as f32;
        } else {
            x += 1;
            y -= 1;
            d += (2 * (x - y) + 1) as f32;
        }
        points.extend(eight_way(x, y));
    }
    points
}

/// Midpoint circle with second-order increments (`2x + 3`, `2(x - y) + 5`)
pub fn exam_circle(radius: i32) -> Vec<IVec2> {
    let mut x = 0;
    let mut y = radius;
    let mut d = 1 - radius;

    let mut points = Vec::new();
    while x <= y {
        points.extend(eight_way(x, y));
        if d < 0 {
            d += 2 * x + 3;
        } else {
            d += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
    }
    points
}
