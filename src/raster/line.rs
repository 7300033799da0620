//! Bresenham line rasterization and its bold/thick variants

use glam::IVec2;

/// Integer Bresenham segment from `p0` to `p1`, both endpoints included
///
/// Works in all octants with a single error term (`err = dx - dy`).
pub fn bresenham(p0: IVec2, p1: IVec2) -> Vec<IVec2> {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    let sx = if p1.x >= p0.x { 1 } else { -1 };
    let sy = if p1.y >= p0.y { 1 } else { -1 };

    let mut points = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let mut err = dx - dy;
    let mut p = p0;

    loop {
        points.push(p);
        if p == p1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            p.x += sx;
        }
        if e2 < dx {
            err += dx;
            p.y += sy;
        }
    }

    points
}

/// The 3x3 block around `p` (eight neighbours plus the center)
pub fn bold_pixel(p: IVec2) -> [IVec2; 9] {
    let mut block = [IVec2::ZERO; 9];
    let mut i = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            block[i] = p + IVec2::new(dx, dy);
            i += 1;
        }
    }
    block
}

/// Bresenham segment stamped with a 3x3 block at every step
pub fn bold_line(p0: IVec2, p1: IVec2) -> Vec<IVec2> {
    bresenham(p0, p1).into_iter().flat_map(bold_pixel).collect()
}

/// Multi-pixel line made of parallel Bresenham passes
///
/// Steep lines (`|dy| > |dx|`) are widened along x, shallow ones along y.
/// Widths below one are treated as one.
pub fn thick_line(p0: IVec2, p1: IVec2, width: i32) -> Vec<IVec2> {
    let half = (width.max(1) - 1) / 2;
    let steep = (p1.y - p0.y).abs() > (p1.x - p0.x).abs();

    let mut points = Vec::new();
    for offset in -half..=half {
        let shift = if steep {
            IVec2::new(offset, 0)
        } else {
            IVec2::new(0, offset)
        };
        points.extend(bresenham(p0 + shift, p1 + shift));
    }
    points
}
