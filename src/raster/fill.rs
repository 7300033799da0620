//! Four-neighbour flood fill

use glam::IVec2;

use super::canvas::Canvas;
use super::color::Rgb;

/// Outcome of a flood fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    /// Pixels painted with the fill color
    pub filled: usize,
}

/// Replace the 4-connected region of `target`-colored pixels around `seed`
///
/// Uses an explicit stack and a visited bitmap, so region size is bounded
/// only by the canvas. A seed outside the canvas or on a pixel that does
/// not match `target` (within `eps`) paints nothing.
pub fn flood_fill(canvas: &mut Canvas, seed: IVec2, fill: Rgb, target: Rgb, eps: f32) -> FillReport {
    let mut report = FillReport::default();
    if !canvas.in_bounds(seed.x, seed.y) {
        return report;
    }

    let width = canvas.width() as usize;
    let mut visited = vec![false; width * canvas.height() as usize];
    let mut stack = vec![seed];

    while let Some(p) = stack.pop() {
        let Some(current) = canvas.get_pixel(p.x, p.y) else {
            continue;
        };
        let idx = p.y as usize * width + p.x as usize;
        if visited[idx] || !current.approx_eq(target, eps) {
            continue;
        }
        visited[idx] = true;
        canvas.put_pixel(p.x, p.y, fill);
        report.filled += 1;

        stack.push(p + IVec2::X);
        stack.push(p - IVec2::X);
        stack.push(p + IVec2::Y);
        stack.push(p - IVec2::Y);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_bounded_box() {
        let mut canvas = Canvas::new(20, 20, Rgb::WHITE);
        canvas.draw_polyline_closed(
            &[
                IVec2::new(5, 5),
                IVec2::new(14, 5),
                IVec2::new(14, 14),
                IVec2::new(5, 14),
            ],
            Rgb::RED,
        );
        let report = flood_fill(&mut canvas, IVec2::new(10, 10), Rgb::MAGENTA, Rgb::WHITE, 0.001);
        // Interior of a 10x10 outline is 8x8
        assert_eq!(report.filled, 64);
        assert_eq!(canvas.get_pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.get_pixel(5, 5), Some(Rgb::RED));
    }

    #[test]
    fn test_fill_seed_on_boundary_is_noop() {
        let mut canvas = Canvas::new(10, 10, Rgb::WHITE);
        canvas.put_pixel(3, 3, Rgb::BLUE);
        let report = flood_fill(&mut canvas, IVec2::new(3, 3), Rgb::MAGENTA, Rgb::WHITE, 0.001);
        assert_eq!(report.filled, 0);
    }

    #[test]
    fn test_fill_outside_canvas_is_noop() {
        let mut canvas = Canvas::new(10, 10, Rgb::WHITE);
        let report = flood_fill(&mut canvas, IVec2::new(-1, 3), Rgb::MAGENTA, Rgb::WHITE, 0.001);
        assert_eq!(report.filled, 0);
    }

    #[test]
    fn test_fill_large_region_without_recursion() {
        let mut canvas = Canvas::new(700, 700, Rgb::WHITE);
        let report = flood_fill(&mut canvas, IVec2::new(350, 350), Rgb::MAGENTA, Rgb::WHITE, 0.001);
        assert_eq!(report.filled, 700 * 700);
    }

    #[test]
    fn test_fill_does_not_leak_diagonally() {
        let mut canvas = Canvas::new(5, 5, Rgb::WHITE);
        // Diagonal wall splits the grid for a 4-connected fill
        for i in 0..5 {
            canvas.put_pixel(i, i, Rgb::BLACK);
        }
        let report = flood_fill(&mut canvas, IVec2::new(0, 4), Rgb::MAGENTA, Rgb::WHITE, 0.001);
        assert_eq!(report.filled, 10);
        assert_eq!(canvas.get_pixel(4, 0), Some(Rgb::WHITE));
    }
}
