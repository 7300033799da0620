//! Bold line lab: Bresenham with an 8-neighbour stamp

use glam::IVec2;

use crate::raster::{Canvas, Rgb, bold_line};

pub const BOLD_LINE_SIZE: u32 = 500;

/// Green 3px line on a white 500x500 canvas
pub fn bold_line_scene(from: IVec2, to: IVec2) -> Canvas {
    let mut canvas = Canvas::new(BOLD_LINE_SIZE, BOLD_LINE_SIZE, Rgb::WHITE);
    for p in bold_line(from, to) {
        canvas.put_pixel(p.x, p.y, Rgb::GREEN);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_line_is_three_pixels_wide() {
        let canvas = bold_line_scene(IVec2::new(100, 250), IVec2::new(400, 250));
        for y in 249..=251 {
            assert_eq!(canvas.get_pixel(250, y), Some(Rgb::GREEN));
        }
        assert_eq!(canvas.get_pixel(250, 252), Some(Rgb::WHITE));
        assert_eq!(canvas.ink_count(), 303 * 3);
    }
}
