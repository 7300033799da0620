//! Software framebuffer with a bottom-left origin
//!
//! Coordinates match `gluOrtho2D(0, w, 0, h)`: x grows right, y grows up and
//! pixel (0, 0) is the bottom-left corner. Writes outside the canvas are
//! silently clipped.

use glam::{IVec2, Vec2};

use super::color::Rgb;
use super::line::bresenham;

/// A fixed-size RGB pixel grid
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Rgb,
    /// Row-major, bottom row first
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Reset every pixel to the background color
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Change the background and clear to it
    pub fn clear_to(&mut self, background: Rgb) {
        self.background = background;
        self.clear();
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if self.in_bounds(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    /// Alpha-blend a color over the existing pixel
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if alpha >= 1.0 {
            self.put_pixel(x, y, color);
        } else if self.in_bounds(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = color.blend_over(self.pixels[i], alpha);
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.in_bounds(x, y).then(|| self.pixels[self.index(x, y)])
    }

    /// Draw a square point of side `size`, like `glPointSize`
    pub fn plot(&mut self, x: i32, y: i32, size: f32, color: Rgb) {
        let side = (size.round() as i32).max(1);
        let start = -(side - 1) / 2;
        for dy in start..start + side {
            for dx in start..start + side {
                self.put_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Plot a batch of points offset by `origin`
    pub fn plot_all<I>(&mut self, origin: IVec2, points: I, size: f32, color: Rgb)
    where
        I: IntoIterator<Item = IVec2>,
    {
        for p in points {
            let p = origin + p;
            self.plot(p.x, p.y, size, color);
        }
    }

    /// One-pixel Bresenham segment (both endpoints included)
    pub fn draw_line(&mut self, from: IVec2, to: IVec2, color: Rgb) {
        for p in bresenham(from, to) {
            self.put_pixel(p.x, p.y, color);
        }
    }

    /// Closed outline through `points`, like `GL_LINE_LOOP`
    pub fn draw_polyline_closed(&mut self, points: &[IVec2], color: Rgb) {
        if points.len() < 2 {
            if let Some(p) = points.first() {
                self.put_pixel(p.x, p.y, color);
            }
            return;
        }
        for i in 0..points.len() {
            let next = (i + 1) % points.len();
            self.draw_line(points[i], points[next], color);
        }
    }

    /// Clamp a float span to pixel indices whose centers may fall inside it
    fn pixel_span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<i32> {
        let start = (lo - 0.5).ceil().max(0.0) as i32;
        let end = ((hi - 0.5).floor() + 1.0).min(limit as f32) as i32;
        start..end.max(start)
    }

    /// Fill an axis-aligned rectangle; pixels are covered by their centers
    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgb, alpha: f32) {
        let (lo, hi) = (min.min(max), min.max(max));
        for y in Self::pixel_span(lo.y, hi.y, self.height) {
            for x in Self::pixel_span(lo.x, hi.x, self.width) {
                let c = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if c.x < hi.x && c.y < hi.y {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        for y in Self::pixel_span(center.y - radius, center.y + radius, self.height) {
            for x in Self::pixel_span(center.x - radius, center.x + radius, self.width) {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Fill a triangle of either winding using edge functions
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgb, alpha: f32) {
        let area = edge(a, b, c);
        if area.abs() < f32::EPSILON {
            return;
        }
        let lo = a.min(b).min(c);
        let hi = a.max(b).max(c);
        for y in Self::pixel_span(lo.y, hi.y, self.height) {
            for x in Self::pixel_span(lo.x, hi.x, self.width) {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p) * area.signum();
                let w1 = edge(c, a, p) * area.signum();
                let w2 = edge(a, b, p) * area.signum();
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Fill a convex quad given in order
    pub fn fill_quad(&mut self, quad: [Vec2; 4], color: Rgb, alpha: f32) {
        self.fill_triangle(quad[0], quad[1], quad[2], color, alpha);
        self.fill_triangle(quad[0], quad[2], quad[3], color, alpha);
    }

    /// Count pixels that differ from the background
    pub fn ink_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|p| !p.approx_eq(self.background, 1e-3))
            .count()
    }

    /// Packed RGB8 bytes, top row first (image order)
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for y in (0..self.height as i32).rev() {
            for x in 0..self.width as i32 {
                out.extend_from_slice(&self.pixels[self.index(x, y)].to_rgb8());
            }
        }
        out
    }

    /// Downsample to `columns` characters per line
    ///
    /// A cell prints `#` when any of its pixels differs from the background.
    /// Cells are twice as tall as they are wide to keep terminal proportions.
    pub fn to_ascii(&self, columns: u32) -> String {
        let columns = columns.clamp(1, self.width.max(1));
        let cell_w = self.width.div_ceil(columns).max(1);
        let cell_h = cell_w * 2;
        let rows = self.height.div_ceil(cell_h);

        let mut out = String::new();
        for row in 0..rows {
            // Text rows run top to bottom
            let y_hi = self.height.saturating_sub(row * cell_h);
            let y_lo = y_hi.saturating_sub(cell_h);
            let mut line = String::with_capacity(columns as usize);
            for col in 0..columns {
                let x_lo = col * cell_w;
                let x_hi = (x_lo + cell_w).min(self.width);
                let inked = (y_lo..y_hi).any(|y| {
                    (x_lo..x_hi).any(|x| {
                        !self.pixels[self.index(x as i32, y as i32)]
                            .approx_eq(self.background, 1e-3)
                    })
                });
                line.push(if inked { '#' } else { ' ' });
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Write the canvas as a PNG file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_png(&self, path: &std::path::Path) -> crate::error::Result<()> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )?;
        log::info!("Saved {}x{} canvas to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_pixel_clips_out_of_bounds() {
        let mut canvas = Canvas::new(4, 4, Rgb::WHITE);
        canvas.put_pixel(-1, 0, Rgb::BLACK);
        canvas.put_pixel(4, 4, Rgb::BLACK);
        assert_eq!(canvas.ink_count(), 0);
        assert_eq!(canvas.get_pixel(4, 0), None);
    }

    #[test]
    fn test_plot_sizes() {
        let mut canvas = Canvas::new(10, 10, Rgb::WHITE);
        canvas.plot(5, 5, 1.0, Rgb::BLACK);
        assert_eq!(canvas.ink_count(), 1);

        canvas.clear();
        canvas.plot(5, 5, 2.0, Rgb::BLACK);
        assert_eq!(canvas.ink_count(), 4);

        canvas.clear();
        canvas.plot(5, 5, 3.0, Rgb::BLACK);
        assert_eq!(canvas.ink_count(), 9);
        assert_eq!(canvas.get_pixel(4, 4), Some(Rgb::BLACK));
        assert_eq!(canvas.get_pixel(6, 6), Some(Rgb::BLACK));
    }

    #[test]
    fn test_fill_rect_covers_expected_pixels() {
        let mut canvas = Canvas::new(20, 20, Rgb::WHITE);
        canvas.fill_rect(Vec2::new(2.0, 3.0), Vec2::new(6.0, 5.0), Rgb::RED, 1.0);
        assert_eq!(canvas.ink_count(), 8);
        assert_eq!(canvas.get_pixel(2, 3), Some(Rgb::RED));
        assert_eq!(canvas.get_pixel(6, 3), Some(Rgb::WHITE));
    }

    #[test]
    fn test_fill_triangle_either_winding() {
        let mut ccw = Canvas::new(30, 30, Rgb::WHITE);
        let mut cw = Canvas::new(30, 30, Rgb::WHITE);
        let (a, b, c) = (Vec2::new(2.0, 2.0), Vec2::new(25.0, 2.0), Vec2::new(12.0, 20.0));
        ccw.fill_triangle(a, b, c, Rgb::BLUE, 1.0);
        cw.fill_triangle(a, c, b, Rgb::BLUE, 1.0);
        assert!(ccw.ink_count() > 150);
        assert_eq!(ccw.ink_count(), cw.ink_count());
    }

    #[test]
    fn test_rgb8_is_top_row_first() {
        let mut canvas = Canvas::new(2, 2, Rgb::BLACK);
        canvas.put_pixel(0, 1, Rgb::WHITE);
        let bytes = canvas.to_rgb8();
        assert_eq!(&bytes[0..3], &[255, 255, 255]);
        assert_eq!(&bytes[6..9], &[0, 0, 0]);
    }

    #[test]
    fn test_ascii_export_marks_ink() {
        let mut canvas = Canvas::new(8, 8, Rgb::WHITE);
        // Bottom-left pixel lands in the last text row, first column
        canvas.put_pixel(0, 0, Rgb::BLACK);
        let ascii = canvas.to_ascii(4);
        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "#");
    }

    #[test]
    fn test_blend_pixel_half_alpha() {
        let mut canvas = Canvas::new(1, 1, Rgb::BLACK);
        canvas.blend_pixel(0, 0, Rgb::WHITE, 0.5);
        assert!(canvas.get_pixel(0, 0).is_some_and(|c| c.approx_eq(Rgb::grey(0.5), 1e-6)));
    }
}
