//! Software rendering of draw lists onto a [`Canvas`]

use glam::Vec2;

use super::draw_list::{DrawList, Letterbox, Shape};
use super::shapes;
use super::vertex::Vertex;
use crate::raster::{Canvas, Rgb};

fn split(color: [f32; 4]) -> (Rgb, f32) {
    (Rgb::new(color[0], color[1], color[2]), color[3])
}

impl Canvas {
    /// Clear to the list's color and paint every shape, letterboxed
    pub fn paint(&mut self, list: &DrawList) {
        self.clear_to(list.clear_rgb());
        let fit = Letterbox::fit(
            list.origin,
            list.extent,
            Vec2::new(self.width() as f32, self.height() as f32),
        );

        for shape in &list.shapes {
            match *shape {
                Shape::Rect {
                    center,
                    half_size,
                    color,
                } => {
                    let (rgb, alpha) = split(color);
                    self.fill_rect(
                        fit.apply(center - half_size),
                        fit.apply(center + half_size),
                        rgb,
                        alpha,
                    );
                }
                Shape::Circle {
                    center,
                    radius,
                    color,
                    ..
                } => {
                    let (rgb, alpha) = split(color);
                    self.fill_circle(fit.apply(center), radius * fit.scale, rgb, alpha);
                }
                Shape::Ring {
                    center,
                    inner,
                    outer,
                    color,
                } => self.fill_vertices(&fit, &shapes::ring(center, inner, outer, color, 40)),
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                } => self.fill_vertices(&fit, &shapes::line(from, to, width, color)),
                Shape::Triangle { a, b, c, color } => {
                    let (rgb, alpha) = split(color);
                    self.fill_triangle(fit.apply(a), fit.apply(b), fit.apply(c), rgb, alpha);
                }
            }
        }
    }

    fn fill_vertices(&mut self, fit: &Letterbox, vertices: &[Vertex]) {
        for tri in vertices.chunks_exact(3) {
            let (rgb, alpha) = split(tri[0].color);
            let [a, b, c] = [0, 1, 2].map(|i| fit.apply(Vec2::from(tri[i].position)));
            self.fill_triangle(a, b, c, rgb, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_clears_and_scales() {
        let mut list = DrawList::new(Vec2::new(10.0, 10.0), [0.0, 0.0, 0.0, 1.0]);
        list.rect(Vec2::new(2.5, 2.5), Vec2::splat(2.5), [1.0, 0.0, 0.0, 1.0]);
        let mut canvas = Canvas::new(20, 20, Rgb::WHITE);
        canvas.paint(&list);
        assert_eq!(canvas.background(), Rgb::BLACK);
        // The 5x5 rect becomes 10x10 pixels in the bottom-left corner
        assert_eq!(canvas.ink_count(), 100);
        assert_eq!(canvas.get_pixel(0, 0), Some(Rgb::RED));
        assert_eq!(canvas.get_pixel(10, 10), Some(Rgb::BLACK));
    }

    #[test]
    fn test_paint_respects_origin() {
        let mut list = DrawList::new(Vec2::splat(2.0), [1.0; 4]).with_origin(Vec2::splat(-1.0));
        list.circle(Vec2::ZERO, 0.5, [0.0, 0.0, 1.0, 1.0]);
        let mut canvas = Canvas::new(40, 40, Rgb::BLACK);
        canvas.paint(&list);
        assert_eq!(canvas.get_pixel(20, 20), Some(Rgb::BLUE));
        assert_eq!(canvas.get_pixel(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_translucent_overlay_blends() {
        let mut list = DrawList::new(Vec2::splat(4.0), [1.0; 4]);
        list.overlay([0.0, 0.0, 0.0, 0.5]);
        let mut canvas = Canvas::new(4, 4, Rgb::WHITE);
        canvas.paint(&list);
        let p = canvas.get_pixel(2, 2).expect("pixel");
        assert!(p.approx_eq(Rgb::grey(0.5), 1e-4));
    }

    #[test]
    fn test_line_and_ring_draw_something() {
        let mut list = DrawList::new(Vec2::splat(50.0), [0.0, 0.0, 0.0, 1.0]);
        list.line(Vec2::new(5.0, 5.0), Vec2::new(45.0, 5.0), 2.0, [1.0; 4]);
        list.ring(Vec2::splat(25.0), 8.0, 10.0, [1.0; 4]);
        let mut canvas = Canvas::new(50, 50, Rgb::BLACK);
        canvas.paint(&list);
        assert!(canvas.ink_count() > 80);
        assert_eq!(canvas.get_pixel(25, 25), Some(Rgb::BLACK));
    }
}
