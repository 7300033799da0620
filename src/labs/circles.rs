//! Circle labs: dotted border, rainbow rings and HSV gradient rings

use glam::IVec2;

use crate::raster::{
    Canvas, RAINBOW, Rgb, dotted_circle, hsv_to_rgb, midpoint_circle, rainbow_circle,
};

/// Canvas size of the dotted circle lab
pub const DOTTED_SIZE: (u32, u32) = (640, 480);
/// Octant steps between two plotted dots
pub const DOT_EVERY: u32 = 5;

/// Canvas size of the rainbow lab
pub const RAINBOW_SIZE: (u32, u32) = (800, 600);
/// Radius gap between consecutive rainbow circles
pub const RAINBOW_RADIUS_STEP: i32 = 30;

/// Canvas side of the HSV ring lab
pub const HSV_SIZE: u32 = 700;
pub const HSV_CIRCLES: i32 = 100;
pub const HSV_MIN_RADIUS: i32 = 10;
pub const HSV_MAX_RADIUS: i32 = 300;

/// Black dotted circle, 2px dots, on white
pub fn dotted_circle_scene(center: IVec2, radius: i32) -> Canvas {
    let mut canvas = Canvas::new(DOTTED_SIZE.0, DOTTED_SIZE.1, Rgb::WHITE);
    canvas.plot_all(center, dotted_circle(radius, DOT_EVERY), 2.0, Rgb::BLACK);
    canvas
}

/// `count` concentric circles around the canvas center cycling through the rainbow
pub fn rainbow_scene(count: u32) -> Canvas {
    let mut canvas = Canvas::new(RAINBOW_SIZE.0, RAINBOW_SIZE.1, Rgb::WHITE);
    let center = IVec2::new(RAINBOW_SIZE.0 as i32 / 2, RAINBOW_SIZE.1 as i32 / 2);
    for i in 0..count as usize {
        let radius = RAINBOW_RADIUS_STEP * (i as i32 + 1);
        canvas.plot_all(center, rainbow_circle(radius), 1.0, RAINBOW[i % RAINBOW.len()]);
    }
    log::debug!("Drew {count} rainbow circles");
    canvas
}

/// Radius, point thickness and color of ring `i` in the HSV lab
///
/// The radius step is an integer division, so radii advance by 2.
pub fn hsv_ring(i: i32) -> (i32, f32, Rgb) {
    let step = (HSV_MAX_RADIUS - HSV_MIN_RADIUS) / (HSV_CIRCLES - 1);
    let t = i as f32 / (HSV_CIRCLES - 1) as f32;
    let radius = HSV_MIN_RADIUS + i * step;
    let thickness = 1.0 + t * 4.0;
    (radius, thickness, hsv_to_rgb(t * 360.0, 1.0, 1.0))
}

/// One hundred concentric rings sweeping the hue circle
pub fn hsv_scene() -> Canvas {
    let mut canvas = Canvas::new(HSV_SIZE, HSV_SIZE, Rgb::WHITE);
    let center = IVec2::splat(HSV_SIZE as i32 / 2);
    for i in 0..HSV_CIRCLES {
        let (radius, thickness, color) = hsv_ring(i);
        canvas.plot_all(center, midpoint_circle(radius), thickness, color);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_scene_has_gaps() {
        let canvas = dotted_circle_scene(IVec2::new(320, 240), 100);
        // Step 0 is always drawn, so the top of the circle is inked
        assert_eq!(canvas.get_pixel(320, 340), Some(Rgb::BLACK));
        assert!(canvas.ink_count() > 0);
        let solid = {
            let mut c = Canvas::new(640, 480, Rgb::WHITE);
            c.plot_all(IVec2::new(320, 240), dotted_circle(100, 1), 2.0, Rgb::BLACK);
            c.ink_count()
        };
        assert!(canvas.ink_count() < solid / 2);
    }

    #[test]
    fn test_rainbow_colors_cycle() {
        let canvas = rainbow_scene(8);
        // Top of circle i sits at y = 300 + 30(i + 1)
        assert_eq!(canvas.get_pixel(400, 330), Some(RAINBOW[0]));
        assert_eq!(canvas.get_pixel(400, 360), Some(RAINBOW[1]));
        assert_eq!(canvas.get_pixel(400, 540), Some(RAINBOW[0]));
    }

    #[test]
    fn test_hsv_ring_progression() {
        let (r0, t0, c0) = hsv_ring(0);
        assert_eq!(r0, 10);
        assert_eq!(t0, 1.0);
        assert!(c0.approx_eq(Rgb::RED, 1e-5));

        let (r99, t99, _) = hsv_ring(99);
        assert_eq!(r99, 10 + 99 * 2);
        assert!((t99 - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_hsv_scene_draws_inner_ring() {
        let canvas = hsv_scene();
        assert_eq!(canvas.get_pixel(350 + 10, 350).map(|c| c.approx_eq(Rgb::RED, 1e-5)), Some(true));
    }
}
