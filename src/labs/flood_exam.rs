//! Flood fill exam: three outlined shapes, click inside one to paint it

use glam::IVec2;

use crate::raster::{Canvas, FillReport, Rgb, exam_circle, flood_fill};

pub const FLOOD_SIZE: u32 = 700;
pub const FILL_COLOR: Rgb = Rgb::MAGENTA;
pub const COLOR_EPSILON: f32 = 0.001;

pub const RECT_LOOP: [IVec2; 4] = [
    IVec2::new(180, 400),
    IVec2::new(330, 400),
    IVec2::new(330, 250),
    IVec2::new(180, 250),
];
pub const TRIANGLE_LOOP: [IVec2; 3] = [
    IVec2::new(445, 400),
    IVec2::new(370, 250),
    IVec2::new(520, 250),
];
pub const CIRCLE_CENTER: IVec2 = IVec2::new(380, 480);
pub const CIRCLE_RADIUS: i32 = 70;

/// Result of clicking the exam canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Filled(FillReport),
    /// The clicked pixel was not background
    Boundary,
    OutOfBounds,
}

#[derive(Debug, Clone)]
pub struct FloodFillExam {
    canvas: Canvas,
}

impl Default for FloodFillExam {
    fn default() -> Self {
        Self::new()
    }
}

impl FloodFillExam {
    pub fn new() -> Self {
        let mut canvas = Canvas::new(FLOOD_SIZE, FLOOD_SIZE, Rgb::WHITE);
        canvas.draw_polyline_closed(&RECT_LOOP, Rgb::RED);
        canvas.draw_polyline_closed(&TRIANGLE_LOOP, Rgb::GREEN);
        canvas.plot_all(CIRCLE_CENTER, exam_circle(CIRCLE_RADIUS), 1.0, Rgb::BLUE);
        Self { canvas }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Click at canvas coordinates (bottom-left origin)
    pub fn click(&mut self, p: IVec2) -> ClickOutcome {
        let Some(color) = self.canvas.get_pixel(p.x, p.y) else {
            return ClickOutcome::OutOfBounds;
        };
        let background = self.canvas.background();
        if !color.approx_eq(background, COLOR_EPSILON) {
            log::info!("Clicked a boundary pixel at ({}, {}), fill not started", p.x, p.y);
            return ClickOutcome::Boundary;
        }

        log::info!("Starting 4-neighbour flood fill at ({}, {})", p.x, p.y);
        let report = flood_fill(&mut self.canvas, p, FILL_COLOR, background, COLOR_EPSILON);
        ClickOutcome::Filled(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_inside_rectangle_stays_inside() {
        let mut exam = FloodFillExam::new();
        let outcome = exam.click(IVec2::new(250, 320));
        // Interior of the 150x150 loop is 149x149
        assert_eq!(outcome, ClickOutcome::Filled(FillReport { filled: 149 * 149 }));
        assert_eq!(exam.canvas().get_pixel(200, 300), Some(Rgb::MAGENTA));
        assert_eq!(exam.canvas().get_pixel(100, 100), Some(Rgb::WHITE));
    }

    #[test]
    fn test_click_on_boundary_paints_nothing() {
        let mut exam = FloodFillExam::new();
        let before = exam.canvas().clone();
        assert_eq!(exam.click(IVec2::new(180, 300)), ClickOutcome::Boundary);
        assert_eq!(exam.canvas(), &before);
    }

    #[test]
    fn test_click_outside_canvas() {
        let mut exam = FloodFillExam::new();
        assert_eq!(exam.click(IVec2::new(-1, 10)), ClickOutcome::OutOfBounds);
        assert_eq!(exam.click(IVec2::new(10, 700)), ClickOutcome::OutOfBounds);
    }

    #[test]
    fn test_circle_fill_is_contained() {
        let mut exam = FloodFillExam::new();
        let ClickOutcome::Filled(report) = exam.click(CIRCLE_CENTER) else {
            panic!("expected fill");
        };
        let area = std::f32::consts::PI * (CIRCLE_RADIUS * CIRCLE_RADIUS) as f32;
        assert!((report.filled as f32) < area);
        assert!((report.filled as f32) > area * 0.85);
        assert_eq!(exam.canvas().get_pixel(380, 560), Some(Rgb::WHITE));
    }

    #[test]
    fn test_second_fill_of_same_region_is_boundary() {
        let mut exam = FloodFillExam::new();
        exam.click(IVec2::new(445, 300));
        assert_eq!(exam.click(IVec2::new(445, 300)), ClickOutcome::Boundary);
    }
}
