//! Interactive Liang-Barsky clipping tool
//!
//! The user picks two opposite corners of a clip window, then draws
//! polylines, then presses Enter to see every segment clipped. Points are
//! kept in logical coordinates with the origin at the centre of the drawing
//! area; the list panel on the right shows the visible endpoints.

use glam::{IVec2, Vec2};

use crate::raster::{Canvas, ClipWindow, Rgb, Segment, clip_segment, thick_line};

pub const CLIP_WIDTH: u32 = 1500;
pub const CLIP_HEIGHT: u32 = 800;
pub const HEADER_HEIGHT: f32 = 70.0;
pub const AXIS_GAP: i32 = 50;
/// Half extents of the logical coordinate system
pub const COORD_RANGE: Vec2 = Vec2::new(700.0, 365.0);

pub const DRAWING_AREA: Vec2 = Vec2::new(
    CLIP_WIDTH as f32 * 0.7,
    CLIP_HEIGHT as f32 - HEADER_HEIGHT,
);

const AXIS_COLOR: Rgb = Rgb::grey(0.4);
const HEADER_COLOR: Rgb = Rgb::grey(0.85);
const SEPARATOR_COLOR: Rgb = Rgb::grey(0.5);
const PANEL_COLOR: Rgb = Rgb::grey(0.95);
const CLIPPED_COLOR: Rgb = Rgb::new(0.0, 0.8, 0.0);
const DOT_COLOR: Rgb = Rgb::new(0.0, 0.0, 0.8);
const CORNER_COLOR: Rgb = Rgb::new(0.8, 0.2, 0.2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipMode {
    WindowInput,
    LineInput,
    Clipping,
}

/// Keys the tool reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKey {
    Enter,
    Space,
    Reset,
}

impl ClipKey {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\r' | '\n' => Some(ClipKey::Enter),
            ' ' => Some(ClipKey::Space),
            'r' | 'R' => Some(ClipKey::Reset),
            _ => None,
        }
    }
}

/// Map logical coordinates into screen space (bottom-left origin)
pub fn logical_to_screen(p: Vec2) -> Vec2 {
    let scale = DRAWING_AREA / (2.0 * COORD_RANGE);
    DRAWING_AREA / 2.0 + p * scale
}

pub fn screen_to_logical(p: Vec2) -> Vec2 {
    let scale = DRAWING_AREA / (2.0 * COORD_RANGE);
    (p - DRAWING_AREA / 2.0) / scale
}

fn to_pixel(p: Vec2) -> IVec2 {
    p.round().as_ivec2()
}

#[derive(Debug, Clone)]
pub struct ClipTool {
    mode: ClipMode,
    first_corner: Option<Vec2>,
    window: ClipWindow,
    segments: Vec<Segment>,
    /// Start of the next segment, `None` when a new polyline begins
    cursor: Option<Vec2>,
}

impl Default for ClipTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipTool {
    pub fn new() -> Self {
        Self {
            mode: ClipMode::WindowInput,
            first_corner: None,
            window: ClipWindow::from_corners(Vec2::ZERO, Vec2::ZERO),
            segments: Vec::new(),
            cursor: None,
        }
    }

    pub fn mode(&self) -> ClipMode {
        self.mode
    }

    pub fn window(&self) -> ClipWindow {
        self.window
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mouse press in window coordinates (top-left origin, y down)
    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.click(Vec2::new(x, CLIP_HEIGHT as f32 - y));
    }

    /// Click at a logical point, as if the user clicked where it is drawn
    pub fn click_logical(&mut self, p: Vec2) {
        self.click(logical_to_screen(p));
    }

    /// Click in screen coordinates (bottom-left origin)
    pub fn click(&mut self, screen: Vec2) {
        let p = screen_to_logical(screen);
        match self.mode {
            ClipMode::WindowInput => match self.first_corner.take() {
                None => self.first_corner = Some(p),
                Some(corner) => {
                    self.window = ClipWindow::from_corners(corner, p);
                    self.mode = ClipMode::LineInput;
                    log::debug!("Clip window {:?}", self.window);
                }
            },
            ClipMode::LineInput => {
                if screen.y > DRAWING_AREA.y || screen.x > DRAWING_AREA.x {
                    return;
                }
                if let Some(start) = self.cursor {
                    self.segments.push(Segment::new(start, p));
                }
                self.cursor = Some(p);
            }
            ClipMode::Clipping => {}
        }
    }

    pub fn key(&mut self, key: ClipKey) {
        match (self.mode, key) {
            (ClipMode::LineInput, ClipKey::Enter) => {
                self.mode = ClipMode::Clipping;
                log::info!("Clipping {} segments", self.segments.len());
            }
            (ClipMode::LineInput, ClipKey::Space) => self.cursor = None,
            (ClipMode::LineInput, ClipKey::Reset) => {}
            (_, ClipKey::Reset) => *self = Self::new(),
            _ => {}
        }
    }

    /// Clipped part of every segment, in input order
    pub fn clipped(&self) -> Vec<Option<Segment>> {
        self.segments
            .iter()
            .map(|s| clip_segment(&self.window, s))
            .collect()
    }

    /// Endpoints of every visible clipped segment, in order
    pub fn visible_points(&self) -> Vec<Vec2> {
        self.clipped()
            .into_iter()
            .flatten()
            .flat_map(|s| [s.start, s.end])
            .collect()
    }

    /// `P1 (x, y)` style labels for the list panel
    pub fn labels(&self) -> Vec<String> {
        self.visible_points()
            .iter()
            .enumerate()
            .map(|(i, p)| format!("P{} ({:.1}, {:.1})", i + 1, p.x, p.y))
            .collect()
    }

    /// One-line instruction for the current mode
    pub fn prompt(&self) -> String {
        match self.mode {
            ClipMode::WindowInput => match self.first_corner {
                None => "Click 1/2: Select first diagonal corner of the Clipping Window.".into(),
                Some(c) => format!(
                    "Click 2/2: Select the opposite diagonal corner. P1: ({:.1}, {:.1})",
                    c.x, c.y
                ),
            },
            ClipMode::LineInput => match self.cursor {
                None => "Click P1 to start a new line segment. Press ENTER to Clip.".into(),
                Some(c) => format!(
                    "Click P2 to connect to ({:.1}, {:.1}). SPACE starts a new line, ENTER clips.",
                    c.x, c.y
                ),
            },
            ClipMode::Clipping => {
                "Original Lines (RED) | Clipped Segments (GREEN) | Intersections (BLUE/P#)".into()
            }
        }
    }

    pub fn render(&self) -> Canvas {
        let mut canvas = Canvas::new(CLIP_WIDTH, CLIP_HEIGHT, Rgb::WHITE);
        let width = CLIP_WIDTH as f32;
        let height = CLIP_HEIGHT as f32;

        canvas.fill_rect(
            Vec2::new(0.0, DRAWING_AREA.y),
            Vec2::new(width, height),
            HEADER_COLOR,
            1.0,
        );
        canvas.draw_line(
            to_pixel(Vec2::new(0.0, DRAWING_AREA.y)),
            to_pixel(Vec2::new(width, DRAWING_AREA.y)),
            SEPARATOR_COLOR,
        );
        draw_axes(&mut canvas);

        match self.mode {
            ClipMode::WindowInput => {
                if let Some(corner) = self.first_corner {
                    let p = to_pixel(logical_to_screen(corner));
                    canvas.plot(p.x, p.y, 8.0, CORNER_COLOR);
                }
            }
            ClipMode::LineInput => {
                self.draw_window(&mut canvas);
                for s in &self.segments {
                    canvas.draw_line(
                        to_pixel(logical_to_screen(s.start)),
                        to_pixel(logical_to_screen(s.end)),
                        SEPARATOR_COLOR,
                    );
                }
                if let Some(c) = self.cursor {
                    let p = to_pixel(logical_to_screen(c));
                    canvas.plot(p.x, p.y, 5.0, DOT_COLOR);
                }
            }
            ClipMode::Clipping => {
                self.draw_window(&mut canvas);
                for (segment, clipped) in self.segments.iter().zip(self.clipped()) {
                    canvas.draw_line(
                        to_pixel(logical_to_screen(segment.start)),
                        to_pixel(logical_to_screen(segment.end)),
                        Rgb::RED,
                    );
                    let Some(clipped) = clipped else {
                        continue;
                    };
                    let a = to_pixel(logical_to_screen(clipped.start));
                    let b = to_pixel(logical_to_screen(clipped.end));
                    for p in thick_line(a, b, 4) {
                        canvas.put_pixel(p.x, p.y, CLIPPED_COLOR);
                    }
                    canvas.plot(a.x, a.y, 8.0, DOT_COLOR);
                    canvas.plot(b.x, b.y, 8.0, DOT_COLOR);
                }

                canvas.fill_rect(
                    Vec2::new(DRAWING_AREA.x, 0.0),
                    Vec2::new(width, DRAWING_AREA.y),
                    PANEL_COLOR,
                    1.0,
                );
                canvas.draw_line(
                    to_pixel(Vec2::new(DRAWING_AREA.x, 0.0)),
                    to_pixel(Vec2::new(DRAWING_AREA.x, DRAWING_AREA.y)),
                    SEPARATOR_COLOR,
                );
            }
        }
        canvas
    }

    fn draw_window(&self, canvas: &mut Canvas) {
        let (min, max) = (self.window.min, self.window.max);
        let corners = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
        .map(|c| to_pixel(logical_to_screen(c)));
        canvas.draw_polyline_closed(&corners, Rgb::BLACK);
    }
}

fn draw_axes(canvas: &mut Canvas) {
    let origin = logical_to_screen(Vec2::ZERO);
    let x_min = logical_to_screen(Vec2::new(-COORD_RANGE.x, 0.0));
    let x_max = logical_to_screen(Vec2::new(COORD_RANGE.x, 0.0));
    let y_min = logical_to_screen(Vec2::new(0.0, -COORD_RANGE.y));
    let y_max = logical_to_screen(Vec2::new(0.0, COORD_RANGE.y));
    canvas.draw_line(to_pixel(x_min), to_pixel(x_max), AXIS_COLOR);
    canvas.draw_line(to_pixel(y_min), to_pixel(y_max), AXIS_COLOR);

    let start_x = (-COORD_RANGE.x / AXIS_GAP as f32).ceil() as i32 * AXIS_GAP;
    for x in (start_x..=COORD_RANGE.x as i32).step_by(AXIS_GAP as usize) {
        if x == 0 {
            continue;
        }
        let tick = logical_to_screen(Vec2::new(x as f32, 0.0));
        canvas.draw_line(
            to_pixel(Vec2::new(tick.x, origin.y - 4.0)),
            to_pixel(Vec2::new(tick.x, origin.y + 4.0)),
            AXIS_COLOR,
        );
    }

    let start_y = (-COORD_RANGE.y / AXIS_GAP as f32).ceil() as i32 * AXIS_GAP;
    for y in (start_y..=COORD_RANGE.y as i32).step_by(AXIS_GAP as usize) {
        if y == 0 {
            continue;
        }
        let tick = logical_to_screen(Vec2::new(0.0, y as f32));
        canvas.draw_line(
            to_pixel(Vec2::new(origin.x - 4.0, tick.y)),
            to_pixel(Vec2::new(origin.x + 4.0, tick.y)),
            AXIS_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_with_window() -> ClipTool {
        let mut tool = ClipTool::new();
        tool.click_logical(Vec2::new(100.0, 100.0));
        tool.click_logical(Vec2::new(-100.0, -100.0));
        tool
    }

    #[test]
    fn test_coordinate_mapping_round_trips() {
        let p = Vec2::new(-350.0, 120.0);
        assert!(screen_to_logical(logical_to_screen(p)).distance(p) < 1e-3);
        assert_eq!(logical_to_screen(Vec2::ZERO), Vec2::new(525.0, 365.0));
    }

    #[test]
    fn test_window_corners_are_normalised() {
        let tool = tool_with_window();
        assert_eq!(tool.mode(), ClipMode::LineInput);
        let w = tool.window();
        assert!(w.min.distance(Vec2::new(-100.0, -100.0)) < 1e-3);
        assert!(w.max.distance(Vec2::new(100.0, 100.0)) < 1e-3);
    }

    #[test]
    fn test_polyline_and_space() {
        let mut tool = tool_with_window();
        tool.click_logical(Vec2::new(-200.0, 0.0));
        tool.click_logical(Vec2::new(200.0, 0.0));
        tool.click_logical(Vec2::new(200.0, 300.0));
        tool.key(ClipKey::Space);
        tool.click_logical(Vec2::new(0.0, -300.0));
        tool.click_logical(Vec2::new(0.0, 300.0));
        assert_eq!(tool.segments().len(), 3);
    }

    #[test]
    fn test_clicks_outside_drawing_area_ignored() {
        let mut tool = tool_with_window();
        tool.click(Vec2::new(1200.0, 300.0));
        tool.click(Vec2::new(300.0, 760.0));
        tool.click(Vec2::new(100.0, 100.0));
        tool.click(Vec2::new(200.0, 100.0));
        assert_eq!(tool.segments().len(), 1);
    }

    #[test]
    fn test_clipping_results_and_labels() {
        let mut tool = tool_with_window();
        tool.click_logical(Vec2::new(-200.0, 0.0));
        tool.click_logical(Vec2::new(200.0, 0.0));
        tool.key(ClipKey::Space);
        tool.click_logical(Vec2::new(300.0, 300.0));
        tool.click_logical(Vec2::new(300.0, -300.0));
        tool.key(ClipKey::Enter);
        assert_eq!(tool.mode(), ClipMode::Clipping);

        let clipped = tool.clipped();
        assert!(clipped[0].is_some());
        assert!(clipped[1].is_none());
        assert_eq!(tool.labels(), vec!["P1 (-100.0, 0.0)", "P2 (100.0, 0.0)"]);

        let canvas = tool.render();
        let mid = to_pixel(logical_to_screen(Vec2::new(0.0, 0.0)));
        assert_eq!(canvas.get_pixel(mid.x, mid.y), Some(CLIPPED_COLOR));
        let outside = to_pixel(logical_to_screen(Vec2::new(-150.0, 0.0)));
        assert_eq!(canvas.get_pixel(outside.x, outside.y), Some(Rgb::RED));
        assert_eq!(canvas.get_pixel(1400, 300), Some(PANEL_COLOR));
    }

    #[test]
    fn test_reset_ignored_while_drawing_lines() {
        let mut tool = tool_with_window();
        tool.key(ClipKey::Reset);
        assert_eq!(tool.mode(), ClipMode::LineInput);
        tool.key(ClipKey::Enter);
        tool.key(ClipKey::Reset);
        assert_eq!(tool.mode(), ClipMode::WindowInput);
        assert!(tool.segments().is_empty());
    }

    #[test]
    fn test_mouse_down_flips_y() {
        let mut tool = ClipTool::new();
        tool.mouse_down(525.0, 800.0 - 365.0);
        tool.mouse_down(625.0, 800.0 - 465.0);
        let w = tool.window();
        assert!(w.min.length() < 1e-3);
        assert!((w.max.x - 100.0 / 0.75).abs() < 1e-2);
    }
}
