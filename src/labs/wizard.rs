//! Keyboard-driven wizard collecting a Bresenham line, then drawing it on axes
//!
//! The wizard walks through numbered steps: line type, the two endpoints and,
//! for thick lines, the width. Each step is committed with Enter. Invalid
//! input keeps the wizard on the same step and clears the buffer.

use glam::IVec2;

use crate::raster::{Canvas, Rgb, bresenham, thick_line};

pub const WIZARD_SIZE: u32 = 700;
/// Logical coordinates span `-MAX_COORD..=MAX_COORD` with the origin centred
pub const MAX_COORD: i32 = WIZARD_SIZE as i32 / 2;
pub const GRID_SPACING: i32 = 50;
pub const MAX_BUFFER_LEN: usize = 5;
/// Point size used when plotting the line
pub const LINE_POINT_SIZE: f32 = 1.5;

const INPUT_BACKGROUND: Rgb = Rgb::grey(0.9);

/// One key press fed to the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardKey {
    Digit(char),
    Minus,
    Backspace,
    Enter,
}

impl WizardKey {
    /// Map a typed character; Enter is `\r` or `\n`, backspace is 8 or 127
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(WizardKey::Digit(c)),
            '-' => Some(WizardKey::Minus),
            '\r' | '\n' => Some(WizardKey::Enter),
            '\u{8}' | '\u{7f}' => Some(WizardKey::Backspace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    InvalidChoice,
}

/// What a key press did to the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Buffer edited (or key dropped because the buffer is full)
    Edited,
    Advanced { step: u8 },
    Rejected(Rejection),
    /// All values collected; the wizard is now drawing
    Complete(LineRequest),
    /// Keys after completion are ignored
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Standard,
    Thick,
}

/// A fully parsed line in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRequest {
    pub kind: LineKind,
    pub from: IVec2,
    pub to: IVec2,
    pub width: i32,
}

/// Parse a signed integer; empty input, a lone `-`, or overflow give 0
pub fn parse_int(s: &str) -> i32 {
    if s.is_empty() || s == "-" {
        return 0;
    }
    s.parse().unwrap_or(0)
}

#[derive(Debug, Clone, Default)]
pub struct LineWizard {
    step: u8,
    buffer: String,
    choice: String,
    x1: String,
    y1: String,
    x2: String,
    y2: String,
    width: String,
    request: Option<LineRequest>,
}

impl LineWizard {
    pub fn new() -> Self {
        Self {
            step: 1,
            ..Default::default()
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_drawing(&self) -> bool {
        self.request.is_some()
    }

    pub fn request(&self) -> Option<LineRequest> {
        self.request
    }

    /// Heading and hint shown for the current step
    pub fn prompt(&self) -> (&'static str, String) {
        match self.step {
            1 => (
                "STEP 1: Select Line Type",
                "Type 1 (Standard) or 2 (Thick) and press ENTER".to_string(),
            ),
            2 => (
                "STEP 2: Enter Start X (x1)",
                format!("Coordinates in range (-{MAX_COORD} to {MAX_COORD})"),
            ),
            3 => ("STEP 3: Enter Start Y (y1)", "Enter value and press ENTER".to_string()),
            4 => ("STEP 4: Enter End X (x2)", "Enter value and press ENTER".to_string()),
            5 => ("STEP 5: Enter End Y (y2)", "Enter value and press ENTER".to_string()),
            _ => (
                "STEP 6: Enter Line Width (W)",
                "Width W (e.g., 3, 5, 7). Must be > 0.".to_string(),
            ),
        }
    }

    /// Values collected so far, as shown in the status line
    pub fn status(&self) -> String {
        format!(
            "P1({}, {}) P2({}, {}) W:{}",
            self.x1, self.y1, self.x2, self.y2, self.width
        )
    }

    pub fn key(&mut self, key: WizardKey) -> WizardOutcome {
        if self.is_drawing() {
            return WizardOutcome::Ignored;
        }
        match key {
            WizardKey::Enter => self.commit(),
            WizardKey::Backspace => {
                self.buffer.pop();
                WizardOutcome::Edited
            }
            WizardKey::Minus => {
                if self.buffer.is_empty() {
                    self.buffer.push('-');
                }
                WizardOutcome::Edited
            }
            WizardKey::Digit(c) => {
                if c.is_ascii_digit() && self.buffer.len() < MAX_BUFFER_LEN {
                    self.buffer.push(c);
                }
                WizardOutcome::Edited
            }
        }
    }

    /// Feed every mappable character of `text` as a key press
    pub fn type_str(&mut self, text: &str) -> Vec<WizardOutcome> {
        text.chars()
            .filter_map(WizardKey::from_char)
            .map(|k| self.key(k))
            .collect()
    }

    fn commit(&mut self) -> WizardOutcome {
        let input = std::mem::take(&mut self.buffer);
        if input.is_empty() && self.step != 1 {
            log::warn!("Input cannot be empty");
            return WizardOutcome::Rejected(Rejection::Empty);
        }

        match self.step {
            1 => {
                if input != "1" && input != "2" {
                    log::warn!("Invalid choice {input:?}, must be 1 or 2");
                    return WizardOutcome::Rejected(Rejection::InvalidChoice);
                }
                self.choice = input;
            }
            2 => self.x1 = input,
            3 => self.y1 = input,
            4 => self.x2 = input,
            5 => {
                self.y2 = input;
                if self.choice == "1" {
                    return self.finish();
                }
            }
            _ => {
                self.width = input;
                return self.finish();
            }
        }
        self.step += 1;
        WizardOutcome::Advanced { step: self.step }
    }

    fn finish(&mut self) -> WizardOutcome {
        let thick = parse_int(&self.choice) == 2;
        let request = LineRequest {
            kind: if thick { LineKind::Thick } else { LineKind::Standard },
            from: IVec2::new(parse_int(&self.x1), parse_int(&self.y1)),
            to: IVec2::new(parse_int(&self.x2), parse_int(&self.y2)),
            width: if thick { parse_int(&self.width).max(1) } else { 1 },
        };
        log::info!(
            "Drawing with: P1({}, {}), P2({}, {}), Width: {}",
            request.from.x,
            request.from.y,
            request.to.x,
            request.to.y,
            request.width
        );
        self.request = Some(request);
        WizardOutcome::Complete(request)
    }

    /// Grey input screen while collecting, axes and the line once complete
    pub fn render(&self) -> Canvas {
        let Some(request) = self.request else {
            return Canvas::new(WIZARD_SIZE, WIZARD_SIZE, INPUT_BACKGROUND);
        };

        let mut canvas = Canvas::new(WIZARD_SIZE, WIZARD_SIZE, Rgb::WHITE);
        draw_axes(&mut canvas);

        let points = match request.kind {
            LineKind::Standard => bresenham(request.from, request.to),
            LineKind::Thick => thick_line(request.from, request.to, request.width),
        };
        canvas.plot_all(IVec2::splat(MAX_COORD), points, LINE_POINT_SIZE, Rgb::BLACK);
        canvas
    }
}

fn draw_axes(canvas: &mut Canvas) {
    let size = WIZARD_SIZE as i32;
    canvas.draw_line(IVec2::new(0, MAX_COORD), IVec2::new(size, MAX_COORD), Rgb::BLUE);
    canvas.draw_line(IVec2::new(MAX_COORD, 0), IVec2::new(MAX_COORD, size), Rgb::BLUE);

    let mut coord = -MAX_COORD + GRID_SPACING;
    while coord < MAX_COORD {
        if coord != 0 {
            let pos = coord + MAX_COORD;
            canvas.draw_line(
                IVec2::new(pos, MAX_COORD - 3),
                IVec2::new(pos, MAX_COORD + 3),
                Rgb::BLUE,
            );
            canvas.draw_line(
                IVec2::new(MAX_COORD - 3, pos),
                IVec2::new(MAX_COORD + 3, pos),
                Rgb::BLUE,
            );
        }
        coord += GRID_SPACING;
    }
}
