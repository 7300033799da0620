//! Software rasterization
//!
//! Textbook scan-conversion algorithms plotting into an in-memory canvas:
//! - Midpoint circles and Bresenham lines
//! - Four-neighbour flood fill
//! - Liang-Barsky clipping
//! - Transform state with an undo/redo ring

pub mod canvas;
pub mod circle;
pub mod clip;
pub mod color;
pub mod fill;
pub mod line;
pub mod transform;

pub use canvas::Canvas;
pub use circle::{dotted_circle, eight_way, exam_circle, midpoint_circle, rainbow_circle};
pub use clip::{ClipWindow, Segment, clip_segment, liang_barsky};
pub use color::{PASTEL_31, RAINBOW, Rgb, hsv_to_rgb};
pub use fill::{FillReport, flood_fill};
pub use line::{bold_line, bold_pixel, bresenham, thick_line};
pub use transform::{MAX_HISTORY, TransformHistory, TransformOp, TransformState, Transformer};
