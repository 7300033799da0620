//! Lab scenes and their input state machines
//!
//! Every lab renders into a [`Canvas`](crate::raster::Canvas). The
//! interactive ones take abstract key and click events so a frontend (or a
//! scripted CLI run) can drive them.

pub mod circles;
pub mod clipping;
pub mod flood_exam;
pub mod lines;
pub mod transform_demo;
pub mod wizard;

pub use circles::{dotted_circle_scene, hsv_scene, rainbow_scene};
pub use clipping::{ClipKey, ClipMode, ClipTool};
pub use flood_exam::{ClickOutcome, FloodFillExam};
pub use lines::bold_line_scene;
pub use transform_demo::{Figure, TransformDemo};
pub use wizard::{LineKind, LineRequest, LineWizard, Rejection, WizardKey, WizardOutcome};
