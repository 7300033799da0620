//! 2D transform state with a fixed-size undo/redo ring

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Number of slots in the history ring
pub const MAX_HISTORY: usize = 5;

/// Accumulated rotation, uniform scale and translation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Degrees, counter-clockwise positive
    pub rotation_deg: f32,
    pub scale: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    pub const IDENTITY: TransformState = TransformState {
        rotation_deg: 0.0,
        scale: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// `T(tx, ty) * T(pivot) * R(angle) * S(scale) * T(-pivot)`
    pub fn matrix(&self, pivot: Vec2) -> Affine2 {
        Affine2::from_translation(Vec2::new(self.tx, self.ty))
            * Affine2::from_translation(pivot)
            * Affine2::from_angle(self.rotation_deg.to_radians())
            * Affine2::from_scale(Vec2::splat(self.scale))
            * Affine2::from_translation(-pivot)
    }
}

/// Circular history of transform states
///
/// Undo walks backwards and wraps from slot 0 to the last slot; redo walks
/// forwards modulo the ring size. Slots that were never written hold the
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformHistory {
    slots: [TransformState; MAX_HISTORY],
    top: usize,
}

impl Default for TransformHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformHistory {
    pub fn new() -> Self {
        Self {
            slots: [TransformState::IDENTITY; MAX_HISTORY],
            top: 0,
        }
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn current(&self) -> TransformState {
        self.slots[self.top]
    }

    pub fn push(&mut self, state: TransformState) {
        self.top = (self.top + 1) % MAX_HISTORY;
        self.slots[self.top] = state;
    }

    pub fn undo(&mut self) -> TransformState {
        self.top = if self.top > 0 {
            self.top - 1
        } else {
            MAX_HISTORY - 1
        };
        self.slots[self.top]
    }

    pub fn redo(&mut self) -> TransformState {
        self.top = (self.top + 1) % MAX_HISTORY;
        self.slots[self.top]
    }

    /// Store the identity in slot 0 and point at it
    pub fn reset(&mut self) {
        self.top = 0;
        self.slots[0] = TransformState::IDENTITY;
    }
}

/// Menu operations on a transformed figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformOp {
    Reset,
    RotateClockwise,
    RotateCounterClockwise,
    ScaleHalf,
    ScaleDouble,
    Translate,
    Undo,
    Redo,
}

impl TransformOp {
    pub const ALL: [TransformOp; 8] = [
        TransformOp::Reset,
        TransformOp::RotateClockwise,
        TransformOp::RotateCounterClockwise,
        TransformOp::ScaleHalf,
        TransformOp::ScaleDouble,
        TransformOp::Translate,
        TransformOp::Undo,
        TransformOp::Redo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransformOp::Reset => "Reset",
            TransformOp::RotateClockwise => "Rotate 90 CW",
            TransformOp::RotateCounterClockwise => "Rotate 90 CCW",
            TransformOp::ScaleHalf => "Scale x0.5",
            TransformOp::ScaleDouble => "Scale x2",
            TransformOp::Translate => "Translate",
            TransformOp::Undo => "Undo",
            TransformOp::Redo => "Redo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reset" => Some(TransformOp::Reset),
            "cw" | "rotate-cw" => Some(TransformOp::RotateClockwise),
            "ccw" | "rotate-ccw" => Some(TransformOp::RotateCounterClockwise),
            "half" | "scale-half" => Some(TransformOp::ScaleHalf),
            "double" | "scale-double" => Some(TransformOp::ScaleDouble),
            "move" | "translate" => Some(TransformOp::Translate),
            "undo" => Some(TransformOp::Undo),
            "redo" => Some(TransformOp::Redo),
            _ => None,
        }
    }
}

/// Current transform plus its history, driven by menu operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transformer {
    pub current: TransformState,
    pub history: TransformHistory,
    /// Translation applied by [`TransformOp::Translate`]
    pub translate_step: Vec2,
    /// Every operation counts, including undo and redo
    pub total_changes: u32,
}

impl Transformer {
    pub fn new(translate_step: Vec2) -> Self {
        Self {
            current: TransformState::IDENTITY,
            history: TransformHistory::new(),
            translate_step,
            total_changes: 0,
        }
    }

    pub fn apply(&mut self, op: TransformOp) {
        match op {
            TransformOp::Reset => {
                self.current = TransformState::IDENTITY;
                self.history.reset();
            }
            TransformOp::RotateClockwise => {
                self.current.rotation_deg -= 90.0;
                self.history.push(self.current);
            }
            TransformOp::RotateCounterClockwise => {
                self.current.rotation_deg += 90.0;
                self.history.push(self.current);
            }
            TransformOp::ScaleHalf => {
                self.current.scale *= 0.5;
                self.history.push(self.current);
            }
            TransformOp::ScaleDouble => {
                self.current.scale *= 2.0;
                self.history.push(self.current);
            }
            TransformOp::Translate => {
                self.current.tx += self.translate_step.x;
                self.current.ty += self.translate_step.y;
                self.history.push(self.current);
            }
            TransformOp::Undo => self.current = self.history.undo(),
            TransformOp::Redo => self.current = self.history.redo(),
        }
        self.total_changes += 1;
        log::debug!(
            "{} -> {:?} (slot {}, {} changes)",
            op.label(),
            self.current,
            self.history.top(),
            self.total_changes
        );
    }
}
