//! Brick layouts for the five levels

use glam::Vec2;

use super::state::{Brick, INDESTRUCTIBLE_HP, SCREEN_H, SCREEN_W};
use crate::raster::Rgb;

pub const ROWS: i32 = 8;
pub const COLS: i32 = 14;
pub const MARGIN_X: f32 = 70.0;
pub const MARGIN_Y: f32 = 100.0;
pub const GAP: f32 = 4.0;
pub const BRICK_H: f32 = 22.0;

const DARK: Rgb = Rgb::grey(0.1);

/// Brick width for the 14 column grid
pub fn brick_width() -> f32 {
    let area = SCREEN_W - 2.0 * MARGIN_X;
    (area - (COLS - 1) as f32 * GAP) / COLS as f32
}

/// Difficulty name and one-line description shown on the level picker
pub fn level_info(level: u32) -> (&'static str, &'static str) {
    match level {
        1 => ("EASY", "Standard layout, low speed gain."),
        2 => ("NORMAL", "Checkerboard gaps, 2HP bricks introduced."),
        3 => ("HEART SHAPE", "Solid Heart of 2HP bricks. Break it fast!"),
        4 => ("STAR CORE", "A huge Star with an indestructible core (999HP)."),
        _ => (
            "HAPPY EMOJI WALL",
            "Indestructible face with a tiny breakable target. Precision is key!",
        ),
    }
}

/// Per-cell layout rule: `None` leaves the cell empty
fn cell(level: u32, r: i32, c: i32) -> Option<(i32, Rgb, u32)> {
    let mut hp = 1;
    let mut color = Rgb::WHITE;
    let mut score = 50 + 10 * r as u32;

    match level {
        2 => {
            hp = if r < 3 { 2 } else { 1 };
            if (r + c) % 2 != 0 {
                return None;
            }
        }
        3 => {
            hp = 2;
            let skip = (r < 2 && (c < 3 || c > 10))
                || (r == 2 && (c == 0 || c == 13))
                || (r >= 5 && (c < r - 5 || c > 18 - r))
                || (r == 7 && (c < 3 || c > 10));
            if skip {
                return None;
            }
            color = Rgb::new(0.9, 0.2, 0.4);
        }
        4 => {
            let dc = (c - COLS / 2).abs();
            let dr = (r - 4).abs();
            if dc + dr > 6 || dc < 1 || dr < 1 || (dc > 4 && dr > 2) {
                return None;
            }
            hp = if dc + dr < 3 { INDESTRUCTIBLE_HP } else { 3 };
            score = if hp == INDESTRUCTIBLE_HP { 0 } else { 150 };
        }
        5 => {
            if !(1..=6).contains(&r) || !(1..=12).contains(&c) {
                return None;
            }
            color = Rgb::new(1.0, 0.8, 0.2);
            let outline = r == 1 || r == 6 || c == 1 || c == 12;
            let eyes = r == 2 && ((4..=5).contains(&c) || (8..=9).contains(&c));
            let mouth = r == 4 && (5..=8).contains(&c);
            if mouth {
                color = Rgb::new(0.9, 0.0, 0.0);
                score = 500;
            } else if outline || eyes {
                hp = INDESTRUCTIBLE_HP;
                color = DARK;
                score = 0;
            }
        }
        _ => {}
    }

    // Colors by toughness for the early levels
    if hp == INDESTRUCTIBLE_HP && level < 5 {
        color = DARK;
        score = 0;
    } else if hp == 3 && level < 5 {
        color = Rgb::grey(0.4);
    } else if hp == 2 && level < 3 {
        color = Rgb::new(0.8, 0.2, 0.2);
    } else if hp == 1 && level < 3 {
        color = Rgb::new(
            0.2 + 0.13 * r as f32,
            0.4 + 0.05 * c as f32,
            0.8 - 0.08 * r as f32,
        );
    }

    Some((hp, color, score))
}

/// Lay out the bricks for `level` (1 to 5), ids in row-major order
pub fn build_bricks(level: u32) -> Vec<Brick> {
    let bw = brick_width();
    let mut bricks = Vec::new();
    for r in 0..ROWS {
        for c in 0..COLS {
            let Some((hp, color, score)) = cell(level, r, c) else {
                continue;
            };
            bricks.push(Brick {
                id: (r * COLS + c) as u32,
                center: Vec2::new(
                    MARGIN_X + c as f32 * (bw + GAP) + bw / 2.0,
                    SCREEN_H - MARGIN_Y - r as f32 * (BRICK_H + GAP) - BRICK_H / 2.0,
                ),
                size: Vec2::new(bw, BRICK_H),
                alive: true,
                hp,
                color,
                score,
            });
        }
    }
    log::debug!("Level {level}: {} bricks", bricks.len());
    bricks
}
