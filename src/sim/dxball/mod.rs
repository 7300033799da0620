//! DX-Ball: a Breakout clone with five hand-shaped levels, falling perks and
//! a shooting paddle

pub mod levels;
pub mod state;
pub mod tick;

pub use levels::{build_bricks, level_info};
pub use state::{
    Ball, Brick, Bullet, DxState, MAX_LEVELS, MenuEntry, Paddle, Perk, PerkKind, SCREEN_H,
    SCREEN_W, Screen, SoundCue,
};
pub use tick::{TickInput, tick};
