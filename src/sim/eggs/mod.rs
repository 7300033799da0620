//! Catch the Eggs: a chicken walks a crossbar dropping eggs and bombs into
//! the player's basket

pub mod state;
pub mod tick;

pub use state::{
    Basket, Chicken, EggKind, EggScreen, EggState, FallingObject, GameOverReason, MenuItem,
};
pub use tick::{TickInput, tick};
