//! Deterministic simulations
//!
//! All gameplay logic lives here. Every simulation must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dxball;
pub mod eggs;
pub mod falling;

pub use collision::{CollisionResult, circle_aabb};
pub use falling::{DropDemo, FallingCircle, StackDemo};
