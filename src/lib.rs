//! Raster Arcade - raster graphics labs, toy physics and two arcade games
//!
//! Core modules:
//! - `raster`: Software canvas and textbook scan-conversion algorithms
//! - `labs`: Lab scenes and their interactive input state machines
//! - `monument`: ASCII-art monument figure
//! - `sim`: Deterministic simulations (falling circles, egg catch, DX-Ball)
//! - `renderer`: Draw lists, tessellation and the WebGPU pipeline
//! - `settings`: User settings
//! - `highscores`: DX-Ball run history

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod highscores;
pub mod labs;
pub mod monument;
pub mod raster;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use highscores::RunHistory;
pub use settings::{QualityPreset, Settings};

/// Frame loop constants
pub mod consts {
    /// Fixed simulation timestep for the games (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the accumulator accepts, in seconds
    pub const MAX_FRAME_TIME: f32 = 0.1;
}
