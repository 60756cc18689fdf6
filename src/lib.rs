//! Prisci - a small browser platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, platforms, pickups, game rules)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD text and overlay visibility derived from game state
//! - `demo`: Headless autopilot runs

pub mod demo;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (canvas pixels, y grows downward)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player box (centre-anchored)
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 100.0;

    /// Ground strip along the bottom edge
    pub const GROUND_HEIGHT: f32 = 40.0;

    /// Pickups and hazards
    pub const COIN_RADIUS: f32 = 10.0;
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const OBSTACLE_SIZE: f32 = 30.0;
    pub const OUTLINE_WIDTH: f32 = 2.0;

    /// Obstacles are removed once they scroll past this x
    pub const OBSTACLE_DESPAWN_X: f32 = -50.0;
    /// Player loses a life below WORLD_HEIGHT + this margin
    pub const FALL_MARGIN: f32 = 50.0;

    pub const STARTING_LIVES: u8 = 3;
    pub const INITIAL_COINS: usize = 6;

    /// Floating platforms as (x, y, w, h), top-left anchored
    pub const PLATFORM_LAYOUT: [(f32, f32, f32, f32); 4] = [
        (150.0, 450.0, 200.0, 20.0),
        (450.0, 350.0, 150.0, 20.0),
        (100.0, 250.0, 180.0, 20.0),
        (500.0, 200.0, 200.0, 20.0),
    ];
}

/// Canvas backing-store size; pixel density is fixed at 1 on every display
pub fn canvas_size() -> (u32, u32) {
    (consts::WORLD_WIDTH as u32, consts::WORLD_HEIGHT as u32)
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs / consts::SIM_DT).round().max(0.0) as u32
}

/// Convert simulation ticks back to seconds
#[inline]
pub fn ticks_to_secs(ticks: u32) -> f32 {
    ticks as f32 * consts::SIM_DT
}
