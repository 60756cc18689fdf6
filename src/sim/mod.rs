//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Body, StepReport, Trigger, overlapping, step_body};
pub use geometry::{Circle, Rect};
pub use state::{
    Banner, BannerKind, Coin, GameEvent, GamePhase, GameState, Obstacle, ObstaclePattern,
    Platform, Player, PlayerTint, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
