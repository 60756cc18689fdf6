//! HUD text model
//!
//! Builds the strings shown in the DOM overlay from the game state. The
//! host only copies these into elements, so everything here is testable.

use crate::sim::{BannerKind, GameState};

pub const INSTRUCTIONS: &str =
    "WASD/Arrows: Move & Jump | Collect coins! Avoid red! Get powerups!";

pub fn banner_text(kind: BannerKind) -> &'static str {
    match kind {
        BannerKind::DoubleJump => "Double Jump!",
        BannerKind::ShieldActive => "Shield Active!",
    }
}

/// End-of-run panel
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverPanel {
    pub title: &'static str,
    pub final_score: String,
    pub new_high_score: Option<&'static str>,
    pub prompt: &'static str,
}

/// Everything the overlay displays for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: String,
    pub best: String,
    /// Empty unless a combo of two or more is running
    pub combo: String,
    pub lives: String,
    pub banners: Vec<&'static str>,
    pub game_over: Option<GameOverPanel>,
    pub show_restart: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let combo = if state.combo > 1 {
            format!("Combo x{}!", state.combo)
        } else {
            String::new()
        };

        let game_over = state.is_game_over().then(|| GameOverPanel {
            title: "GAME OVER!",
            final_score: format!("Final Score: {}", state.score),
            new_high_score: state.new_high_score.then_some("NEW HIGH SCORE!"),
            prompt: "Press R to restart",
        });

        Self {
            score: format!("Score: {}", state.score),
            best: format!("Best: {}", state.high_score),
            combo,
            lives: format!("Lives: {}", state.lives),
            banners: state.banners.iter().map(|b| banner_text(b.kind)).collect(),
            show_restart: game_over.is_some(),
            game_over,
        }
    }
}

/// Smoothed frames-per-second readout
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f64,
    fps: f64,
}

impl FpsCounter {
    /// Feed one frame's duration in seconds
    pub fn frame(&mut self, dt: f64) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 0.5 {
            self.fps = self.frames as f64 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn text(&self) -> String {
        format!("FPS: {:.0}", self.fps)
    }
}
