//! Headless autopilot runs
//!
//! Drives the simulation without a window, the way the native binary and
//! the tests exercise whole games.

use crate::consts::SIM_DT;
use crate::highscores::HighScore;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ticks_to_secs;

/// What happened during a demo run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoSummary {
    pub seconds: f32,
    pub coins: u32,
    pub power_ups: u32,
    pub hits: u32,
    pub falls: u32,
    pub shields_used: u32,
    pub games: u32,
    pub best: u64,
    /// Score of the run still in progress when time ran out
    pub final_score: u64,
}

impl std::fmt::Display for DemoSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0}s simulated | games {} | best {} | last score {} | coins {} | power-ups {} | hits {} (shielded {}) | falls {}",
            self.seconds,
            self.games,
            self.best,
            self.final_score,
            self.coins,
            self.power_ups,
            self.hits,
            self.shields_used,
            self.falls
        )
    }
}

/// Let the autopilot play for `seconds`, restarting after every game over
pub fn run(seed: u64, seconds: f32, tuning: Tuning, high_score: &mut HighScore) -> DemoSummary {
    let mut state = GameState::new(seed, high_score.best, tuning);
    let mut summary = DemoSummary {
        games: 1,
        ..Default::default()
    };
    let total_ticks = (seconds / SIM_DT).round() as u32;
    let mut restart_pending = false;

    for _ in 0..total_ticks {
        let input = TickInput {
            autopilot: true,
            restart: restart_pending,
            ..Default::default()
        };
        restart_pending = false;
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::CoinCollected { .. } => summary.coins += 1,
                GameEvent::PowerUpCollected(_) => summary.power_ups += 1,
                GameEvent::LifeLost { .. } => summary.hits += 1,
                GameEvent::ShieldAbsorbed => {
                    summary.hits += 1;
                    summary.shields_used += 1;
                }
                GameEvent::FellOff { .. } => summary.falls += 1,
                GameEvent::HighScoreChanged(best) => {
                    if high_score.record(best) {
                        high_score.save();
                    }
                }
                GameEvent::GameOver { .. } => restart_pending = true,
                GameEvent::Restarted => summary.games += 1,
                _ => {}
            }
        }
    }

    summary.seconds = ticks_to_secs(total_ticks);
    summary.best = high_score.best;
    summary.final_score = state.score;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_is_reproducible() {
        let a = run(42, 20.0, Tuning::default(), &mut HighScore::default());
        let b = run(42, 20.0, Tuning::default(), &mut HighScore::default());
        assert_eq!(a, b);
        assert!((a.seconds - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_demo_tracks_best_score() {
        let mut high = HighScore::new(5);
        let summary = run(7, 30.0, Tuning::default(), &mut high);
        assert!(summary.games >= 1);
        assert_eq!(summary.best, high.best);
        assert!(high.best >= 5);
    }
}
