//! Data-driven game balance
//!
//! Every number the rules depend on lives here so a JSON file can reshape the
//! game without touching the simulation. Defaults reproduce the shipped feel.

use serde::{Deserialize, Serialize};

/// Largest accepted base coin value
pub const MAX_COIN_POINTS: u64 = 1_000_000;

/// Reasons a tuning table can be rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be at most {max} (got {value})")]
    TooLarge {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} range is inverted ({min} > {max})")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

/// Balance values for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Horizontal walk speed (px/s)
    pub move_speed: f32,
    /// Upward velocity applied by a jump (px/s)
    pub jump_force: f32,

    /// Combo expires this long after the last coin (s)
    pub combo_window: f32,
    /// Points per coin before the combo multiplier
    pub coin_points: u64,
    /// Highest combo multiplier
    pub max_multiplier: u32,

    /// Obstacle speed at score 0 (px/s)
    pub obstacle_base_speed: f32,
    /// Extra obstacle speed per point of score
    pub obstacle_speed_per_point: f32,
    /// Delay before the first obstacle (s)
    pub first_obstacle_delay: f32,
    /// Random delay between obstacles (s)
    pub obstacle_interval: (f32, f32),

    /// Delay before the first power-up (s)
    pub first_power_up_delay: f32,
    /// Random delay between power-ups (s)
    pub power_up_interval: (f32, f32),

    /// How long a shield lasts (s)
    pub shield_duration: f32,
    /// How long the player flashes after a hit (s)
    pub hit_flash_duration: f32,
    /// How long a pickup banner stays up (s)
    pub banner_duration: f32,

    /// Screen shake strengths
    pub coin_shake: f32,
    pub power_up_shake: f32,
    pub hit_shake: f32,
    /// Exponential decay rate of screen shake (1/s)
    pub shake_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1600.0,
            move_speed: 300.0,
            jump_force: 600.0,

            combo_window: 3.0,
            coin_points: 10,
            max_multiplier: 10,

            obstacle_base_speed: 200.0,
            obstacle_speed_per_point: 0.1,
            first_obstacle_delay: 3.0,
            obstacle_interval: (1.5, 3.0),

            first_power_up_delay: 8.0,
            power_up_interval: (10.0, 15.0),

            shield_duration: 10.0,
            hit_flash_duration: 0.2,
            banner_duration: 2.0,

            coin_shake: 2.0,
            power_up_shake: 4.0,
            hit_shake: 10.0,
            shake_decay: 5.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table; missing keys keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("jump_force", self.jump_force),
            ("combo_window", self.combo_window),
            ("obstacle_base_speed", self.obstacle_base_speed),
            ("shield_duration", self.shield_duration),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.max_multiplier == 0 {
            return Err(TuningError::NotPositive {
                field: "max_multiplier",
                value: 0.0,
            });
        }

        if self.coin_points > MAX_COIN_POINTS {
            return Err(TuningError::TooLarge {
                field: "coin_points",
                value: self.coin_points,
                max: MAX_COIN_POINTS,
            });
        }

        // Obstacles must keep moving left to ever despawn
        let speed_step = self.obstacle_speed_per_point;
        if speed_step < 0.0 || !speed_step.is_finite() {
            return Err(TuningError::Negative {
                field: "obstacle_speed_per_point",
                value: speed_step,
            });
        }

        let ranges = [
            ("obstacle_interval", self.obstacle_interval),
            ("power_up_interval", self.power_up_interval),
        ];
        for (field, (min, max)) in ranges {
            if min <= 0.0 {
                return Err(TuningError::NotPositive { field, value: min });
            }
            if min > max {
                return Err(TuningError::InvertedRange { field, min, max });
            }
        }

        Ok(())
    }

    /// Points for a coin picked up at the given combo count
    pub fn coin_score(&self, combo: u32) -> u64 {
        self.coin_points
            .saturating_mul(u64::from(combo.clamp(1, self.max_multiplier)))
    }

    /// Obstacle speed for the current score
    pub fn obstacle_speed(&self, score: u64) -> f32 {
        self.obstacle_base_speed + score as f32 * self.obstacle_speed_per_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_coin_score_caps_multiplier() {
        let tuning = Tuning::default();
        assert_eq!(tuning.coin_score(1), 10);
        assert_eq!(tuning.coin_score(4), 40);
        assert_eq!(tuning.coin_score(10), 100);
        assert_eq!(tuning.coin_score(25), 100);
    }

    #[test]
    fn test_obstacle_speed_scales_with_score() {
        let tuning = Tuning::default();
        assert_eq!(tuning.obstacle_speed(0), 200.0);
        assert!((tuning.obstacle_speed(500) - 250.0).abs() < 0.001);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1200.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 1200.0);
        assert_eq!(tuning.jump_force, 600.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "gravity": 0.0 }"#),
            Err(TuningError::NotPositive { field: "gravity", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "obstacle_interval": [3.0, 1.0] }"#),
            Err(TuningError::InvertedRange { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "coin_points": 18446744073709551615 }"#),
            Err(TuningError::TooLarge { field: "coin_points", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "obstacle_speed_per_point": -0.5 }"#),
            Err(TuningError::Negative { .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_coin_score_saturates() {
        let tuning = Tuning {
            coin_points: u64::MAX,
            ..Default::default()
        };
        assert_eq!(tuning.coin_score(2), u64::MAX);
    }
}
