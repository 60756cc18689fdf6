//! Entity factories
//!
//! Coins and power-ups only appear above the floating platforms so every
//! pickup is reachable. All randomness comes from the state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, GameState, Obstacle, ObstaclePattern, PowerUp, PowerUpKind};
use crate::consts::*;

const PLATFORM_EDGE_INSET: f32 = 20.0;
const COIN_HEIGHT_RANGE: (f32, f32) = (40.0, 80.0);
const POWER_UP_HEIGHT: f32 = 60.0;
const OBSTACLE_EDGE_MARGIN: f32 = 100.0;

/// Pick a floating platform and a point above it: (x, platform top)
fn point_above_platform(state: &mut GameState) -> Option<(f32, f32)> {
    let anchors: Vec<_> = state.spawn_platforms().map(|p| p.rect).collect();
    if anchors.is_empty() {
        return None;
    }
    let rect = anchors[state.rng.random_range(0..anchors.len())];
    let x = rect.min.x
        + state
            .rng
            .random_range(PLATFORM_EDGE_INSET..rect.width() - PLATFORM_EDGE_INSET);
    Some((x, rect.min.y))
}

/// Drop a coin somewhere above a platform
pub fn spawn_coin(state: &mut GameState) {
    let Some((x, top)) = point_above_platform(state) else {
        return;
    };
    let lift = state.rng.random_range(COIN_HEIGHT_RANGE.0..COIN_HEIGHT_RANGE.1);
    let id = state.next_entity_id();
    state.coins.push(Coin {
        id,
        pos: Vec2::new(x, top - lift),
        destroyed: false,
    });
}

/// Place a random power-up above a platform
pub fn spawn_power_up(state: &mut GameState) {
    let kind = if state.rng.random_bool(0.5) {
        PowerUpKind::DoubleJump
    } else {
        PowerUpKind::Shield
    };
    let Some((x, top)) = point_above_platform(state) else {
        return;
    };
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(x, top - POWER_UP_HEIGHT),
        destroyed: false,
    });
    log::debug!("Spawned {:?} power-up at x={:.0}", kind, x);
}

/// Launch an obstacle from the right edge; faster as the score grows
pub fn spawn_obstacle(state: &mut GameState) {
    let speed = state.tuning.obstacle_speed(state.score);
    let pattern = match state.rng.random_range(0..3) {
        0 => ObstaclePattern::Straight,
        1 => ObstaclePattern::Wave,
        _ => ObstaclePattern::Bounce,
    };
    let y = state
        .rng
        .random_range(OBSTACLE_EDGE_MARGIN..WORLD_HEIGHT - OBSTACLE_EDGE_MARGIN);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(WORLD_WIDTH, y),
        start_y: y,
        speed,
        pattern,
        time: 0.0,
        destroyed: false,
    });
}

/// Random delay in seconds drawn from an inclusive-exclusive range
pub fn random_delay(state: &mut GameState, range: (f32, f32)) -> f32 {
    if range.1 > range.0 {
        state.rng.random_range(range.0..range.1)
    } else {
        range.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn fresh() -> GameState {
        GameState::new(4242, 0, Tuning::default())
    }

    #[test]
    fn test_coins_spawn_above_floating_platforms() {
        let mut state = fresh();
        for _ in 0..200 {
            spawn_coin(&mut state);
        }
        for coin in &state.coins {
            let above_some = PLATFORM_LAYOUT.iter().any(|&(x, y, w, _)| {
                coin.pos.x >= x + 20.0
                    && coin.pos.x <= x + w - 20.0
                    && coin.pos.y <= y - 40.0
                    && coin.pos.y >= y - 80.0
            });
            assert!(above_some, "coin at {:?} is not above a platform", coin.pos);
        }
    }

    #[test]
    fn test_power_ups_hover_sixty_above_platform() {
        let mut state = fresh();
        for _ in 0..50 {
            spawn_power_up(&mut state);
        }
        let mut kinds = std::collections::HashSet::new();
        for power_up in &state.power_ups {
            kinds.insert(power_up.kind);
            assert!(
                PLATFORM_LAYOUT
                    .iter()
                    .any(|&(_, y, _, _)| (power_up.pos.y - (y - 60.0)).abs() < 0.001)
            );
        }
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_obstacle_speed_and_spawn_band() {
        let mut state = fresh();
        state.score = 1000;
        for _ in 0..50 {
            spawn_obstacle(&mut state);
        }
        for obstacle in &state.obstacles {
            assert_eq!(obstacle.pos.x, WORLD_WIDTH);
            assert!(obstacle.pos.y >= 100.0 && obstacle.pos.y < 500.0);
            assert!((obstacle.speed - 300.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = fresh();
        let b = fresh();
        let pa: Vec<_> = a.coins.iter().map(|c| c.pos).collect();
        let pb: Vec<_> = b.coins.iter().map(|c| c.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_random_delay_within_range() {
        let mut state = fresh();
        for _ in 0..100 {
            let d = random_delay(&mut state, (1.5, 3.0));
            assert!((1.5..3.0).contains(&d));
        }
        assert_eq!(random_delay(&mut state, (2.0, 2.0)), 2.0);
    }
}
