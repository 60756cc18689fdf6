//! Scene assembly
//!
//! Turns a `GameState` into one triangle list in world coordinates. Draw
//! order is back to front: platforms, pickups, obstacles, player.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{COIN_RADIUS, OUTLINE_WIDTH};
use crate::settings::Settings;
use crate::sim::{GameState, PlayerTint, PowerUpKind};

const COIN_SEGMENTS: u32 = 20;

/// Camera jitter for the current shake intensity
pub fn shake_offset(intensity: f32, time: f64) -> Vec2 {
    if intensity <= 0.0 {
        return Vec2::ZERO;
    }
    // Cheap deterministic noise; only has to look random frame to frame
    let t = (time % 10_000.0) as f32;
    Vec2::new((t * 71.3).sin(), (t * 53.7).cos()) * intensity
}

fn player_color(state: &GameState, settings: &Settings) -> [f32; 4] {
    match state.player_tint() {
        PlayerTint::Hit if settings.effective_hit_flash() => colors::PLAYER_HIT,
        _ if state.has_shield => colors::PLAYER_SHIELDED,
        _ => colors::PLAYER,
    }
}

/// Build the frame's vertices; `time` is in seconds
pub fn build_scene(state: &GameState, settings: &Settings, time: f64) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    for platform in &state.platforms {
        let color = if platform.is_ground {
            colors::GROUND
        } else {
            colors::PLATFORM
        };
        vertices.extend(shapes::rect(&platform.rect, color));
    }

    for coin in state.coins.iter().filter(|c| !c.destroyed) {
        vertices.extend(shapes::circle(coin.pos, COIN_RADIUS, colors::COIN, COIN_SEGMENTS));
        vertices.extend(shapes::ring(
            coin.pos,
            COIN_RADIUS,
            COIN_RADIUS + OUTLINE_WIDTH,
            colors::COIN_OUTLINE,
            COIN_SEGMENTS,
        ));
    }

    for power_up in state.power_ups.iter().filter(|p| !p.destroyed) {
        let color = match power_up.kind {
            PowerUpKind::DoubleJump => colors::POWER_UP_DOUBLE_JUMP,
            PowerUpKind::Shield => colors::POWER_UP_SHIELD,
        };
        let rect = power_up.rect();
        vertices.extend(shapes::rect(&rect, color));
        vertices.extend(shapes::rect_outline(
            &rect,
            OUTLINE_WIDTH,
            colors::POWER_UP_OUTLINE,
        ));
    }

    for obstacle in state.obstacles.iter().filter(|o| !o.destroyed) {
        vertices.extend(shapes::rect(&obstacle.rect(), colors::OBSTACLE));
    }

    vertices.extend(shapes::rect(
        &state.player_rect(),
        player_color(state, settings),
    ));

    if settings.effective_screen_shake() {
        let offset = shake_offset(state.screen_shake, time);
        if offset != Vec2::ZERO {
            for v in &mut vertices {
                v.position[0] += offset.x;
                v.position[1] += offset.y;
            }
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rect;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(3, 0, Tuning::default())
    }

    fn last_color(vertices: &[Vertex]) -> [f32; 4] {
        vertices.last().map(|v| v.color).unwrap_or_default()
    }

    #[test]
    fn test_scene_contains_every_entity() {
        let state = state();
        let verts = build_scene(&state, &Settings::default(), 0.0);
        let per_coin = (COIN_SEGMENTS * 3 + COIN_SEGMENTS * 6) as usize;
        // 5 platforms + player, 6 coins
        assert_eq!(verts.len(), 6 * 6 + state.coins.len() * per_coin);
    }

    #[test]
    fn test_player_drawn_last_with_tint() {
        let mut state = state();
        let settings = Settings::default();
        assert_eq!(last_color(&build_scene(&state, &settings, 0.0)), colors::PLAYER);

        state.has_shield = true;
        assert_eq!(
            last_color(&build_scene(&state, &settings, 0.0)),
            colors::PLAYER_SHIELDED
        );

        state.flash_ticks = 10;
        assert_eq!(
            last_color(&build_scene(&state, &settings, 0.0)),
            colors::PLAYER_HIT
        );
    }

    #[test]
    fn test_reduced_motion_skips_flash_and_shake() {
        let mut state = state();
        state.flash_ticks = 10;
        state.screen_shake = 10.0;
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let verts = build_scene(&state, &settings, 1.234);
        assert_eq!(last_color(&verts), colors::PLAYER);

        // Ground quad sits exactly where the world says
        let ground: &Rect = &state.platforms[0].rect;
        assert_eq!(verts[0].position, [ground.min.x, ground.min.y]);
    }

    #[test]
    fn test_shake_moves_everything_together() {
        let mut state = state();
        state.screen_shake = 10.0;
        let shaken = build_scene(&state, &Settings::default(), 1.234);
        state.screen_shake = 0.0;
        let still = build_scene(&state, &Settings::default(), 1.234);

        let offset = Vec2::from(shaken[0].position) - Vec2::from(still[0].position);
        assert!(offset.length() > 0.0);
        assert!(offset.x.abs() <= 10.0 && offset.y.abs() <= 10.0);
        for (a, b) in shaken.iter().zip(&still) {
            let d = Vec2::from(a.position) - Vec2::from(b.position);
            assert!((d - offset).length() < 0.001);
        }
    }

    #[test]
    fn test_no_shake_offset_at_rest() {
        assert_eq!(shake_offset(0.0, 5.0), Vec2::ZERO);
    }
}
