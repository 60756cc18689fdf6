//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use rand::Rng;

use super::collision::{overlapping, step_body};
use super::spawn::{random_delay, spawn_coin, spawn_obstacle, spawn_power_up};
use super::state::{Banner, BannerKind, GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::*;
use crate::secs_to_ticks;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Walk left (held)
    pub left: bool,
    /// Walk right (held)
    pub right: bool,
    /// Jump (one-shot)
    pub jump: bool,
    /// Restart after game over (one-shot)
    pub restart: bool,
    /// Demo mode - autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart && state.is_game_over() {
        let seed = state.rng.random::<u64>();
        state.restart(seed);
        return;
    }

    state.time_ticks += 1;

    // Decay screen shake
    state.screen_shake -= state.screen_shake * (state.tuning.shake_decay * dt).min(1.0);
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    let mut input = input.clone();
    if input.autopilot && !state.is_game_over() {
        autopilot(state, &mut input);
    }
    let input = &input;
    let playing = state.phase == GamePhase::Playing;

    // Jump before integrating so the impulse applies this step
    if playing && input.jump {
        try_jump(state);
    }

    // Walk
    let mut walk = 0.0;
    if playing {
        if input.left {
            walk -= state.tuning.move_speed;
        }
        if input.right {
            walk += state.tuning.move_speed;
        }
    }

    // Gravity + platform resolution
    let solids = state.solids();
    let report = step_body(
        &mut state.player.pos,
        Vec2::splat(PLAYER_SIZE),
        &mut state.player.body,
        walk * dt,
        state.tuning.gravity,
        dt,
        &solids,
    );
    if report.landed {
        state.events.push(GameEvent::Landed);
    }
    if report.bumped {
        state.events.push(GameEvent::Bumped);
    }
    if state.player.body.grounded {
        state.player.jumps_left = state.air_jumps();
    }

    // Keep inside the playfield horizontally
    state.player.pos.x = state.player.pos.x.clamp(0.0, WORLD_WIDTH);

    // Fell below the world
    if state.player.pos.y > WORLD_HEIGHT + FALL_MARGIN {
        state.player.respawn();
        if playing {
            lose_life(state);
            state
                .events
                .push(GameEvent::FellOff { lives: state.lives });
            if state.lives == 0 {
                game_over(state);
            }
        }
    }

    // Obstacles keep scrolling even after game over
    for obstacle in &mut state.obstacles {
        obstacle.advance(dt);
        if obstacle.is_offscreen() {
            obstacle.destroyed = true;
        }
    }

    if state.phase == GamePhase::Playing {
        run_spawners(state);
        resolve_pickups(state);
        resolve_hazards(state);
        tick_combo(state);
    }

    tick_effects(state);

    // Deferred destroy: collided entities leave the world only at end of tick
    state.sweep_destroyed();
}

/// Ground jump, or an air jump when double jump is owned
fn try_jump(state: &mut GameState) {
    let force = state.tuning.jump_force;
    let player = &mut state.player;
    if player.body.grounded {
        player.body.jump(force);
        player.jumps_left = if state.has_double_jump { 2 } else { 0 };
        state.events.push(GameEvent::Jumped { air: false });
    } else if state.has_double_jump && player.jumps_left > 0 {
        player.body.jump(force);
        player.jumps_left -= 1;
        state.events.push(GameEvent::Jumped { air: true });
    }
}

/// Count down the periodic spawners and fire the ones that are due
fn run_spawners(state: &mut GameState) {
    if state.timers.obstacle_ticks > 0 {
        state.timers.obstacle_ticks -= 1;
    }
    if state.timers.obstacle_ticks == 0 {
        spawn_obstacle(state);
        let range = state.tuning.obstacle_interval;
        let delay = random_delay(state, range);
        state.timers.obstacle_ticks = secs_to_ticks(delay).max(1);
    }

    if state.timers.power_up_ticks > 0 {
        state.timers.power_up_ticks -= 1;
    }
    if state.timers.power_up_ticks == 0 {
        spawn_power_up(state);
        let range = state.tuning.power_up_interval;
        let delay = random_delay(state, range);
        state.timers.power_up_ticks = secs_to_ticks(delay).max(1);
    }
}

/// Coins then power-ups touching the player
fn resolve_pickups(state: &mut GameState) {
    let player = state.player_rect();

    for id in overlapping(&player, &state.coins) {
        collect_coin(state, id);
    }

    for id in overlapping(&player, &state.power_ups) {
        let Some(power_up) = state.power_ups.iter_mut().find(|p| p.id == id) else {
            continue;
        };
        power_up.destroyed = true;
        let kind = power_up.kind;
        collect_power_up(state, kind);
    }
}

fn collect_coin(state: &mut GameState, id: u32) {
    let Some(coin) = state.coins.iter_mut().find(|c| c.id == id) else {
        return;
    };
    coin.destroyed = true;

    state.combo += 1;
    state.combo_ticks = secs_to_ticks(state.tuning.combo_window);
    let points = state.tuning.coin_score(state.combo);
    state.score = state.score.saturating_add(points);
    state.shake(state.tuning.coin_shake);
    state.events.push(GameEvent::CoinCollected {
        points,
        combo: state.combo,
    });

    spawn_coin(state);
}

fn collect_power_up(state: &mut GameState, kind: PowerUpKind) {
    state.shake(state.tuning.power_up_shake);
    match kind {
        PowerUpKind::DoubleJump => {
            state.has_double_jump = true;
            state.player.jumps_left = state.air_jumps();
            show_banner(state, BannerKind::DoubleJump);
        }
        PowerUpKind::Shield => {
            state.has_shield = true;
            state.shield_ticks = secs_to_ticks(state.tuning.shield_duration);
            show_banner(state, BannerKind::ShieldActive);
        }
    }
    state.events.push(GameEvent::PowerUpCollected(kind));
    log::debug!("Collected {:?}", kind);
}

/// Show a banner, restarting its lifetime if it is already up
fn show_banner(state: &mut GameState, kind: BannerKind) {
    let ttl_ticks = secs_to_ticks(state.tuning.banner_duration);
    match state.banners.iter_mut().find(|b| b.kind == kind) {
        Some(banner) => banner.ttl_ticks = ttl_ticks,
        None => state.banners.push(Banner { kind, ttl_ticks }),
    }
}

/// Obstacles touching the player
fn resolve_hazards(state: &mut GameState) {
    let player = state.player_rect();
    for id in overlapping(&player, &state.obstacles) {
        // A hit earlier in this loop may have ended the run
        if state.is_game_over() {
            break;
        }
        let Some(obstacle) = state.obstacles.iter_mut().find(|o| o.id == id) else {
            continue;
        };
        obstacle.destroyed = true;
        state.shake(state.tuning.hit_shake);

        if state.has_shield {
            state.has_shield = false;
            state.shield_ticks = 0;
            state.events.push(GameEvent::ShieldAbsorbed);
            continue;
        }

        lose_life(state);
        state.events.push(GameEvent::LifeLost { lives: state.lives });
        if state.lives == 0 {
            game_over(state);
        } else {
            state.flash_ticks = secs_to_ticks(state.tuning.hit_flash_duration);
        }
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.combo = 0;
    state.combo_ticks = 0;
}

/// End the run and settle the high score
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    if state.score > state.high_score {
        state.high_score = state.score;
        state
            .events
            .push(GameEvent::HighScoreChanged(state.high_score));
    }
    // Tying the best still shows the banner
    state.new_high_score = state.score > 0 && state.score == state.high_score;
    state.events.push(GameEvent::GameOver {
        score: state.score,
        new_high_score: state.new_high_score,
    });
    log::info!(
        "Game over: score {} (best {})",
        state.score,
        state.high_score
    );
}

/// Combo window only runs while playing
fn tick_combo(state: &mut GameState) {
    if state.combo_ticks > 0 {
        state.combo_ticks -= 1;
        if state.combo_ticks == 0 && state.combo > 0 {
            state.combo = 0;
            state.events.push(GameEvent::ComboExpired);
        }
    }
}

/// Shield, hit flash and banner lifetimes
fn tick_effects(state: &mut GameState) {
    if state.shield_ticks > 0 {
        state.shield_ticks -= 1;
        if state.shield_ticks == 0 && state.has_shield {
            state.has_shield = false;
            state.events.push(GameEvent::ShieldExpired);
        }
    }

    state.flash_ticks = state.flash_ticks.saturating_sub(1);

    for banner in &mut state.banners {
        banner.ttl_ticks = banner.ttl_ticks.saturating_sub(1);
    }
    state.banners.retain(|b| b.ttl_ticks > 0);
}

/// Demo mode: chase the nearest coin, hop over incoming obstacles
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player = state.player.pos;
    let grounded = state.player.body.grounded;

    input.left = false;
    input.right = false;
    input.jump = false;

    let target = state
        .coins
        .iter()
        .filter(|c| !c.destroyed)
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|c| c.pos);

    if let Some(target) = target {
        let dx = target.x - player.x;
        let above = player.y - target.y;
        let half = PLAYER_SIZE / 2.0;

        // A platform between us and the coin: walk out from under it first
        let roof = state.platforms.iter().map(|p| p.rect).find(|r| {
            above > 30.0
                && r.max().y <= player.y - half
                && r.min.y > target.y
                && player.x + half > r.min.x
                && player.x - half < r.max().x
        });
        if let Some(roof) = roof {
            if player.x - roof.min.x < roof.max().x - player.x {
                input.left = true;
            } else {
                input.right = true;
            }
            return;
        }

        if dx > 8.0 {
            input.right = true;
        } else if dx < -8.0 {
            input.left = true;
        }

        if above > 30.0 && dx.abs() < 120.0 {
            if grounded {
                input.jump = true;
            } else if state.player.body.vel.y > 0.0 && state.player.jumps_left > 0 {
                // Falling short of the coin: spend the air jump
                input.jump = true;
            }
        }
    }

    // Obstacle closing in at body height
    let threatened = state.obstacles.iter().any(|o| {
        let ahead = o.pos.x - player.x;
        ahead > 0.0 && ahead < 120.0 && (o.pos.y - player.y).abs() < OBSTACLE_SIZE
    });
    if threatened && grounded {
        input.jump = true;
    }
}
