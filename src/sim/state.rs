//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`, including the spawn timers,
//! so a restart wipes every pending timer along with the entities.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Trigger};
use super::geometry::{Circle, Rect};
use super::spawn;
use crate::consts::*;
use crate::secs_to_ticks;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; world keeps animating, input ignored until restart
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One extra jump while airborne, for the rest of the run
    DoubleJump,
    /// Absorbs the next obstacle hit, expires after a while
    Shield,
}

/// Vertical motion of a scrolling obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstaclePattern {
    Straight,
    Wave,
    Bounce,
}

/// The player-controlled box
#[derive(Debug, Clone)]
pub struct Player {
    /// Centre position
    pub pos: Vec2,
    pub body: Body,
    /// Air jumps still available before touching ground again
    pub jumps_left: u8,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            body: Body::default(),
            jumps_left: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Put the player back at the spawn point, at rest
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
        self.body = Body::default();
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A static solid
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    /// The full-width floor; never used as a spawn anchor
    pub is_ground: bool,
}

/// A coin entity
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub destroyed: bool,
}

impl Trigger for Coin {
    fn id(&self) -> u32 {
        self.id
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn touches(&self, player: &Rect) -> bool {
        Circle::new(self.pos, COIN_RADIUS).overlaps_rect(player)
    }
}

/// A power-up entity
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub destroyed: bool,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(POWER_UP_SIZE))
    }
}

impl Trigger for PowerUp {
    fn id(&self) -> u32 {
        self.id
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn touches(&self, player: &Rect) -> bool {
        self.rect().overlaps(player)
    }
}

/// A scrolling hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Baseline y the pattern oscillates around
    pub start_y: f32,
    /// Leftward speed (px/s), fixed at spawn
    pub speed: f32,
    pub pattern: ObstaclePattern,
    /// Seconds since spawn
    pub time: f32,
    pub destroyed: bool,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(OBSTACLE_SIZE))
    }

    /// Scroll left and apply the vertical pattern
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        self.pos.x -= self.speed * dt;
        self.pos.y = match self.pattern {
            ObstaclePattern::Straight => self.start_y,
            ObstaclePattern::Wave => self.start_y + (self.time * 3.0).sin() * 50.0,
            ObstaclePattern::Bounce => self.start_y + (self.time * 4.0).sin().abs() * 80.0,
        };
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x < OBSTACLE_DESPAWN_X
    }
}

impl Trigger for Obstacle {
    fn id(&self) -> u32 {
        self.id
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn touches(&self, player: &Rect) -> bool {
        self.rect().overlaps(player)
    }
}

/// Transient centre-screen announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    DoubleJump,
    ShieldActive,
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub ttl_ticks: u32,
}

/// Player colour state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTint {
    Normal,
    Shielded,
    Hit,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CoinCollected { points: u64, combo: u32 },
    PowerUpCollected(PowerUpKind),
    /// Shield took an obstacle hit instead of the player
    ShieldAbsorbed,
    ShieldExpired,
    LifeLost { lives: u8 },
    FellOff { lives: u8 },
    ComboExpired,
    Jumped { air: bool },
    Landed,
    /// Hit the underside of a platform
    Bumped,
    HighScoreChanged(u64),
    GameOver { score: u64, new_high_score: bool },
    Restarted,
}

/// Countdowns for the periodic spawners
#[derive(Debug, Clone, Default)]
pub struct SpawnTimers {
    pub obstacle_ticks: u32,
    pub power_up_ticks: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance values
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// Best score across runs (survives restart)
    pub high_score: u64,
    /// Set at game over when this run set the best score
    pub new_high_score: bool,
    pub lives: u8,
    /// Consecutive coins inside the combo window
    pub combo: u32,
    pub combo_ticks: u32,
    pub has_double_jump: bool,
    pub has_shield: bool,
    pub shield_ticks: u32,
    /// Remaining hit-flash time
    pub flash_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Camera shake intensity (pixels), decays every tick
    pub screen_shake: f32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub banners: Vec<Banner>,
    pub timers: SpawnTimers,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            high_score,
            new_high_score: false,
            lives: STARTING_LIVES,
            combo: 0,
            combo_ticks: 0,
            has_double_jump: false,
            has_shield: false,
            shield_ticks: 0,
            flash_ticks: 0,
            time_ticks: 0,
            screen_shake: 0.0,
            player: Player::new(),
            platforms: build_platforms(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            obstacles: Vec::new(),
            banners: Vec::new(),
            timers: SpawnTimers::default(),
            events: Vec::new(),
            next_id: 1,
        };
        state.populate();
        state
    }

    /// Start a fresh run; keeps the high score and tuning
    pub fn restart(&mut self, seed: u64) {
        let high_score = self.high_score;
        let tuning = self.tuning.clone();
        *self = Self::new(seed, high_score, tuning);
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted with seed {}", seed);
    }

    /// Initial coins and spawn timers
    fn populate(&mut self) {
        for _ in 0..INITIAL_COINS {
            spawn::spawn_coin(self);
        }
        self.timers.obstacle_ticks = secs_to_ticks(self.tuning.first_obstacle_delay);
        self.timers.power_up_ticks = secs_to_ticks(self.tuning.first_power_up_delay);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player_rect(&self) -> Rect {
        self.player.rect()
    }

    /// Solids the player collides with
    pub fn solids(&self) -> Vec<Rect> {
        self.platforms.iter().map(|p| p.rect).collect()
    }

    /// Platforms pickups may spawn above
    pub fn spawn_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| !p.is_ground)
    }

    pub fn player_tint(&self) -> PlayerTint {
        if self.flash_ticks > 0 {
            PlayerTint::Hit
        } else if self.has_shield {
            PlayerTint::Shielded
        } else {
            PlayerTint::Normal
        }
    }

    /// Air jumps granted each time the player leaves the ground
    pub fn air_jumps(&self) -> u8 {
        if self.has_double_jump { 2 } else { 0 }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add to the current screen shake
    pub fn shake(&mut self, amount: f32) {
        self.screen_shake += amount;
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove every entity marked destroyed during this tick
    pub fn sweep_destroyed(&mut self) {
        self.coins.retain(|c| !c.destroyed);
        self.power_ups.retain(|p| !p.destroyed);
        self.obstacles.retain(|o| !o.destroyed);
    }
}

/// Ground plus the floating platforms
fn build_platforms() -> Vec<Platform> {
    let mut platforms = vec![Platform {
        rect: Rect::from_top_left(
            0.0,
            WORLD_HEIGHT - GROUND_HEIGHT,
            WORLD_WIDTH,
            GROUND_HEIGHT,
        ),
        is_ground: true,
    }];
    platforms.extend(PLATFORM_LAYOUT.iter().map(|&(x, y, w, h)| Platform {
        rect: Rect::from_top_left(x, y, w, h),
        is_ground: false,
    }));
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_scene() {
        let state = GameState::new(7, 0, Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.platforms.len(), 5);
        assert_eq!(state.platforms.iter().filter(|p| p.is_ground).count(), 1);
        assert_eq!(state.coins.len(), INITIAL_COINS);
        assert!(state.power_ups.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.timers.obstacle_ticks, 360);
        assert_eq!(state.timers.power_up_ticks, 960);
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let state = GameState::new(7, 0, Tuning::default());
        let mut ids: Vec<u32> = state.coins.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), INITIAL_COINS);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut state = GameState::new(7, 120, Tuning::default());
        state.score = 300;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.has_shield = true;
        state.timers.obstacle_ticks = 1;

        state.restart(8);

        assert_eq!(state.high_score, 120);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.has_shield);
        assert_eq!(state.timers.obstacle_ticks, 360);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_player_tint_priority() {
        let mut state = GameState::new(7, 0, Tuning::default());
        assert_eq!(state.player_tint(), PlayerTint::Normal);
        state.has_shield = true;
        assert_eq!(state.player_tint(), PlayerTint::Shielded);
        state.flash_ticks = 5;
        assert_eq!(state.player_tint(), PlayerTint::Hit);
    }

    #[test]
    fn test_obstacle_patterns() {
        let mut obstacle = Obstacle {
            id: 1,
            pos: Vec2::new(800.0, 300.0),
            start_y: 300.0,
            speed: 200.0,
            pattern: ObstaclePattern::Bounce,
            time: 0.0,
            destroyed: false,
        };
        for _ in 0..120 {
            obstacle.advance(1.0 / 120.0);
            assert!(obstacle.pos.y >= 300.0 && obstacle.pos.y <= 380.0);
        }
        assert!((obstacle.pos.x - 600.0).abs() < 0.01);

        obstacle.pattern = ObstaclePattern::Wave;
        obstacle.advance(0.0);
        assert!((obstacle.pos.y - (300.0 + (obstacle.time * 3.0).sin() * 50.0)).abs() < 0.001);
    }

    #[test]
    fn test_sweep_removes_only_destroyed() {
        let mut state = GameState::new(7, 0, Tuning::default());
        state.coins[0].destroyed = true;
        let kept = state.coins[1].id;
        state.sweep_destroyed();
        assert_eq!(state.coins.len(), INITIAL_COINS - 1);
        assert!(state.coins.iter().any(|c| c.id == kept));
    }
}
