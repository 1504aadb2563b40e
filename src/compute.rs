/// Game-logic functions.
///
/// Every public state transition takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and log events.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Obstacle, ObstacleColor, Player};
use crate::input::{Command, InputSnapshot};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state a game starts in.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        config,
        running: true,
        status: GameStatus::Active,
        player: Player::spawn(&config),
        obstacles: Vec::new(),
        score: 0,
        spawn_timer: 0,
        difficulty: 1.0,
        obstacle_speed: obstacle_speed(1.0, config.base_speed),
        frame: 0,
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// A new obstacle just above the road, at a uniformly random column that
/// keeps the whole car on screen.
pub fn spawn_obstacle(config: &GameConfig, rng: &mut impl Rng) -> Obstacle {
    let max_x = (config.world_width - config.obstacle_width).max(0);
    let x = rng.gen_range(0..=max_x);
    let color = *ObstacleColor::PALETTE
        .choose(rng)
        .unwrap_or(&ObstacleColor::Gray);
    Obstacle {
        x,
        y: -config.obstacle_height,
        width: config.obstacle_width,
        height: config.obstacle_height,
        color,
    }
}

// ── Collision detector ───────────────────────────────────────────────────────

/// True if the player's car overlaps any obstacle with positive area.
pub fn check_collision(player: &Player, obstacles: &[Obstacle]) -> bool {
    let bounds = player.bounds();
    obstacles.iter().any(|o| bounds.intersects(&o.bounds()))
}

// ── Difficulty controller ────────────────────────────────────────────────────

/// One active frame's worth of difficulty growth.
pub fn advance_difficulty(multiplier: f64, config: &GameConfig) -> f64 {
    let next = multiplier + config.difficulty_increment;
    match config.max_multiplier {
        Some(cap) => next.min(cap).max(multiplier),
        None => next,
    }
}

/// `floor(base_speed * multiplier)`. Saturates at `i32::MAX` for absurdly
/// long sessions instead of wrapping.
pub fn obstacle_speed(multiplier: f64, base_speed: i32) -> i32 {
    (f64::from(base_speed) * multiplier).floor() as i32
}

// ── Obstacle lifecycle ───────────────────────────────────────────────────────

/// Advance every obstacle by `speed`, then drop the ones that left the road.
///
/// Contract: each obstacle is advanced exactly once, and the survivors are
/// rebuilt into a new sequence in their original order, so no element is
/// skipped or visited twice however many leave in the same frame.
/// Returns the survivors and the number removed.
pub fn advance_and_cull(obstacles: &[Obstacle], speed: i32, world_height: i32) -> (Vec<Obstacle>, u32) {
    let mut passed = 0;
    let survivors = obstacles
        .iter()
        .filter_map(|o| {
            let mut moved = o.clone();
            moved.advance(speed);
            if moved.is_off_screen(world_height) {
                passed += 1;
                None
            } else {
                Some(moved)
            }
        })
        .collect();
    (survivors, passed)
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A game that is over, or has been quit, is returned unchanged.
pub fn tick(state: &GameState, input: &InputSnapshot, rng: &mut impl Rng) -> GameState {
    if !state.running || state.status != GameStatus::Active {
        return state.clone();
    }
    let config = &state.config;

    // ── 1. Player ────────────────────────────────────────────────────────────
    let mut player = state.player.clone();
    player.move_by(input, config.world_width, config.world_height);

    // ── 2. Spawn timer ───────────────────────────────────────────────────────
    let mut obstacles = state.obstacles.clone();
    let mut spawn_timer = state.spawn_timer + 1;
    if spawn_timer >= config.spawn_rate {
        let obstacle = spawn_obstacle(config, rng);
        debug!(x = obstacle.x, color = ?obstacle.color, "spawned obstacle");
        obstacles.push(obstacle);
        spawn_timer = 0;
    }

    // ── 3. Move and cull ─────────────────────────────────────────────────────
    let (obstacles, passed) = advance_and_cull(&obstacles, state.obstacle_speed, config.world_height);
    let score = state
        .score
        .saturating_add(passed.saturating_mul(config.obstacle_reward));

    // ── 4. Collision ─────────────────────────────────────────────────────────
    let frame = state.frame + 1;
    let status = if check_collision(&player, &obstacles) {
        info!(score, frame, "game over");
        GameStatus::GameOver
    } else {
        GameStatus::Active
    };

    // ── 5. Difficulty ────────────────────────────────────────────────────────
    let difficulty = advance_difficulty(state.difficulty, config);

    GameState {
        player,
        obstacles,
        score,
        spawn_timer,
        difficulty,
        obstacle_speed: obstacle_speed(difficulty, config.base_speed),
        status,
        frame,
        ..state.clone()
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

/// Start over from the initial state. Only a finished game can be restarted;
/// in any other state this returns an unchanged copy.
pub fn restart(state: &GameState) -> GameState {
    if !state.running || state.status != GameStatus::GameOver {
        return state.clone();
    }
    info!(previous_score = state.score, "restarting");
    init_state(state.config)
}

pub fn apply_command(state: &GameState, command: Command) -> GameState {
    match command {
        Command::Quit => {
            if state.running {
                info!(score = state.score, "quit");
            }
            GameState {
                running: false,
                ..state.clone()
            }
        }
        Command::Restart => restart(state),
    }
}
