/// Tunable game constants.

use anyhow::{ensure, Result};

pub const WORLD_WIDTH: i32 = 800;
pub const WORLD_HEIGHT: i32 = 600;
pub const FPS: u32 = 60;

pub const PLAYER_WIDTH: i32 = 40;
pub const PLAYER_HEIGHT: i32 = 60;
pub const PLAYER_SPEED: i32 = 5;
/// Distance from the bottom of the road to the player's spawn row.
pub const PLAYER_SPAWN_OFFSET: i32 = 100;

pub const OBSTACLE_WIDTH: i32 = 40;
pub const OBSTACLE_HEIGHT: i32 = 60;
pub const OBSTACLE_BASE_SPEED: i32 = 3;
/// Frames between obstacle spawns.
pub const OBSTACLE_SPAWN_RATE: u32 = 60;
/// Points awarded for every obstacle that leaves the bottom of the road.
pub const OBSTACLE_REWARD: u32 = 10;

pub const DIFFICULTY_INCREMENT: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub world_width: i32,
    pub world_height: i32,
    pub fps: u32,
    pub player_width: i32,
    pub player_height: i32,
    pub player_speed: i32,
    pub obstacle_width: i32,
    pub obstacle_height: i32,
    pub base_speed: i32,
    pub spawn_rate: u32,
    pub obstacle_reward: u32,
    pub difficulty_increment: f64,
    /// Upper bound for the difficulty multiplier. `None` lets it grow forever.
    pub max_multiplier: Option<f64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            fps: FPS,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            base_speed: OBSTACLE_BASE_SPEED,
            spawn_rate: OBSTACLE_SPAWN_RATE,
            obstacle_reward: OBSTACLE_REWARD,
            difficulty_increment: DIFFICULTY_INCREMENT,
            max_multiplier: None,
        }
    }
}

impl GameConfig {
    /// Reject settings the game loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.world_width > 0 && self.world_height > 0,
            "world must have a positive size, got {}x{}",
            self.world_width,
            self.world_height
        );
        ensure!(
            self.player_width > 0 && self.player_height > 0,
            "player must have a positive size"
        );
        ensure!(
            self.obstacle_width > 0 && self.obstacle_height > 0,
            "obstacles must have a positive size"
        );
        ensure!(
            self.player_width <= self.world_width && self.player_height <= self.world_height,
            "player ({}x{}) does not fit in the world ({}x{})",
            self.player_width,
            self.player_height,
            self.world_width,
            self.world_height
        );
        ensure!(
            self.obstacle_width <= self.world_width,
            "obstacle width {} exceeds world width {}",
            self.obstacle_width,
            self.world_width
        );
        ensure!(self.player_speed > 0, "player speed must be positive");
        ensure!(self.base_speed > 0, "base speed must be positive");
        ensure!(self.spawn_rate >= 1, "spawn rate must be at least one frame");
        ensure!(self.fps >= 1, "fps must be at least 1");
        ensure!(
            self.difficulty_increment.is_finite() && self.difficulty_increment > 0.0,
            "difficulty increment must be a positive number, got {}",
            self.difficulty_increment
        );
        if let Some(cap) = self.max_multiplier {
            ensure!(
                cap.is_finite() && cap >= 1.0,
                "max multiplier must be at least 1.0, got {}",
                cap
            );
        }
        Ok(())
    }

    /// Top-left corner of the player's car at the start of every game.
    pub fn player_spawn(&self) -> (i32, i32) {
        (
            self.world_width / 2 - self.player_width / 2,
            (self.world_height - PLAYER_SPAWN_OFFSET).clamp(0, self.world_height - self.player_height),
        )
    }
}
