/// Game entity types: plain data plus the few per-entity operations
/// (bounds, movement) the frame update is built from.

use crate::config::GameConfig;
use crate::input::InputSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    GameOver,
}

/// Cosmetic body colour of an obstacle car. Has no effect on gameplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleColor {
    Red,
    Green,
    Yellow,
    Gray,
}

impl ObstacleColor {
    pub const PALETTE: [ObstacleColor; 4] = [
        ObstacleColor::Red,
        ObstacleColor::Green,
        ObstacleColor::Yellow,
        ObstacleColor::Gray,
    ];
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels. `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the two rectangles share a region of positive area.
    /// Rectangles that only touch along an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
}

impl Player {
    /// A fresh car at the configured spawn point.
    pub fn spawn(config: &GameConfig) -> Self {
        let (x, y) = config.player_spawn();
        Self {
            x,
            y,
            width: config.player_width,
            height: config.player_height,
            speed: config.player_speed,
        }
    }

    /// Apply one frame of held movement keys. Each axis is clamped on its own,
    /// so pushing into a wall diagonally still slides along it.
    pub fn move_by(&mut self, input: &InputSnapshot, world_width: i32, world_height: i32) {
        let mut dx = 0;
        let mut dy = 0;
        if input.left {
            dx -= self.speed;
        }
        if input.right {
            dx += self.speed;
        }
        if input.up {
            dy -= self.speed;
        }
        if input.down {
            dy += self.speed;
        }

        let max_x = (world_width - self.width).max(0);
        let max_y = (world_height - self.height).max(0);
        self.x = (self.x + dx).clamp(0, max_x);
        self.y = (self.y + dy).clamp(0, max_y);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: ObstacleColor,
}

impl Obstacle {
    /// Move down the road. `speed` is the shared obstacle speed for this frame.
    pub fn advance(&mut self, speed: i32) {
        self.y = self.y.saturating_add(speed);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The top edge has passed the bottom of the road.
    pub fn is_off_screen(&self, world_height: i32) -> bool {
        self.y > world_height
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything that changes while a game is played. Cloneable so the frame
/// update can hand back a new copy without touching the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    /// Cleared by a quit command; the frame loop stops once this is false.
    pub running: bool,
    pub status: GameStatus,
    pub player: Player,
    /// In spawn order.
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Active frames since the last spawn.
    pub spawn_timer: u32,
    /// Never below 1.0, never decreases during a game.
    pub difficulty: f64,
    /// Speed every obstacle moves at this frame, derived from `difficulty`.
    pub obstacle_speed: i32,
    /// Active frames played in this game.
    pub frame: u64,
}
