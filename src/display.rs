/// Rendering layer — all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The world is laid out in pixels; a
/// `Viewport` scales it onto however many terminal cells are available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{GameState, GameStatus, Obstacle, ObstacleColor, Player, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_ROAD: Color = Color::Rgb { r: 50, g: 50, b: 50 };
const C_MARKING: Color = Color::White;
const C_PLAYER: Color = Color::Blue;
const C_WINDOW: Color = Color::White;
const C_HEADLIGHT: Color = Color::Yellow;
const C_TAILLIGHT: Color = Color::Red;
const C_HUD: Color = Color::White;
const C_OVERLAY_FG: Color = Color::DarkGrey;
const C_OVERLAY_BG: Color = Color::Black;
const C_GAME_OVER: Color = Color::Red;

/// Lane markings: a 20 px dash every 40 px, 4 px wide.
const DASH_PERIOD: i32 = 40;
const DASH_LENGTH: i32 = 20;
const DASH_WIDTH: i32 = 4;
const EDGE_WIDTH: i32 = 5;
const LANES: i32 = 3;

pub const CONTROLS_HINT: &str = "Arrow Keys: Move | ESC/Q: Quit";
pub const RESTART_HINT: &str = "Press R to Restart or ESC to Quit";

fn obstacle_color(color: ObstacleColor) -> Color {
    match color {
        ObstacleColor::Red => Color::Red,
        ObstacleColor::Green => Color::Green,
        ObstacleColor::Yellow => Color::Yellow,
        ObstacleColor::Gray => Color::Grey,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// A block of terminal cells: columns `col..col + cols`, rows `row..row + rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

/// The terminal grid the world is scaled into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: i32,
    pub world_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: i32, world_height: i32) -> Self {
        Self {
            cols,
            rows,
            world_width: world_width.max(1),
            world_height: world_height.max(1),
        }
    }

    fn col_of(&self, x: i32) -> i64 {
        (i64::from(x) * i64::from(self.cols)).div_euclid(i64::from(self.world_width))
    }

    fn row_of(&self, y: i32) -> i64 {
        (i64::from(y) * i64::from(self.rows)).div_euclid(i64::from(self.world_height))
    }

    /// Cells covered by a world rectangle, clipped to the screen.  Anything
    /// with positive size covers at least one cell so small details stay
    /// visible.  `None` when the rectangle is entirely off screen.
    pub fn cells(&self, rect: &Rect) -> Option<CellRect> {
        if rect.width <= 0 || rect.height <= 0 {
            return None;
        }
        let c0 = self.col_of(rect.x);
        let c1 = self.col_of(rect.right()).max(c0 + 1);
        let r0 = self.row_of(rect.y);
        let r1 = self.row_of(rect.bottom()).max(r0 + 1);

        let c0 = c0.max(0);
        let c1 = c1.min(i64::from(self.cols));
        let r0 = r0.max(0);
        let r1 = r1.min(i64::from(self.rows));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            cols: (c1 - c0) as u16,
            rows: (r1 - r0) as u16,
        })
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_road(out, view)?;

    match state.status {
        GameStatus::Active => {
            for obstacle in &state.obstacles {
                draw_obstacle(out, obstacle, view)?;
            }
            draw_player(out, &state.player, view)?;
            draw_hud(out, state, view)?;
        }
        GameStatus::GameOver => draw_game_over(out, state, view)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn fill<W: Write>(out: &mut W, cells: CellRect, glyph: char, fg: Color, bg: Color) -> std::io::Result<()> {
    let line: String = std::iter::repeat(glyph).take(cells.cols as usize).collect();
    out.queue(style::SetForegroundColor(fg))?;
    out.queue(style::SetBackgroundColor(bg))?;
    for row in cells.row..cells.row + cells.rows {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn fill_world<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    glyph: char,
    fg: Color,
) -> std::io::Result<()> {
    match view.cells(&rect) {
        Some(cells) => fill(out, cells, glyph, fg, C_ROAD),
        None => Ok(()),
    }
}

fn text_at<W: Write>(out: &mut W, col: u16, row: u16, text: &str, fg: Color) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(fg))?;
    out.queue(Print(text))?;
    Ok(())
}

fn centered<W: Write>(out: &mut W, view: &Viewport, row: u16, text: &str, fg: Color) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    text_at(out, col, row, text, fg)
}

// ── Road ──────────────────────────────────────────────────────────────────────

fn draw_road<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let whole = CellRect {
        col: 0,
        row: 0,
        cols: view.cols,
        rows: view.rows,
    };
    if view.cols > 0 && view.rows > 0 {
        fill(out, whole, ' ', C_MARKING, C_ROAD)?;
    }

    let (w, h) = (view.world_width, view.world_height);
    let lane_width = w / LANES;
    for lane in 1..LANES {
        let x = lane_width * lane;
        let mut y = 0;
        while y < h {
            fill_world(out, view, Rect::new(x - DASH_WIDTH / 2, y, DASH_WIDTH, DASH_LENGTH), '┃', C_MARKING)?;
            y += DASH_PERIOD;
        }
    }

    fill_world(out, view, Rect::new(0, 0, EDGE_WIDTH, h), '█', C_MARKING)?;
    fill_world(out, view, Rect::new(w - EDGE_WIDTH, 0, EDGE_WIDTH, h), '█', C_MARKING)?;
    Ok(())
}

// ── Cars ──────────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, player: &Player, view: &Viewport) -> std::io::Result<()> {
    let (x, y, w) = (player.x, player.y, player.width);
    fill_world(out, view, player.bounds(), '█', C_PLAYER)?;
    // Windshield, then headlights on top of it
    fill_world(out, view, Rect::new(x + 5, y + 10, w - 10, 15), '▀', C_WINDOW)?;
    fill_world(out, view, Rect::new(x + 5, y + 5, 8, 8), '●', C_HEADLIGHT)?;
    fill_world(out, view, Rect::new(x + w - 13, y + 5, 8, 8), '●', C_HEADLIGHT)?;
    Ok(())
}

fn draw_obstacle<W: Write>(out: &mut W, obstacle: &Obstacle, view: &Viewport) -> std::io::Result<()> {
    let (x, y, w, h) = (obstacle.x, obstacle.y, obstacle.width, obstacle.height);
    fill_world(out, view, obstacle.bounds(), '█', obstacle_color(obstacle.color))?;
    // Rear window and taillights
    fill_world(out, view, Rect::new(x + 5, y + h - 25, w - 10, 15), '▄', C_WINDOW)?;
    fill_world(out, view, Rect::new(x + 5, y + h - 5, 8, 8), '●', C_TAILLIGHT)?;
    fill_world(out, view, Rect::new(x + w - 13, y + h - 5, 8, 8), '●', C_TAILLIGHT)?;
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_ROAD))?;
    text_at(out, 1, 0, &format!("Score: {}", state.score), C_HUD)?;
    text_at(out, 1, 1, &format!("Speed: {}", state.obstacle_speed), C_HUD)?;
    text_at(out, 1, view.rows.saturating_sub(1), CONTROLS_HINT, C_HUD)?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Dim everything underneath
    if view.cols > 0 && view.rows > 0 {
        let whole = CellRect {
            col: 0,
            row: 0,
            cols: view.cols,
            rows: view.rows,
        };
        fill(out, whole, '░', C_OVERLAY_FG, C_OVERLAY_BG)?;
    }

    let banner: &[&str] = &[
        "╔═══════════════════╗",
        "║     GAME OVER     ║",
        "╚═══════════════════╝",
    ];
    let score_line = format!("Final Score: {}", state.score);

    let total_rows = banner.len() as u16 + 3; // banner + blank + score + hint
    let start_row = (view.rows / 2).saturating_sub(total_rows / 2);

    for (i, line) in banner.iter().enumerate() {
        centered(out, view, start_row + i as u16, line, C_GAME_OVER)?;
    }
    let score_row = start_row + banner.len() as u16 + 1;
    centered(out, view, score_row, &score_line, C_HUD)?;
    centered(out, view, score_row + 1, RESTART_HINT, C_HUD)?;
    Ok(())
}
