use road_dodge::compute::init_state;
use road_dodge::config::GameConfig;
use road_dodge::display::*;
use road_dodge::entities::*;

fn view() -> Viewport {
    Viewport::new(80, 24, 800, 600)
}

fn render_to_string(state: &GameState) -> String {
    let mut buf: Vec<u8> = Vec::new();
    render(&mut buf, state, &view()).expect("rendering into memory cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn viewport_scales_world_to_cells() {
    // 10 px per column, 25 px per row
    let cells = view().cells(&Rect::new(380, 500, 40, 60)).unwrap();
    assert_eq!(cells, CellRect { col: 38, row: 20, cols: 4, rows: 2 });
}

#[test]
fn viewport_keeps_tiny_details_visible() {
    let cells = view().cells(&Rect::new(385, 505, 8, 8)).unwrap();
    assert_eq!((cells.cols, cells.rows), (1, 1));
}

#[test]
fn viewport_clips_partially_visible_rects() {
    // An obstacle just spawned above the road
    let cells = view().cells(&Rect::new(0, -30, 40, 60)).unwrap();
    assert_eq!(cells, CellRect { col: 0, row: 0, cols: 4, rows: 1 });
}

#[test]
fn viewport_drops_rects_off_screen() {
    assert_eq!(view().cells(&Rect::new(0, -60, 40, 60)), None);
    assert_eq!(view().cells(&Rect::new(0, 601, 40, 60)), None);
    assert_eq!(view().cells(&Rect::new(0, 0, 0, 60)), None);
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn active_frame_shows_hud() {
    let mut s = init_state(GameConfig::default());
    s.score = 40;
    s.obstacle_speed = 4;
    let out = render_to_string(&s);
    assert!(out.contains("Score: 40"));
    assert!(out.contains("Speed: 4"));
    assert!(out.contains(CONTROLS_HINT));
    assert!(!out.contains("GAME OVER"));
}

#[test]
fn game_over_frame_shows_overlay() {
    let mut s = init_state(GameConfig::default());
    s.status = GameStatus::GameOver;
    s.score = 70;
    let out = render_to_string(&s);
    assert!(out.contains("GAME OVER"));
    assert!(out.contains("Final Score: 70"));
    assert!(out.contains(RESTART_HINT));
    assert!(!out.contains(CONTROLS_HINT));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let s = init_state(GameConfig::default());
    let mut buf: Vec<u8> = Vec::new();
    render(&mut buf, &s, &Viewport::new(0, 0, 800, 600)).unwrap();
    render(&mut buf, &s, &Viewport::new(3, 2, 800, 600)).unwrap();
}
