use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use road_dodge::input::*;

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    })
}

fn press(code: KeyCode) -> Event {
    key(code, KeyEventKind::Press)
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[test]
fn quit_has_two_bindings() {
    assert_eq!(command_for(KeyCode::Esc, KeyModifiers::NONE), Some(Command::Quit));
    assert_eq!(command_for(KeyCode::Char('q'), KeyModifiers::NONE), Some(Command::Quit));
    assert_eq!(command_for(KeyCode::Char('Q'), KeyModifiers::SHIFT), Some(Command::Quit));
}

#[test]
fn ctrl_c_quits_but_plain_c_does_not() {
    assert_eq!(command_for(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit));
    assert_eq!(command_for(KeyCode::Char('c'), KeyModifiers::NONE), None);
}

#[test]
fn r_restarts() {
    assert_eq!(command_for(KeyCode::Char('r'), KeyModifiers::NONE), Some(Command::Restart));
    assert_eq!(command_for(KeyCode::Char('R'), KeyModifiers::SHIFT), Some(Command::Restart));
}

#[test]
fn movement_keys_are_not_commands() {
    for code in [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down, KeyCode::Char('a')] {
        assert_eq!(command_for(code, KeyModifiers::NONE), None);
    }
}

#[test]
fn tracker_reports_commands_on_press_only() {
    let mut keys = KeyTracker::new();
    assert_eq!(keys.handle_event(&press(KeyCode::Esc), 1), Some(Command::Quit));
    assert_eq!(keys.handle_event(&key(KeyCode::Esc, KeyEventKind::Repeat), 2), None);
    assert_eq!(keys.handle_event(&key(KeyCode::Esc, KeyEventKind::Release), 3), None);
}

#[test]
fn non_key_events_are_ignored() {
    let mut keys = KeyTracker::new();
    assert_eq!(keys.handle_event(&Event::Resize(80, 24), 1), None);
    assert_eq!(keys.snapshot(1), InputSnapshot::default());
}

// ── Held keys ─────────────────────────────────────────────────────────────────

#[test]
fn pressed_key_is_held_within_window() {
    let mut keys = KeyTracker::new();
    keys.handle_event(&press(KeyCode::Left), 10);
    assert!(keys.snapshot(10).left);
    assert!(keys.snapshot(10 + HOLD_WINDOW).left);
    assert!(!keys.snapshot(10 + HOLD_WINDOW + 1).left);
}

#[test]
fn repeat_refreshes_hold() {
    let mut keys = KeyTracker::new();
    keys.handle_event(&press(KeyCode::Up), 1);
    keys.handle_event(&key(KeyCode::Up, KeyEventKind::Repeat), 4);
    assert!(keys.snapshot(4 + HOLD_WINDOW).up);
}

#[test]
fn release_drops_key_immediately() {
    let mut keys = KeyTracker::new();
    keys.handle_event(&press(KeyCode::Right), 1);
    keys.handle_event(&key(KeyCode::Right, KeyEventKind::Release), 2);
    assert!(!keys.snapshot(2).right);
}

#[test]
fn wasd_and_arrows_map_to_same_directions() {
    let mut keys = KeyTracker::new();
    for c in ['W', 'a', 's', 'D'] {
        keys.handle_event(&press(KeyCode::Char(c)), 5);
    }
    assert_eq!(
        keys.snapshot(5),
        InputSnapshot { up: true, down: true, left: true, right: true }
    );

    let mut arrows = KeyTracker::new();
    arrows.handle_event(&press(KeyCode::Down), 5);
    arrows.handle_event(&press(KeyCode::Left), 5);
    assert_eq!(
        arrows.snapshot(5),
        InputSnapshot { up: false, down: true, left: true, right: false }
    );
}

#[test]
fn simultaneous_keys_give_diagonal_snapshot() {
    let mut keys = KeyTracker::new();
    keys.handle_event(&press(KeyCode::Up), 3);
    keys.handle_event(&press(KeyCode::Right), 3);
    let snap = keys.snapshot(4);
    assert!(snap.up && snap.right);
    assert!(!snap.down && !snap.left);
}
