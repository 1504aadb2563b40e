/// Keyboard handling: turns the terminal's key event stream into a held-key
/// snapshot for movement plus one-shot commands.
///
/// Terminals report key presses (and OS auto-repeat as further presses) but
/// usually not releases, so "held" is approximated: a key counts as held if
/// its last press or repeat arrived within `HOLD_WINDOW` frames.  Terminals
/// with the keyboard-enhancement protocol also send `Release`, which drops
/// the key at once.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Frames a key stays held after its last press/repeat event.  OS key repeat
/// runs at 15 Hz or faster, so at 60 FPS this must cover at least 4 frames.
pub const HOLD_WINDOW: u64 = 4;

/// Which movement directions are held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Discrete requests delivered as key-down events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Restart,
}

/// Classify a key-down into a command, if it is one.
pub fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

/// Maps each held key to the frame it was last seen on.
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal event seen during `frame`.  Returns the command it
    /// carries, if it is a key-down for one.
    pub fn handle_event(&mut self, event: &Event, frame: u64) -> Option<Command> {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return None;
        };

        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(normalize(*code), frame);
                command_for(*code, *modifiers)
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(normalize(*code), frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&normalize(*code));
                None
            }
        }
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&normalize(key))
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Movement keys held during `frame`: arrows or W/A/S/D.
    pub fn snapshot(&self, frame: u64) -> InputSnapshot {
        InputSnapshot {
            up: self.is_held(KeyCode::Up, frame) || self.is_held(KeyCode::Char('w'), frame),
            down: self.is_held(KeyCode::Down, frame) || self.is_held(KeyCode::Char('s'), frame),
            left: self.is_held(KeyCode::Left, frame) || self.is_held(KeyCode::Char('a'), frame),
            right: self.is_held(KeyCode::Right, frame) || self.is_held(KeyCode::Char('d'), frame),
        }
    }
}

/// Shift state does not matter for letter keys.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
