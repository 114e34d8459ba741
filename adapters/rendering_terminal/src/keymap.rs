//! Translation of terminal key presses into player actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use grid_pursuit_core::Delta;
use grid_pursuit_rendering::vi_key_delta;

/// Action requested by a single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the controlled entities by the provided delta.
    Move(Delta),
    /// Leave the game loop.
    Quit,
}

/// Maps a key event onto an action, ignoring unbound keys and key releases.
#[must_use]
pub fn action_for(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => Some(KeyAction::Quit),
        (KeyCode::Right, _) => Some(KeyAction::Move(Delta::new(1, 0))),
        (KeyCode::Left, _) => Some(KeyAction::Move(Delta::new(-1, 0))),
        (KeyCode::Down, _) => Some(KeyAction::Move(Delta::new(0, 1))),
        (KeyCode::Up, _) => Some(KeyAction::Move(Delta::new(0, -1))),
        (KeyCode::Char(key), _) => vi_key_delta(key).map(KeyAction::Move),
        _ => None,
    }
}
