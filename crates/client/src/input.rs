//! Input processing for the terminal client.
//!
//! Owns the keyboard-to-request mapping so the event loop never looks at
//! concrete key codes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use realm_core::{ActionRequest, CardinalDirection, ThingId};

/// High-level outcome of processing a keyboard event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Queue the request on the runtime.
    Submit(ActionRequest),
    /// No meaningful command was produced.
    None,
}

/// Translates `KeyEvent`s into move requests for the player agent.
pub struct InputHandler {
    player: ThingId,
}

impl InputHandler {
    pub fn new(player: ThingId) -> Self {
        Self { player }
    }

    pub fn handle_key(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
            code => match direction(code) {
                Some(direction) => KeyAction::Submit(ActionRequest::step(self.player, direction)),
                None => KeyAction::None,
            },
        }
    }
}

fn direction(code: KeyCode) -> Option<CardinalDirection> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(CardinalDirection::North),
        KeyCode::Down | KeyCode::Char('j') => Some(CardinalDirection::South),
        KeyCode::Left | KeyCode::Char('h') => Some(CardinalDirection::West),
        KeyCode::Right | KeyCode::Char('l') => Some(CardinalDirection::East),
        _ => None,
    }
}
