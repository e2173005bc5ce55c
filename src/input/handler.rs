use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

/// How the acceleration key behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelerationMode {
    /// Accelerate while held; needs a terminal that reports key releases
    Hold,
    /// Each press flips acceleration on or off
    Toggle,
}

pub struct InputHandler {
    mode: AccelerationMode,
    toggled_on: bool,
}

impl InputHandler {
    pub fn new(mode: AccelerationMode) -> Self {
        Self {
            mode,
            toggled_on: false,
        }
    }

    pub fn mode(&self) -> AccelerationMode {
        self.mode
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> KeyAction {
        if is_accelerate_key(key.code) {
            return self.handle_accelerate(key.kind);
        }

        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => steer(Direction::Up),
            KeyCode::Down => steer(Direction::Down),
            KeyCode::Left => steer(Direction::Left),
            KeyCode::Right => steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => steer(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    fn handle_accelerate(&mut self, kind: KeyEventKind) -> KeyAction {
        match (self.mode, kind) {
            (AccelerationMode::Hold, KeyEventKind::Release) => {
                KeyAction::GameAction(Action::ReleaseAccelerate)
            }
            (AccelerationMode::Hold, _) => KeyAction::GameAction(Action::Accelerate),
            (AccelerationMode::Toggle, KeyEventKind::Press) => {
                self.toggled_on = !self.toggled_on;
                if self.toggled_on {
                    KeyAction::GameAction(Action::Accelerate)
                } else {
                    KeyAction::GameAction(Action::ReleaseAccelerate)
                }
            }
            (AccelerationMode::Toggle, _) => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(AccelerationMode::Hold)
    }
}

fn steer(direction: Direction) -> KeyAction {
    KeyAction::GameAction(Action::Steer(direction))
}

fn is_accelerate_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('p') | KeyCode::Char('P'))
}
