use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// A key press reduced to what the game and menus care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Escape,
    Char(char),
    /// Ctrl+C
    Interrupt,
    Other,
}

impl Key {
    /// Steering for the snake: arrow keys or WASD
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up | Key::Char('w' | 'W') => Some(Direction::Up),
            Key::Down | Key::Char('s' | 'S') => Some(Direction::Down),
            Key::Left | Key::Char('a' | 'A') => Some(Direction::Left),
            Key::Right | Key::Char('d' | 'D') => Some(Direction::Right),
            _ => None,
        }
    }

    /// Keys that leave the game while it is being played
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Escape | Key::Interrupt | Key::Char('q' | 'Q'))
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn translate(&self, key: KeyEvent) -> Key {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Key::Interrupt;
        }

        match key.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Escape,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.translate(press(KeyCode::Up)), Key::Up);
        assert_eq!(handler.translate(press(KeyCode::Down)), Key::Down);
        assert_eq!(handler.translate(press(KeyCode::Left)), Key::Left);
        assert_eq!(handler.translate(press(KeyCode::Right)), Key::Right);
        assert_eq!(Key::Left.direction(), Some(Direction::Left));
    }

    #[test]
    fn test_wasd_steering() {
        let handler = InputHandler::new();

        let w = handler.translate(press(KeyCode::Char('w')));
        assert_eq!(w, Key::Char('w'));
        assert_eq!(w.direction(), Some(Direction::Up));
        assert_eq!(Key::Char('A').direction(), Some(Direction::Left));
        assert_eq!(Key::Char('s').direction(), Some(Direction::Down));
        assert_eq!(Key::Char('d').direction(), Some(Direction::Right));
    }

    #[test]
    fn test_editing_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.translate(press(KeyCode::Enter)), Key::Enter);
        assert_eq!(handler.translate(press(KeyCode::Backspace)), Key::Backspace);
        assert_eq!(handler.translate(press(KeyCode::Char('x'))), Key::Char('x'));
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert!(handler.translate(press(KeyCode::Esc)).is_quit());
        assert!(Key::Char('Q').is_quit());
        assert!(!Key::Char('x').is_quit());
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.translate(ctrl_c), Key::Interrupt);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        let key = handler.translate(press(KeyCode::F(5)));
        assert_eq!(key, Key::Other);
        assert_eq!(key.direction(), None);
    }
}
