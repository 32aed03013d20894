use crate::input::Key;

use super::MenuAction;

/// A labelled button. Buttons without an action are display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Option<MenuAction>,
}

impl Button {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
        }
    }

    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
        }
    }
}

/// A vertical stack of buttons with one highlighted, navigated by keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonList {
    buttons: Vec<Button>,
    selected: usize,
}

impl ButtonList {
    /// The first button starts highlighted
    pub fn new(buttons: Vec<Button>) -> Self {
        Self {
            buttons,
            selected: 0,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Highlight the button below, wrapping to the top
    pub fn select_next(&mut self) {
        if !self.buttons.is_empty() {
            self.selected = (self.selected + 1) % self.buttons.len();
        }
    }

    /// Highlight the button above, wrapping to the bottom
    pub fn select_previous(&mut self) {
        if !self.buttons.is_empty() {
            self.selected = (self.selected + self.buttons.len() - 1) % self.buttons.len();
        }
    }

    /// Click the highlighted button
    pub fn activate(&self) -> Option<MenuAction> {
        self.buttons
            .get(self.selected)
            .and_then(|button| button.action.clone())
    }

    /// Up/Down move the highlight, Enter clicks. Everything else is ignored.
    pub fn handle_key(&mut self, key: Key) -> Option<MenuAction> {
        if self.buttons.is_empty() {
            return None;
        }

        match key {
            Key::Down => self.select_next(),
            Key::Up => self.select_previous(),
            Key::Enter => return self.activate(),
            _ => {}
        }
        None
    }
}

/// Single-line text box that only accepts letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub label: String,
    text: String,
    max_chars: usize,
    ticks: u32,
    caret_visible: bool,
}

impl TextEntry {
    /// Ticks between caret blinks
    const BLINK_TICKS: u32 = 5;

    pub fn new(label: impl Into<String>, max_chars: usize) -> Self {
        Self {
            label: label.into(),
            text: String::new(),
            max_chars,
            ticks: 0,
            caret_visible: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    /// Backspace deletes; letters are upper-cased and appended while there is room
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Backspace => {
                self.text.pop();
            }
            Key::Char(c) if c.is_ascii_alphabetic() && self.text.len() < self.max_chars => {
                self.text.push(c.to_ascii_uppercase());
            }
            _ => {}
        }
    }

    pub fn update(&mut self) {
        self.ticks += 1;
        if self.ticks >= Self::BLINK_TICKS {
            self.ticks = 0;
            self.caret_visible = !self.caret_visible;
        }
    }
}
