//! Menu screens shown over the board
//!
//! Exactly one [`Screen`] is open at a time (or none while playing). Screens
//! turn keys into [`MenuAction`]s; the app applies the action and decides the
//! next screen.

pub mod widgets;

pub use widgets::{Button, ButtonList, TextEntry};

use crate::input::Key;
use crate::scores::ScoreEntry;

/// Longest username the save screen accepts
pub const USERNAME_LEN: usize = 3;

/// What a menu asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Close the start menu and play the current board
    Start,
    /// Throw away the finished game and begin a new one
    PlayAgain,
    /// Open the username entry screen
    SaveScoreScreen,
    /// Record the last score under this username
    SaveScore(String),
    /// Open the high-score table
    ViewScores,
    /// Leave the high-score table
    Back,
    Quit,
}

/// Where the high-score table was opened from, and so where Back leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Start,
    Death,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Start(ButtonList),
    Death(ButtonList),
    SaveScore {
        entry: TextEntry,
        buttons: ButtonList,
    },
    ViewScores {
        rows: ButtonList,
        back: ButtonList,
        origin: Origin,
    },
}

impl Screen {
    pub fn start() -> Self {
        Screen::Start(ButtonList::new(vec![
            Button::new("Start", MenuAction::Start),
            Button::new("View High Scores", MenuAction::ViewScores),
            Button::new("Quit", MenuAction::Quit),
        ]))
    }

    pub fn death() -> Self {
        Screen::Death(ButtonList::new(vec![
            Button::new("Play Again", MenuAction::PlayAgain),
            Button::new("Save Score", MenuAction::SaveScoreScreen),
            Button::new("View High Scores", MenuAction::ViewScores),
            Button::new("Quit", MenuAction::Quit),
        ]))
    }

    pub fn save_score() -> Self {
        Screen::SaveScore {
            entry: TextEntry::new("Enter Username:", USERNAME_LEN),
            buttons: ButtonList::new(vec![Button::inert("Save")]),
        }
    }

    /// The high-score table; entries are expected best-first
    pub fn view_scores(entries: &[ScoreEntry], origin: Origin) -> Self {
        let rows = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| Button::inert(score_row(i + 1, entry)))
            .collect();

        Screen::ViewScores {
            rows: ButtonList::new(rows),
            back: ButtonList::new(vec![Button::new("Back", MenuAction::Back)]),
            origin,
        }
    }

    /// The screen Back returns to
    pub fn for_origin(origin: Origin) -> Self {
        match origin {
            Origin::Start => Screen::start(),
            Origin::Death => Screen::death(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Start(_) => "Snake",
            Screen::Death(_) => "Game Over",
            Screen::SaveScore { .. } => "Save Score",
            Screen::ViewScores { .. } => "High Scores",
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Option<MenuAction> {
        match self {
            Screen::Start(buttons) | Screen::Death(buttons) => buttons.handle_key(key),
            Screen::SaveScore { entry, .. } => match key {
                Key::Enter => Some(MenuAction::SaveScore(entry.text().to_string())),
                other => {
                    entry.handle_key(other);
                    None
                }
            },
            // Score rows can't be highlighted; Enter always means Back
            Screen::ViewScores { back, .. } => match key {
                Key::Enter => back.activate(),
                _ => None,
            },
        }
    }

    /// Per-tick housekeeping while the screen is open
    pub fn update(&mut self) {
        if let Screen::SaveScore { entry, .. } = self {
            entry.update();
        }
    }
}

/// One line of the high-score table, e.g. `1. ABC 12`
pub fn score_row(rank: usize, entry: &ScoreEntry) -> String {
    format!("{}. {} {}", rank, entry.username, entry.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_menu_buttons() {
        let mut screen = Screen::start();
        assert_eq!(screen.handle_key(Key::Enter), Some(MenuAction::Start));

        screen.handle_key(Key::Up);
        assert_eq!(screen.handle_key(Key::Enter), Some(MenuAction::Quit));
    }

    #[test]
    fn test_death_menu_order() {
        let mut screen = Screen::death();
        let mut actions = Vec::new();
        for _ in 0..4 {
            actions.push(screen.handle_key(Key::Enter));
            screen.handle_key(Key::Down);
        }

        assert_eq!(
            actions,
            vec![
                Some(MenuAction::PlayAgain),
                Some(MenuAction::SaveScoreScreen),
                Some(MenuAction::ViewScores),
                Some(MenuAction::Quit),
            ]
        );
    }

    #[test]
    fn test_save_screen_submits_username() {
        let mut screen = Screen::save_score();
        for key in [Key::Char('j'), Key::Char('o'), Key::Char('e'), Key::Char('y')] {
            assert_eq!(screen.handle_key(key), None);
        }

        assert_eq!(
            screen.handle_key(Key::Enter),
            Some(MenuAction::SaveScore("JOE".to_string()))
        );
    }

    #[test]
    fn test_save_screen_types_navigation_letters() {
        let mut screen = Screen::save_score();
        screen.handle_key(Key::Char('w'));
        screen.handle_key(Key::Down);

        let Screen::SaveScore { entry, .. } = &screen else {
            panic!("expected the save screen");
        };
        assert_eq!(entry.text(), "W");
    }

    #[test]
    fn test_view_scores_rows_and_back() {
        let entries = vec![ScoreEntry::new("BOB", 9), ScoreEntry::new("AMY", 4)];
        let mut screen = Screen::view_scores(&entries, Origin::Death);

        let Screen::ViewScores { rows, origin, .. } = &screen else {
            panic!("expected the scores screen");
        };
        let labels: Vec<_> = rows.buttons().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1. BOB 9", "2. AMY 4"]);
        assert_eq!(*origin, Origin::Death);

        assert_eq!(screen.handle_key(Key::Down), None);
        assert_eq!(screen.handle_key(Key::Enter), Some(MenuAction::Back));
    }

    #[test]
    fn test_back_targets() {
        assert_eq!(Screen::for_origin(Origin::Start), Screen::start());
        assert_eq!(Screen::for_origin(Origin::Death), Screen::death());
    }
}
