use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameState, Tile};
use crate::menu::{ButtonList, Screen};

const TILE_EMPTY: Color = Color::Green;
const TILE_SNAKE: Color = Color::Black;
const TILE_FOOD: Color = Color::Blue;

const BUTTON_BG: Color = Color::Rgb(46, 66, 63);
const BUTTON_TEXT: Color = Color::Rgb(210, 215, 211);
const BUTTON_HOVER_BG: Color = Color::Rgb(26, 40, 32);
const BUTTON_HOVER_TEXT: Color = Color::Rgb(0, 255, 255);

/// Width of a menu button in terminal columns
const BUTTON_WIDTH: usize = 30;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        menu: Option<&Screen>,
        best: Option<u32>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, best), chunks[0]);

        // Each tile is two columns wide so cells come out roughly square
        let board_area = centered(
            chunks[1],
            (state.grid.width() * 2 + 2) as u16,
            (state.grid.height() + 2) as u16,
        );
        frame.render_widget(self.render_grid(state), board_area);

        if let Some(screen) = menu {
            let lines = self.render_menu(screen);
            let popup = centered(
                chunks[1],
                (BUTTON_WIDTH + 4) as u16,
                (lines.len() + 2) as u16,
            );
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(BUTTON_TEXT))
                        .title(format!(" {} ", screen.title())),
                ),
                popup,
            );
        }

        frame.render_widget(self.render_controls(menu.is_some()), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = state
            .grid
            .rows()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|tile| {
                            let colour = match tile {
                                Tile::Empty => TILE_EMPTY,
                                Tile::Snake => TILE_SNAKE,
                                Tile::Food => TILE_FOOD,
                            };
                            Span::styled("  ", Style::default().bg(colour))
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let border = if state.is_alive() {
            Color::White
        } else {
            Color::Red
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, best: Option<u32>) -> Paragraph<'_> {
        let best = best.map_or_else(|| "-".to_string(), |b| b.to_string());

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.snake.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(best, Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, screen: &Screen) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];

        match screen {
            Screen::Start(buttons) | Screen::Death(buttons) => {
                push_buttons(&mut lines, buttons, true);
            }
            Screen::SaveScore { entry, buttons } => {
                let caret = if entry.caret_visible() { "_" } else { " " };
                lines.push(Line::from(vec![
                    Span::styled(format!("{} ", entry.label), Style::default().fg(BUTTON_TEXT)),
                    Span::styled(
                        format!("{}{}", entry.text(), caret),
                        Style::default()
                            .fg(BUTTON_HOVER_TEXT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(""));
                push_buttons(&mut lines, buttons, true);
            }
            Screen::ViewScores { rows, back, .. } => {
                if rows.is_empty() {
                    lines.push(Line::styled("No scores yet", Style::default().fg(BUTTON_TEXT)));
                    lines.push(Line::from(""));
                }
                push_buttons(&mut lines, rows, false);
                push_buttons(&mut lines, back, true);
            }
        }

        lines
    }

    fn render_controls(&self, in_menu: bool) -> Paragraph<'_> {
        let text = if in_menu {
            vec![Line::from(vec![
                Span::styled("↑↓", Style::default().fg(Color::Cyan)),
                Span::raw(" to choose | "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to select | "),
                Span::styled("Ctrl+C", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One padded line per button plus a spacer; the selected one is highlighted
fn push_buttons(lines: &mut Vec<Line<'static>>, buttons: &ButtonList, highlight: bool) {
    for (i, button) in buttons.buttons().iter().enumerate() {
        let style = if highlight && i == buttons.selected() {
            Style::default()
                .bg(BUTTON_HOVER_BG)
                .fg(BUTTON_HOVER_TEXT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(BUTTON_BG).fg(BUTTON_TEXT)
        };

        lines.push(Line::styled(
            format!("{:^width$}", button.label, width = BUTTON_WIDTH),
            style,
        ));
        lines.push(Line::from(""));
    }
}

/// A `width` x `height` rect in the middle of `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use crate::scores::ScoreEntry;
    use crate::menu::Origin;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState, menu: Option<&Screen>, best: Option<u32>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, menu, best))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_status_bar() {
        let state = GameState::new(Snake::new(Position::new(1, 1)), 10, 10);
        let screen = draw(&state, None, Some(12));

        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Length: 1"));
        assert!(screen.contains("Best: 12"));
        assert!(screen.contains("WASD"));
    }

    #[test]
    fn test_menu_overlay() {
        let state = GameState::new(Snake::new(Position::new(1, 1)), 10, 10);
        let screen = draw(&state, Some(&Screen::death()), None);

        assert!(screen.contains("Game Over"));
        assert!(screen.contains("Play Again"));
        assert!(screen.contains("Save Score"));
        assert!(screen.contains("Best: -"));
    }

    #[test]
    fn test_high_score_overlay() {
        let state = GameState::new(Snake::new(Position::new(1, 1)), 10, 10);
        let scores = Screen::view_scores(&[ScoreEntry::new("ZED", 40)], Origin::Start);
        let screen = draw(&state, Some(&scores), None);

        assert!(screen.contains("1. ZED 40"));
        assert!(screen.contains("Back"));
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }
}
