use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Action, Direction, GameEngine, GameState};
use crate::input::{InputHandler, Key};
use crate::menu::{MenuAction, Origin, Screen};
use crate::render::Renderer;
use crate::scores::{ScoreEntry, ScoreStore, TOP_SCORES};

/// The whole program: one board, one open menu at most, and the score file
pub struct App {
    engine: GameEngine,
    state: GameState,
    menu: Option<Screen>,
    store: ScoreStore,
    best: Option<u32>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl App {
    /// A fresh board behind the start menu
    pub fn new(mut engine: GameEngine, store: ScoreStore) -> Result<Self> {
        let state = engine.reset();
        let best = store.best()?;

        Ok(Self {
            engine,
            state,
            menu: Some(Screen::start()),
            store,
            best,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn menu(&self) -> Option<&Screen> {
        self.menu.as_ref()
    }

    pub fn is_quitting(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.should_quit {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.quit(),
                    }
                }

                _ = tick_timer.tick() => {
                    self.tick();
                }

                _ = tokio::signal::ctrl_c() => {
                    self.quit();
                }
            }

            terminal
                .draw(|frame| {
                    self.renderer
                        .render(frame, &self.state, self.menu.as_ref(), self.best);
                })
                .context("Failed to draw frame")?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            let key = self.input_handler.translate(key);
            self.handle_key(key)?;
        }

        Ok(())
    }

    /// Route a key to the open menu, or to the snake while playing
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        if key == Key::Interrupt {
            self.quit();
            return Ok(());
        }

        if let Some(screen) = self.menu.as_mut() {
            if let Some(action) = screen.handle_key(key) {
                self.apply(action)?;
            }
            return Ok(());
        }

        if key.is_quit() {
            self.quit();
        } else if let Some(direction) = key.direction() {
            self.pending_direction = Some(direction);
        }

        Ok(())
    }

    /// One fixed-length tick: advance the snake, or let the open menu animate
    pub fn tick(&mut self) {
        if let Some(screen) = self.menu.as_mut() {
            screen.update();
            return;
        }

        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(&mut self.state, action);

        if result.terminated {
            self.open(Screen::death());
        }
    }

    /// Apply a menu action: the single place screens change
    pub fn apply(&mut self, action: MenuAction) -> Result<()> {
        debug!("menu action {action:?}");

        match action {
            MenuAction::Start => self.menu = None,
            MenuAction::PlayAgain => {
                self.reset_game();
                self.menu = None;
            }
            MenuAction::ViewScores => {
                let origin = if self.state.is_alive() {
                    Origin::Start
                } else {
                    Origin::Death
                };
                let top = self.store.top(TOP_SCORES)?;
                self.open(Screen::view_scores(&top, origin));
            }
            MenuAction::Back => {
                if let Some(Screen::ViewScores { origin, .. }) = &self.menu {
                    let origin = *origin;
                    self.open(Screen::for_origin(origin));
                }
            }
            MenuAction::SaveScoreScreen => self.open(Screen::save_score()),
            MenuAction::SaveScore(username) => {
                let entry = ScoreEntry::new(username, self.state.score);
                self.store.append(&entry)?;
                info!(
                    "saved score {} for {:?} to {}",
                    entry.score,
                    entry.username,
                    self.store.path().display()
                );
                self.best = self.best.max(Some(entry.score));
                self.open(Screen::death());
            }
            MenuAction::Quit => self.quit(),
        }

        Ok(())
    }

    fn open(&mut self, screen: Screen) {
        debug!("opening {} screen", screen.title());
        self.menu = Some(screen);
    }

    fn quit(&mut self) {
        if !self.should_quit {
            info!("quitting");
        }
        self.should_quit = true;
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.pending_direction = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Position, Snake};
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        let engine = GameEngine::with_seed(GameConfig::small(), 21);
        App::new(engine, ScoreStore::new(dir.path().join("scores.txt"))).unwrap()
    }

    fn type_keys(app: &mut App, keys: &[Key]) {
        for key in keys {
            app.handle_key(*key).unwrap();
        }
    }

    /// Put the head on the left edge facing the wall, so the next tick loses
    fn doom(app: &mut App, score: u32) {
        app.state = GameState::new(
            Snake::moving(Position::new(0, 4), Direction::Left, 2),
            10,
            10,
        );
        app.state.score = score;
        app.tick();
    }

    #[test]
    fn test_starts_on_start_menu() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        let before = app.state().clone();

        assert_eq!(app.menu(), Some(&Screen::start()));
        app.tick();
        assert_eq!(app.state(), &before);
    }

    #[test]
    fn test_start_then_steer() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.state = GameState::new(Snake::new(Position::new(4, 4)), 10, 10);

        type_keys(&mut app, &[Key::Enter]);
        assert!(app.menu().is_none());

        type_keys(&mut app, &[Key::Right]);
        app.tick();
        assert_eq!(app.state().snake.head().position, Position::new(5, 4));

        // no new key: keep heading the same way
        app.tick();
        assert_eq!(app.state().snake.head().position, Position::new(6, 4));
    }

    #[test]
    fn test_loss_opens_death_menu() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.apply(MenuAction::Start).unwrap();

        doom(&mut app, 3);

        assert!(!app.state().is_alive());
        assert_eq!(app.menu(), Some(&Screen::death()));
    }

    #[test]
    fn test_save_score_flow() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.apply(MenuAction::Start).unwrap();
        doom(&mut app, 7);

        // Death -> Save Score
        type_keys(&mut app, &[Key::Down, Key::Enter]);
        assert!(matches!(app.menu(), Some(Screen::SaveScore { .. })));

        type_keys(&mut app, &[Key::Char('a'), Key::Char('q'), Key::Char('z'), Key::Enter]);

        assert_eq!(app.menu(), Some(&Screen::death()));
        assert!(!app.is_quitting());
        let contents = std::fs::read_to_string(dir.path().join("scores.txt")).unwrap();
        assert_eq!(contents, "AQZ,7\n");
        assert_eq!(app.best, Some(7));
    }

    #[test]
    fn test_view_scores_back_returns_to_origin() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        app.apply(MenuAction::ViewScores).unwrap();
        app.apply(MenuAction::Back).unwrap();
        assert_eq!(app.menu(), Some(&Screen::start()));

        app.apply(MenuAction::Start).unwrap();
        doom(&mut app, 1);
        app.apply(MenuAction::ViewScores).unwrap();
        assert!(matches!(
            app.menu(),
            Some(Screen::ViewScores {
                origin: Origin::Death,
                ..
            })
        ));
        type_keys(&mut app, &[Key::Enter]);
        assert_eq!(app.menu(), Some(&Screen::death()));
    }

    #[test]
    fn test_view_scores_lists_top_five() {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::new(dir.path().join("scores.txt"));
        for score in [4, 8, 1, 6, 2, 9] {
            store.append(&ScoreEntry::new("ABC", score)).unwrap();
        }
        let mut app = app_in(&dir);
        assert_eq!(app.best, Some(9));

        app.apply(MenuAction::ViewScores).unwrap();

        let Some(Screen::ViewScores { rows, .. }) = app.menu() else {
            panic!("expected the scores screen");
        };
        let labels: Vec<_> = rows.buttons().iter().map(|b| b.label.clone()).collect();
        assert_eq!(
            labels,
            vec!["1. ABC 9", "2. ABC 8", "3. ABC 6", "4. ABC 4", "5. ABC 2"]
        );
    }

    #[test]
    fn test_play_again_resets() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.apply(MenuAction::Start).unwrap();
        doom(&mut app, 5);

        type_keys(&mut app, &[Key::Enter]);

        assert!(app.menu().is_none());
        assert!(app.state().is_alive());
        assert_eq!(app.state().score, 0);
        assert_eq!(app.state().snake.len(), 1);
    }

    #[test]
    fn test_quit_paths() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        type_keys(&mut app, &[Key::Up, Key::Enter]);
        assert!(app.is_quitting());

        let mut app = app_in(&dir);
        app.apply(MenuAction::Start).unwrap();
        type_keys(&mut app, &[Key::Escape]);
        assert!(app.is_quitting());

        let mut app = app_in(&dir);
        app.apply(MenuAction::SaveScoreScreen).unwrap();
        type_keys(&mut app, &[Key::Interrupt]);
        assert!(app.is_quitting());
    }
}
