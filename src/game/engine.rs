use super::{
    action::{Action, Direction},
    config::GameConfig,
    grid::Tile,
    state::{CollisionType, GamePhase, GameState, Position, Segment, Snake},
};
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the head ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn ended(collision_type: Option<CollisionType>) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                collision_type,
            },
        }
    }
}

/// The cell a segment would enter next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextCell {
    /// An on-board cell and what is on it
    Tile(Position, Tile),
    /// The move would leave the board
    OffGrid,
    /// The segment has no heading
    Still,
}

/// Look up the cell the segment at `index` would enter moving in `direction`
pub fn next_cell(state: &GameState, index: usize, direction: Option<Direction>) -> NextCell {
    let Some(direction) = direction else {
        return NextCell::Still;
    };
    let target = state.snake.segments[index]
        .position
        .moved_in_direction(direction);

    match state.grid.get(target) {
        Some(tile) => NextCell::Tile(target, tile),
        None => NextCell::OffGrid,
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose spawns are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game: a lone head standing still on a random tile
    pub fn reset(&mut self) -> GameState {
        let x = self.rng.gen_range(0..self.config.grid_width) as i32;
        let y = self.rng.gen_range(0..self.config.grid_height) as i32;

        info!("new game, head at ({x}, {y})");
        GameState::new(
            Snake::new(Position::new(x, y)),
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive() {
            return StepResult::ended(None);
        }

        self.steer(state, action);

        // Losing leaves the board exactly as it was
        if next_cell(state, 0, state.snake.heading()) == NextCell::OffGrid {
            state.phase = GamePhase::Lost;
            state.steps += 1;
            info!(
                "head hit the wall after {} steps, score {}",
                state.steps, state.score
            );
            return StepResult::ended(Some(CollisionType::Wall));
        }

        self.spawn_food(state);

        for segment in state.snake.segments.iter_mut().skip(1) {
            segment.direction = segment.next_direction;
        }

        let old_tail = *state.snake.tail();
        let ate_food = self.eat_food(state);

        self.move_segments(state);

        if ate_food {
            state
                .snake
                .segments
                .push(Segment::facing(old_tail.position, old_tail.direction));
            state.grid.set(old_tail.position, Tile::Snake);
            self.spawn_food(state);
        }

        let segments = &mut state.snake.segments;
        for i in 1..segments.len() {
            segments[i].next_direction = segments[i - 1].direction;
        }

        state.steps += 1;

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Point the head where the player asked. Reversing onto the neck is allowed.
    fn steer(&self, state: &mut GameState, action: Action) {
        if let Action::Move(direction) = action {
            state.snake.head_mut().direction = Some(direction);
        }
    }

    /// Clear food from the head's destination, if there is any
    fn eat_food(&self, state: &mut GameState) -> bool {
        let NextCell::Tile(pos, Tile::Food) = next_cell(state, 0, state.snake.heading()) else {
            return false;
        };

        state.remove_food(pos);
        state.score += 1;
        debug!("ate food at ({}, {}), score {}", pos.x, pos.y, state.score);
        true
    }

    /// Advance every moving segment one tile
    fn move_segments(&self, state: &mut GameState) {
        let targets: Vec<Option<Position>> = (0..state.snake.len())
            .map(|i| match next_cell(state, i, state.snake.segments[i].direction) {
                NextCell::Tile(pos, _) => Some(pos),
                NextCell::OffGrid | NextCell::Still => None,
            })
            .collect();

        for (segment, target) in state.snake.segments.iter_mut().zip(&targets) {
            if let Some(target) = target {
                state.grid.set(segment.position, Tile::Empty);
                segment.position = *target;
            }
        }

        // Marking after all clears keeps overlapping segments on Snake tiles
        for segment in &state.snake.segments {
            state.grid.set(segment.position, Tile::Snake);
        }
    }

    /// Put a food tile on a random empty cell if the board is below its food cap
    pub fn spawn_food(&mut self, state: &mut GameState) -> Option<Position> {
        if state.food_count >= self.config.max_food {
            return None;
        }

        let pos = *state.grid.empty_cells().choose(&mut self.rng)?;
        state.place_food(pos);
        debug!("food spawned at ({}, {})", pos.x, pos.y);
        Some(pos)
    }
}
