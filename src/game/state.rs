use super::action::Direction;
use super::grid::{Grid, Tile};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// One body unit of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    /// Heading used this tick; `None` while standing still
    pub direction: Option<Direction>,
    /// Heading this segment adopts on the next tick, copied from the segment ahead
    pub next_direction: Option<Direction>,
}

impl Segment {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            direction: None,
            next_direction: None,
        }
    }

    pub fn facing(position: Position, direction: Option<Direction>) -> Self {
        Self {
            position,
            direction,
            next_direction: None,
        }
    }
}

/// The snake, as a chain of segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub segments: Vec<Segment>,
}

impl Snake {
    /// A one-segment snake standing still
    pub fn new(head: Position) -> Self {
        Self {
            segments: vec![Segment::new(head)],
        }
    }

    /// A straight snake already moving; the body trails behind the head
    pub fn moving(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let segments = (0..length.max(1) as i32)
            .map(|i| {
                let mut segment =
                    Segment::facing(head.moved_by(-dx * i, -dy * i), Some(direction));
                segment.next_direction = Some(direction);
                segment
            })
            .collect();

        Self { segments }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn head_mut(&mut self) -> &mut Segment {
        &mut self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn heading(&self) -> Option<Direction> {
        self.head().direction
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// The head would have left the board
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Lost,
}

/// Complete game state: the board plus the snake that lives on it
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub score: u32,
    /// Food tiles currently on the board
    pub food_count: usize,
    pub steps: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game state with the snake marked on an otherwise empty board
    pub fn new(snake: Snake, grid_width: usize, grid_height: usize) -> Self {
        let mut grid = Grid::new(grid_width, grid_height);
        for pos in snake.positions() {
            grid.set(pos, Tile::Snake);
        }

        Self {
            grid,
            snake,
            score: 0,
            food_count: 0,
            steps: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Put food on an empty tile. Returns false if the tile is taken or off the board.
    pub fn place_food(&mut self, pos: Position) -> bool {
        if self.grid.get(pos) != Some(Tile::Empty) {
            return false;
        }
        self.grid.set(pos, Tile::Food);
        self.food_count += 1;
        true
    }

    /// Clear a food tile. Returns false if there was no food there.
    pub fn remove_food(&mut self, pos: Position) -> bool {
        if self.grid.get(pos) != Some(Tile::Food) {
            return false;
        }
        self.grid.set(pos, Tile::Empty);
        self.food_count -= 1;
        true
    }
}
