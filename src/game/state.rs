use std::fmt;

use super::action::Direction;
use super::grid::Grid;

/// A cell on the game grid
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

/// The snake body, head at index 0. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// Snake of `length` segments with its head on the grid centre and the
    /// body trailing in +y.
    pub fn initialize(grid: &Grid, length: usize) -> Self {
        let head = grid.center();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(0, i))
            .collect();
        Self { body }
    }

    /// Build a snake from explicit segments. Returns `None` for an empty body.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Body segments, head excluded
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Where the head would land after one move; does not mutate.
    pub fn peek_next_head(&self, direction: Direction) -> Position {
        self.head().moved_in_direction(direction)
    }

    /// Push `new_head` to the front and drop the tail unless `grew`.
    /// The caller validates `new_head` beforehand.
    pub fn advance(&mut self, new_head: Position, grew: bool) {
        self.body.insert(0, new_head);

        if !grew {
            self.body.pop();
        }
    }

    /// True if `pos` hits any segment other than the head. Called on the
    /// pre-advance snake, so the current tail still counts.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head entered the wall ring
    Boundary,
    /// Head ran into its own body
    SelfCollision,
}

impl fmt::Display for CollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionType::Boundary => f.write_str("boundary collision"),
            CollisionType::SelfCollision => f.write_str("self collision"),
        }
    }
}

/// Simulation lifecycle. `GameOver` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver { reason: CollisionType },
}

/// Complete simulation state, owned by the caller and mutated by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub accelerating: bool,
    pub velocity: f64,
    /// Scaled time since the last movement
    pub accumulated_time: f64,
    pub steps: u32,
    pub status: Status,
}

impl GameState {
    pub fn new(
        grid: Grid,
        snake: Snake,
        food: Position,
        direction: Direction,
        velocity: f64,
    ) -> Self {
        Self {
            grid,
            snake,
            food,
            direction,
            accelerating: false,
            velocity,
            accumulated_time: 0.0,
            steps: 0,
            status: Status::Running,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Running
    }

    pub fn game_over_reason(&self) -> Option<CollisionType> {
        match self.status {
            Status::Running => None,
            Status::GameOver { reason } => Some(reason),
        }
    }
}
