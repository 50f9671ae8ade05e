use std::collections::VecDeque;

use thiserror::Error;

use super::config::GameMode;
use super::direction::Direction;
use super::queue::DirectionQueue;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
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

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Cells that fit in a pixel area, per axis
    pub fn from_pixels(pixel_width: u32, pixel_height: u32, cell_size: u32) -> Self {
        Self::new(
            (pixel_width / cell_size) as i32,
            (pixel_height / cell_size) as i32,
        )
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Fold a position back onto the grid. Negative overshoot lands on the far edge.
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Every cell in row-major order
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

/// Why a move failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Collision {
    /// Snake ran off the board
    #[error("collision with the map border")]
    Border,
    /// Snake ran into its own body
    #[error("collision with self")]
    SelfCollision,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, tail at the front and head at the back
    body: VecDeque<Position>,
    heading: DirectionQueue,
}

impl Snake {
    /// Create a snake whose tail sits at `tail` and whose body extends in `direction`
    pub fn new(tail: Position, direction: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = tail;
        for _ in 0..length.max(1) {
            body.push_back(segment);
            segment = segment.moved_in_direction(direction);
        }

        Self {
            body,
            heading: DirectionQueue::new(direction),
        }
    }

    /// Build a snake from explicit segments, tail first
    #[cfg(test)]
    pub(crate) fn from_segments(segments: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "snake needs at least one segment");
        Self {
            body,
            heading: DirectionQueue::new(direction),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get the tail position
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.heading.current()
    }

    /// Whether the first turn has been made
    pub fn is_moving(&self) -> bool {
        self.heading.is_started()
    }

    /// Check if a position is occupied by any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Queue a turn. Illegal turns are ignored and return false.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        self.heading.request(direction)
    }

    /// Move one cell in the committed direction.
    ///
    /// The tail cell counts as free because it is vacated on the same tick.
    /// On failure the body and heading are left untouched.
    pub fn advance(&mut self, board: Board, mode: GameMode) -> Result<Position, Collision> {
        let mut next_head = self.head().moved_in_direction(self.heading.current());

        if mode.wraps() {
            next_head = board.wrap(next_head);
        } else if !board.contains(next_head) {
            return Err(Collision::Border);
        }

        if mode.checks_self_collision() && self.body.iter().skip(1).any(|&p| p == next_head) {
            return Err(Collision::SelfCollision);
        }

        self.body.pop_front();
        self.body.push_back(next_head);
        self.heading.commit_next();

        Ok(next_head)
    }

    /// Lengthen by one by doubling up the tail segment
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_front(tail);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first turn
    NotStarted,
    Running,
    Collided(Collision),
    /// Board filled up, no fruit left to place
    Won,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Collided(_) | Phase::Won)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub fruits: Vec<Position>,
    pub board: Board,
    pub mode: GameMode,
    pub score: u32,
    pub steps: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, fruits: Vec<Position>, board: Board, mode: GameMode) -> Self {
        Self {
            snake,
            fruits,
            board,
            mode,
            score: 0,
            steps: 0,
            phase: Phase::NotStarted,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}
