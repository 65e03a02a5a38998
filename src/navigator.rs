//! Walking through a maze

use tracing::trace;

use crate::{
    error::{FormatIssue, MazeError},
    grid::{Cell, Direction, Grid, Point},
};

/// Result of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Player stepped onto the target cell
    Moved,
    /// Target lies outside the grid; position unchanged
    OutOfBounds,
    /// Target is a wall; position unchanged
    Blocked,
}

/// Whether the player is still looking for the exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
}

/// Player position inside a maze
///
/// The navigator owns its grid. The position always points at an open
/// cell: failed moves are reported and leave it where it was.
#[derive(Debug, Clone)]
pub struct Navigator {
    grid: Grid,
    start: Point,
    position: Point,
}

impl Navigator {
    /// Place a player on the start cell of `grid`
    ///
    /// Fails if the grid has no start cell.
    pub fn new(grid: Grid) -> Result<Self, MazeError> {
        let start = grid.start().ok_or(FormatIssue::MissingStart)?;
        Ok(Self {
            grid,
            start,
            position: start,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    /// Current player location
    pub fn position(&self) -> Point {
        self.position
    }

    /// Try to take one step in `direction`
    ///
    /// Bounds are checked before walls, so a step off the edge of the grid
    /// is always [MoveOutcome::OutOfBounds].
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let target = self
            .position
            .offset(direction, 1)
            .and_then(|point| self.grid.get(point).map(|cell| (point, cell)));
        let outcome = match target {
            None => MoveOutcome::OutOfBounds,
            Some((_, Cell::Wall)) => MoveOutcome::Blocked,
            Some((point, _)) => {
                self.position = point;
                MoveOutcome::Moved
            }
        };
        trace!(?direction, ?outcome, x = self.position.x, y = self.position.y, "Move");
        outcome
    }

    /// True iff the player stands on an exit
    pub fn is_won(&self) -> bool {
        self.grid.get(self.position) == Some(Cell::Exit)
    }

    pub fn state(&self) -> GameState {
        if self.is_won() {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    /// Put the player back on the start cell
    pub fn reset(&mut self) {
        self.position = self.start;
    }

    /// Give the grid back, dropping the player
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
