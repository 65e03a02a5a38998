//! Generate perfect mazes and find your way out of them
//!
//! Mazes are square grids of walls and paths with one start cell on the
//! left border and one exit on the bottom border. Generated mazes have no
//! loops, so there is exactly one route between any two open cells.
//!
//! # Examples
//! ## Generate and save a maze
//! ```
//! use maze_game::{MazeGenerator, MazeProperties, TextCodec};
//!
//! let mut gen = MazeGenerator::new(Some(42));
//! let grid = gen.generate(11).unwrap();
//! assert_eq!(grid.width(), 11);
//!
//! let codec = TextCodec::new(MazeProperties::default()).unwrap();
//! let text = codec.to_text(&grid, false);
//! assert_eq!(codec.parse(text.lines()).unwrap(), grid);
//! ```
//!
//! ## Walk to the exit
//! ```
//! use maze_game::{Direction, MazeProperties, MoveOutcome, Navigator, TextCodec};
//!
//! let maze = "3 3\n###\n#S#\n#E#\n";
//! let codec = TextCodec::new(MazeProperties::default()).unwrap();
//! let grid = codec.parse(maze.lines()).unwrap();
//!
//! let mut nav = Navigator::new(grid).unwrap();
//! assert_eq!(nav.move_player(Direction::Up), MoveOutcome::Blocked);
//! assert_eq!(nav.move_player(Direction::Down), MoveOutcome::Moved);
//! assert!(nav.is_won());
//! ```

pub mod command;
pub mod error;
pub mod grid;
pub mod maze_generator;
pub mod navigator;
pub mod text_codec;

pub use command::{Command, ParseCommandError};
pub use error::{FormatIssue, MazeError};
pub use grid::{Cell, Direction, Grid, Point};
pub use maze_generator::{MazeGenerator, MazeProperties, MAX_SIZE, MIN_SIZE};
pub use navigator::{GameState, MoveOutcome, Navigator};
pub use text_codec::{Header, TextCodec};
