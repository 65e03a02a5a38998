//! Errors raised while building a maze

use derive_more::{Display, Error};

/// Construction-time failure
///
/// Any of these means no maze was produced; the caller should treat the
/// requested maze as unusable.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MazeError {
    /// Generation was requested with a size outside the accepted range.
    #[display("Maze size must be in range 5 and 100, got {size}")]
    InvalidArgument { size: usize },

    /// Maze text could not be read as a grid.
    #[display("Malformed maze text: {reason}")]
    Format { reason: FormatIssue },

    /// Two cell kinds were configured with the same symbol.
    #[display("Symbol `{symbol}` is used for more than one kind of cell")]
    InvalidSymbols { symbol: char },
}

/// What exactly was wrong with a piece of maze text
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FormatIssue {
    #[display("input is empty")]
    Empty,

    #[display("maze has zero width or height")]
    ZeroDimensions,

    #[display("header announces {expected} rows, found {found}")]
    RowCountMismatch { expected: usize, found: usize },

    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[display("unexpected character `{symbol}` at y={row}, x={col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[display("no start cell")]
    MissingStart,

    #[display("more than one start cell")]
    MultipleStarts,

    #[display("no exit cell")]
    MissingExit,
}

impl From<FormatIssue> for MazeError {
    fn from(reason: FormatIssue) -> Self {
        Self::Format { reason }
    }
}
