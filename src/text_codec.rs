//! Plain text maze format
//!
//! One line per row, one character per cell. The first line may be a
//! header holding the height and the width:
//!
//! ```text
//! 5 5
//! #####
//! S # #
//! # # #
//! #   #
//! ###E#
//! ```

use itertools::Itertools;
use tracing::{instrument, warn};

use crate::{
    error::{FormatIssue, MazeError},
    grid::{Cell, Grid, Point},
    maze_generator::MazeProperties,
};

/// How the first line of maze text is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// First line holds `<height> <width>`
    Present { height: usize, width: usize },
    /// First line is already a grid row
    Absent,
}

impl Header {
    /// Decide whether `line` is a header
    ///
    /// A header is exactly two whitespace separated unsigned integers. A
    /// line made only of symbols from `properties` is a grid row even if it
    /// also reads as two numbers, e.g. `1 1` with digit walls and a blank
    /// path.
    pub fn detect(line: &str, properties: &MazeProperties) -> Self {
        if !line.is_empty() && line.chars().all(|c| properties.cell_for(c).is_some()) {
            return Header::Absent;
        }
        let numbers: Option<Vec<usize>> = line
            .split_whitespace()
            .map(|token| token.parse().ok())
            .collect();
        match numbers.as_deref() {
            Some(&[height, width]) => Header::Present { height, width },
            _ => Header::Absent,
        }
    }
}

/// Reads and writes maze text with a configurable symbol set
#[derive(Debug, Clone)]
pub struct TextCodec {
    properties: MazeProperties,
    lenient: bool,
}

impl TextCodec {
    /// Codec using the symbols of `properties`
    ///
    /// Fails with [MazeError::InvalidSymbols] if two cell kinds share a
    /// symbol, since such text could not be read back.
    pub fn new(properties: MazeProperties) -> Result<Self, MazeError> {
        properties.validate()?;
        Ok(Self {
            properties,
            lenient: false,
        })
    }

    /// Read unknown characters as walls instead of rejecting them
    #[must_use]
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn properties(&self) -> &MazeProperties {
        &self.properties
    }

    /// Grid rows as text, top to bottom
    pub fn serialize(&self, grid: &Grid) -> Vec<String> {
        grid.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| self.properties.symbol_for(*cell))
                    .collect()
            })
            .collect()
    }

    /// Grid rows preceded by the `<height> <width>` header line
    pub fn serialize_with_header(&self, grid: &Grid) -> Vec<String> {
        let mut lines = vec![format!("{} {}", grid.height(), grid.width())];
        lines.extend(self.serialize(grid));
        lines
    }

    /// Newline terminated text, as written to a maze file
    pub fn to_text(&self, grid: &Grid, header: bool) -> String {
        let lines = if header {
            self.serialize_with_header(grid)
        } else {
            self.serialize(grid)
        };
        format!("{}\n", lines.iter().join("\n"))
    }

    /// Grid rows with `marker` drawn over the cell at `at`
    pub fn render_with_marker(&self, grid: &Grid, at: Point, marker: char) -> Vec<String> {
        grid.rows()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        if Point::new(x, y) == at {
                            marker
                        } else {
                            self.properties.symbol_for(*cell)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Parse maze text
    ///
    /// With a header, the announced dimensions must match the rows that
    /// follow. Without one, the row count gives the height and the first
    /// row gives the width. Trailing blank lines are ignored.
    ///
    /// Returns [MazeError::Format] if the text is empty, has zero width or
    /// height, has rows of differing length, does not contain exactly one
    /// start and at least one exit, or (unless lenient) contains a
    /// character outside the symbol set.
    #[instrument(skip_all)]
    pub fn parse<I, S>(&self, lines: I) -> Result<Grid, MazeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines: Vec<S> = lines.into_iter().collect();
        while lines.last().is_some_and(|line| line.as_ref().is_empty()) {
            lines.pop();
        }
        let (first, rest) = lines.split_first().ok_or(FormatIssue::Empty)?;

        let (rows, height, width): (Vec<&str>, usize, usize) =
            match Header::detect(first.as_ref(), &self.properties) {
                Header::Present { height, width } => {
                    let rows: Vec<&str> = rest.iter().map(|line| line.as_ref()).collect();
                    if rows.len() != height {
                        return Err(FormatIssue::RowCountMismatch {
                            expected: height,
                            found: rows.len(),
                        }
                        .into());
                    }
                    (rows, height, width)
                }
                Header::Absent => {
                    let rows: Vec<&str> = lines.iter().map(|line| line.as_ref()).collect();
                    let width = first.as_ref().chars().count();
                    let height = rows.len();
                    (rows, height, width)
                }
            };
        if height == 0 || width == 0 {
            return Err(FormatIssue::ZeroDimensions.into());
        }

        let cells = rows
            .iter()
            .enumerate()
            .map(|(y, row)| self.parse_row(y, row, width))
            .collect::<Result<Vec<_>, _>>()?;
        let grid = Grid::from_rows(width, cells);

        match grid.count(Cell::Start) {
            0 => return Err(FormatIssue::MissingStart.into()),
            1 => (),
            _ => return Err(FormatIssue::MultipleStarts.into()),
        }
        if grid.count(Cell::Exit) == 0 {
            return Err(FormatIssue::MissingExit.into());
        }
        Ok(grid)
    }

    fn parse_row(&self, y: usize, row: &str, width: usize) -> Result<Vec<Cell>, MazeError> {
        let found = row.chars().count();
        if found != width {
            return Err(FormatIssue::RaggedRow {
                row: y,
                expected: width,
                found,
            }
            .into());
        }
        row.chars()
            .enumerate()
            .map(|(x, symbol)| match self.properties.cell_for(symbol) {
                Some(cell) => Ok(cell),
                None if self.lenient => {
                    warn!(?symbol, x, y, "Unknown symbol read as wall");
                    Ok(Cell::Wall)
                }
                None => Err(FormatIssue::UnknownSymbol {
                    symbol,
                    row: y,
                    col: x,
                }
                .into()),
            })
            .collect()
    }
}
