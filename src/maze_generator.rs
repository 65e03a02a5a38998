//! Maze generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::{
    error::MazeError,
    grid::{Cell, Direction, Grid, Point},
};

/// Smallest size accepted by [MazeGenerator::generate]
pub const MIN_SIZE: usize = 5;
/// Largest size accepted by [MazeGenerator::generate]
pub const MAX_SIZE: usize = 100;

/// Maze settings shared by the generator and the text format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeProperties {
    /// Side length of generated mazes
    pub size: usize,
    pub wall: char,
    pub path: char,
    pub start: char,
    pub exit: char,
}

impl Default for MazeProperties {
    fn default() -> Self {
        Self {
            size: 10,
            wall: '#',
            path: ' ',
            start: 'S',
            exit: 'E',
        }
    }
}

impl MazeProperties {
    /// Symbol used for `cell` in maze text
    pub fn symbol_for(&self, cell: Cell) -> char {
        match cell {
            Cell::Wall => self.wall,
            Cell::Path => self.path,
            Cell::Start => self.start,
            Cell::Exit => self.exit,
        }
    }

    /// Cell kind of a symbol, `None` for characters not in the set
    pub fn cell_for(&self, symbol: char) -> Option<Cell> {
        [Cell::Wall, Cell::Path, Cell::Start, Cell::Exit]
            .into_iter()
            .find(|cell| self.symbol_for(*cell) == symbol)
    }

    /// Check that no two cell kinds share a symbol
    pub fn validate(&self) -> Result<(), MazeError> {
        let symbols = [self.wall, self.path, self.start, self.exit];
        for (idx, symbol) in symbols.iter().enumerate() {
            if symbols[idx + 1..].contains(symbol) {
                return Err(MazeError::InvalidSymbols { symbol: *symbol });
            }
        }
        Ok(())
    }
}

/// Round `size` down to an odd side length
///
/// Carve nodes sit on odd coordinates, so the outer wall ring only closes
/// on an odd side length.
pub fn normalize_size(size: usize) -> Result<usize, MazeError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(MazeError::InvalidArgument { size });
    }
    Ok(if size % 2 == 0 { size - 1 } else { size })
}

/// Perfect maze generator
///
/// Produces mazes without loops: every open cell is connected to every
/// other one by exactly one path. The only random decision is the choice of
/// the next carve node, which is drawn from the supplied generator.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    /// Generator backed by [StdRng], seeded from `seed` or from entropy
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Row of the start cell on the left border
    const START_ROW: usize = 1;

    pub fn with_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a `size` x `size` maze
    ///
    /// Even sizes are rounded down, the resulting grid carries the
    /// dimension actually used. Start sits on the left border and exit on
    /// the bottom border.
    ///
    /// Returns [MazeError::InvalidArgument] if `size` is not within
    /// [MIN_SIZE] and [MAX_SIZE].
    #[instrument(skip(self))]
    pub fn generate(&mut self, size: usize) -> Result<Grid, MazeError> {
        let size = normalize_size(size)?;
        let mut grid = Grid::walled(size, size);

        let start = Point::new(0, Self::START_ROW);
        grid.set(start, Cell::Start);

        let carves = self.carve(&mut grid, Point::new(1, Self::START_ROW));
        let exit = Self::place_exit(&mut grid);
        debug!(size, carves, exit_column = exit.x, "Generated maze");

        Ok(grid)
    }

    /// Randomized depth-first carving from `first`
    ///
    /// Returns the number of walls knocked down between carve nodes.
    fn carve(&mut self, grid: &mut Grid, first: Point) -> usize {
        let size = grid.width();
        let mut visited = vec![false; size * size];
        visited[first.y * size + first.x] = true;

        let mut stack = vec![first];
        let mut carves = 0;

        while let Some(&current) = stack.last() {
            grid.set(current, Cell::Path);

            let neighbours: Vec<(Direction, Point)> = Direction::ALL
                .into_iter()
                .filter_map(|direction| {
                    current
                        .offset(direction, 2)
                        .map(|next| (direction, next))
                })
                .filter(|(_, next)| {
                    grid.get(*next) == Some(Cell::Wall) && !visited[next.y * size + next.x]
                })
                .collect();

            match neighbours.choose(&mut self.random) {
                Some(&(direction, next)) => {
                    visited[next.y * size + next.x] = true;
                    if let Some(between) = current.offset(direction, 1) {
                        grid.set(between, Cell::Path);
                    }
                    carves += 1;
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
        carves
    }

    /// Open the exit below the rightmost path cell of the last inner row
    ///
    /// Every carve node of an odd-sized grid is reached, so that row
    /// always holds a path cell.
    fn place_exit(grid: &mut Grid) -> Point {
        let size = grid.width();
        let column = (1..size - 1)
            .rev()
            .find(|x| grid.get(Point::new(*x, size - 2)) == Some(Cell::Path));
        let Some(x) = column else {
            unreachable!("no path cell next to the bottom border of a {size}x{size} maze");
        };
        let exit = Point::new(x, size - 1);
        grid.set(exit, Cell::Exit);
        exit
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use itertools::Itertools;
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::TextCodec;

    fn render(grid: &Grid) -> String {
        let codec = TextCodec::new(MazeProperties::default()).unwrap();
        codec.serialize(grid).iter().join("\n")
    }

    /// Open cells reachable from start with four-directional moves
    fn reachable(grid: &Grid) -> usize {
        let start = grid.start().unwrap();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(point) = queue.pop_front() {
            for next in grid.open_neighbours(point) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen.len()
    }

    /// Pairs of horizontally or vertically adjacent open cells
    fn open_edges(grid: &Grid) -> usize {
        (0..grid.height())
            .cartesian_product(0..grid.width())
            .map(|(y, x)| Point::new(x, y))
            .filter(|point| grid.get(*point).is_some_and(Cell::is_open))
            .map(|point| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter_map(|direction| point.offset(direction, 1))
                    .filter(|next| grid.get(*next).is_some_and(Cell::is_open))
                    .count()
            })
            .sum()
    }

    #[test]
    fn first_choice_carves_known_maze() {
        let mut gen = MazeGenerator::with_rng(StepRng::new(0, 0));
        let grid = gen.generate(5).unwrap();

        let expected = "\
#####
S # #
# # #
#   #
###E#";
        assert_eq!(render(&grid), expected);
    }

    #[test]
    fn generated_mazes_are_spanning_trees() {
        let mut gen = MazeGenerator::new(Some(0));
        for size in (MIN_SIZE..MAX_SIZE).step_by(2) {
            let grid = gen.generate(size).unwrap();
            assert_eq!((grid.width(), grid.height()), (size, size));
            assert_eq!(grid.count(Cell::Start), 1);
            assert_eq!(grid.count(Cell::Exit), 1);

            let exit = grid.positions(Cell::Exit).next().unwrap();
            assert_eq!(exit.y, size - 1, "exit must be on the bottom border");

            let open = grid.width() * grid.height() - grid.count(Cell::Wall);
            assert_eq!(reachable(&grid), open, "size {size} is not connected");
            assert_eq!(open_edges(&grid), open - 1, "size {size} has a loop");
        }
    }

    #[test]
    fn every_carve_node_is_visited() {
        let mut gen = MazeGenerator::new(Some(7));
        let size = 21;
        let mut grid = Grid::walled(size, size);
        grid.set(Point::new(0, 1), Cell::Start);
        let carves = gen.carve(&mut grid, Point::new(1, 1));

        let nodes = (size / 2) * (size / 2);
        assert_eq!(carves, nodes - 1);
        // One path cell per node plus one per knocked down wall
        assert_eq!(grid.count(Cell::Path), nodes + carves);
    }

    #[test]
    fn same_seed_gives_same_maze() {
        let first = MazeGenerator::new(Some(1234)).generate(31).unwrap();
        let second = MazeGenerator::new(Some(1234)).generate(31).unwrap();
        assert_eq!(render(&first), render(&second));
    }

    #[test]
    fn even_sizes_are_rounded_down() {
        let mut gen = MazeGenerator::new(Some(3));
        assert_eq!(gen.generate(10).unwrap().width(), 9);
        assert_eq!(gen.generate(100).unwrap().width(), 99);
        assert_eq!(gen.generate(5).unwrap().width(), 5);
    }

    #[test]
    fn sizes_out_of_range_are_rejected() {
        let mut gen = MazeGenerator::new(Some(3));
        assert_eq!(
            gen.generate(4),
            Err(MazeError::InvalidArgument { size: 4 })
        );
        assert_eq!(
            gen.generate(101),
            Err(MazeError::InvalidArgument { size: 101 })
        );
    }

    #[test]
    fn properties_reject_shared_symbols() {
        let props = MazeProperties {
            exit: '#',
            ..Default::default()
        };
        assert_eq!(
            props.validate(),
            Err(MazeError::InvalidSymbols { symbol: '#' })
        );
        assert!(MazeProperties::default().validate().is_ok());
    }

    #[test]
    fn symbols_map_both_ways() {
        let props = MazeProperties::default();
        for cell in [Cell::Wall, Cell::Path, Cell::Start, Cell::Exit] {
            assert_eq!(props.cell_for(props.symbol_for(cell)), Some(cell));
        }
        assert_eq!(props.cell_for('x'), None);
    }
}
