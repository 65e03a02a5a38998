//! Cell store of a maze

/// One square of the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Path,
    Start,
    Exit,
}

impl Cell {
    /// Whether a player may stand on this cell
    pub fn is_open(self) -> bool {
        self != Cell::Wall
    }
}

/// Location in the maze, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Point `distance` cells away in `direction`
    ///
    /// Returns `None` when the result would have a negative coordinate.
    /// The upper bound is not checked here, see [Grid::contains].
    pub fn offset(self, direction: Direction, distance: usize) -> Option<Point> {
        let Point { x, y } = self;
        match direction {
            Direction::Up => y.checked_sub(distance).map(|y| Point { x, y }),
            Direction::Down => y.checked_add(distance).map(|y| Point { x, y }),
            Direction::Left => x.checked_sub(distance).map(|x| Point { x, y }),
            Direction::Right => x.checked_add(distance).map(|x| Point { x, y }),
        }
    }
}

/// The four moves available on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Rectangular cell store with fixed dimensions
///
/// Cells are kept row by row in a boxed slice, so the shape can not change
/// after construction. Reads outside the grid return `None` instead of
/// panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Box<[Cell]>,
}

impl Grid {
    /// Grid of the given shape with every cell set to [Cell::Wall]
    pub(crate) fn walled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height].into_boxed_slice(),
        }
    }

    /// Build a grid from complete rows
    ///
    /// Callers guarantee that every row has `width` cells.
    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let cells: Box<[Cell]> = rows.into_iter().flatten().collect();
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `point` lies inside `[0, width) x [0, height)`
    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    fn index(&self, point: Point) -> Option<usize> {
        self.contains(point).then(|| point.y * self.width + point.x)
    }

    /// Cell at `point`, or `None` outside the grid
    pub fn get(&self, point: Point) -> Option<Cell> {
        self.index(point).map(|idx| self.cells[idx])
    }

    /// Overwrite the cell at `point`
    ///
    /// Returns `false` and leaves the grid untouched if `point` is outside.
    pub(crate) fn set(&mut self, point: Point, cell: Cell) -> bool {
        match self.index(point) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `max(1)` keeps `chunks` happy on a zero-width grid
        self.cells.chunks(self.width.max(1))
    }

    /// Every point of the grid holding `kind`, in row order
    pub fn positions(&self, kind: Cell) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == kind)
            .map(move |(idx, _)| Point::new(idx % width, idx / width))
    }

    /// Location of the start cell
    pub fn start(&self) -> Option<Point> {
        self.positions(Cell::Start).next()
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }

    /// Open neighbours of `point` one step away
    pub fn open_neighbours(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| point.offset(direction, 1))
            .filter(move |next| self.get(*next).is_some_and(Cell::is_open))
    }
}
