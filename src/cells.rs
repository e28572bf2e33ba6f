use std::fmt;

use crate::units::{ColumnIndex, RowIndex, Width};

/// What occupies a single grid cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellState {
    Wall,
    Passage,
}

/// The four cardinal directions. Up is towards row 0.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Left, Direction::Down, Direction::Up];

    /// Unit (dx, dy) step for this direction.
    #[inline]
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A cell location on the grid, `x` is the column and `y` the row.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Position {
        Position { x, y }
    }

    /// Creates a new `Position` offset `steps` cells away in the given direction.
    /// Returns None if the result is not representable (negative or overflowing),
    /// grid bounds are the grid's business.
    pub fn offset(self, dir: Direction, steps: u32) -> Option<Position> {
        let (dx, dy) = dir.delta();
        let x = i64::from(self.x) + dx * i64::from(steps);
        let y = i64::from(self.y) + dy * i64::from(steps);
        if x < 0 || y < 0 || x > i64::from(u32::MAX) || y > i64::from(u32::MAX) {
            None
        } else {
            Some(Position::new(x as u32, y as u32))
        }
    }

    /// The cell halfway between two cells that are an even distance apart in a straight line.
    pub fn midpoint(self, other: Position) -> Position {
        Position::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// Room cells sit on even coordinates, every other cell is a connector or permanent wall.
    #[inline]
    pub fn is_room(self) -> bool {
        self.x % 2 == 0 && self.y % 2 == 0
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_width: Width) -> Position {
        let Width(width) = row_width;
        Position::new((index % width) as u32, (index / width) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Position {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Position::new(col as u32, row as u32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
