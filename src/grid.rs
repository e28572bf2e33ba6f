use std::fmt;
use std::rc::Rc;

use bit_set::BitSet;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::{CellState, Direction, Position};
use crate::grid_displays::GridDisplay;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{Height, Width};

pub type PositionSmallVec = SmallVec<[Position; 4]>;

/// A rectangular maze layout: every cell is either a `Wall` or a `Passage`.
///
/// Passages are stored as a bit set over the row-major cell index, so a freshly
/// constructed grid is solid wall.
#[derive(Clone)]
pub struct Grid {
    width: Width,
    height: Height,
    passages: BitSet,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width.0,
               self.height.0,
               self.passages.len())
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height &&
        self.passages == other.passages
    }
}
impl Eq for Grid {}

impl Grid {
    pub fn new(width: Width, height: Height) -> Grid {
        Grid {
            width,
            height,
            passages: BitSet::with_capacity(width.0 * height.0),
            grid_display: None,
        }
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline]
    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    /// The bottom-right cell, or None for an empty grid.
    pub fn far_corner(&self) -> Option<Position> {
        if self.size() == 0 {
            None
        } else {
            Some(Position::new(self.width.0 as u32 - 1, self.height.0 as u32 - 1))
        }
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    /// Is the position within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Position) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a position to a one dimensional index in the range 0...grid.size().
    /// Returns None if the position is outside the grid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Position) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// The state of a cell, None when the position is outside the grid.
    pub fn state(&self, coord: Position) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| {
            if self.passages.contains(index) {
                CellState::Passage
            } else {
                CellState::Wall
            }
        })
    }

    /// Out of bounds positions are never passages.
    #[inline]
    pub fn is_passage(&self, coord: Position) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.passages.contains(index))
    }

    /// Turn a cell into a passage.
    /// Returns true if the cell was a wall inside the grid and is now carved.
    pub fn carve(&mut self, coord: Position) -> bool {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => self.passages.insert(index),
            None => false,
        }
    }

    /// The adjacent cell in `direction`, if it is inside the grid.
    pub fn neighbour_at_direction(&self, coord: Position, direction: Direction) -> Option<Position> {
        self.offset_within(coord, direction, 1)
    }

    /// The cell `steps` away in `direction`, if it is inside the grid.
    pub fn offset_within(&self, coord: Position, direction: Direction, steps: u32) -> Option<Position> {
        coord.offset(direction, steps).filter(|c| self.is_valid_coordinate(*c))
    }

    /// Cells that are up, down, left or right of a particular cell, whatever their state.
    pub fn neighbours(&self, coord: Position) -> PositionSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Adjacent cells that can be walked to from `coord`.
    pub fn passage_neighbours(&self, coord: Position) -> PositionSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .filter(|neighbour| self.is_passage(*neighbour))
            .collect()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.height)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.width, self.height)
    }

    /// All passage cells in row-major order.
    pub fn iter_passages<'a>(&'a self) -> impl Iterator<Item = Position> + 'a {
        self.iter().filter(move |coord| self.is_passage(*coord))
    }

    fn render_cell(&self, coord: Position) -> char {
        if !self.is_passage(coord) {
            return '#';
        }
        self.grid_display
            .as_ref()
            .and_then(|display| display.render_cell_body(coord))
            .unwrap_or(' ')
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = self.iter_row()
            .map(|row| row.into_iter().map(|coord| self.render_cell(coord)).collect::<String>())
            .join("\n");
        write!(f, "{}", text)
    }
}
