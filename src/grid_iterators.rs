use std::fmt;

use crate::cells::Position;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// Visits every cell position of a grid in row-major order.
#[derive(Clone)]
pub struct CellIter {
    row_width: Width,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(width: Width, height: Height) -> CellIter {
        CellIter {
            row_width: width,
            current_cell_number: 0,
            cells_count: width.0 * height.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Position;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Position::from_row_major_index(self.current_cell_number, self.row_width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// Yields the positions of one grid row at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    row_width: Width,
    rows_count: Height,
}

impl RowIter {
    pub(crate) fn new(width: Width, height: Height) -> RowIter {
        RowIter {
            current_row: 0,
            row_width: width,
            rows_count: height,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Position>;
    fn next(&mut self) -> Option<Self::Item> {
        let Height(count) = self.rows_count;
        if self.current_row < count {
            let Width(length) = self.row_width;
            let row = RowIndex(self.current_row);
            let coords = (0..length)
                .map(|i: usize| Position::from_row_column_indices(ColumnIndex(i), row))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_count.0 - self.current_row;
        (remaining, Some(remaining))
    }
}
