use std::fmt;

use crate::cells::GridCoordinate;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// Row major iteration over every coordinate of a grid.
#[derive(Clone)]
pub struct CellIter {
    width: Width,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(width: Width, height: Height) -> CellIter {
        CellIter {
            width,
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
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.width);
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

/// Iteration over the rows of a grid, top to bottom, each row left to right.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    width: Width,
    height: Height,
}

impl RowIter {
    pub(crate) fn new(width: Width, height: Height) -> RowIter {
        RowIter {
            current_row: 0,
            width,
            height,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let Height(rows_count) = self.height;
        if self.current_row < rows_count {
            let Width(length) = self.width;
            let row = RowIndex(self.current_row);
            let coords = (0..length)
                .map(|i| GridCoordinate::from_row_column_indices(ColumnIndex(i), row))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.height.0 - self.current_row;
        (remaining, Some(remaining))
    }
}
