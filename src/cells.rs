use serde_derive::Serialize;
use smallvec::SmallVec;
use std::fmt;

use crate::geometry::Vec3;
use crate::units::{ColumnIndex, RowIndex, Width};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> GridCoordinate {
        let Width(w) = width;
        GridCoordinate::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> GridCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        GridCoordinate::new(col as u32, row as u32)
    }

    /// The coordinate one cell away in `dir`, if it is representable.
    /// Whether it lies inside a particular grid is for the grid to decide.
    pub fn offset(&self, dir: Direction) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            Direction::Top => y.checked_sub(1).map(|y| GridCoordinate::new(x, y)),
            Direction::Right => x.checked_add(1).map(|x| GridCoordinate::new(x, y)),
            Direction::Bottom => y.checked_add(1).map(|y| GridCoordinate::new(x, y)),
            Direction::Left => x.checked_sub(1).map(|x| GridCoordinate::new(x, y)),
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[Direction; 4]>;

/// The four ways out of a square cell. The discriminants index `GridCell::connected`.
/// `y` grows towards `Bottom`.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Top,
                                     Direction::Right,
                                     Direction::Bottom,
                                     Direction::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index in `0..4`.
    pub fn from_index(index: usize) -> Option<Direction> {
        Direction::ALL.get(index).cloned()
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.index() + 2) % 4]
    }

    /// Top and Bottom move along the grid's `y` axis (the board's `z` axis).
    #[inline]
    pub fn is_vertical(self) -> bool {
        match self {
            Direction::Top | Direction::Bottom => true,
            Direction::Right | Direction::Left => false,
        }
    }
}

/// One position in a generated maze: where it sits on the board, how large it is and how
/// it is connected to its neighbours.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    position: Vec3,
    scale: Vec3,
    grid_position: GridCoordinate,
    pub visited: bool,
    pub connected: [bool; 4],
}

impl GridCell {
    pub fn new(grid_position: GridCoordinate, position: Vec3, scale: Vec3) -> GridCell {
        GridCell {
            position,
            scale,
            grid_position,
            visited: false,
            connected: [false; 4],
        }
    }

    /// Centre of the cell's floor footprint in board space.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    pub fn grid_position(&self) -> GridCoordinate {
        self.grid_position
    }

    #[inline]
    pub fn is_connected(&self, dir: Direction) -> bool {
        self.connected[dir.index()]
    }

    pub fn connected_directions(&self) -> DirectionSmallVec {
        Direction::ALL
            .iter()
            .cloned()
            .filter(|dir| self.is_connected(*dir))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions() {
        assert_eq!(Direction::Top.opposite(), Direction::Bottom);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Bottom.opposite(), Direction::Top);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        for dir in Direction::ALL.iter() {
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn direction_indices() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(Direction::from_index(i), Some(*dir));
        }
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn offsets() {
        let c = GridCoordinate::new(1, 1);
        assert_eq!(c.offset(Direction::Top), Some(GridCoordinate::new(1, 0)));
        assert_eq!(c.offset(Direction::Right), Some(GridCoordinate::new(2, 1)));
        assert_eq!(c.offset(Direction::Bottom), Some(GridCoordinate::new(1, 2)));
        assert_eq!(c.offset(Direction::Left), Some(GridCoordinate::new(0, 1)));

        let origin = GridCoordinate::new(0, 0);
        assert_eq!(origin.offset(Direction::Top), None);
        assert_eq!(origin.offset(Direction::Left), None);

        let far = GridCoordinate::new(u32::MAX, u32::MAX);
        assert_eq!(far.offset(Direction::Right), None);
        assert_eq!(far.offset(Direction::Bottom), None);
    }

    #[test]
    fn row_major_round_trip() {
        let width = Width(4);
        assert_eq!(GridCoordinate::from_row_major_index(0, width), GridCoordinate::new(0, 0));
        assert_eq!(GridCoordinate::from_row_major_index(5, width), GridCoordinate::new(1, 1));
        assert_eq!(GridCoordinate::from_row_major_index(11, width), GridCoordinate::new(3, 2));
    }

    #[test]
    fn new_cells_are_closed_and_unvisited() {
        let cell = GridCell::new(GridCoordinate::new(2, 3), Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        assert!(!cell.visited);
        assert!(cell.connected_directions().is_empty());
        assert_eq!(cell.grid_position(), GridCoordinate::new(2, 3));
    }
}
