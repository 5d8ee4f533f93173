use bit_set::BitSet;
use log::warn;
use rand::Rng;
use serde_derive::Deserialize;

use crate::cells::GridCoordinate;
use crate::geometry::Vec3;
use crate::grid::MazeGrid;
use crate::units::GemCount;

/// Heights above a cell's centre at which the props spawn.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PropOffsets {
    pub ball: f32,
    pub gem: f32,
    pub flag: f32,
}

impl Default for PropOffsets {
    fn default() -> PropOffsets {
        PropOffsets {
            ball: 4.0,
            gem: 1.0,
            flag: -0.5,
        }
    }
}

/// Which cells the props of one maze spawn in.
#[derive(Clone, Debug, PartialEq)]
pub struct PropLayout {
    pub start: GridCoordinate,
    pub end: GridCoordinate,
    /// In collection order.
    pub gems: Vec<GridCoordinate>,
}

impl PropLayout {
    pub fn ball_spawn(&self, grid: &MazeGrid, offsets: &PropOffsets) -> Vec3 {
        spawn_point(grid, self.start, offsets.ball)
    }

    pub fn flag_spawn(&self, grid: &MazeGrid, offsets: &PropOffsets) -> Vec3 {
        spawn_point(grid, self.end, offsets.flag)
    }

    pub fn gem_spawns(&self, grid: &MazeGrid, offsets: &PropOffsets) -> Vec<Vec3> {
        self.gems
            .iter()
            .map(|coord| spawn_point(grid, *coord, offsets.gem))
            .collect()
    }
}

fn spawn_point(grid: &MazeGrid, coord: GridCoordinate, height: f32) -> Vec3 {
    grid.cell(coord)
        .map_or(Vec3::ZERO, |cell| cell.position()) + Vec3::up(height)
}

/// How many gems fit in the grid alongside the start and end cells.
#[inline]
pub fn gem_capacity(grid: &MazeGrid) -> usize {
    grid.size().saturating_sub(2)
}

/// Choose distinct gem cells that are neither the start nor the end cell.
///
/// Each gem cell is drawn uniformly over the whole grid and redrawn while it hits the
/// growing set of taken cells. The request is capped at `gem_capacity` first so there is
/// always a free cell left to find.
pub fn place_gems<R: Rng + ?Sized>(grid: &MazeGrid,
                                   start: GridCoordinate,
                                   end: GridCoordinate,
                                   requested: GemCount,
                                   rng: &mut R)
                                   -> Vec<GridCoordinate> {
    let mut taken = BitSet::with_capacity(grid.size());
    for coord in &[start, end] {
        if let Some(index) = grid.grid_coordinate_to_index(*coord) {
            taken.insert(index);
        }
    }

    let free_cells = grid.size() - taken.len();
    let GemCount(requested_count) = requested;
    let count = if requested_count > free_cells {
        warn!("Requested {} gems but only {} cells are free, placing {}",
              requested_count, free_cells, free_cells);
        free_cells
    } else {
        requested_count
    };

    let mut gems = Vec::with_capacity(count);
    while gems.len() < count {
        let index = rng.gen_range(0..grid.size());
        if taken.insert(index) {
            gems.push(GridCoordinate::from_row_major_index(index, grid.width()));
        }
    }
    gems
}
