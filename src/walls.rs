use serde_derive::Serialize;

use crate::cells::{Direction, GridCoordinate};
use crate::geometry::Vec3;
use crate::grid::MazeGrid;
use crate::utils::{self, FnvHashSet};

/// Which way a wall runs across the board.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize)]
pub enum WallAxis {
    /// Blocks travel between a cell and its Top / Bottom neighbour, long along `x`.
    AlongX,
    /// Blocks travel between a cell and its Left / Right neighbour, long along `z`.
    AlongZ,
}

/// Placement of a single wall block in board space, ready to be instantiated by a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct WallSpec {
    pub position: Vec3,
    pub scale: Vec3,
    pub axis: WallAxis,
    /// The two cells the wall separates, in row major order.
    pub between: (GridCoordinate, GridCoordinate),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallDimensions {
    pub thickness: f32,
    /// Added to the wall length so neighbouring walls overlap at the corners.
    pub overlap: f32,
}

/// Shared edges are keyed by the lower cell index and whether the edge leads Right or
/// Bottom from it.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
struct EdgeKey(usize, bool);

/// One wall for every pair of adjacent cells with no passage between them.
///
/// Every adjacency is seen from both of its cells; a set of canonical edge keys makes sure
/// only the first sighting emits a wall. The grid itself is left untouched.
/// Walls are not produced along the outer edge of the grid, the board's border covers it.
pub fn derive_walls(grid: &MazeGrid, dimensions: &WallDimensions) -> Vec<WallSpec> {
    let edges_hint = utils::interior_edges_count(grid.width().0, grid.height().0);
    let mut walled_edges: FnvHashSet<EdgeKey> = utils::fnv_hashset(edges_hint);
    let mut walls = Vec::with_capacity(edges_hint);

    for cell in grid.cells() {
        let coord = cell.grid_position();
        for dir in Direction::ALL.iter().cloned() {
            if cell.is_connected(dir) {
                continue;
            }
            let neighbour = match grid.neighbour_at_direction(coord, dir).and_then(|n| grid.cell(n)) {
                Some(neighbour) => neighbour,
                None => continue,
            };

            let key = edge_key(grid, coord, dir);
            if !walled_edges.insert(key) {
                continue;
            }

            let midpoint = cell.position().midpoint(&neighbour.position());
            let mut position = cell.position();
            let mut scale = cell.scale();
            let axis = if dir.is_vertical() {
                position.z = midpoint.z;
                scale.z = dimensions.thickness;
                scale.x += dimensions.overlap;
                WallAxis::AlongX
            } else {
                position.x = midpoint.x;
                scale.x = dimensions.thickness;
                scale.z += dimensions.overlap;
                WallAxis::AlongZ
            };

            let neighbour_coord = neighbour.grid_position();
            let between = if (coord.y, coord.x) < (neighbour_coord.y, neighbour_coord.x) {
                (coord, neighbour_coord)
            } else {
                (neighbour_coord, coord)
            };
            walls.push(WallSpec { position, scale, axis, between });
        }
    }

    walls
}

fn edge_key(grid: &MazeGrid, coord: GridCoordinate, dir: Direction) -> EdgeKey {
    let (origin, forward) = match dir {
        Direction::Right | Direction::Bottom => (Some(coord), dir),
        Direction::Left | Direction::Top => (grid.neighbour_at_direction(coord, dir), dir.opposite()),
    };
    let index = origin.and_then(|c| grid.grid_coordinate_to_index(c)).unwrap_or(usize::MAX);
    EdgeKey(index, forward == Direction::Bottom)
}
