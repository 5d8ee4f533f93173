use error_chain::bail;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;
use std::fmt;

use crate::cells::{CoordinateSmallVec, Direction, GridCell, GridCoordinate};
use crate::errors::*;
use crate::geometry::Vec3;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{EdgesCount, Height, NodesCount, Width};
use crate::utils;

/// The usable part of the board floor that the cells tile, plus the vertical placement of
/// the walls standing on it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridLayout {
    pub floor_width: f32,
    pub floor_depth: f32,
    pub wall_height: f32,
    /// How far the wall base sits below the floor surface.
    pub wall_base_offset: f32,
}

/// A fixed size grid of maze cells stored in row major order.
pub struct MazeGrid {
    cells: Vec<GridCell>,
    width: Width,
    height: Height,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbour,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: width: {:?}, height: {:?}, links: {:?}",
               self.width, self.height, self.links_count())
    }
}

impl MazeGrid {
    /// Builds a fully populated grid with every cell unvisited and closed off.
    ///
    /// Cells tile the floor edge to edge: cell `(x, y)` is centred at
    /// `-floor_width / 2 + cell_width / 2 + x * cell_width` along the board's `x` axis and
    /// likewise along `z`.
    pub fn new(width: Width, height: Height, layout: &GridLayout) -> Result<MazeGrid> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
            bail!(ErrorKind::InvalidGridDimensions(w, h));
        }
        let floor_ok = |v: f32| v.is_finite() && v > 0.0;
        if !floor_ok(layout.floor_width) || !floor_ok(layout.floor_depth) {
            bail!(ErrorKind::InvalidFloorDimensions(layout.floor_width, layout.floor_depth));
        }

        let cell_width = layout.floor_width / w as f32;
        let cell_depth = layout.floor_depth / h as f32;
        let y = layout.wall_height * 0.5 - layout.wall_base_offset;
        let scale = Vec3::new(cell_width, layout.wall_height, cell_depth);

        let cells = CellIter::new(width, height)
            .map(|coord| {
                let position = Vec3::new(
                    -(layout.floor_width * 0.5) + (cell_width * 0.5) + (coord.x as f32 * cell_width),
                    y,
                    -(layout.floor_depth * 0.5) + (cell_depth * 0.5) + (coord.y as f32 * cell_depth));
                GridCell::new(coord, position, scale)
            })
            .collect();

        Ok(MazeGrid { cells, width, height })
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
        self.cells.len()
    }

    /// Cells and the upper bound of carvable edges, sized for graph allocation.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()),
         EdgesCount(utils::interior_edges_count(self.width.0, self.height.0)))
    }

    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&GridCell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut GridCell> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        GridCoordinate::from_row_major_index(index, self.width)
    }

    /// The coordinate of the neighbour in the given direction or `None` at the maze edge.
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: Direction)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[Direction])
                                    -> smallvec::SmallVec<[Option<GridCoordinate>; 4]> {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    /// Cells to the Top, Right, Bottom or Left of a cell, linked or not.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Carve a passage from `coord` towards `direction`, setting the connection flag on both
    /// cells. Returns the neighbour that was linked to.
    pub fn link(&mut self,
                coord: GridCoordinate,
                direction: Direction)
                -> ::std::result::Result<GridCoordinate, CellLinkError> {
        let neighbour_coord = self.neighbour_at_direction(coord, direction)
                                  .ok_or(CellLinkError::InvalidGridCoordinate)?;
        let a_index = self.grid_coordinate_to_index(coord).ok_or(CellLinkError::InvalidGridCoordinate)?;
        let b_index = self.grid_coordinate_to_index(neighbour_coord)
                          .ok_or(CellLinkError::InvalidGridCoordinate)?;

        self.cells[a_index].connected[direction.index()] = true;
        self.cells[b_index].connected[direction.opposite().index()] = true;
        Ok(neighbour_coord)
    }

    /// Link two adjacent cells.
    pub fn link_cells(&mut self,
                      a: GridCoordinate,
                      b: GridCoordinate)
                      -> ::std::result::Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let direction = self.direction_between(a, b).ok_or(CellLinkError::NotNeighbour)?;
        self.link(a, direction).map(|_| ())
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (self.cell(a), self.direction_between(a, b)) {
            (Some(cell), Some(direction)) => cell.is_connected(direction),
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() &&
        self.cell(coord).map_or(false, |cell| cell.is_connected(direction))
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        self.cell(coord).map(|cell| {
            cell.connected_directions()
                .iter()
                .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                .collect()
        })
    }

    /// Number of carved passages, each shared edge counted once.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every carved passage exactly once, as `(cell, neighbour to its Right or Bottom)`.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        static FORWARD: [Direction; 2] = [Direction::Right, Direction::Bottom];
        self.iter().flat_map(move |coord| {
            FORWARD.iter()
                .filter(move |dir| self.is_neighbour_linked(coord, **dir))
                .filter_map(move |dir| {
                    self.neighbour_at_direction(coord, *dir).map(|neighbour| (coord, neighbour))
                })
        })
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.height)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.width, self.height)
    }

    /// The carved passages as an undirected graph whose node indices are the cells' row
    /// major indices.
    pub fn link_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            // Links only ever join valid coordinates.
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    fn direction_between(&self, a: GridCoordinate, b: GridCoordinate) -> Option<Direction> {
        Direction::ALL
            .iter()
            .cloned()
            .find(|dir| self.neighbour_at_direction(a, *dir) == Some(b))
    }
}
