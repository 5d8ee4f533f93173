//! Route finding over the carved passages of a maze.
//!
//! There are no weights on the links, every step is one cell further from the start, so a
//! breadth first flood fill gives the shortest distance to every reachable cell.

use itertools::Itertools;
use petgraph::algo::{connected_components, is_cyclic_undirected};

use crate::cells::GridCoordinate;
use crate::grid::MazeGrid;
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill distances from `start_coordinate`. `None` if the start is not on the grid.
    pub fn new(grid: &MazeGrid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // The distances map doubles as the visited set: a cell's distance is final the first
        // time it is reached.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                max = ::std::cmp::max(max, distance_to_cell);

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in links.iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// All cells at the maximum distance, in row major order.
    pub fn furthest_points_on_grid(&self) -> Vec<GridCoordinate> {
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(coord, _)| *coord)
            .sorted_by_key(|coord| (coord.y, coord.x))
            .collect()
    }
}

/// Walk back from `end_point` towards the start, always stepping to a linked neighbour that
/// is one closer. Returns the path from start to end inclusive, or `None` if `end_point` is
/// unreachable.
pub fn shortest_path(grid: &MazeGrid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.links(current_coord)?
            .iter()
            .cloned()
            .find(|coord| {
                distances_from_start.distance_from_start_to(*coord) == Some(current_distance - 1)
            });

        match closer {
            Some(coord) => {
                current_coord = coord;
                current_distance -= 1;
                path.push(current_coord);
            }
            // The distances were computed for some other grid.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some
/// arbitrary long path.
pub fn longest_path(grid: &MazeGrid) -> Option<Vec<GridCoordinate>> {
    let first_distances = Distances::new(grid, GridCoordinate::new(0, 0))?;

    // The start of the longest path is the point furthest away from an arbitrary point.
    let long_path_start = *first_distances.furthest_points_on_grid().first()?;
    let distances_from_start = Distances::new(grid, long_path_start)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}

/// Is the passage graph a spanning tree: one connected component and no cycles.
pub fn is_perfect_maze(grid: &MazeGrid) -> bool {
    let graph = grid.link_graph();
    graph.node_count() > 0 &&
    connected_components(&graph) == 1 &&
    !is_cyclic_undirected(&graph)
}
