use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Direction, DirectionSmallVec, GridCoordinate};
use crate::grid::MazeGrid;

/// Carve a perfect maze into the grid with the recursive backtracker (randomized depth first
/// search with an explicit stack).
///
/// Starting from `seed`, the cell on top of the stack is marked visited the first time it is
/// reached, then a passage is carved to one of its unvisited neighbours, chosen uniformly
/// at random, and that neighbour is pushed. A cell with no unvisited neighbours is popped
/// and we backtrack to the cell below it. Every cell gets visited exactly once, so the
/// passages form a spanning tree: `size - 1` links, no loops and a single route between any
/// two cells.
///
/// The grid must be freshly built: cells already visited are never entered.
/// Returns the number of passages carved. An invalid `seed` carves nothing.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut MazeGrid,
                                              seed: GridCoordinate,
                                              rng: &mut R)
                                              -> usize {
    if !grid.is_valid_coordinate(seed) {
        return 0;
    }

    let mut stack: Vec<GridCoordinate> = Vec::with_capacity(grid.size());
    stack.push(seed);
    let mut carved = 0;

    while let Some(&current) = stack.last() {

        if let Some(cell) = grid.cell_mut(current) {
            cell.visited = true;
        }

        let unvisited_directions = Direction::ALL
            .iter()
            .cloned()
            .filter(|dir| {
                grid.neighbour_at_direction(current, *dir)
                    .and_then(|neighbour| grid.cell(neighbour))
                    .map_or(false, |neighbour_cell| !neighbour_cell.visited)
            })
            .collect::<DirectionSmallVec>();

        match unvisited_directions.choose(rng) {
            Some(&direction) => {
                // The filter above only keeps directions with an existing neighbour.
                if let Ok(neighbour) = grid.link(current, direction) {
                    stack.push(neighbour);
                    carved += 1;
                }
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    debug_assert_eq!(carved + 1, grid.size(), "the carved passages do not span the grid");
    debug!("carved {} passages from seed {} on a {}x{} grid",
           carved, seed, grid.width().0, grid.height().0);
    carved
}

/// Draw the start and end cells: two independent uniform draws over the whole grid, redrawn
/// only while both land on the same cell. There is no constraint on how far apart they are.
///
/// Returns `None` for a single cell grid, where distinct cells do not exist.
pub fn choose_start_end<R: Rng + ?Sized>(grid: &MazeGrid,
                                         rng: &mut R)
                                         -> Option<(GridCoordinate, GridCoordinate)> {
    if grid.size() < 2 {
        return None;
    }
    loop {
        let start = grid.random_cell(rng);
        let end = grid.random_cell(rng);
        if start != end {
            return Some((start, end));
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::tests::small_grid;
    use crate::pathing;

    fn carved_grid(w: usize, h: usize, seed: u64) -> MazeGrid {
        let mut g = small_grid(w, h);
        let mut rng = SmallRng::seed_from_u64(seed);
        let start = g.random_cell(&mut rng);
        recursive_backtracker(&mut g, start, &mut rng);
        g
    }

    fn check_perfect_maze(g: &MazeGrid) {
        assert!(g.cells().iter().all(|cell| cell.visited));
        assert_eq!(g.links_count(), g.size() - 1);
        assert!(pathing::is_perfect_maze(g));

        // Every cell is reachable from the first one.
        let distances = pathing::Distances::new(g, GridCoordinate::new(0, 0)).unwrap();
        for coord in g.iter() {
            assert!(distances.distance_from_start_to(coord).is_some());
        }
    }

    fn check_symmetric_links(g: &MazeGrid) {
        for coord in g.iter() {
            let cell = g.cell(coord).unwrap();
            for dir in Direction::ALL.iter() {
                match g.neighbour_at_direction(coord, *dir) {
                    Some(neighbour) => {
                        let neighbour_cell = g.cell(neighbour).unwrap();
                        assert_eq!(cell.is_connected(*dir),
                                   neighbour_cell.is_connected(dir.opposite()));
                    }
                    None => assert!(!cell.is_connected(*dir)),
                }
            }
        }
    }

    #[test]
    fn three_by_three_fixed_seed() {
        let mut g = small_grid(3, 3);
        let mut rng = SmallRng::seed_from_u64(2019);
        let carved = recursive_backtracker(&mut g, GridCoordinate::new(0, 0), &mut rng);
        assert_eq!(carved, 8);
        assert_eq!(g.links_count(), 8);
        check_perfect_maze(&g);
        check_symmetric_links(&g);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = carved_grid(6, 4, 99);
        let b = carved_grid(6, 4, 99);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn single_cell_grid() {
        let g = carved_grid(1, 1, 1);
        assert_eq!(g.links_count(), 0);
        assert!(g.cell(GridCoordinate::new(0, 0)).unwrap().visited);
    }

    #[test]
    fn corridor_grids() {
        for &(w, h) in &[(1, 7), (7, 1), (2, 1)] {
            let g = carved_grid(w, h, 5);
            check_perfect_maze(&g);
        }
    }

    #[test]
    fn invalid_seed_carves_nothing() {
        let mut g = small_grid(3, 3);
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(recursive_backtracker(&mut g, GridCoordinate::new(5, 5), &mut rng), 0);
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn every_direction_gets_carved() {
        // Over a few mazes passages get carved in all four directions.
        let mut counts = [0usize; 4];
        for seed in 0..20 {
            let g = carved_grid(8, 8, seed);
            for cell in g.cells() {
                for dir in cell.connected_directions().iter() {
                    counts[dir.index()] += 1;
                }
            }
        }
        assert!(counts.iter().all(|&count| count > 0));
        // Each passage shows up once from each side.
        assert_eq!(counts[Direction::Top.index()], counts[Direction::Bottom.index()]);
        assert_eq!(counts[Direction::Left.index()], counts[Direction::Right.index()]);
    }

    #[test]
    fn start_end_are_distinct() {
        let g = small_grid(2, 1);
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..500 {
            let (start, end) = choose_start_end(&g, &mut rng).unwrap();
            assert_ne!(start, end);
            assert!(g.is_valid_coordinate(start));
            assert!(g.is_valid_coordinate(end));
        }
    }

    #[test]
    fn no_start_end_on_single_cell() {
        let g = small_grid(1, 1);
        let mut rng = SmallRng::seed_from_u64(17);
        assert_eq!(choose_start_end(&g, &mut rng), None);
    }

    #[test]
    fn quickcheck_perfect_mazes() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = ((w % 16) as usize, (h % 16) as usize);
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let g = carved_grid(w, h, seed);
            check_perfect_maze(&g);
            check_symmetric_links(&g);
            TestResult::passed()
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult)
    }
}
