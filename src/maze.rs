use error_chain::bail;
use log::info;
use rand::Rng;

use crate::cells::GridCoordinate;
use crate::config::MazeConfig;
use crate::errors::*;
use crate::generators;
use crate::grid::MazeGrid;
use crate::pathing;
use crate::placement::{self, PropLayout};
use crate::units::{GemCount, Height, Width};
use crate::walls::{self, WallSpec};

/// One generated maze: the carved grid, the walls standing on it and where its props spawn.
#[derive(Debug)]
pub struct Maze {
    grid: MazeGrid,
    props: PropLayout,
    walls: Vec<WallSpec>,
    generation_seed: GridCoordinate,
}

impl Maze {
    /// One full generation pass: build the grid, carve it from a random seed cell, pick the
    /// start and end cells, place the gems and derive the walls.
    pub fn generate<R: Rng + ?Sized>(config: &MazeConfig,
                                     width: Width,
                                     height: Height,
                                     gem_count: GemCount,
                                     rng: &mut R)
                                     -> Result<Maze> {
        let mut grid = MazeGrid::new(width, height, &config.grid_layout())?;

        let generation_seed = grid.random_cell(rng);
        generators::recursive_backtracker(&mut grid, generation_seed, rng);

        let (start, end) = match generators::choose_start_end(&grid, rng) {
            Some(start_end) => start_end,
            None => bail!(ErrorKind::GridTooSmall(width.0, height.0)),
        };
        let gems = placement::place_gems(&grid, start, end, gem_count, rng);
        let walls = walls::derive_walls(&grid, &config.wall_dimensions());

        info!("Generated {}x{} maze: seed cell {}, start {}, end {}, {} gems, {} walls",
              width.0, height.0, generation_seed, start, end, gems.len(), walls.len());

        Ok(Maze {
            grid,
            props: PropLayout { start, end, gems },
            walls,
            generation_seed,
        })
    }

    #[inline]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    #[inline]
    pub fn props(&self) -> &PropLayout {
        &self.props
    }

    #[inline]
    pub fn walls(&self) -> &[WallSpec] {
        &self.walls
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.props.start
    }

    #[inline]
    pub fn end(&self) -> GridCoordinate {
        self.props.end
    }

    #[inline]
    pub fn gems(&self) -> &[GridCoordinate] {
        &self.props.gems
    }

    /// The cell the depth first search started carving from.
    #[inline]
    pub fn generation_seed(&self) -> GridCoordinate {
        self.generation_seed
    }

    /// The single route from the start cell to the end cell.
    pub fn solution(&self) -> Option<Vec<GridCoordinate>> {
        let distances = pathing::Distances::new(&self.grid, self.props.start)?;
        pathing::shortest_path(&self.grid, &distances, self.props.end)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::utils::FnvHashSet;

    fn generate(w: usize, h: usize, gems: usize, seed: u64) -> Result<Maze> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Maze::generate(&MazeConfig::default(), Width(w), Height(h), GemCount(gems), &mut rng)
    }

    #[test]
    fn generated_maze_is_complete() {
        for seed in 0..10 {
            let maze = generate(9, 7, 4, seed).unwrap();
            let grid = maze.grid();
            assert!(grid.cells().iter().all(|cell| cell.visited));
            assert_eq!(grid.links_count(), 62);
            assert!(pathing::is_perfect_maze(grid));

            assert_ne!(maze.start(), maze.end());
            assert_eq!(maze.gems().len(), 4);
            let taken = maze.gems()
                .iter()
                .cloned()
                .chain(vec![maze.start(), maze.end()])
                .collect::<FnvHashSet<_>>();
            assert_eq!(taken.len(), 6);

            let solution = maze.solution().unwrap();
            assert_eq!(solution.first(), Some(&maze.start()));
            assert_eq!(solution.last(), Some(&maze.end()));
            assert!(grid.is_valid_coordinate(maze.generation_seed()));
        }
    }

    #[test]
    fn walls_fill_every_uncarved_edge() {
        let maze = generate(5, 5, 1, 3).unwrap();
        // 40 shared edges in a 5x5 grid, 24 of them carved
        assert_eq!(maze.walls().len(), 40 - 24);
    }

    #[test]
    fn single_cell_maze_is_rejected() {
        match generate(1, 1, 0, 1) {
            Err(Error(ErrorKind::GridTooSmall(1, 1), _)) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(generate(0, 4, 0, 1).is_err());
    }

    #[test]
    fn gem_request_beyond_capacity_terminates() {
        let maze = generate(2, 2, 50, 9).unwrap();
        assert_eq!(maze.gems().len(), 2);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(6, 6, 3, 77).unwrap();
        let b = generate(6, 6, 3, 77).unwrap();
        assert_eq!(a.grid().cells(), b.grid().cells());
        assert_eq!(a.props(), b.props());
        assert_eq!(a.walls(), b.walls());
    }
}
