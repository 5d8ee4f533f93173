//! **marble_maze** generates perfect mazes for a tilting marble board game and lays out the
//! walls, ball, gems and finish flag on the board.

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod maze;
pub mod pathing;
pub mod placement;
pub mod session;
pub mod units;
pub mod walls;
mod utils;
