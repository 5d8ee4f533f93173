use docopt::Docopt;
use log::info;
use marble_maze::{
    config::MazeConfig,
    errors::*,
    grid::MazeGrid,
    grid_displays::{gem_label, MazeDisplay, PathDisplay, PropsDisplay},
    session::{GameSession, MazeSnapshot},
    walls::WallSpec,
};
use serde_derive::{Deserialize, Serialize};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Marble Maze

Usage:
    marble_maze -h | --help
    marble_maze [--config=<path>] [--size-index=<n>] [--gems=<n>] [--seed=<n>] [--show-path] [--save-walls=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --config=<path>        TOML maze configuration file. Built in defaults are used without one.
    --size-index=<n>       Which of the configured grid sizes to generate, counting from 0.
    --gems=<n>             Number of gems to place, within the configured gem count range.
    --seed=<n>             Seed the random number generator for a reproducible maze.
    --show-path            Mark the route from the start (S) to the flag (E) in the text rendering.
    --save-walls=<path>    Serialize the wall placements (position, scale, axis, separated cells) to a TOML file.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_config: String,
    flag_size_index: Option<usize>,
    flag_gems: Option<usize>,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_save_walls: String,
    flag_save_edges: String,
}

#[derive(Serialize)]
struct WallsFile<'a> {
    walls: &'a [WallSpec],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut config = if args.flag_config.is_empty() {
        MazeConfig::default()
    } else {
        MazeConfig::from_toml_file(&args.flag_config)?
    };
    if args.flag_seed.is_some() {
        config.seed = args.flag_seed;
    }

    let mut session = GameSession::new(config)?;
    if let Some(index) = args.flag_size_index {
        session.set_grid_size_index(index)?;
    }
    if let Some(gems) = args.flag_gems {
        session.set_gem_spawn_count(gems)?;
    }

    let snapshot = session.new_maze()?;
    let maze = session.maze().ok_or(ErrorKind::NoActiveMaze)?;

    let path_display = if args.flag_show_path {
        maze.solution().map(|path| PathDisplay::new(&path))
    } else {
        None
    };
    let props_display = match path_display {
        Some(ref path) => PropsDisplay::new(maze.props()).over(path),
        None => PropsDisplay::new(maze.props()),
    };
    println!("{}", MazeDisplay::new(maze.grid()).with_cells(&props_display));
    print_summary(&snapshot);

    if !args.flag_save_walls.is_empty() {
        save_walls(&snapshot.walls, &args.flag_save_walls)?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(maze.grid(), &args.flag_save_edges)?;
    }

    Ok(())
}

fn print_summary(snapshot: &MazeSnapshot) {
    println!("ball spawn: {}", snapshot.ball_spawn);
    println!("flag spawn: {}", snapshot.flag_spawn);
    for (index, gem) in snapshot.gems.iter().enumerate() {
        println!("gem {}: {}{}", gem_label(index), gem.position, if gem.active { " (active)" } else { "" });
    }
    println!("walls: {}", snapshot.walls.len());
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_walls(walls: &[WallSpec], file_path: &str) -> Result<()> {
    let data = toml::to_string(&WallsFile { walls })?;
    write_text_to_file(&data, file_path)
        .chain_err(|| format!("Failed to write walls to file {}", file_path))?;
    info!("Saved {} walls to {}", walls.len(), file_path);
    Ok(())
}

fn save_maze_graph(maze_grid: &MazeGrid, file_path: &str) -> Result<()> {
    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze_grid.size(), maze_grid.links_count()));

    for (src, dst) in maze_grid.iter_links() {
        // iter_links only yields coordinates on the grid
        if let (Some(index_a), Some(index_b)) = (maze_grid.grid_coordinate_to_index(src),
                                                 maze_grid.grid_coordinate_to_index(dst)) {
            graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
        }
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
