//! A play session: the configuration, the live maze and the state of the game played on it.
//!
//! Callers drive the session with explicit calls (a button press, a trigger hit, a frame's
//! elapsed time) and hand the returned `MazeSnapshot` to whatever instantiates the props.

use error_chain::bail;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{MazeConfig, MazeSettings};
use crate::errors::*;
use crate::geometry::Vec3;
use crate::maze::Maze;
use crate::units::GemCount;
use crate::walls::WallSpec;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GameState {
    /// A game has not yet been started
    Start,
    Paused,
    Playing,
    /// The flag was reached
    Finished,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GemState {
    pub position: Vec3,
    pub active: bool,
}

/// Everything a renderer needs to lay out the current maze.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeSnapshot {
    pub walls: Vec<WallSpec>,
    pub ball_spawn: Vec3,
    pub flag_spawn: Vec3,
    pub flag_active: bool,
    pub gems: Vec<GemState>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CollectOutcome {
    /// The gem with this index (in collection order) is now active.
    NextGem(usize),
    /// That was the last gem, the flag is now active.
    FlagActivated,
}

pub struct GameSession<R: Rng = SmallRng> {
    config: MazeConfig,
    settings: MazeSettings,
    rng: R,
    maze: Option<Maze>,
    state: GameState,
    gems_collected: usize,
    elapsed_seconds: f32,
}

impl GameSession<SmallRng> {
    /// Seeds from the config's `seed`, or from entropy when it has none.
    pub fn new(config: MazeConfig) -> Result<GameSession<SmallRng>> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        GameSession::with_rng(config, rng)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(config: MazeConfig, rng: R) -> Result<GameSession<R>> {
        config.validate()?;
        let settings = MazeSettings::new(&config);
        Ok(GameSession {
            config,
            settings,
            rng,
            maze: None,
            state: GameState::Start,
            gems_collected: 0,
            elapsed_seconds: 0.0,
        })
    }

    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    #[inline]
    pub fn settings(&self) -> &MazeSettings {
        &self.settings
    }

    #[inline]
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn gems_collected(&self) -> usize {
        self.gems_collected
    }

    #[inline]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_seconds
    }

    pub fn set_grid_size_index(&mut self, index: usize) -> Result<()> {
        self.settings.set_grid_size_index(index)
    }

    pub fn set_gem_spawn_count(&mut self, count: usize) -> Result<()> {
        self.settings.set_gem_spawn_count(count)
    }

    pub fn cycle_grid_size(&mut self) -> usize {
        self.settings.cycle_grid_size()
    }

    pub fn cycle_gem_count(&mut self) -> GemCount {
        self.settings.cycle_gem_count()
    }

    /// Replace the current maze with a new one generated from the current settings.
    /// On failure the current maze and its progress are left as they were.
    pub fn new_maze(&mut self) -> Result<MazeSnapshot> {
        let index = self.settings.grid_size_index();
        let (width, height) = match self.config.grid_size(index) {
            Some(size) => size,
            None => bail!(ErrorKind::InvalidGridSizeIndex(index, self.config.grid_sizes.len())),
        };
        let gem_count = if self.config.randomize_gem_count {
            let (min, max) = self.settings.gem_count_range();
            GemCount(self.rng.gen_range(min..=max))
        } else {
            self.settings.gem_spawn_count()
        };

        let maze = Maze::generate(&self.config, width, height, gem_count, &mut self.rng)?;
        self.maze = Some(maze);
        self.restart();
        self.snapshot().ok_or_else(|| ErrorKind::NoActiveMaze.into())
    }

    /// Keep the maze but put the ball back at the start and the collectibles back in their
    /// initial state.
    pub fn reset_maze(&mut self) -> Result<MazeSnapshot> {
        if self.maze.is_none() {
            bail!(ErrorKind::NoActiveMaze);
        }
        debug!("Resetting maze");
        self.restart();
        self.snapshot().ok_or_else(|| ErrorKind::NoActiveMaze.into())
    }

    pub fn snapshot(&self) -> Option<MazeSnapshot> {
        let maze = self.maze.as_ref()?;
        let offsets = &self.config.offsets;
        let props = maze.props();
        let active_gem = self.active_gem();

        let gems = props.gem_spawns(maze.grid(), offsets)
            .into_iter()
            .enumerate()
            .map(|(index, position)| {
                GemState {
                    position,
                    active: active_gem == Some(index),
                }
            })
            .collect();

        Some(MazeSnapshot {
            walls: maze.walls().to_vec(),
            ball_spawn: props.ball_spawn(maze.grid(), offsets),
            flag_spawn: props.flag_spawn(maze.grid(), offsets),
            flag_active: self.is_flag_active(),
            gems,
        })
    }

    /// Index of the one gem currently available to collect.
    pub fn active_gem(&self) -> Option<usize> {
        let gems_count = self.maze.as_ref().map_or(0, |maze| maze.gems().len());
        if self.gems_collected < gems_count {
            Some(self.gems_collected)
        } else {
            None
        }
    }

    pub fn is_flag_active(&self) -> bool {
        self.maze.as_ref().map_or(false, |maze| self.gems_collected >= maze.gems().len())
    }

    /// The ball touched the active gem.
    pub fn collect_gem(&mut self) -> Option<CollectOutcome> {
        if self.state != GameState::Playing {
            return None;
        }
        self.active_gem()?;
        self.gems_collected += 1;

        let outcome = match self.active_gem() {
            Some(next) => CollectOutcome::NextGem(next),
            None => CollectOutcome::FlagActivated,
        };
        debug!("Gem {} collected: {:?}", self.gems_collected, outcome);
        Some(outcome)
    }

    /// The ball touched the flag. Finishes the game if the flag is active.
    pub fn reach_flag(&mut self) -> bool {
        if self.state != GameState::Playing || !self.is_flag_active() {
            return false;
        }
        info!("Maze finished in {}", self.timer_text());
        self.set_state(GameState::Finished);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state == GameState::Playing {
            self.set_state(GameState::Paused);
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.state == GameState::Paused {
            self.set_state(GameState::Playing);
            true
        } else {
            false
        }
    }

    /// Advance the play timer; only runs while playing.
    pub fn tick(&mut self, delta_seconds: f32) {
        if self.state == GameState::Playing && delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed_seconds += delta_seconds;
        }
    }

    /// The elapsed play time as `MM:SS`.
    pub fn timer_text(&self) -> String {
        let total = self.elapsed_seconds.floor() as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    fn restart(&mut self) {
        self.gems_collected = 0;
        self.elapsed_seconds = 0.0;
        self.set_state(GameState::Playing);
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            debug!("Game state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }
}
