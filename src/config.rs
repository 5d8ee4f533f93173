//! Maze configuration: the fixed board measurements and presets loaded once per session, and
//! the player adjustable settings chosen among them.

use error_chain::bail;
use log::{info, warn};
use serde_derive::Deserialize;
use std::fs;
use std::path::Path;

use crate::errors::*;
use crate::grid::GridLayout;
use crate::placement::PropOffsets;
use crate::units::{GemCount, Height, Width};
use crate::walls::WallDimensions;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Allowed maze sizes as `[width, height]` cell counts.
    pub grid_sizes: Vec<[usize; 2]>,
    /// Full board floor size, border walls included.
    pub floor_width: f32,
    pub floor_depth: f32,
    /// Floor taken up by the border walls, removed before the cells tile the rest.
    pub floor_inset: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub wall_overlap: f32,
    pub wall_base_offset: f32,
    pub min_gem_count: usize,
    pub max_gem_count: usize,
    /// Draw a fresh gem count from `[min_gem_count, max_gem_count]` for every new maze
    /// instead of using the player's setting.
    pub randomize_gem_count: bool,
    /// Fixed seed for reproducible mazes.
    pub seed: Option<u64>,
    pub offsets: PropOffsets,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            grid_sizes: vec![[5, 5], [7, 7], [9, 9], [11, 11], [13, 13]],
            floor_width: 15.0,
            floor_depth: 15.0,
            floor_inset: 1.0,
            wall_height: 1.5,
            wall_thickness: 0.5,
            wall_overlap: 0.5,
            wall_base_offset: 0.25,
            min_gem_count: 1,
            max_gem_count: 6,
            randomize_gem_count: false,
            seed: None,
            offsets: PropOffsets::default(),
        }
    }
}

impl MazeConfig {
    pub fn from_toml_str(data: &str) -> Result<MazeConfig> {
        let config: MazeConfig = toml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<MazeConfig> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .chain_err(|| format!("Failed to read maze config {}", path.display()))?;
        let config = MazeConfig::from_toml_str(&data)
            .chain_err(|| format!("Failed to load maze config {}", path.display()))?;
        info!("Loaded maze config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_sizes.is_empty() {
            bail!(ErrorKind::InvalidConfig("no grid sizes".into()));
        }
        if let Some(size) = self.grid_sizes.iter().find(|size| size[0] == 0 || size[1] == 0) {
            bail!(ErrorKind::InvalidGridDimensions(size[0], size[1]));
        }
        if let Some(size) = self.grid_sizes.iter().find(|size| size[0] * size[1] < 2) {
            bail!(ErrorKind::GridTooSmall(size[0], size[1]));
        }
        if self.min_gem_count > self.max_gem_count {
            bail!(ErrorKind::InvalidConfig(format!("min_gem_count {} exceeds max_gem_count {}",
                                                   self.min_gem_count, self.max_gem_count)));
        }
        let layout = self.grid_layout();
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(layout.floor_width) || !positive(layout.floor_depth) {
            bail!(ErrorKind::InvalidFloorDimensions(layout.floor_width, layout.floor_depth));
        }
        if !positive(self.wall_height) || !positive(self.wall_thickness) {
            bail!(ErrorKind::InvalidConfig("wall height and thickness must be positive".into()));
        }
        if !self.wall_overlap.is_finite() || self.wall_overlap < 0.0 || !self.wall_base_offset.is_finite() {
            bail!(ErrorKind::InvalidConfig("wall overlap and base offset must be finite, overlap not negative".into()));
        }
        Ok(())
    }

    pub fn grid_size(&self, index: usize) -> Option<(Width, Height)> {
        self.grid_sizes.get(index).map(|size| (Width(size[0]), Height(size[1])))
    }

    /// The floor area the cells tile, border walls excluded.
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            floor_width: self.floor_width - self.floor_inset,
            floor_depth: self.floor_depth - self.floor_inset,
            wall_height: self.wall_height,
            wall_base_offset: self.wall_base_offset,
        }
    }

    pub fn wall_dimensions(&self) -> WallDimensions {
        WallDimensions {
            thickness: self.wall_thickness,
            overlap: self.wall_overlap,
        }
    }
}

/// The player's choices among the configured presets. Setters reject invalid values and keep
/// the previous choice.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeSettings {
    grid_size_index: usize,
    grid_sizes_count: usize,
    gem_spawn_count: usize,
    min_gem_count: usize,
    max_gem_count: usize,
}

impl MazeSettings {
    /// Starts in the middle of both ranges.
    pub fn new(config: &MazeConfig) -> MazeSettings {
        let grid_sizes_count = config.grid_sizes.len();
        MazeSettings {
            grid_size_index: grid_sizes_count.saturating_sub(1) / 2,
            grid_sizes_count,
            gem_spawn_count: config.min_gem_count +
                             (config.max_gem_count.saturating_sub(config.min_gem_count)) / 2,
            min_gem_count: config.min_gem_count,
            max_gem_count: config.max_gem_count,
        }
    }

    #[inline]
    pub fn grid_size_index(&self) -> usize {
        self.grid_size_index
    }

    #[inline]
    pub fn grid_sizes_count(&self) -> usize {
        self.grid_sizes_count
    }

    #[inline]
    pub fn gem_spawn_count(&self) -> GemCount {
        GemCount(self.gem_spawn_count)
    }

    #[inline]
    pub fn gem_count_range(&self) -> (usize, usize) {
        (self.min_gem_count, self.max_gem_count)
    }

    pub fn set_grid_size_index(&mut self, index: usize) -> Result<()> {
        if index >= self.grid_sizes_count {
            warn!("Unable to set grid size: index {} was invalid", index);
            bail!(ErrorKind::InvalidGridSizeIndex(index, self.grid_sizes_count));
        }
        self.grid_size_index = index;
        Ok(())
    }

    pub fn set_gem_spawn_count(&mut self, count: usize) -> Result<()> {
        if count < self.min_gem_count || count > self.max_gem_count {
            warn!("Unable to set gem spawn count: value {} was invalid", count);
            bail!(ErrorKind::GemCountOutOfRange(count, self.min_gem_count, self.max_gem_count));
        }
        self.gem_spawn_count = count;
        Ok(())
    }

    /// Step to the next grid size, wrapping back to the first after the last.
    pub fn cycle_grid_size(&mut self) -> usize {
        self.grid_size_index = if self.grid_size_index + 1 >= self.grid_sizes_count {
            0
        } else {
            self.grid_size_index + 1
        };
        self.grid_size_index
    }

    /// Step to the next gem count, wrapping back to the minimum after the maximum.
    pub fn cycle_gem_count(&mut self) -> GemCount {
        self.gem_spawn_count = if self.gem_spawn_count >= self.max_gem_count {
            self.min_gem_count
        } else {
            self.gem_spawn_count + 1
        };
        GemCount(self.gem_spawn_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MazeConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.grid_size(0), Some((Width(5), Height(5))));
        assert_eq!(config.grid_size(5), None);

        let layout = config.grid_layout();
        assert_eq!(layout.floor_width, 14.0);
        assert_eq!(layout.floor_depth, 14.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = MazeConfig::from_toml_str(r#"
            grid_sizes = [[4, 6], [8, 8]]
            max_gem_count = 3
            seed = 1234

            [offsets]
            ball = 2.0
        "#).expect("config should parse");

        assert_eq!(config.grid_sizes, vec![[4, 6], [8, 8]]);
        assert_eq!(config.max_gem_count, 3);
        assert_eq!(config.min_gem_count, 1);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.wall_thickness, 0.5);
        assert_eq!(config.offsets.ball, 2.0);
        assert_eq!(config.offsets.gem, 1.0);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(MazeConfig::from_toml_str("grid_sizes = []").is_err());
        assert!(MazeConfig::from_toml_str("grid_sizes = [[0, 3]]").is_err());
        match MazeConfig::from_toml_str("grid_sizes = [[9, 9], [1, 1]]") {
            Err(Error(ErrorKind::GridTooSmall(1, 1), _)) => (),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(MazeConfig::from_toml_str("grid_sizes = [[1, 2]]").is_ok());
        assert!(MazeConfig::from_toml_str("min_gem_count = 5\nmax_gem_count = 2").is_err());
        assert!(MazeConfig::from_toml_str("floor_width = 1.0").is_err());
        assert!(MazeConfig::from_toml_str("wall_thickness = -1.0").is_err());
        assert!(MazeConfig::from_toml_str("grid_sizes = 3").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(MazeConfig::from_toml_file("/definitely/not/here/maze.toml").is_err());
    }

    #[test]
    fn settings_start_in_the_middle() {
        let settings = MazeSettings::new(&MazeConfig::default());
        assert_eq!(settings.grid_size_index(), 2);
        assert_eq!(settings.gem_spawn_count(), GemCount(3));
    }

    #[test]
    fn invalid_settings_keep_previous_values() {
        let mut settings = MazeSettings::new(&MazeConfig::default());

        assert!(settings.set_grid_size_index(5).is_err());
        assert_eq!(settings.grid_size_index(), 2);
        settings.set_grid_size_index(4).unwrap();
        assert_eq!(settings.grid_size_index(), 4);

        match settings.set_gem_spawn_count(7) {
            Err(Error(ErrorKind::GemCountOutOfRange(7, 1, 6), _)) => (),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(settings.set_gem_spawn_count(0).is_err());
        assert_eq!(settings.gem_spawn_count(), GemCount(3));
        settings.set_gem_spawn_count(6).unwrap();
        assert_eq!(settings.gem_spawn_count(), GemCount(6));
    }

    #[test]
    fn cycling_wraps_around() {
        let mut settings = MazeSettings::new(&MazeConfig::default());
        assert_eq!(settings.cycle_grid_size(), 3);
        assert_eq!(settings.cycle_grid_size(), 4);
        assert_eq!(settings.cycle_grid_size(), 0);

        settings.set_gem_spawn_count(5).unwrap();
        assert_eq!(settings.cycle_gem_count(), GemCount(6));
        assert_eq!(settings.cycle_gem_count(), GemCount(1));
    }
}
