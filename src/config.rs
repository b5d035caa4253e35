use std::{path::PathBuf, str::FromStr};

use rand::rngs::StdRng;
use tracing::Level;

use crate::{
    error::MazeError,
    generators::{OpenChance, get_rng},
    maze::Maze,
};

/// Runtime settings for the maze binaries.
#[derive(Debug, Clone)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    /// Render padding per cell, must be even.
    pub scale: usize,
    pub open_chance: OpenChance,
    /// Seed for reproducible mazes. A fresh seed is drawn from the OS when unset.
    pub seed: Option<u64>,
    pub log_level: Level,
    /// Directory the log file is written to.
    pub log_dir: PathBuf,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: Maze::DEFAULT_WIDTH,
            height: Maze::DEFAULT_HEIGHT,
            scale: Maze::DEFAULT_SCALE,
            open_chance: OpenChance::DEFAULT,
            seed: None,
            log_level: Level::INFO,
            log_dir: PathBuf::from("."),
        }
    }
}

impl MazeConfig {
    pub const WIDTH_VAR: &'static str = "MAZEWEAVE_WIDTH";
    pub const HEIGHT_VAR: &'static str = "MAZEWEAVE_HEIGHT";
    pub const SCALE_VAR: &'static str = "MAZEWEAVE_SCALE";
    pub const OPEN_CHANCE_VAR: &'static str = "MAZEWEAVE_OPEN_CHANCE";
    pub const SEED_VAR: &'static str = "MAZEWEAVE_SEED";
    pub const LOG_VAR: &'static str = "MAZEWEAVE_LOG";
    pub const LOG_DIR_VAR: &'static str = "MAZEWEAVE_LOG_DIR";

    /// Defaults overridden by any `MAZEWEAVE_*` environment variables that are set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name. Values that fail to parse are skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(width) = parse_var(&lookup, Self::WIDTH_VAR) {
            self.width = width;
        }
        if let Some(height) = parse_var(&lookup, Self::HEIGHT_VAR) {
            self.height = height;
        }
        if let Some(scale) = parse_var(&lookup, Self::SCALE_VAR) {
            self.scale = scale;
        }
        if let Some(percent) = parse_var::<u8>(&lookup, Self::OPEN_CHANCE_VAR) {
            match OpenChance::new(percent) {
                Ok(open_chance) => self.open_chance = open_chance,
                Err(err) => tracing::warn!("[config] ignoring {}: {}", Self::OPEN_CHANCE_VAR, err),
            }
        }
        if let Some(seed) = parse_var(&lookup, Self::SEED_VAR) {
            self.seed = Some(seed);
        }
        if let Some(level) = parse_var(&lookup, Self::LOG_VAR) {
            self.log_level = level;
        }
        if let Some(dir) = lookup(Self::LOG_DIR_VAR) {
            self.log_dir = PathBuf::from(dir);
        }
        self
    }

    /// Builds an empty maze with the configured dimensions.
    pub fn build_maze(&self) -> Result<Maze, MazeError> {
        Maze::new(self.width, self.height, self.scale)
    }

    pub fn rng(&self) -> StdRng {
        get_rng(self.seed)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("[config] ignoring {}: cannot parse {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MazeConfig::default();
        assert_eq!((config.width, config.height, config.scale), (40, 30, 4));
        assert_eq!(config.open_chance, OpenChance::DEFAULT);
        assert_eq!(config.seed, None);
        assert!(config.build_maze().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = MazeConfig::default().with_overrides(lookup_from(&[
            ("MAZEWEAVE_WIDTH", "12"),
            ("MAZEWEAVE_HEIGHT", " 8 "),
            ("MAZEWEAVE_OPEN_CHANCE", "0"),
            ("MAZEWEAVE_SEED", "1234"),
            ("MAZEWEAVE_LOG", "debug"),
            ("MAZEWEAVE_LOG_DIR", "/tmp/mazes"),
        ]));
        assert_eq!((config.width, config.height), (12, 8));
        assert_eq!(config.open_chance, OpenChance::NEVER);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/mazes"));
        let maze = config.build_maze().unwrap();
        assert_eq!((maze.width(), maze.height()), (12, 8));
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let config = MazeConfig::default().with_overrides(lookup_from(&[
            ("MAZEWEAVE_WIDTH", "wide"),
            ("MAZEWEAVE_OPEN_CHANCE", "101"),
        ]));
        assert_eq!(config.width, Maze::DEFAULT_WIDTH);
        assert_eq!(config.open_chance, OpenChance::DEFAULT);
    }

    #[test]
    fn test_invalid_scale_fails_at_build() {
        let config = MazeConfig::default().with_overrides(lookup_from(&[("MAZEWEAVE_SCALE", "3")]));
        assert!(matches!(config.build_maze(), Err(MazeError::InvalidScale(3))));
    }
}
