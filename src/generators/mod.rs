use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod backtrack;

pub use backtrack::braided_backtrack;

use crate::error::MazeError;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Percent chance, from 0 to 100, that a carving step also knocks down a wall towards an
/// already carved neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenChance(u8);

impl OpenChance {
    /// Never open extra walls: generation yields a perfect maze.
    pub const NEVER: OpenChance = OpenChance(0);
    pub const DEFAULT: OpenChance = OpenChance(50);
    pub const ALWAYS: OpenChance = OpenChance(100);

    pub fn new(percent: u8) -> Result<Self, MazeError> {
        if percent > 100 {
            return Err(MazeError::InvalidOpenChance(percent));
        }
        Ok(OpenChance(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Rolls a number from 1 to 100 and succeeds if it does not exceed the chance.
    pub fn roll<R: Rng>(self, rng: &mut R) -> bool {
        rng.random_range(1..=100u8) <= self.0
    }
}

impl Default for OpenChance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for OpenChance {
    type Error = MazeError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        OpenChance::new(percent)
    }
}

impl fmt::Display for OpenChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
