pub mod config;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod solvers;

pub use error::MazeError;
pub use generators::OpenChance;
pub use maze::{Cell, Direction, DirectionSet, Maze, Position, Region};
