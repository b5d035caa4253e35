use std::fmt;

use super::{Position, direction::Direction};

/// One square of the maze: a position, a visited flag, four walls and a display symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    visited: bool,
    /// Wall presence indexed by `Direction::index`.
    walls: [bool; 4],
    content: String,
}

impl Cell {
    /// Content shown for a visited cell.
    pub const VISITED: &'static str = " ";
    /// Content shown for a cell that has not been carved into yet.
    pub const UNVISITED: &'static str = "/";
    /// Content left on cells along a solved path.
    pub const PATH_MARKER: &'static str = "*";
    pub const WALL_HORIZONTAL: &'static str = "-";
    pub const WALL_VERTICAL: &'static str = "|";

    /// Creates an unvisited cell enclosed by all four walls.
    pub fn new(position: Position) -> Self {
        Cell {
            position,
            visited: false,
            walls: [true; 4],
            content: Self::UNVISITED.to_string(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn x(&self) -> usize {
        self.position.0
    }

    pub fn y(&self) -> usize {
        self.position.1
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Marks the cell visited and shows it as carved.
    pub fn visit(&mut self) {
        self.visited = true;
        self.content = Self::VISITED.to_string();
    }

    /// Marks the cell unvisited and shows it as solid.
    pub fn unvisit(&mut self) {
        self.visited = false;
        self.content = Self::UNVISITED.to_string();
    }

    pub fn wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    /// Sets this side of a wall only. The maze keeps the neighbor's side in sync.
    pub(crate) fn set_wall(&mut self, direction: Direction, present: bool) {
        self.walls[direction.index()] = present;
    }

    /// True when all four walls are present.
    pub fn is_enclosed(&self) -> bool {
        self.walls.iter().all(|&w| w)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_enclosed() {
        let cell = Cell::new((3, 4));
        assert_eq!(cell.position(), (3, 4));
        assert_eq!((cell.x(), cell.y()), (3, 4));
        assert!(!cell.is_visited());
        assert!(cell.is_enclosed());
        assert_eq!(cell.content(), Cell::UNVISITED);
    }

    #[test]
    fn test_visit_sets_symbol() {
        let mut cell = Cell::new((0, 0));
        cell.set_content("P");
        cell.visit();
        assert!(cell.is_visited());
        assert_eq!(cell.content(), Cell::VISITED);
        cell.unvisit();
        assert!(!cell.is_visited());
        assert_eq!(cell.content(), Cell::UNVISITED);
    }

    #[test]
    fn test_walls_by_direction() {
        let mut cell = Cell::new((1, 1));
        cell.set_wall(Direction::East, false);
        assert!(!cell.wall(Direction::East));
        assert!(cell.wall(Direction::West));
        assert!(!cell.is_enclosed());
    }
}
