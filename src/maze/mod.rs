pub mod cell;
pub mod direction;
mod grid;
pub mod region;
mod render;

use rand::Rng;

pub use cell::Cell;
pub use direction::{Direction, DirectionSet};
use grid::Grid;
pub use region::Region;

use crate::{
    error::MazeError,
    generators::{OpenChance, braided_backtrack},
    solvers::solve_bfs,
};

/// A grid position `(x, y)`: x is the column, y the row, origin at the top left.
pub type Position = (usize, usize);

/// A rectangular maze of walled cells.
///
/// Every operation takes an optional target region (the whole maze when `None`) and a list of
/// exemption regions it must leave alone, so parts of the maze can be regenerated, reset or
/// opened up while the rest stays untouched.
pub struct Maze {
    cells: Grid<Cell>,
    /// Horizontal padding used when rendering a cell. Has no effect on the maze itself.
    scale: usize,
    /// The full extent of the maze.
    region: Region,
}

impl Maze {
    pub const DEFAULT_WIDTH: usize = 40;
    pub const DEFAULT_HEIGHT: usize = 30;
    pub const DEFAULT_SCALE: usize = 4;

    /// Creates a maze of unvisited, fully walled cells.
    ///
    /// `width` and `height` must be positive and `scale` must be even and positive.
    pub fn new(width: usize, height: usize, scale: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if scale == 0 || scale % 2 != 0 {
            return Err(MazeError::InvalidScale(scale));
        }
        let region = Region::with_size((0, 0), (width, height))?;
        tracing::debug!("[maze] created {}x{} maze with scale {}", width, height, scale);
        Ok(Maze {
            cells: Grid::from_fn(width, height, Cell::new),
            scale,
            region,
        })
    }

    /// Width of the maze in cells.
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    /// Height of the maze in cells.
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    /// The region covering the whole maze.
    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.cells.is_in_bounds(pos)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// Mutable access to a cell for presentation changes. Walls can only be changed through
    /// [`Maze::set_wall`], which keeps both sides of a wall in agreement.
    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells.get_mut(pos)
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.rows()
    }

    pub fn content(&self, pos: Position) -> Option<&str> {
        self.cell(pos).map(Cell::content)
    }

    /// Replaces the content of the cell at `pos`. Returns `false` if there is no such cell.
    pub fn set_content(&mut self, pos: Position, content: impl Into<String>) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.set_content(content);
                true
            }
            None => false,
        }
    }

    /// Stamps `content` onto every cell of `region` that lies inside the maze.
    pub fn set_region_content(&mut self, region: &Region, content: &str) {
        for pos in self.clipped_positions(region) {
            self.set_content(pos, content);
        }
    }

    /// The position next to `pos` in `direction`, if it lies inside the maze.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = pos.0.checked_add_signed(dx)?;
        let y = pos.1.checked_add_signed(dy)?;
        self.is_valid_position((x, y)).then_some((x, y))
    }

    /// Whether the cell at `pos` has a wall in `direction`, or `None` if there is no such cell.
    pub fn wall(&self, pos: Position, direction: Direction) -> Option<bool> {
        self.cell(pos).map(|cell| cell.wall(direction))
    }

    /// Sets the wall of `pos` in `direction`, and the matching wall of the neighbor on the other
    /// side when there is one. Does nothing if `pos` is outside the maze.
    pub fn set_wall(&mut self, pos: Position, direction: Direction, present: bool) {
        let Some(cell) = self.cells.get_mut(pos) else {
            return;
        };
        cell.set_wall(direction, present);
        if let Some(neighbor) = self.neighbor(pos, direction) {
            self.cells[neighbor].set_wall(direction.opposite(), present);
        }
    }

    /// Neighbors reachable from `pos` without crossing a wall.
    pub fn accessible_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            match self.wall(pos, direction) {
                Some(false) => self.neighbor(pos, direction),
                _ => None,
            }
        })
    }

    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_visited)
    }

    pub fn visit(&mut self, pos: Position) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.visit();
        }
    }

    pub fn unvisit(&mut self, pos: Position) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.unvisit();
        }
    }

    /// Positions of the maze that fall inside `region` but outside every exemption, row by row.
    pub fn valid_cell_set(&self, region: &Region, exemptions: &[Region]) -> Vec<Position> {
        self.clipped_positions(region)
            .filter(|&pos| !exemptions.iter().any(|exemption| exemption.contains(pos)))
            .collect()
    }

    /// Positions of `region` that lie inside the maze, row by row.
    ///
    /// Only the part of the rectangle overlapping the grid is walked, however far the region
    /// reaches past it.
    fn clipped_positions(&self, region: &Region) -> impl Iterator<Item = Position> + use<> {
        let (lower, upper) = (region.lower(), region.upper());
        let xs = lower.0..=upper.0.min(self.width() - 1);
        let ys = lower.1..=upper.1.min(self.height() - 1);
        ys.flat_map(move |y| xs.clone().map(move |x| (x, y)))
    }

    /// Carves a maze over `region` (the whole maze when `None`), avoiding `exemptions`.
    ///
    /// With an open chance of zero the carved cells form a perfect maze. Higher chances knock
    /// down extra walls between already carved cells, adding loops.
    pub fn generate<R: Rng>(
        &mut self,
        region: Option<&Region>,
        exemptions: &[Region],
        open_chance: OpenChance,
        rng: &mut R,
    ) {
        let region = region.unwrap_or(&self.region).clone();
        braided_backtrack(self, &region, exemptions, open_chance, rng);
    }

    /// Returns the cells of `region` to their initial state: unvisited and fully walled.
    ///
    /// Cells inside an exemption keep their state, except that the walls along the edge of the
    /// exemption are put back up, sealing the exemption off from the reset area.
    pub fn reset(&mut self, region: Option<&Region>, exemptions: &[Region]) {
        let region = region.unwrap_or(&self.region).clone();
        let targets = self.clipped_positions(&region).collect::<Vec<_>>();

        let mut exempt_count = 0;
        for pos in targets {
            let mut exempt = false;
            for exemption in exemptions {
                if !exemption.contains(pos) {
                    continue;
                }
                for direction in exemption.on_border(pos).iter() {
                    self.set_wall(pos, direction, true);
                }
                exempt = true;
            }
            if exempt {
                exempt_count += 1;
                continue;
            }
            self.unvisit(pos);
            for direction in Direction::ALL {
                self.set_wall(pos, direction, true);
            }
        }
        tracing::debug!("[reset] reset {} skipping {} exempt cells", region, exempt_count);
    }

    /// Visits every valid cell of `region` and knocks down the walls between them.
    ///
    /// Walls along the edge of `region` only come down when `open_border` is set. Walls on the
    /// outer edge of the maze always stay.
    pub fn open(&mut self, region: Option<&Region>, exemptions: &[Region], open_border: bool) {
        let region = region.unwrap_or(&self.region).clone();
        let valid = self.valid_cell_set(&region, exemptions);
        tracing::debug!("[open] opening {} cells of {}", valid.len(), region);
        for pos in valid {
            self.visit(pos);
            let borders = region.on_border(pos);
            for direction in Direction::ALL {
                if self.neighbor(pos, direction).is_none() {
                    continue;
                }
                if open_border || !borders.contains(direction) {
                    self.set_wall(pos, direction, false);
                }
            }
        }
    }

    /// Finds a shortest path from `start` to `end`, returning every position along it.
    ///
    /// Breadcrumbs from a previous solve are always cleared first. When `breadcrumbs` is set the
    /// cells on the new path are marked. Returns `None` if `end` cannot be reached.
    pub fn solve(&mut self, start: Position, end: Position, breadcrumbs: bool) -> Option<Vec<Position>> {
        self.clear_breadcrumbs();
        if start == end {
            return Some(vec![start]);
        }
        let path = solve_bfs(self, start, end)?;
        if breadcrumbs {
            for &pos in &path {
                self.set_content(pos, Cell::PATH_MARKER);
            }
        }
        Some(path)
    }

    /// Replaces path markers left by [`Maze::solve`] with the visited symbol.
    pub fn clear_breadcrumbs(&mut self) {
        self.cells
            .iter_mut()
            .filter(|cell| cell.content() == Cell::PATH_MARKER)
            .for_each(|cell| cell.set_content(Cell::VISITED));
    }
}
