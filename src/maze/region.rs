use std::{cell::OnceCell, collections::BTreeSet, fmt, ops::RangeInclusive};

use super::{
    Position,
    direction::{Direction, DirectionSet},
};
use crate::error::MazeError;

/// An axis-aligned rectangle of grid positions.
///
/// A region is described by an anchor and either a size or an opposite corner. Either way it is
/// normalized into an inclusive lower/upper corner pair, so the two corners of an endpoint-built
/// region can be given in any order. Regions may reach past the maze bounds; maze operations clip
/// them to the grid.
#[derive(Debug, Clone)]
pub struct Region {
    /// The anchor as given at construction.
    position: Position,
    /// The opposite corner, as given or derived from the size.
    endpoint: Position,
    /// Inclusive minimum corner.
    lower: Position,
    /// Inclusive maximum corner.
    upper: Position,
    /// Every point of the rectangle, materialized on first use.
    points: OnceCell<BTreeSet<Position>>,
}

impl Region {
    /// Creates a region growing right and down from `position` by `size` cells.
    ///
    /// Both size components must be at least 1, and the far corner must be addressable.
    pub fn with_size(position: Position, size: (usize, usize)) -> Result<Self, MazeError> {
        if size.0 == 0 || size.1 == 0 {
            return Err(MazeError::InvalidRegionSize {
                width: size.0,
                height: size.1,
            });
        }
        let endpoint = Self::far_corner(position, size).ok_or(MazeError::RegionOutOfRange {
            x: position.0,
            y: position.1,
            width: size.0,
            height: size.1,
        })?;
        Ok(Self::from_corners(position, endpoint))
    }

    /// The inclusive corner `size - 1` cells right and down of `position`, if it fits in `usize`.
    fn far_corner(position: Position, size: (usize, usize)) -> Option<Position> {
        Some((
            position.0.checked_add(size.0 - 1)?,
            position.1.checked_add(size.1 - 1)?,
        ))
    }

    /// Creates a region spanning both corners inclusively, whichever order they come in.
    pub fn with_endpoint(position: Position, endpoint: Position) -> Self {
        Self::from_corners(position, endpoint)
    }

    fn from_corners(position: Position, endpoint: Position) -> Self {
        Region {
            position,
            endpoint,
            lower: (position.0.min(endpoint.0), position.1.min(endpoint.1)),
            upper: (position.0.max(endpoint.0), position.1.max(endpoint.1)),
            points: OnceCell::new(),
        }
    }

    /// A region of the same size whose lower corner sits at `anchor`.
    pub fn moved_to(&self, anchor: Position) -> Result<Self, MazeError> {
        Self::with_size(anchor, self.size())
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn endpoint(&self) -> Position {
        self.endpoint
    }

    pub fn lower(&self) -> Position {
        self.lower
    }

    pub fn upper(&self) -> Position {
        self.upper
    }

    /// Width and height in cells, saturating for a region spanning every `usize` coordinate.
    pub fn size(&self) -> (usize, usize) {
        (
            (self.upper.0 - self.lower.0).saturating_add(1),
            (self.upper.1 - self.lower.1).saturating_add(1),
        )
    }

    pub fn range_x(&self) -> RangeInclusive<usize> {
        self.lower.0..=self.upper.0
    }

    pub fn range_y(&self) -> RangeInclusive<usize> {
        self.lower.1..=self.upper.1
    }

    pub fn contains(&self, point: Position) -> bool {
        self.range_x().contains(&point.0) && self.range_y().contains(&point.1)
    }

    /// Returns the edges of the region that `point` lies on.
    ///
    /// A point outside the region lies on no edge. A point in a one-cell-wide region lies on both
    /// opposite edges at once.
    pub fn on_border(&self, point: Position) -> DirectionSet {
        let mut borders = DirectionSet::empty();
        if !self.contains(point) {
            return borders;
        }
        if point.1 == self.lower.1 {
            borders.insert(Direction::North);
        }
        if point.0 == self.upper.0 {
            borders.insert(Direction::East);
        }
        if point.1 == self.upper.1 {
            borders.insert(Direction::South);
        }
        if point.0 == self.lower.0 {
            borders.insert(Direction::West);
        }
        borders
    }

    /// All points of the region. Computed on the first call and cached afterwards.
    pub fn to_set(&self) -> &BTreeSet<Position> {
        self.points.get_or_init(|| {
            self.range_x()
                .flat_map(|x| self.range_y().map(move |y| (x, y)))
                .collect()
        })
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.lower == other.lower && self.upper == other.upper
    }
}

impl Eq for Region {}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})..=({}, {})",
            self.lower.0, self.lower.1, self.upper.0, self.upper.1
        )
    }
}
