use std::fmt;

use rand::Rng;

/// One of the four cardinal directions, in clockwise order starting at north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in clockwise order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Ordinal of the direction, usable as an index into per-direction tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The direction rotated by 180 degrees.
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The next direction when rotating clockwise.
    pub const fn clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The next direction when rotating counterclockwise.
    pub const fn counterclockwise(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Pick a direction uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Unit step `(dx, dy)` in grid coordinates, with y growing downwards.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// A small set of directions stored as a 4-bit mask.
///
/// Used as the shrinking pool of candidate directions while carving, and to
/// report which edges of a region a position sits on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    const FULL_MASK: u8 = 0b1111;

    pub const fn empty() -> Self {
        DirectionSet(0)
    }

    pub const fn full() -> Self {
        DirectionSet(Self::FULL_MASK)
    }

    const fn bit(direction: Direction) -> u8 {
        1 << direction.index()
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= Self::bit(direction);
    }

    /// Removes the direction, returning whether it was present.
    pub fn remove(&mut self, direction: Direction) -> bool {
        let present = self.contains(direction);
        self.0 &= !Self::bit(direction);
        present
    }

    pub const fn contains(&self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the contained directions in clockwise order from north.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + use<> {
        let mask = self.0;
        Direction::ALL
            .into_iter()
            .filter(move |&d| mask & Self::bit(d) != 0)
    }

    /// Pick one of the contained directions uniformly at random, or `None` if the set is empty.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<Direction> {
        if self.is_empty() {
            return None;
        }
        let nth = rng.random_range(0..self.len());
        self.iter().nth(nth)
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::empty();
        iter.into_iter().for_each(|d| set.insert(d));
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_opposite_and_rotation() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::West.clockwise(), Direction::North);
        assert_eq!(Direction::North.counterclockwise(), Direction::West);
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.clockwise().counterclockwise(), d);
            assert_eq!(d.clockwise().clockwise(), d.opposite());
        }
    }

    #[test]
    fn test_offsets_cancel_with_opposite() {
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            let (ox, oy) = d.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_direction_set_removal() {
        let mut set = DirectionSet::full();
        assert_eq!(set.len(), 4);
        assert!(set.remove(Direction::East));
        assert!(!set.remove(Direction::East));
        assert!(!set.contains(Direction::East));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Direction::North, Direction::South, Direction::West]
        );
        set.remove(Direction::North);
        set.remove(Direction::South);
        set.remove(Direction::West);
        assert!(set.is_empty());
    }

    #[test]
    fn test_choose_stays_within_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let set: DirectionSet = [Direction::South, Direction::West].into_iter().collect();
        for _ in 0..100 {
            let d = set.choose(&mut rng).unwrap();
            assert!(set.contains(d));
        }
        assert_eq!(DirectionSet::empty().choose(&mut rng), None);
    }

    #[test]
    fn test_random_covers_all_directions() {
        let mut rng = StdRng::seed_from_u64(1);
        let seen = (0..200)
            .map(|_| Direction::random(&mut rng))
            .collect::<DirectionSet>();
        assert_eq!(seen, DirectionSet::full());
    }
}
