use super::Position;

/// Row-major 2D storage addressed by `(x, y)`.
pub struct Grid<T> {
    data: Box<[T]>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    /// Builds a grid by calling `init` for every position, row by row.
    pub fn from_fn(width: usize, height: usize, mut init: impl FnMut(Position) -> T) -> Self {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(&mut init)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_in_bounds(&self, coord: Position) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, coord: Position) -> Option<&T> {
        if self.is_in_bounds(coord) {
            Some(&self.data[self.ravel_index(coord.0, coord.1)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, coord: Position) -> Option<&mut T> {
        if self.is_in_bounds(coord) {
            let idx = self.ravel_index(coord.0, coord.1);
            Some(&mut self.data[idx])
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width)
    }
}

impl<T> std::ops::Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, index: Position) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl<T> std::ops::IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let grid = Grid::from_fn(3, 2, |(x, y)| y * 10 + x);
        assert_eq!(grid[(2, 0)], 2);
        assert_eq!(grid[(0, 1)], 10);
        assert_eq!(
            grid.rows().map(|r| r.to_vec()).collect::<Vec<_>>(),
            vec![vec![0, 1, 2], vec![10, 11, 12]]
        );
    }

    #[test]
    fn test_out_of_bounds_is_absent() {
        let mut grid = Grid::from_fn(4, 4, |_| 0u8);
        assert!(grid.get((4, 0)).is_none());
        assert!(grid.get((0, 4)).is_none());
        assert!(grid.get_mut((9, 9)).is_none());
        assert_eq!(grid.get((3, 3)), Some(&0));
    }
}
