pub mod block_grid;

use crate::error::{MazeError, Result};

/// Logical maze size used when the caller does not ask for one.
pub const DEFAULT_DIMS: (usize, usize) = (24, 12);

/// Size of the cell array backing a maze.
///
/// A maze of `W x H` logical cells is stored as a `(2W + 1) x (2H + 1)` grid. Nodes sit on odd
/// coordinates, the slots between two nodes on the even coordinate between them, and the outer
/// ring is always wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn for_maze(width: usize, height: usize) -> Result<Self> {
        let invalid = MazeError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }

        let grid_width = width.checked_mul(2).and_then(|w| w.checked_add(1));
        let grid_height = height.checked_mul(2).and_then(|h| h.checked_add(1));

        match (grid_width, grid_height) {
            (Some(w), Some(h)) if w.checked_mul(h).is_some() => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(invalid),
        }
    }

    /// Logical maze size these dimensions were built from.
    #[inline]
    pub fn logical(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        let (w, h) = self.logical();
        w * h
    }

    #[inline]
    pub fn is_valid(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn is_node(&self, x: usize, y: usize) -> bool {
        self.is_valid(x, y) && x % 2 == 1 && y % 2 == 1
    }

    #[inline]
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Canonical key of a coordinate, also its row-major index into the cell array.
    #[inline]
    pub fn hash(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    #[inline]
    pub fn position(&self, key: usize) -> (usize, usize) {
        (key % self.width, key / self.width)
    }

    /// Node coordinates in raster order, top row first.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, usize)> {
        let width = self.width;
        (1..self.height)
            .step_by(2)
            .flat_map(move |y| (1..width).step_by(2).map(move |x| (x, y)))
    }

    /// In-bounds coordinates `distance` away in each direction, ordered left, right, up, down.
    pub fn neighbors_at(&self, x: usize, y: usize, distance: usize) -> Vec<(usize, usize)> {
        Direction::ALL
            .iter()
            .filter_map(|dir| dir.offset(x, y, distance))
            .filter(|&(x, y)| self.is_valid(x, y))
            .collect()
    }

    #[inline]
    pub fn node_neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        self.neighbors_at(x, y, 2)
    }

    #[inline]
    pub fn cell_neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        self.neighbors_at(x, y, 1)
    }
}

/// The wall slot between two adjacent nodes.
#[inline]
pub fn midpoint(a: (usize, usize), b: (usize, usize)) -> (usize, usize) {
    ((a.0 + b.0) / 2, (a.1 + b.1) / 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    West = 0,
    East = 1,
    North = 2,
    South = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    // None when the step would leave the grid on the low side
    pub fn offset(self, x: usize, y: usize, distance: usize) -> Option<(usize, usize)> {
        match self {
            Direction::West => x.checked_sub(distance).map(|x| (x, y)),
            Direction::East => x.checked_add(distance).map(|x| (x, y)),
            Direction::North => y.checked_sub(distance).map(|y| (x, y)),
            Direction::South => y.checked_add(distance).map(|y| (x, y)),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum GridKind {
    Wall = 0,
    Empty = 1,
    Start = 2,
    Finish = 3,
    /// Part of a random walk that has not been committed yet.
    Unknown = 4,
}

impl GridKind {
    /// True for cells that belong to the finished maze.
    #[inline]
    pub fn is_open(self) -> bool {
        match self {
            GridKind::Empty | GridKind::Start | GridKind::Finish => true,
            GridKind::Wall | GridKind::Unknown => false,
        }
    }
}

impl From<GridKind> for char {
    fn from(kind: GridKind) -> Self {
        match kind {
            GridKind::Wall => '#',
            GridKind::Empty => ' ',
            GridKind::Start => 'S',
            GridKind::Finish => 'F',
            GridKind::Unknown => '.',
        }
    }
}
