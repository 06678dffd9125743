use std::fmt;

use crate::error::Result;
use crate::grids::{Dimensions, GridKind};

/// Cell array of a maze in the doubled encoding described on [`Dimensions`].
///
/// Starts out as solid wall; generators open it up through [`BlockGrid::carve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrid {
    pub dims: Dimensions,

    cells: Vec<GridKind>,
}

impl BlockGrid {
    /// Solid grid for a maze of `width x height` logical cells.
    pub fn for_maze(width: usize, height: usize) -> Result<Self> {
        Ok(Self::with_dims(Dimensions::for_maze(width, height)?))
    }

    pub fn with_dims(dims: Dimensions) -> Self {
        Self {
            cells: vec![GridKind::Wall; dims.len()],
            dims,
        }
    }

    #[inline]
    pub fn start(&self) -> (usize, usize) {
        (1, 1)
    }

    #[inline]
    pub fn finish(&self) -> (usize, usize) {
        (self.dims.width - 2, self.dims.height - 2)
    }

    #[inline]
    pub fn get_cell(&self, x: usize, y: usize) -> GridKind {
        self.cells[self.dims.hash(x, y)]
    }

    /// Returns the kind the cell held before.
    #[inline]
    pub fn set_cell(&mut self, x: usize, y: usize, kind: GridKind) -> GridKind {
        let index = self.dims.hash(x, y);
        let prev_kind = self.cells[index];
        self.cells[index] = kind;

        prev_kind
    }

    /// Opens a cell for good. The start corner wins over the finish corner when the maze is a
    /// single cell and both land on (1, 1).
    pub fn carve(&mut self, x: usize, y: usize) -> GridKind {
        let kind = if (x, y) == self.start() {
            GridKind::Start
        } else if (x, y) == self.finish() {
            GridKind::Finish
        } else {
            GridKind::Empty
        };

        self.set_cell(x, y, kind)
    }

    #[inline]
    pub fn mark(&mut self, x: usize, y: usize) -> GridKind {
        self.set_cell(x, y, GridKind::Unknown)
    }

    #[inline]
    pub fn fill(&mut self, x: usize, y: usize) -> GridKind {
        self.set_cell(x, y, GridKind::Wall)
    }

    pub fn cells(&self) -> &[GridKind] {
        &self.cells
    }

    /// Cells grouped by row, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[GridKind]> {
        self.cells.chunks(self.dims.width)
    }

    pub fn count_open_nodes(&self) -> usize {
        self.dims
            .nodes()
            .filter(|&(x, y)| self.get_cell(x, y).is_open())
            .count()
    }
}

impl fmt::Display for BlockGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&kind| char::from(kind)).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_grid {
    use super::*;

    #[test]
    fn it_works() {
        let mut grid = BlockGrid::for_maze(4, 3).unwrap();
        assert_eq!(grid.cells().len(), 9 * 7);
        assert!(grid.cells().iter().all(|&kind| kind == GridKind::Wall));

        assert_eq!(grid.set_cell(3, 1, GridKind::Empty), GridKind::Wall);
        assert_eq!(grid.get_cell(3, 1), GridKind::Empty);

        assert_eq!(grid.mark(3, 2), GridKind::Wall);
        assert_eq!(grid.get_cell(3, 2), GridKind::Unknown);

        assert_eq!(grid.fill(3, 2), GridKind::Unknown);
        assert_eq!(grid.get_cell(3, 2), GridKind::Wall);
    }

    #[test]
    fn carve_marks_start_and_finish() {
        let mut grid = BlockGrid::for_maze(3, 2).unwrap();
        assert_eq!(grid.finish(), (5, 3));

        grid.carve(1, 1);
        grid.carve(5, 3);
        grid.carve(3, 3);

        assert_eq!(grid.get_cell(1, 1), GridKind::Start);
        assert_eq!(grid.get_cell(5, 3), GridKind::Finish);
        assert_eq!(grid.get_cell(3, 3), GridKind::Empty);

        // carving again never demotes the corners
        grid.mark(1, 1);
        grid.carve(1, 1);
        assert_eq!(grid.get_cell(1, 1), GridKind::Start);
    }

    #[test]
    fn single_cell_start_wins() {
        let mut grid = BlockGrid::for_maze(1, 1).unwrap();
        assert_eq!(grid.start(), grid.finish());

        grid.carve(1, 1);
        assert_eq!(grid.get_cell(1, 1), GridKind::Start);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut grid = BlockGrid::for_maze(2, 2).unwrap();
        let snapshot = grid.clone();

        grid.carve(1, 1);
        assert_eq!(snapshot.get_cell(1, 1), GridKind::Wall);
        assert_ne!(snapshot, grid);
    }

    #[test]
    fn displays_row_by_row() {
        let mut grid = BlockGrid::for_maze(2, 1).unwrap();
        grid.carve(1, 1);
        grid.carve(2, 1);
        grid.mark(3, 1);

        assert_eq!(grid.to_string(), "#####\n#S .#\n#####\n");
    }

    #[test]
    fn counts_open_nodes_only() {
        let mut grid = BlockGrid::for_maze(2, 2).unwrap();
        grid.carve(1, 1);
        grid.carve(2, 1);
        grid.mark(3, 1);
        grid.carve(3, 3);

        assert_eq!(grid.count_open_nodes(), 2);
    }
}
