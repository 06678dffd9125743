pub mod random_dfs;
pub mod wilson;

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::grids::block_grid::BlockGrid;

use random_dfs::RandomDfs;
use wilson::Wilson;

/// A maze generator that can be driven one unit of work at a time.
pub trait Generator {
    /// Advances generation. Returns false once the maze is complete, and keeps returning false
    /// on every later call.
    fn step(&mut self) -> bool;

    /// Copy of the grid as it stands. Cells of a walk still in flight read as `Unknown`.
    fn snapshot(&self) -> BlockGrid;

    fn is_done(&self) -> bool;

    fn next_step(&mut self) -> BlockGrid {
        self.step();
        self.snapshot()
    }

    fn generate_maze(&mut self) -> BlockGrid {
        while self.step() {}
        self.snapshot()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    RandomDfs,
    Wilson,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorKind::RandomDfs => write!(f, "random-dfs"),
            GeneratorKind::Wilson => write!(f, "wilson"),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "random-dfs" | "dfs" => Ok(GeneratorKind::RandomDfs),
            "wilson" => Ok(GeneratorKind::Wilson),
            other => Err(format!("unknown generator `{}`", other)),
        }
    }
}

/// Builds a boxed generator, seeded when `seed` is given and from entropy otherwise.
pub fn new_generator(
    kind: GeneratorKind,
    width: usize,
    height: usize,
    seed: Option<u64>,
) -> Result<Box<dyn Generator>> {
    Ok(match (kind, seed) {
        (GeneratorKind::RandomDfs, Some(seed)) => {
            Box::new(RandomDfs::with_seed(width, height, seed)?)
        }
        (GeneratorKind::RandomDfs, None) => Box::new(RandomDfs::new(width, height)?),
        (GeneratorKind::Wilson, Some(seed)) => Box::new(Wilson::with_seed(width, height, seed)?),
        (GeneratorKind::Wilson, None) => Box::new(Wilson::new(width, height)?),
    })
}

#[cfg(test)]
pub(crate) mod test_util {
    use petgraph::unionfind::UnionFind;

    use crate::grids::block_grid::BlockGrid;
    use crate::grids::GridKind;

    /// Checks that a finished grid is a perfect maze: border intact, every node open, and the
    /// passages between nodes forming a spanning tree.
    pub fn assert_perfect_maze(grid: &BlockGrid) {
        let dims = grid.dims;
        let (w, h) = dims.logical();

        for y in 0..dims.height {
            for x in 0..dims.width {
                let kind = grid.get_cell(x, y);
                assert_ne!(kind, GridKind::Unknown, "leftover walk marker at ({}, {})", x, y);
                if dims.is_border(x, y) {
                    assert_eq!(kind, GridKind::Wall, "border opened at ({}, {})", x, y);
                }
                // slots between diagonal nodes never open
                if x % 2 == 0 && y % 2 == 0 {
                    assert_eq!(kind, GridKind::Wall, "corner opened at ({}, {})", x, y);
                }
            }
        }

        for (x, y) in dims.nodes() {
            assert!(grid.get_cell(x, y).is_open(), "node ({}, {}) left closed", x, y);
        }

        assert_eq!(grid.get_cell(1, 1), GridKind::Start);
        if (w, h) != (1, 1) {
            assert_eq!(grid.get_cell(dims.width - 2, dims.height - 2), GridKind::Finish);
        }

        let node_index = |x: usize, y: usize| (y / 2) * w + x / 2;
        let mut forest = UnionFind::<usize>::new(w * h);
        let mut passages = 0;
        for (x, y) in dims.nodes() {
            for (nx, ny) in [(x + 2, y), (x, y + 2)].iter().copied() {
                if !dims.is_valid(nx, ny) {
                    continue;
                }
                if grid.get_cell((x + nx) / 2, (y + ny) / 2).is_open() {
                    passages += 1;
                    assert!(
                        forest.union(node_index(x, y), node_index(nx, ny)),
                        "passage ({}, {}) - ({}, {}) closes a loop",
                        x,
                        y,
                        nx,
                        ny
                    );
                }
            }
        }

        assert_eq!(passages, w * h - 1);
        let root = forest.find(0);
        assert!((0..w * h).all(|node| forest.find(node) == root));
    }
}
