use log::{debug, info, trace};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::generators::Generator;
use crate::grids::block_grid::BlockGrid;
use crate::grids::midpoint;
use crate::utils::{fnv_hashset, FnvHashSet};

/// Randomized depth first carving with backtracking.
///
/// Each step opens exactly one passage. Dead ends are unwound inside the step that hits them, so
/// a caller never sees a step that leaves the grid unchanged unless generation is over.
pub struct RandomDfs<R: Rng = StdRng> {
    grid: BlockGrid,
    visited: FnvHashSet<usize>,
    stack: Vec<usize>,
    rng: R,
    pub done: bool,
}

impl RandomDfs<StdRng> {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomDfs<R> {
    pub fn with_rng(width: usize, height: usize, rng: R) -> Result<Self> {
        let mut grid = BlockGrid::for_maze(width, height)?;
        let (x, y) = grid.start();
        let root = grid.dims.hash(x, y);
        grid.carve(x, y);

        let mut visited = fnv_hashset(grid.dims.node_count());
        visited.insert(root);

        debug!("random dfs over {}x{} cells", width, height);

        Ok(Self {
            grid,
            visited,
            stack: vec![root],
            rng,
            done: false,
        })
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl<R: Rng> Generator for RandomDfs<R> {
    fn step(&mut self) -> bool {
        let dims = self.grid.dims;

        while let Some(key) = self.stack.pop() {
            let current = dims.position(key);
            let unvisited: Vec<(usize, usize)> = dims
                .node_neighbors(current.0, current.1)
                .into_iter()
                .filter(|&(x, y)| !self.visited.contains(&dims.hash(x, y)))
                .collect();

            // dead end, keep unwinding
            let next = match unvisited.choose(&mut self.rng) {
                Some(&next) => next,
                None => continue,
            };

            self.stack.push(key);

            let wall = midpoint(current, next);
            self.grid.carve(current.0, current.1);
            self.grid.carve(next.0, next.1);
            self.grid.carve(wall.0, wall.1);
            trace!("carved {:?} -> {:?}", current, next);

            let next_key = dims.hash(next.0, next.1);
            self.visited.insert(next_key);
            self.stack.push(next_key);

            return true;
        }

        if !self.done {
            self.done = true;
            info!("random dfs finished, {} cells visited", self.visited.len());
        }
        false
    }

    fn snapshot(&self) -> BlockGrid {
        self.grid.clone()
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
