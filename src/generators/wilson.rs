use log::{debug, info, trace};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::generators::Generator;
use crate::grids::block_grid::BlockGrid;
use crate::grids::{midpoint, GridKind};
use crate::utils::{fnv_hashset, FnvHashSet};

/// Where the walk state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Looking for a node outside the maze to start the next walk from.
    PickPoint,
    /// Moving the walker one node at a time.
    Walk,
    /// The walker stepped back onto its own path, which has to be cut back.
    Loop,
    /// The walk reached the maze and gets committed to it.
    Fill,
}

/// Wilson's algorithm: loop-erased random walks from every node outside the maze until each one
/// runs into the maze, giving a uniform spanning tree.
///
/// `PickPoint` and `Walk` each take one call to [`Generator::step`]. Erasing a loop or committing
/// a walk happens inside the step that triggered it.
pub struct Wilson<R: Rng = StdRng> {
    grid: BlockGrid,
    /// Keys of every node and passage already in the maze.
    maze: FnvHashSet<usize>,
    /// Keys of the walk in flight, in the order they were walked.
    walk: Vec<usize>,
    in_walk: FnvHashSet<usize>,
    position: (usize, usize),
    previous: (usize, usize),
    phase: Phase,
    rng: R,
    pub done: bool,
}

impl Wilson<StdRng> {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Wilson<R> {
    pub fn with_rng(width: usize, height: usize, rng: R) -> Result<Self> {
        let mut grid = BlockGrid::for_maze(width, height)?;
        let root = grid.start();
        grid.carve(root.0, root.1);

        let mut maze = fnv_hashset(grid.dims.len());
        maze.insert(grid.dims.hash(root.0, root.1));

        debug!("wilson over {}x{} cells", width, height);

        Ok(Self {
            grid,
            maze,
            walk: Vec::new(),
            in_walk: fnv_hashset(0),
            position: root,
            previous: root,
            phase: Phase::PickPoint,
            rng,
            done: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn walk_len(&self) -> usize {
        self.walk.len()
    }

    pub fn maze_len(&self) -> usize {
        self.maze.len()
    }

    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    pub fn previous(&self) -> (usize, usize) {
        self.previous
    }

    fn push_walk(&mut self, key: usize) {
        if self.in_walk.insert(key) {
            self.walk.push(key);
        }
    }

    fn pick_point(&mut self) -> bool {
        let grid = &self.grid;
        let start = grid
            .dims
            .nodes()
            .find(|&(x, y)| grid.get_cell(x, y) == GridKind::Wall);

        let (x, y) = match start {
            Some(start) => start,
            None => {
                if !self.done {
                    self.done = true;
                    info!("wilson finished, {} cells in maze", self.maze.len());
                }
                return false;
            }
        };

        self.grid.mark(x, y);
        self.position = (x, y);
        self.previous = (x, y);

        self.walk.clear();
        self.in_walk.clear();
        self.push_walk(self.grid.dims.hash(x, y));

        trace!("walk starts at {:?}", (x, y));
        self.phase = Phase::Walk;
        true
    }

    fn walk(&mut self) {
        let dims = self.grid.dims;
        let current = self.position;

        let next = match dims.node_neighbors(current.0, current.1).choose(&mut self.rng) {
            Some(&next) => next,
            // only a single cell maze has no neighbours, and that one is complete from the start
            None => {
                self.phase = Phase::Fill;
                return;
            }
        };

        let next_key = dims.hash(next.0, next.1);
        if self.in_walk.contains(&next_key) {
            self.previous = current;
            self.position = next;
            self.phase = Phase::Loop;
            return;
        }

        let wall = midpoint(current, next);
        self.push_walk(dims.hash(wall.0, wall.1));
        self.push_walk(next_key);
        self.grid.mark(wall.0, wall.1);
        self.grid.mark(next.0, next.1);

        if self.maze.contains(&next_key) {
            self.phase = Phase::Fill;
            return;
        }

        self.previous = current;
        self.position = next;
    }

    /// Cuts the walk back to the walker's position, walling off everything after it.
    fn erase_loop(&mut self) {
        let dims = self.grid.dims;
        let stop = dims.hash(self.position.0, self.position.1);

        let mut erased = 0;
        while let Some(&key) = self.walk.last() {
            if key == stop {
                break;
            }

            self.walk.pop();
            self.in_walk.remove(&key);
            let (x, y) = dims.position(key);
            self.grid.fill(x, y);
            erased += 1;
        }

        trace!(
            "erased {} cells looping from {:?} back to {:?}",
            erased,
            self.previous,
            self.position
        );
        self.phase = Phase::Walk;
    }

    fn commit_walk(&mut self) {
        let dims = self.grid.dims;
        let committed = self.walk.len();

        for key in self.walk.drain(..) {
            let (x, y) = dims.position(key);
            self.grid.carve(x, y);
            self.maze.insert(key);
        }
        self.in_walk.clear();

        debug!(
            "committed walk of {} cells, {} cells in maze",
            committed,
            self.maze.len()
        );
        self.phase = Phase::PickPoint;
    }
}

impl<R: Rng> Generator for Wilson<R> {
    fn step(&mut self) -> bool {
        loop {
            match self.phase {
                Phase::PickPoint => return self.pick_point(),
                Phase::Walk => {
                    self.walk();
                    if self.phase == Phase::Walk {
                        return true;
                    }
                }
                Phase::Loop => {
                    self.erase_loop();
                    return true;
                }
                Phase::Fill => {
                    self.commit_walk();
                    return true;
                }
            }
        }
    }

    fn snapshot(&self) -> BlockGrid {
        self.grid.clone()
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
