//! **maze-steps** grows perfect mazes one step at a time, so every stage of generation can be
//! shown while it happens.
//!
//! Two generators share the [`generators::Generator`] contract: randomized depth first carving
//! and Wilson's loop-erased random walks. Drive one with `step()` until it returns false and read
//! the grid back with `snapshot()`.

pub mod error;
pub mod generators;
pub mod grids;
mod utils;

pub use error::MazeError;
pub use generators::{new_generator, Generator, GeneratorKind};
pub use grids::block_grid::BlockGrid;
pub use grids::{Dimensions, GridKind};
