use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}, both sides must be at least 1")]
    InvalidDimensions { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
