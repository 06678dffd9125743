use std::io::{self, Write};

use maze_steps::BlockGrid;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Draws grid snapshots as text, one glyph per cell.
pub struct Renderer<W: Write> {
    out: W,
    clear: bool,
}

impl<W: Write> Renderer<W> {
    /// `clear` redraws in place instead of appending frames.
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }

    pub fn draw(&mut self, grid: &BlockGrid) -> io::Result<()> {
        if self.clear {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        write!(self.out, "{}", grid)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
