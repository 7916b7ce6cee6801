//! Perimeter scoring.
//!
//! The score is the number of target cells in the left column, plus the right
//! column, plus the top row, plus the bottom row. Edges are counted
//! independently, so a target-coloured corner counts twice, and on a 1×1 grid
//! the single cell counts four times.

use blocky_engine::{Colour, FlatGrid};

/// Counts target cells along the four edges of the grid, corners twice.
#[must_use]
pub fn perimeter_score(grid: &FlatGrid, colour: Colour) -> usize {
    let side = grid.side();
    if side == 0 {
        return 0;
    }
    let last = side - 1;
    let in_column = |x| grid.column(x).iter().filter(|c| **c == colour).count();
    let in_row = |y| grid.row(y).filter(|c| *c == colour).count();

    let left = in_column(0);
    let right = in_column(last);
    let top = in_row(0);
    let bottom = in_row(last);
    left + right + top + bottom
}
