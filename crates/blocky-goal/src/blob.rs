//! Blob scoring.
//!
//! A blob is a set of target-coloured cells connected through shared sides;
//! cells touching only at a corner are not connected. The score is the size of
//! the largest blob.
//!
//! [`BlobScan`] performs the flood fill with one visitation buffer shared by
//! all starting cells, so every cell of the grid is classified at most once
//! per scan.

use blocky_engine::{Colour, FlatGrid};

/// Visitation state of one cell during a [`BlobScan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum CellVisit {
    #[default]
    Unvisited,
    /// Visited; not the target colour.
    Other,
    /// Visited; the target colour, already counted in some blob.
    Target,
}

/// Flood fill over a flattened grid for one target colour.
///
/// # Example
///
/// ```
/// use blocky_engine::{Colour, FlatGrid};
/// use blocky_goal::blob::BlobScan;
///
/// let red = Colour::REAL_RED;
/// let grid = FlatGrid::from_fn(3, |x, y| if x == y { red } else { Colour::OLD_OLIVE });
///
/// let mut scan = BlobScan::new(&grid, red);
/// // The diagonal cells only touch at corners
/// assert_eq!(scan.largest_blob(), 1);
/// assert_eq!(scan.visited(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct BlobScan<'a> {
    grid: &'a FlatGrid,
    colour: Colour,
    // Same column-major layout as the grid
    visits: Vec<CellVisit>,
    visited: usize,
    stack: Vec<(usize, usize)>,
}

impl<'a> BlobScan<'a> {
    #[must_use]
    pub fn new(grid: &'a FlatGrid, colour: Colour) -> Self {
        Self {
            grid,
            colour,
            visits: vec![CellVisit::Unvisited; grid.side() * grid.side()],
            visited: 0,
            stack: vec![],
        }
    }

    /// Visitation state of `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn visit_state(&self, x: usize, y: usize) -> Option<CellVisit> {
        let side = self.grid.side();
        (x < side && y < side).then(|| self.visits[x * side + y])
    }

    /// Number of cells classified so far.
    #[must_use]
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Size of the blob containing `(x, y)` that has not been counted yet.
    ///
    /// Returns zero if the cell is outside the grid, already visited, or not
    /// the target colour. Every cell reached is marked, so calling this for
    /// each cell of a blob in turn counts the blob only once.
    pub fn undiscovered_blob_size(&mut self, x: usize, y: usize) -> usize {
        let mut size = 0;
        if self.mark(x, y) {
            self.stack.push((x, y));
        }
        while let Some((x, y)) = self.stack.pop() {
            size += 1;
            let side = self.grid.side();
            let neighbours = [
                x.checked_sub(1).map(|x| (x, y)),
                (x + 1 < side).then_some((x + 1, y)),
                y.checked_sub(1).map(|y| (x, y)),
                (y + 1 < side).then_some((x, y + 1)),
            ];
            for (nx, ny) in neighbours.into_iter().flatten() {
                if self.mark(nx, ny) {
                    self.stack.push((nx, ny));
                }
            }
        }
        size
    }

    /// Size of the largest blob in the grid.
    pub fn largest_blob(&mut self) -> usize {
        let side = self.grid.side();
        let mut largest = 0;
        for x in 0..side {
            for y in 0..side {
                largest = largest.max(self.undiscovered_blob_size(x, y));
            }
        }
        largest
    }

    /// Classifies an unvisited cell. Returns `true` if it is a target cell.
    fn mark(&mut self, x: usize, y: usize) -> bool {
        if self.visit_state(x, y) != Some(CellVisit::Unvisited) {
            return false;
        }
        let is_target = self.grid[(x, y)] == self.colour;
        self.visits[x * self.grid.side() + y] = if is_target {
            CellVisit::Target
        } else {
            CellVisit::Other
        };
        self.visited += 1;
        is_target
    }
}

/// Size of the largest side-connected group of `colour` cells.
#[must_use]
pub fn blob_score(grid: &FlatGrid, colour: Colour) -> usize {
    BlobScan::new(grid, colour).largest_blob()
}
