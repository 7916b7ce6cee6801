use std::{fmt, ops::Index};

use super::{
    board::{BlockId, BlockKind, Board, Quadrant},
    colour::Colour,
};

/// Dense grid of unit-cell colours covering one block.
///
/// Cells are addressed as `(column, row)`, with `(0, 0)` the upper-left unit
/// cell. A grid is derived on demand by [`Board::flatten`] and never updated
/// in place; it is always square with side `2^(max_depth - level)`.
///
/// # Example
///
/// ```
/// use blocky_engine::{BlockTree, Board, Colour};
///
/// let tree = BlockTree::split([
///     BlockTree::leaf(Colour::REAL_RED),
///     BlockTree::leaf(Colour::PACIFIC_POINT),
///     BlockTree::leaf(Colour::PACIFIC_POINT),
///     BlockTree::leaf(Colour::OLD_OLIVE),
/// ]);
/// let board = Board::from_tree(4, 1, &tree).unwrap();
/// let grid = board.flatten();
///
/// assert_eq!(grid.side(), 2);
/// assert_eq!(grid[(1, 0)], Colour::REAL_RED); // upper-right
/// assert_eq!(grid[(1, 1)], Colour::OLD_OLIVE); // lower-right
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatGrid {
    side: usize,
    // Column-major: column `x` occupies `cells[x * side..(x + 1) * side]`.
    cells: Vec<Colour>,
}

impl FlatGrid {
    /// Builds a grid by evaluating `f(column, row)` for every cell.
    #[must_use]
    pub fn from_fn<F>(side: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Colour,
    {
        let mut cells = Vec::with_capacity(side * side);
        for x in 0..side {
            for y in 0..side {
                cells.push(f(x, y));
            }
        }
        Self { side, cells }
    }

    #[must_use]
    pub fn filled(side: usize, colour: Colour) -> Self {
        Self {
            side,
            cells: vec![colour; side * side],
        }
    }

    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Colour at `(column, row)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        (x < self.side && y < self.side).then(|| self.cells[x * self.side + y])
    }

    /// The cells of one column, top to bottom.
    #[must_use]
    pub fn column(&self, x: usize) -> &[Colour] {
        &self.cells[x * self.side..][..self.side]
    }

    /// Iterates one row, left to right.
    pub fn row(&self, y: usize) -> impl Iterator<Item = Colour> + '_ {
        (0..self.side).map(move |x| self[(x, y)])
    }

    #[must_use]
    pub fn count(&self, colour: Colour) -> usize {
        self.cells.iter().filter(|c| **c == colour).count()
    }

    fn fill_square(&mut self, (x0, y0): (usize, usize), side: usize, colour: Colour) {
        for x in x0..x0 + side {
            self.cells[x * self.side + y0..][..side].fill(colour);
        }
    }
}

impl Index<(usize, usize)> for FlatGrid {
    type Output = Colour;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(
            x < self.side && y < self.side,
            "cell ({x}, {y}) out of a {0}x{0} grid",
            self.side
        );
        &self.cells[x * self.side + y]
    }
}

/// Prints one line per row, one character per cell (see [`Colour::as_char`]).
impl fmt::Display for FlatGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.side {
            for colour in self.row(y) {
                write!(f, "{}", colour.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Board {
    /// Flattens the whole board into unit cells.
    #[must_use]
    pub fn flatten(&self) -> FlatGrid {
        self.flatten_block(self.root())
    }

    /// Flattens the subtree rooted at `id`.
    ///
    /// The grid has side `2^(max_depth - level)`. A leaf above max depth
    /// covers a uniform square of cells; each child of a split block fills
    /// the quadrant of the grid it covers.
    #[must_use]
    pub fn flatten_block(&self, id: BlockId) -> FlatGrid {
        let mut grid = FlatGrid::filled(self.cells_per_side(id), Colour::PALETTE[0]);
        self.fill_cells(id, &mut grid, (0, 0));
        grid
    }

    fn fill_cells(&self, id: BlockId, grid: &mut FlatGrid, origin: (usize, usize)) {
        let side = self.cells_per_side(id);
        match self.kind(id) {
            BlockKind::Leaf(colour) => grid.fill_square(origin, side, colour),
            BlockKind::Split(children) => {
                let half = side / 2;
                for (child, quadrant) in children.into_iter().zip(Quadrant::ALL) {
                    // Quadrant offsets are in cells here, not board units
                    let (dx, dy) = quadrant.offset(1);
                    let child_origin = (origin.0 + dx as usize * half, origin.1 + dy as usize * half);
                    self.fill_cells(child, grid, child_origin);
                }
            }
        }
    }
}
