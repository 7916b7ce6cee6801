//! Goals that score a Blocky board for a single target colour.
//!
//! Scoring always works on the flattened board (see
//! [`Board::flatten`](blocky_engine::Board::flatten)): the block hierarchy is
//! reduced to a square grid of unit cells, and a goal counts target-coloured
//! cells in that grid.
//!
//! - [`Goal::Perimeter`] - Target cells on the outer edge of the board. A
//!   corner cell lies on two edges and counts twice (see [`perimeter`]).
//! - [`Goal::Blob`] - Size of the largest group of target cells connected
//!   through shared sides (see [`blob`]).
//!
//! # Example
//!
//! ```
//! use blocky_engine::{BlockTree, Board, Colour};
//! use blocky_goal::Goal;
//!
//! let red = Colour::REAL_RED;
//! let board = Board::from_tree(
//!     4,
//!     1,
//!     &BlockTree::split([
//!         BlockTree::leaf(red),
//!         BlockTree::leaf(red),
//!         BlockTree::leaf(Colour::OLD_OLIVE),
//!         BlockTree::leaf(Colour::PACIFIC_POINT),
//!     ]),
//! )
//! .unwrap();
//!
//! assert_eq!(Goal::Blob(red).score(&board), 2);
//! // Both red cells are corners
//! assert_eq!(Goal::Perimeter(red).score(&board), 4);
//! ```

pub use self::goal::*;

pub mod blob;
mod goal;
pub mod perimeter;
