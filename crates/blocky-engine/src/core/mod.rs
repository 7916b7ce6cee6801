pub use self::{block_tree::*, board::*, colour::*, flat_grid::*};

pub(crate) mod block_tree;
pub(crate) mod board;
pub(crate) mod colour;
pub(crate) mod flat_grid;
