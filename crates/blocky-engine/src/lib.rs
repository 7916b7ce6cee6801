pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Deepest board the engine will build.
///
/// A board at this depth flattens to a 4096×4096 grid.
pub const MAX_SUPPORTED_DEPTH: u8 = 12;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board size must be positive")]
    ZeroSize,
    #[display("max depth {max_depth} is larger than the engine supports")]
    DepthTooLarge { max_depth: u8 },
    #[display("board size {size} cannot be halved {max_depth} times")]
    IndivisibleSize { size: u32, max_depth: u8 },
    #[display("block tree is deeper than max depth {max_depth}")]
    TreeTooDeep { max_depth: u8 },
}

/// Reasons a structural action is rejected.
///
/// A rejected action never modifies the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ActionError {
    #[display("block is not part of the board")]
    UnknownBlock,
    #[display("block has no children")]
    NotSplit,
    #[display("block already has children")]
    AlreadySplit,
    #[display("the top-level block cannot be smashed")]
    RootBlock,
    #[display("block is already at max depth")]
    AtMaxDepth,
    #[display("only unit cells can be painted")]
    NotUnitCell,
    #[display("block already has that colour")]
    SameColour,
    #[display("only blocks one level above max depth can be combined")]
    NotCombinable,
    #[display("children have no majority colour")]
    NoMajorityColour,
}
