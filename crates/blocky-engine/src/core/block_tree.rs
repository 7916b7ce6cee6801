use std::iter;

use serde::{Deserialize, Serialize};

use crate::BoardError;

use super::{
    board::{BlockId, BlockKind, Board},
    colour::Colour,
};

/// Nested, position-free description of a block and its descendants.
///
/// This is the serialized form of a board: `{"colour": "#rrggbb"}` for a leaf,
/// `{"children": [ur, ul, ll, lr]}` for a split block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTree {
    Leaf { colour: Colour },
    Split { children: Box<[BlockTree; 4]> },
}

impl BlockTree {
    #[must_use]
    pub fn leaf(colour: Colour) -> Self {
        Self::Leaf { colour }
    }

    #[must_use]
    pub fn split(children: [BlockTree; 4]) -> Self {
        Self::Split {
            children: Box::new(children),
        }
    }

    /// Number of levels below this node; zero for a leaf.
    #[must_use]
    pub fn depth(&self) -> u8 {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { children } => {
                1 + children.iter().map(BlockTree::depth).max().unwrap_or(0)
            }
        }
    }
}

/// A complete board as stored on disk.
///
/// # Example
///
/// ```
/// use blocky_engine::{Board, BoardSnapshot};
///
/// let json = r##"{"size": 4, "max_depth": 1, "tree": {"children": [
///     {"colour": "#c72c3a"}, {"colour": "#c72c3a"},
///     {"colour": "#0180b5"}, {"colour": "#0180b5"}
/// ]}}"##;
/// let snapshot: BoardSnapshot = serde_json::from_str(json).unwrap();
/// let board = Board::try_from(&snapshot).unwrap();
/// assert_eq!(board.leaves().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: u32,
    pub max_depth: u8,
    pub tree: BlockTree,
}

impl Board {
    /// Builds a board from a block tree.
    ///
    /// Fails if `size` and `max_depth` are rejected by [`Board::new_leaf`], or if
    /// the tree splits a block at max depth.
    pub fn from_tree(size: u32, max_depth: u8, tree: &BlockTree) -> Result<Self, BoardError> {
        if tree.depth() > max_depth {
            return Err(BoardError::TreeTooDeep { max_depth });
        }
        let mut board = Self::new_leaf(size, max_depth, Colour::PALETTE[0])?;
        board.build(board.root(), tree);
        Ok(board)
    }

    fn build(&mut self, id: BlockId, tree: &BlockTree) {
        match tree {
            BlockTree::Leaf { colour } => self.set_leaf_colour(id, *colour),
            BlockTree::Split { children } => {
                let ids = self.subdivide(id, [Colour::PALETTE[0]; 4]);
                for (child, subtree) in iter::zip(ids, children.iter()) {
                    self.build(child, subtree);
                }
            }
        }
    }

    /// Describes the subtree rooted at `id`.
    #[must_use]
    pub fn tree_of(&self, id: BlockId) -> BlockTree {
        match self.kind(id) {
            BlockKind::Leaf(colour) => BlockTree::leaf(colour),
            BlockKind::Split(children) => BlockTree::split(children.map(|c| self.tree_of(c))),
        }
    }

    #[must_use]
    pub fn to_tree(&self) -> BlockTree {
        self.tree_of(self.root())
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size(),
            max_depth: self.max_depth(),
            tree: self.to_tree(),
        }
    }
}

impl TryFrom<&BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: &BoardSnapshot) -> Result<Self, Self::Error> {
        Board::from_tree(snapshot.size, snapshot.max_depth, &snapshot.tree)
    }
}
