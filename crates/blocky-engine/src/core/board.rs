use std::{array, collections::HashMap, iter};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{ActionError, BoardError, MAX_SUPPORTED_DEPTH};

use super::colour::Colour;

/// Index of a block inside a [`Board`].
///
/// Ids stay valid across [`Board::clone`], so a block found on a speculative
/// copy names the same block on the board it was copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u32);

impl BlockId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a child inside its parent.
///
/// The discriminant is the index of the child in [`BlockKind::Split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UpperRight = 0,
    UpperLeft = 1,
    LowerLeft = 2,
    LowerRight = 3,
}

impl Quadrant {
    pub const ALL: [Self; 4] = [
        Self::UpperRight,
        Self::UpperLeft,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    /// Offset of this quadrant from the parent's top-left corner, for a child of side `half`.
    #[must_use]
    pub const fn offset(self, half: u32) -> (u32, u32) {
        match self {
            Self::UpperRight => (half, 0),
            Self::UpperLeft => (0, 0),
            Self::LowerLeft => (0, half),
            Self::LowerRight => (half, half),
        }
    }
}

/// Whether a block is a coloured leaf or is split into four quadrants.
///
/// Children are ordered upper-right, upper-left, lower-left, lower-right
/// (see [`Quadrant`]). A split block has no colour of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum BlockKind {
    Leaf(Colour),
    Split([BlockId; 4]),
}

#[derive(Debug, Clone)]
struct BlockNode {
    position: (u32, u32),
    size: u32,
    level: u8,
    kind: BlockKind,
    // Set while the slot sits on the free list
    released: bool,
}

/// Rotation direction for [`Board::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Swap direction for [`Board::swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    /// Exchange the left and right halves.
    Horizontal,
    /// Exchange the top and bottom halves.
    Vertical,
}

/// The game board: a recursive four-way partition of a square, stored as an arena.
///
/// Every block is a node addressed by [`BlockId`]. A block is either a leaf
/// with a colour, or split into exactly four children that cover its area
/// without gaps or overlaps, each with half its side length and one more
/// level. No block is deeper than [`Board::max_depth`], where blocks are unit
/// cells.
///
/// Slots released by [`Board::combine`] are recycled by later subdivisions.
///
/// # Example
///
/// ```
/// use blocky_engine::{Board, Colour, Rotation};
///
/// let mut board = Board::new_leaf(8, 2, Colour::REAL_RED).unwrap();
/// assert!(board.is_leaf(board.root()));
///
/// // Splitting the root is only possible through generation or a block tree,
/// // so rotating a single leaf is rejected.
/// assert!(board.rotate(board.root(), Rotation::Clockwise).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    nodes: Vec<BlockNode>,
    free: Vec<BlockId>,
    root: BlockId,
    max_depth: u8,
}

impl Board {
    /// Creates a board consisting of a single leaf.
    ///
    /// `size` must be positive and divisible by `2^max_depth`, so that every
    /// subdivision down to unit cells halves it exactly.
    pub fn new_leaf(size: u32, max_depth: u8, colour: Colour) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        if max_depth > MAX_SUPPORTED_DEPTH {
            return Err(BoardError::DepthTooLarge { max_depth });
        }
        if size % (1 << max_depth) != 0 {
            return Err(BoardError::IndivisibleSize { size, max_depth });
        }
        let root = BlockNode {
            position: (0, 0),
            size,
            level: 0,
            kind: BlockKind::Leaf(colour),
            released: false,
        };
        Ok(Self {
            nodes: vec![root],
            free: vec![],
            root: BlockId(0),
            max_depth,
        })
    }

    #[must_use]
    pub fn root(&self) -> BlockId {
        self.root
    }

    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Side length of the whole board.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.node(self.root).size
    }

    fn node(&self, id: BlockId) -> &BlockNode {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: BlockId) -> &mut BlockNode {
        &mut self.nodes[id.index()]
    }

    /// Returns whether `id` names a block currently in the tree.
    ///
    /// Ids of blocks merged away by [`Board::combine`], and ids that never
    /// belonged to this board, are not live. The query methods below panic on
    /// such ids; the actions reject them with [`ActionError::UnknownBlock`].
    #[must_use]
    pub fn is_live(&self, id: BlockId) -> bool {
        self.nodes.get(id.index()).is_some_and(|node| !node.released)
    }

    fn live_node(&self, id: BlockId) -> Result<&BlockNode, ActionError> {
        self.nodes
            .get(id.index())
            .filter(|node| !node.released)
            .ok_or(ActionError::UnknownBlock)
    }

    /// Top-left corner of the block.
    #[must_use]
    pub fn position(&self, id: BlockId) -> (u32, u32) {
        self.node(id).position
    }

    #[must_use]
    pub fn block_size(&self, id: BlockId) -> u32 {
        self.node(id).size
    }

    #[must_use]
    pub fn level(&self, id: BlockId) -> u8 {
        self.node(id).level
    }

    #[must_use]
    pub fn kind(&self, id: BlockId) -> BlockKind {
        self.node(id).kind
    }

    #[must_use]
    pub fn is_leaf(&self, id: BlockId) -> bool {
        self.node(id).kind.is_leaf()
    }

    /// Colour of a leaf, or `None` for a split block.
    #[must_use]
    pub fn colour(&self, id: BlockId) -> Option<Colour> {
        match self.node(id).kind {
            BlockKind::Leaf(colour) => Some(colour),
            BlockKind::Split(_) => None,
        }
    }

    #[must_use]
    pub fn children(&self, id: BlockId) -> Option<[BlockId; 4]> {
        match self.node(id).kind {
            BlockKind::Leaf(_) => None,
            BlockKind::Split(children) => Some(children),
        }
    }

    /// Number of unit cells along one side of the block: `2^(max_depth - level)`.
    #[must_use]
    pub fn cells_per_side(&self, id: BlockId) -> usize {
        1 << (self.max_depth - self.level(id))
    }

    /// All leaves reachable from the root, in depth-first child order.
    #[must_use]
    pub fn leaves(&self) -> Vec<BlockId> {
        self.leaves_of(self.root)
    }

    /// All leaves of the subtree rooted at `id`, in depth-first child order.
    #[must_use]
    pub fn leaves_of(&self, id: BlockId) -> Vec<BlockId> {
        let mut leaves = vec![];
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match self.node(id).kind {
                BlockKind::Leaf(_) => leaves.push(id),
                BlockKind::Split(children) => stack.extend(children.into_iter().rev()),
            }
        }
        leaves
    }

    /// Returns whether `(x, y)` lies within the block.
    ///
    /// A block includes its top and left edges but not its bottom and right edges.
    #[must_use]
    pub fn contains(&self, id: BlockId, (x, y): (u32, u32)) -> bool {
        let node = self.node(id);
        let (x0, y0) = node.position;
        (x0..x0 + node.size).contains(&x) && (y0..y0 + node.size).contains(&y)
    }

    /// Returns the block at `level` that contains `location`.
    ///
    /// If the deepest block containing `location` is above `level`, that block
    /// is returned instead. Returns `None` if `location` is outside the board.
    #[must_use]
    pub fn block_at(&self, location: (u32, u32), level: u8) -> Option<BlockId> {
        let mut current = self.root;
        if !self.contains(current, location) {
            return None;
        }
        loop {
            if self.level(current) >= level {
                return Some(current);
            }
            let Some(children) = self.children(current) else {
                return Some(current);
            };
            current = children
                .into_iter()
                .find(|child| self.contains(*child, location))?;
        }
    }

    /// Rotates the children of a split block, recursively through all descendants.
    pub fn rotate(&mut self, id: BlockId, rotation: Rotation) -> Result<(), ActionError> {
        if self.live_node(id)?.kind.is_leaf() {
            return Err(ActionError::NotSplit);
        }
        self.rotate_subtree(id, rotation);
        self.update_positions(id, self.position(id));
        Ok(())
    }

    fn rotate_subtree(&mut self, id: BlockId, rotation: Rotation) {
        let BlockKind::Split([ur, ul, ll, lr]) = self.node(id).kind else {
            return;
        };
        let rotated = match rotation {
            Rotation::Clockwise => [ul, ll, lr, ur],
            Rotation::CounterClockwise => [lr, ur, ul, ll],
        };
        self.node_mut(id).kind = BlockKind::Split(rotated);
        for child in rotated {
            self.rotate_subtree(child, rotation);
        }
    }

    /// Swaps the halves of a split block. Descendants keep their arrangement.
    pub fn swap(&mut self, id: BlockId, direction: SwapDirection) -> Result<(), ActionError> {
        let BlockKind::Split([ur, ul, ll, lr]) = self.live_node(id)?.kind else {
            return Err(ActionError::NotSplit);
        };
        let swapped = match direction {
            SwapDirection::Horizontal => [ul, ur, lr, ll],
            SwapDirection::Vertical => [lr, ll, ul, ur],
        };
        self.node_mut(id).kind = BlockKind::Split(swapped);
        self.update_positions(id, self.position(id));
        Ok(())
    }

    /// Recolours a unit cell.
    pub fn paint(&mut self, id: BlockId, colour: Colour) -> Result<(), ActionError> {
        let node = self.live_node(id)?;
        let BlockKind::Leaf(current) = node.kind else {
            return Err(ActionError::NotUnitCell);
        };
        if node.level != self.max_depth {
            return Err(ActionError::NotUnitCell);
        }
        if current == colour {
            return Err(ActionError::SameColour);
        }
        self.node_mut(id).kind = BlockKind::Leaf(colour);
        Ok(())
    }

    /// Merges the four unit-cell children of a block into a single leaf.
    ///
    /// The new leaf takes the colour held by a strict majority of the
    /// children. A tie is rejected.
    pub fn combine(&mut self, id: BlockId) -> Result<(), ActionError> {
        let node = self.live_node(id)?;
        let BlockKind::Split(children) = node.kind else {
            return Err(ActionError::NotCombinable);
        };
        if self.max_depth == 0 || node.level != self.max_depth - 1 {
            return Err(ActionError::NotCombinable);
        }

        let mut counts = HashMap::<Colour, usize>::new();
        for child in children {
            if let Some(colour) = self.colour(child) {
                *counts.entry(colour).or_default() += 1;
            }
        }
        let Some(max_count) = counts.values().copied().max() else {
            return Err(ActionError::NoMajorityColour);
        };
        let mut majority = counts.iter().filter(|(_, count)| **count == max_count);
        let (Some((colour, _)), None) = (majority.next(), majority.next()) else {
            return Err(ActionError::NoMajorityColour);
        };
        let colour = *colour;

        self.node_mut(id).kind = BlockKind::Leaf(colour);
        for child in children {
            self.release(child);
        }
        tracing::trace!(block = ?id, %colour, "combined block");
        Ok(())
    }

    /// Splits a leaf into four random children.
    ///
    /// The top-level block and unit cells cannot be smashed. Each new child
    /// above max depth is smashed again with probability `exp(-0.25 * level)`;
    /// the rest get a uniformly random palette colour.
    pub fn smash<R>(&mut self, id: BlockId, rng: &mut R) -> Result<(), ActionError>
    where
        R: Rng + ?Sized,
    {
        let node = self.live_node(id)?;
        if id == self.root {
            return Err(ActionError::RootBlock);
        }
        if node.kind.is_split() {
            return Err(ActionError::AlreadySplit);
        }
        if node.level >= self.max_depth {
            return Err(ActionError::AtMaxDepth);
        }
        self.subdivide_randomly(id, rng);
        tracing::trace!(block = ?id, "smashed block");
        Ok(())
    }

    pub(crate) fn subdivide_randomly<R>(&mut self, id: BlockId, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let colours = array::from_fn(|_| rng.random());
        for child in self.subdivide(id, colours) {
            let level = self.level(child);
            if level < self.max_depth && rng.random_bool((-0.25 * f64::from(level)).exp()) {
                self.subdivide_randomly(child, rng);
            }
        }
    }

    /// Replaces a leaf with four leaf children of the given colours, in quadrant order.
    ///
    /// # Panics
    ///
    /// Panics if the block is already at max depth.
    pub(crate) fn subdivide(&mut self, id: BlockId, colours: [Colour; 4]) -> [BlockId; 4] {
        let BlockNode {
            position: (x, y),
            size,
            level,
            ..
        } = *self.node(id);
        assert!(level < self.max_depth, "cannot subdivide a unit cell");
        let half = size / 2;
        let children = array::from_fn(|i| {
            let (dx, dy) = Quadrant::ALL[i].offset(half);
            self.alloc(BlockNode {
                position: (x + dx, y + dy),
                size: half,
                level: level + 1,
                kind: BlockKind::Leaf(colours[i]),
                released: false,
            })
        });
        self.node_mut(id).kind = BlockKind::Split(children);
        children
    }

    pub(crate) fn set_leaf_colour(&mut self, id: BlockId, colour: Colour) {
        self.node_mut(id).kind = BlockKind::Leaf(colour);
    }

    fn update_positions(&mut self, id: BlockId, position: (u32, u32)) {
        let node = self.node_mut(id);
        node.position = position;
        let half = node.size / 2;
        if let BlockKind::Split(children) = node.kind {
            for (child, quadrant) in iter::zip(children, Quadrant::ALL) {
                let (dx, dy) = quadrant.offset(half);
                self.update_positions(child, (position.0 + dx, position.1 + dy));
            }
        }
    }

    fn alloc(&mut self, node: BlockNode) -> BlockId {
        if let Some(id) = self.free.pop() {
            *self.node_mut(id) = node;
            return id;
        }
        let id = BlockId(u32::try_from(self.nodes.len()).expect("block arena overflow"));
        self.nodes.push(node);
        id
    }

    fn release(&mut self, id: BlockId) {
        if let Some(children) = self.children(id) {
            for child in children {
                self.release(child);
            }
        }
        self.node_mut(id).released = true;
        self.free.push(id);
    }
}
