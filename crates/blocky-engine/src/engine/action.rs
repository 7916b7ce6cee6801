use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    ActionError,
    core::{
        board::{BlockId, Board, Rotation, SwapDirection},
        colour::Colour,
    },
};

/// A move a player can make on a block.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    #[display("rotate clockwise")]
    RotateClockwise,
    #[display("rotate counter-clockwise")]
    RotateCounterClockwise,
    #[display("swap horizontally")]
    SwapHorizontal,
    #[display("swap vertically")]
    SwapVertical,
    #[display("smash")]
    Smash,
    #[display("paint")]
    Paint,
    #[display("combine")]
    Combine,
    #[display("pass")]
    Pass,
}

impl Action {
    /// Every action except [`Action::Pass`].
    pub const CANDIDATES: [Self; 7] = [
        Self::RotateClockwise,
        Self::RotateCounterClockwise,
        Self::SwapHorizontal,
        Self::SwapVertical,
        Self::Smash,
        Self::Paint,
        Self::Combine,
    ];
}

/// An action together with the block it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    action: Action,
    target: BlockId,
}

impl Move {
    #[must_use]
    pub fn new(action: Action, target: BlockId) -> Self {
        Self { action, target }
    }

    /// A pass, targeting the top-level block.
    #[must_use]
    pub fn pass(board: &Board) -> Self {
        Self::new(Action::Pass, board.root())
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn target(&self) -> BlockId {
        self.target
    }
}

impl Board {
    /// Applies a move to the board.
    ///
    /// `paint_colour` is only used by [`Action::Paint`], and `rng` only by
    /// [`Action::Smash`]. [`Action::Pass`] always succeeds without changes.
    /// On error the board is left unchanged.
    pub fn apply<R>(&mut self, mv: Move, paint_colour: Colour, rng: &mut R) -> Result<(), ActionError>
    where
        R: Rng + ?Sized,
    {
        let id = mv.target;
        match mv.action {
            Action::RotateClockwise => self.rotate(id, Rotation::Clockwise),
            Action::RotateCounterClockwise => self.rotate(id, Rotation::CounterClockwise),
            Action::SwapHorizontal => self.swap(id, SwapDirection::Horizontal),
            Action::SwapVertical => self.swap(id, SwapDirection::Vertical),
            Action::Smash => self.smash(id, rng),
            Action::Paint => self.paint(id, paint_colour),
            Action::Combine => self.combine(id),
            Action::Pass => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::core::block_tree::BlockTree;

    const P: Colour = Colour::PACIFIC_POINT;
    const R: Colour = Colour::REAL_RED;
    const O: Colour = Colour::OLD_OLIVE;
    const D: Colour = Colour::DAFFODIL_DELIGHT;

    fn quadrant_board() -> Board {
        let tree = BlockTree::split([
            BlockTree::leaf(P),
            BlockTree::leaf(R),
            BlockTree::leaf(O),
            BlockTree::leaf(D),
        ]);
        Board::from_tree(4, 1, &tree).unwrap()
    }

    #[test]
    fn test_apply_dispatch() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = quadrant_board();
        let root = board.root();
        let [ur, ul, ll, lr] = board.children(root).unwrap();

        board
            .apply(Move::new(Action::RotateClockwise, root), P, &mut rng)
            .unwrap();
        assert_eq!(board.children(root), Some([ul, ll, lr, ur]));

        board
            .apply(Move::new(Action::RotateCounterClockwise, root), P, &mut rng)
            .unwrap();
        board
            .apply(Move::new(Action::SwapVertical, root), P, &mut rng)
            .unwrap();
        assert_eq!(board.children(root), Some([lr, ll, ul, ur]));

        board
            .apply(Move::new(Action::Paint, ul), D, &mut rng)
            .unwrap();
        assert_eq!(board.colour(ul), Some(D));

        board
            .apply(Move::new(Action::Combine, root), P, &mut rng)
            .unwrap();
        assert_eq!(board.colour(root), Some(D));
    }

    #[test]
    fn test_apply_rejections_leave_board_unchanged() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = quadrant_board();
        let before = board.to_tree();
        let [ur, ..] = board.children(board.root()).unwrap();

        let rejected = [
            (Move::new(Action::Smash, board.root()), ActionError::RootBlock),
            (Move::new(Action::Smash, ur), ActionError::AtMaxDepth),
            (Move::new(Action::SwapHorizontal, ur), ActionError::NotSplit),
            (Move::new(Action::Paint, ur), ActionError::SameColour),
            (Move::new(Action::Combine, board.root()), ActionError::NoMajorityColour),
        ];
        for (mv, error) in rejected {
            assert_eq!(board.apply(mv, P, &mut rng), Err(error), "{}", mv.action());
            assert_eq!(board.to_tree(), before);
        }
    }

    #[test]
    fn test_apply_to_unknown_block() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = Board::from_tree(
            4,
            1,
            &BlockTree::split([
                BlockTree::leaf(R),
                BlockTree::leaf(R),
                BlockTree::leaf(O),
                BlockTree::leaf(R),
            ]),
        )
        .unwrap();
        let [.., lr] = board.children(board.root()).unwrap();
        let held = Move::new(Action::Paint, lr);
        board
            .apply(Move::new(Action::Combine, board.root()), P, &mut rng)
            .unwrap();
        let before = board.to_tree();

        // A move held across the combine names a block that no longer exists
        assert_eq!(board.apply(held, D, &mut rng), Err(ActionError::UnknownBlock));

        let mv: Move =
            serde_json::from_str(r#"{"action":"rotate-clockwise","target":999}"#).unwrap();
        assert_eq!(board.apply(mv, P, &mut rng), Err(ActionError::UnknownBlock));
        assert_eq!(board.to_tree(), before);
    }

    #[test]
    fn test_pass() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = quadrant_board();
        let before = board.to_tree();
        board.apply(Move::pass(&board), P, &mut rng).unwrap();
        assert_eq!(board.to_tree(), before);
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(
            serde_json::to_string(&Action::RotateCounterClockwise).unwrap(),
            "\"rotate-counter-clockwise\""
        );
        let mv: Move = serde_json::from_str(r#"{"action":"smash","target":3}"#).unwrap();
        assert_eq!(mv.action(), Action::Smash);
    }
}
