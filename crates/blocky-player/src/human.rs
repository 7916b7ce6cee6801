use blocky_engine::{Action, BlockId, Board, Move};
use blocky_goal::Goal;

/// A player driven by external input.
///
/// Input is reduced to three pieces of state: a selected level, a pointer
/// location on the board, and the action the player last asked for. Turning
/// keystrokes or mouse movement into these calls is up to the caller.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    id: usize,
    goal: Goal,
    level: u8,
    pointer: Option<(u32, u32)>,
    pending: Option<Action>,
}

impl HumanPlayer {
    #[must_use]
    pub fn new(id: usize, goal: Goal) -> Self {
        Self {
            id,
            goal,
            level: 0,
            pointer: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// The selected level. May exceed the board's max depth; it is clamped
    /// when a block is selected.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Selects the parent level, stopping at the top-level block.
    ///
    /// Any pending action is discarded.
    pub fn raise_level(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.pending = None;
    }

    /// Selects the child level. Any pending action is discarded.
    pub fn lower_level(&mut self) {
        self.level = self.level.saturating_add(1);
        self.pending = None;
    }

    /// Moves the pointer; `None` means it is outside the board area.
    pub fn set_pointer(&mut self, pointer: Option<(u32, u32)>) {
        self.pointer = pointer;
    }

    /// Requests `action` for the next call to [`HumanPlayer::generate_move`].
    pub fn select_action(&mut self, action: Action) {
        self.pending = Some(action);
    }

    #[must_use]
    pub fn pending_action(&self) -> Option<Action> {
        self.pending
    }

    /// The block under the pointer at the selected level.
    #[must_use]
    pub fn selected_block(&self, board: &Board) -> Option<BlockId> {
        let pointer = self.pointer?;
        board.block_at(pointer, self.level.min(board.max_depth()))
    }

    /// Returns the pending action against the selected block, consuming it.
    ///
    /// The move is not validated. Returns `None`, keeping the pending action,
    /// if no block is selected.
    pub fn generate_move(&mut self, board: &Board) -> Option<Move> {
        let target = self.selected_block(board)?;
        let action = self.pending.take()?;
        Some(Move::new(action, target))
    }
}

#[cfg(test)]
mod tests {
    use blocky_engine::{BlockTree, Colour};

    use super::*;

    const P: Colour = Colour::PACIFIC_POINT;
    const R: Colour = Colour::REAL_RED;

    fn board() -> Board {
        let tree = BlockTree::split([
            BlockTree::leaf(R),
            BlockTree::split([
                BlockTree::leaf(P),
                BlockTree::leaf(R),
                BlockTree::leaf(P),
                BlockTree::leaf(R),
            ]),
            BlockTree::leaf(P),
            BlockTree::leaf(R),
        ]);
        Board::from_tree(16, 2, &tree).unwrap()
    }

    #[test]
    fn test_no_move_without_action_or_pointer() {
        let board = board();
        let mut player = HumanPlayer::new(0, Goal::Blob(R));
        assert_eq!(player.generate_move(&board), None);

        player.set_pointer(Some((1, 1)));
        assert_eq!(player.generate_move(&board), None);

        player.set_pointer(None);
        player.select_action(Action::Smash);
        assert_eq!(player.generate_move(&board), None);
        // Still pending once the pointer is back on the board
        assert_eq!(player.pending_action(), Some(Action::Smash));

        player.set_pointer(Some((20, 1)));
        assert_eq!(player.generate_move(&board), None);
    }

    #[test]
    fn test_move_consumes_action() {
        let board = board();
        let mut player = HumanPlayer::new(1, Goal::Blob(R));
        player.set_pointer(Some((1, 1)));
        player.select_action(Action::RotateClockwise);

        let mv = player.generate_move(&board).unwrap();
        assert_eq!(mv, Move::new(Action::RotateClockwise, board.root()));
        assert_eq!(player.pending_action(), None);
        assert_eq!(player.generate_move(&board), None);
    }

    #[test]
    fn test_levels() {
        let board = board();
        let [_, ul, ..] = board.children(board.root()).unwrap();
        let [_, ul_ul, ..] = board.children(ul).unwrap();
        let mut player = HumanPlayer::new(0, Goal::Perimeter(P));
        player.set_pointer(Some((1, 1)));

        player.raise_level();
        assert_eq!(player.level(), 0);
        assert_eq!(player.selected_block(&board), Some(board.root()));

        player.lower_level();
        assert_eq!(player.selected_block(&board), Some(ul));

        player.select_action(Action::Paint);
        player.lower_level();
        assert_eq!(player.pending_action(), None);
        assert_eq!(player.selected_block(&board), Some(ul_ul));

        // Levels past max depth select the deepest block
        player.lower_level();
        player.lower_level();
        assert_eq!(player.level(), 4);
        assert_eq!(player.selected_block(&board), Some(ul_ul));
    }

    #[test]
    fn test_move_may_be_invalid() {
        let board = board();
        let mut player = HumanPlayer::new(0, Goal::Perimeter(P));
        player.set_pointer(Some((0, 0)));
        player.select_action(Action::Smash);
        // Smashing the top-level block is rejected only when applied
        let mv = player.generate_move(&board).unwrap();
        assert_eq!(mv.target(), board.root());
    }
}
