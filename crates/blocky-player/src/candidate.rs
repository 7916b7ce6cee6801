//! Speculative evaluation of a single move.
//!
//! A candidate move is evaluated as *clone, apply, score, keep or discard*:
//! the board is only ever borrowed immutably, and the move is applied to a
//! private copy. A rejected move yields nothing, so the copy is dropped.

use blocky_engine::{Action, BlockId, Board, Move};
use blocky_goal::Goal;
use rand::Rng;

/// A move that was successfully applied to a copy of the board.
#[derive(Debug, Clone)]
pub struct Candidate {
    mv: Move,
    score: usize,
    board: Board,
}

impl Candidate {
    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Goal score of the board after the move.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// The copy of the board the move was applied to.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// Applies `mv` to a copy of `board` and scores the copy with `goal`.
///
/// Paint moves use the goal's colour. Returns `None` if the move is rejected.
///
/// # Example
///
/// ```
/// use blocky_engine::{Action, Board, Colour, Move};
/// use blocky_goal::Goal;
/// use blocky_player::evaluate_candidate;
///
/// let board = Board::new_leaf(4, 0, Colour::OLD_OLIVE).unwrap();
/// let goal = Goal::Blob(Colour::REAL_RED);
///
/// let mv = Move::new(Action::Paint, board.root());
/// let candidate = evaluate_candidate(&board, mv, goal, &mut rand::rng()).unwrap();
/// assert_eq!(candidate.score(), 1);
/// // The original board is untouched
/// assert_eq!(board.colour(board.root()), Some(Colour::OLD_OLIVE));
/// ```
pub fn evaluate_candidate<R>(board: &Board, mv: Move, goal: Goal, rng: &mut R) -> Option<Candidate>
where
    R: Rng + ?Sized,
{
    let mut board = board.clone();
    board.apply(mv, goal.colour(), rng).ok()?;
    let score = goal.score(&board);
    Some(Candidate { mv, score, board })
}

/// Picks a block at a uniformly random location and level.
pub(crate) fn random_block<R>(board: &Board, rng: &mut R) -> BlockId
where
    R: Rng + ?Sized,
{
    let size = board.size();
    let location = (rng.random_range(0..size), rng.random_range(0..size));
    let level = rng.random_range(0..=board.max_depth());
    board
        .block_at(location, level)
        .unwrap_or_else(|| board.root())
}

/// The non-pass actions in random order.
pub(crate) fn shuffled_actions<R>(rng: &mut R) -> [Action; 7]
where
    R: Rng + ?Sized,
{
    use rand::seq::SliceRandom as _;

    let mut actions = Action::CANDIDATES;
    actions.shuffle(rng);
    actions
}
