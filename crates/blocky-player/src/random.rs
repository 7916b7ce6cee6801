use blocky_engine::{Board, Move};
use blocky_goal::Goal;
use rand::Rng;

use crate::candidate::{Candidate, evaluate_candidate, random_block, shuffled_actions};

/// A player that makes an arbitrary valid move.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    id: usize,
    goal: Goal,
}

impl RandomPlayer {
    /// Number of blocks sampled before giving up and passing.
    pub const MAX_ATTEMPTS: usize = 64;

    #[must_use]
    pub fn new(id: usize, goal: Goal) -> Self {
        Self { id, goal }
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Picks a random block, then returns the first action in shuffled order
    /// that can be applied to it.
    ///
    /// Each action is tried on a copy of `board`. Returns `None` if no valid
    /// move is found within [`RandomPlayer::MAX_ATTEMPTS`] blocks.
    pub fn choose_candidate<R>(&self, board: &Board, rng: &mut R) -> Option<Candidate>
    where
        R: Rng + ?Sized,
    {
        for _ in 0..Self::MAX_ATTEMPTS {
            let target = random_block(board, rng);
            for action in shuffled_actions(rng) {
                let mv = Move::new(action, target);
                if let Some(candidate) = evaluate_candidate(board, mv, self.goal, rng) {
                    tracing::debug!(player = self.id, action = %action, "random player chose move");
                    return Some(candidate);
                }
            }
        }
        tracing::debug!(player = self.id, "random player found no valid move");
        None
    }

    /// Returns the move of [`RandomPlayer::choose_candidate`], or a pass.
    #[must_use]
    pub fn generate_move<R>(&self, board: &Board, rng: &mut R) -> Move
    where
        R: Rng + ?Sized,
    {
        self.choose_candidate(board, rng)
            .map_or_else(|| Move::pass(board), |candidate| candidate.mv())
    }
}

#[cfg(test)]
mod tests {
    use blocky_engine::{Action, BlockTree, Colour, generate_board_with_rng};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const R: Colour = Colour::REAL_RED;

    #[test]
    fn test_moves_are_valid() {
        let mut rng = Pcg32::seed_from_u64(17);
        for _ in 0..20 {
            let board = generate_board_with_rng(64, 3, &mut rng).unwrap();
            let before = board.to_tree();
            let player = RandomPlayer::new(0, Goal::Blob(R));

            let mv = player.generate_move(&board, &mut rng);
            assert_eq!(board.to_tree(), before);
            assert_ne!(mv.action(), Action::Pass);

            let mut copy = board.clone();
            copy.apply(mv, R, &mut rng).unwrap();
        }
    }

    #[test]
    fn test_passes_when_nothing_is_valid() {
        let mut rng = Pcg32::seed_from_u64(0);
        // A single unit cell already in the goal colour
        let board = Board::from_tree(1, 0, &BlockTree::leaf(R)).unwrap();
        let player = RandomPlayer::new(0, Goal::Perimeter(R));
        assert_eq!(player.generate_move(&board, &mut rng), Move::pass(&board));
        assert!(player.choose_candidate(&board, &mut rng).is_none());
    }

    #[test]
    fn test_candidate_keeps_applied_board() {
        let mut rng = Pcg32::seed_from_u64(9);
        let board = generate_board_with_rng(32, 3, &mut rng).unwrap();
        let goal = Goal::Perimeter(R);
        let player = RandomPlayer::new(0, goal);
        for _ in 0..10 {
            let candidate = player.choose_candidate(&board, &mut rng).unwrap();
            assert_eq!(candidate.score(), goal.score(candidate.board()));
        }
    }
}
