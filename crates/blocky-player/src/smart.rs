use blocky_engine::{Board, Move};
use blocky_goal::Goal;
use rand::Rng;

use crate::candidate::{Candidate, evaluate_candidate, random_block, shuffled_actions};

/// A player that samples several valid moves and keeps the best one.
///
/// Higher difficulty means more sampled moves and so, on average, better play.
#[derive(Debug, Clone)]
pub struct SmartPlayer {
    id: usize,
    goal: Goal,
    difficulty: usize,
}

impl SmartPlayer {
    /// Sampling rounds allowed per requested candidate before the search
    /// settles for what it has. Each round tries every action once.
    pub const ROUNDS_PER_CANDIDATE: usize = 16;

    /// Upper bound on the number of candidates compared in one turn.
    pub const MAX_CANDIDATES: usize = 1024;

    #[must_use]
    pub fn new(id: usize, goal: Goal, difficulty: usize) -> Self {
        Self {
            id,
            goal,
            difficulty,
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

    /// Collects up to `difficulty` valid candidate moves.
    ///
    /// Actions are visited in one shuffled order, each paired with a freshly
    /// sampled block and evaluated on a fresh copy of `board`. At most
    /// [`SmartPlayer::MAX_CANDIDATES`] candidates are kept.
    #[must_use]
    pub fn sample_candidates<R>(&self, board: &Board, rng: &mut R) -> Vec<Candidate>
    where
        R: Rng + ?Sized,
    {
        let wanted = self.difficulty.min(Self::MAX_CANDIDATES);
        let mut candidates = Vec::new();
        if wanted == 0 {
            return candidates;
        }
        let actions = shuffled_actions(rng);
        for _ in 0..wanted.saturating_mul(Self::ROUNDS_PER_CANDIDATE) {
            for action in actions {
                let mv = Move::new(action, random_block(board, rng));
                if let Some(candidate) = evaluate_candidate(board, mv, self.goal, rng) {
                    candidates.push(candidate);
                    if candidates.len() == wanted {
                        return candidates;
                    }
                }
            }
        }
        candidates
    }

    /// Returns the highest-scoring sampled candidate if it strictly improves
    /// on the current score.
    ///
    /// Among equally good candidates the first one sampled wins. `board` is
    /// never modified.
    pub fn choose_candidate<R>(&self, board: &Board, rng: &mut R) -> Option<Candidate>
    where
        R: Rng + ?Sized,
    {
        let current = self.goal.score(board);
        let candidates = self.sample_candidates(board, rng);
        let sampled = candidates.len();

        let mut best: Option<Candidate> = None;
        for candidate in candidates {
            if best.as_ref().is_none_or(|b| candidate.score() > b.score()) {
                best = Some(candidate);
            }
        }

        match best {
            Some(best) if best.score() > current => {
                tracing::debug!(
                    player = self.id,
                    action = %best.mv().action(),
                    current,
                    score = best.score(),
                    candidates = sampled,
                    "smart player chose move"
                );
                Some(best)
            }
            best => {
                tracing::debug!(
                    player = self.id,
                    current,
                    best = best.as_ref().map(Candidate::score),
                    candidates = sampled,
                    "smart player passes"
                );
                None
            }
        }
    }

    /// Returns the move of [`SmartPlayer::choose_candidate`], or a pass.
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
    const O: Colour = Colour::OLD_OLIVE;

    fn board(colours: [Colour; 4]) -> Board {
        Board::from_tree(8, 1, &BlockTree::split(colours.map(BlockTree::leaf))).unwrap()
    }

    #[test]
    fn test_passes_without_improvement() {
        let mut rng = Pcg32::seed_from_u64(1);
        // Every valid move keeps the whole board red
        let board = board([R; 4]);
        let player = SmartPlayer::new(0, Goal::Blob(R), 10);
        assert_eq!(player.sample_candidates(&board, &mut rng).len(), 10);
        assert_eq!(player.generate_move(&board, &mut rng), Move::pass(&board));
    }

    #[test]
    fn test_finds_improvement() {
        let mut rng = Pcg32::seed_from_u64(2);
        let board = board([R, R, R, O]);
        let before = board.to_tree();
        let goal = Goal::Blob(R);
        let player = SmartPlayer::new(0, goal, 40);

        let mv = player.generate_move(&board, &mut rng);
        assert_eq!(board.to_tree(), before);
        assert!(matches!(mv.action(), Action::Paint | Action::Combine));

        let mut after = board.clone();
        after.apply(mv, goal.colour(), &mut rng).unwrap();
        assert_eq!(goal.score(&after), 4);
    }

    #[test]
    fn test_candidates_are_valid_and_bounded() {
        let mut rng = Pcg32::seed_from_u64(3);
        let board = generate_board_with_rng(64, 3, &mut rng).unwrap();
        let goal = Goal::Perimeter(O);
        let player = SmartPlayer::new(0, goal, 5);

        let candidates = player.sample_candidates(&board, &mut rng);
        assert_eq!(candidates.len(), 5);
        for candidate in &candidates {
            assert_ne!(candidate.mv().action(), Action::Pass);
            assert_eq!(candidate.score(), goal.score(candidate.board()));
        }
    }

    #[test]
    fn test_chosen_candidate_matches_its_board() {
        let mut rng = Pcg32::seed_from_u64(5);
        let board = generate_board_with_rng(64, 3, &mut rng).unwrap();
        for goal in [Goal::Blob(O), Goal::Perimeter(R)] {
            let player = SmartPlayer::new(0, goal, 20);
            let Some(candidate) = player.choose_candidate(&board, &mut rng) else {
                continue;
            };
            assert!(candidate.score() > goal.score(&board));
            assert_eq!(candidate.score(), goal.score(candidate.board()));
        }
    }

    #[test]
    fn test_huge_difficulty() {
        let mut rng = Pcg32::seed_from_u64(6);
        let player = SmartPlayer::new(0, Goal::Blob(R), usize::MAX);

        let unit = Board::new_leaf(1, 0, R).unwrap();
        assert_eq!(player.generate_move(&unit, &mut rng), Move::pass(&unit));

        let board = board([R, R, R, O]);
        let candidates = player.sample_candidates(&board, &mut rng);
        assert!(!candidates.is_empty());
        assert!(candidates.len() <= SmartPlayer::MAX_CANDIDATES);
        let candidate = player.choose_candidate(&board, &mut rng).unwrap();
        assert_eq!(candidate.score(), 4);
    }

    #[test]
    fn test_zero_difficulty_passes() {
        let mut rng = Pcg32::seed_from_u64(0);
        let board = board([R, R, R, O]);
        let player = SmartPlayer::new(0, Goal::Blob(R), 0);
        assert_eq!(player.generate_move(&board, &mut rng), Move::pass(&board));
    }

    #[test]
    fn test_no_valid_moves_passes() {
        let mut rng = Pcg32::seed_from_u64(0);
        let board = Board::new_leaf(1, 0, R).unwrap();
        let player = SmartPlayer::new(0, Goal::Blob(R), 3);
        assert!(player.sample_candidates(&board, &mut rng).is_empty());
        assert_eq!(player.generate_move(&board, &mut rng), Move::pass(&board));
    }
}
