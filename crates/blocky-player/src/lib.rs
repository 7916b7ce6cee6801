//! Players that decide moves on a Blocky board.
//!
//! Every player has an id and a [`Goal`]. Three kinds exist:
//!
//! - [`HumanPlayer`] - Turns selection state (pointer, level, requested
//!   action) into a move. The move is not validated.
//! - [`RandomPlayer`] - Makes a random valid move.
//! - [`SmartPlayer`] - Samples `difficulty` valid moves, keeps the best one
//!   for its goal, and passes if none beats the current score.
//!
//! Computer players evaluate moves speculatively (see [`candidate`]): each
//! candidate is applied to a copy of the board, so generating a move never
//! changes the board passed in.
//!
//! # Example
//!
//! ```
//! use blocky_engine::{BoardConfig, Colour, generate_board};
//! use blocky_goal::Goal;
//! use blocky_player::{Player, SmartPlayer};
//!
//! let board = generate_board(&BoardConfig::default()).unwrap();
//! let mut player = Player::from(SmartPlayer::new(0, Goal::Blob(Colour::REAL_RED), 5));
//!
//! let mv = player.generate_move(&board, &mut rand::rng()).unwrap();
//! println!("{} on block {:?}", mv.action(), mv.target());
//! ```

use blocky_engine::{Board, Move};
use blocky_goal::Goal;
use rand::Rng;

pub use self::{candidate::*, human::*, random::*, smart::*};

pub mod candidate;
mod human;
mod random;
mod smart;

/// Kind of computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr)]
pub enum PlayerKind {
    #[display("random")]
    Random,
    #[display("smart")]
    Smart,
}

#[derive(Debug, Clone, derive_more::From, derive_more::IsVariant)]
pub enum Player {
    Human(HumanPlayer),
    Random(RandomPlayer),
    Smart(SmartPlayer),
}

impl Player {
    #[must_use]
    pub fn id(&self) -> usize {
        match self {
            Self::Human(player) => player.id(),
            Self::Random(player) => player.id(),
            Self::Smart(player) => player.id(),
        }
    }

    #[must_use]
    pub fn goal(&self) -> Goal {
        match self {
            Self::Human(player) => player.goal(),
            Self::Random(player) => player.goal(),
            Self::Smart(player) => player.goal(),
        }
    }

    /// Returns the move this player wants to make on `board`.
    ///
    /// Computer players always return a move (possibly a pass). A human player
    /// returns `None` until it has both a selected block and a requested action.
    pub fn generate_move<R>(&mut self, board: &Board, rng: &mut R) -> Option<Move>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Human(player) => player.generate_move(board),
            Self::Random(player) => Some(player.generate_move(board, rng)),
            Self::Smart(player) => Some(player.generate_move(board, rng)),
        }
    }

    /// Like [`Player::generate_move`], but also returns the board after the
    /// move and its score.
    ///
    /// Returns `None` when the player passes, or when a human player's move
    /// is missing or cannot be applied.
    pub fn choose_candidate<R>(&mut self, board: &Board, rng: &mut R) -> Option<Candidate>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Human(player) => {
                let goal = player.goal();
                let mv = player.generate_move(board)?;
                evaluate_candidate(board, mv, goal, rng)
            }
            Self::Random(player) => player.choose_candidate(board, rng),
            Self::Smart(player) => player.choose_candidate(board, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use blocky_engine::{Action, Colour, generate_board_with_rng};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_dispatch() {
        let mut rng = Pcg32::seed_from_u64(4);
        let board = generate_board_with_rng(64, 2, &mut rng).unwrap();
        let goal = Goal::Perimeter(Colour::DAFFODIL_DELIGHT);

        let mut players = [
            Player::from(HumanPlayer::new(0, goal)),
            Player::from(RandomPlayer::new(1, goal)),
            Player::from(SmartPlayer::new(2, goal, 3)),
        ];
        assert!(players[0].generate_move(&board, &mut rng).is_none());
        for (i, player) in players.iter_mut().enumerate() {
            assert_eq!(player.id(), i);
            assert_eq!(player.goal(), goal);
        }
        assert!(players[1].generate_move(&board, &mut rng).is_some());
        assert!(players[2].generate_move(&board, &mut rng).is_some());

        let Player::Human(human) = &mut players[0] else {
            unreachable!();
        };
        human.set_pointer(Some((0, 0)));
        human.select_action(Action::SwapVertical);
        assert_eq!(
            players[0].generate_move(&board, &mut rng),
            Some(Move::new(Action::SwapVertical, board.root()))
        );
    }

    #[test]
    fn test_human_candidate() {
        let mut rng = Pcg32::seed_from_u64(8);
        let board = generate_board_with_rng(64, 2, &mut rng).unwrap();
        let goal = Goal::Blob(Colour::OLD_OLIVE);
        let mut human = HumanPlayer::new(0, goal);
        human.set_pointer(Some((0, 0)));
        human.select_action(Action::RotateClockwise);
        let mut player = Player::from(human);

        let candidate = player.choose_candidate(&board, &mut rng).unwrap();
        assert_eq!(candidate.mv(), Move::new(Action::RotateClockwise, board.root()));
        assert_eq!(candidate.score(), goal.score(candidate.board()));
        // The pending action was consumed
        assert!(player.choose_candidate(&board, &mut rng).is_none());
    }

    #[test]
    fn test_player_kind_parse() {
        assert_eq!("smart".parse::<PlayerKind>().unwrap(), PlayerKind::Smart);
        assert_eq!(PlayerKind::Random.to_string(), "random");
    }
}
