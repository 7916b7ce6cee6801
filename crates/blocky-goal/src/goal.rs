use std::fmt;

use blocky_engine::{Board, Colour, FlatGrid};
use rand::{Rng, seq::SliceRandom as _};

use crate::{blob::blob_score, perimeter::perimeter_score};

/// Kind of goal, without its target colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::FromStr)]
pub enum GoalKind {
    #[display("perimeter")]
    Perimeter,
    #[display("blob")]
    Blob,
}

/// A player's objective: maximize a score computed for one target colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    Perimeter(Colour),
    Blob(Colour),
}

impl Goal {
    #[must_use]
    pub fn new(kind: GoalKind, colour: Colour) -> Self {
        match kind {
            GoalKind::Perimeter => Self::Perimeter(colour),
            GoalKind::Blob => Self::Blob(colour),
        }
    }

    #[must_use]
    pub fn kind(&self) -> GoalKind {
        match self {
            Self::Perimeter(_) => GoalKind::Perimeter,
            Self::Blob(_) => GoalKind::Blob,
        }
    }

    /// The target colour.
    #[must_use]
    pub fn colour(&self) -> Colour {
        match self {
            Self::Perimeter(colour) | Self::Blob(colour) => *colour,
        }
    }

    /// Scores the whole board.
    ///
    /// The board is flattened once per call; use [`Goal::score_grid`] to score
    /// several goals against the same grid.
    #[must_use]
    pub fn score(&self, board: &Board) -> usize {
        self.score_grid(&board.flatten())
    }

    #[must_use]
    pub fn score_grid(&self, grid: &FlatGrid) -> usize {
        match self {
            Self::Perimeter(colour) => perimeter_score(grid, *colour),
            Self::Blob(colour) => blob_score(grid, *colour),
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perimeter(colour) => write!(
                f,
                "Maximize number of {} unit cells on the perimeter, corner cells count double",
                colour.name()
            ),
            Self::Blob(colour) => write!(
                f,
                "Maximize number of {} unit cells that form a blob by touching sides. \
                 Touching corners doesn't count",
                colour.name()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GoalError {
    #[display("cannot generate {requested} goals with distinct colours from {available} colours")]
    TooManyGoals { requested: usize, available: usize },
}

/// Generates `count` goals of the same randomly chosen kind.
///
/// Each goal has a different palette colour, taken from the palette in
/// shuffled order.
///
/// # Example
///
/// ```
/// use blocky_goal::generate_goals;
///
/// let goals = generate_goals(3, &mut rand::rng()).unwrap();
/// assert_eq!(goals.len(), 3);
/// assert!(goals.iter().all(|g| g.kind() == goals[0].kind()));
/// ```
pub fn generate_goals<R>(count: usize, rng: &mut R) -> Result<Vec<Goal>, GoalError>
where
    R: Rng + ?Sized,
{
    let mut colours = Colour::PALETTE;
    if count > colours.len() {
        return Err(GoalError::TooManyGoals {
            requested: count,
            available: colours.len(),
        });
    }
    let kind = if rng.random_bool(0.5) {
        GoalKind::Perimeter
    } else {
        GoalKind::Blob
    };
    colours.shuffle(rng);
    Ok(colours
        .into_iter()
        .take(count)
        .map(|colour| Goal::new(kind, colour))
        .collect())
}
