use std::str::FromStr;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    BoardError,
    core::{board::Board, colour::Colour},
};

/// Seed for deterministic board generation.
///
/// A 128-bit seed for the generator's random number source. The same seed
/// and configuration always produce the same board, which makes generated
/// boards reproducible from the command line and in tests.
///
/// Serialized and parsed as a 32-character hex string.
///
/// # Example
///
/// ```
/// use blocky_engine::{BoardConfig, BoardSeed, generate_board};
///
/// let seed: BoardSeed = "000000000000000000000000000000ff".parse().unwrap();
/// let config = BoardConfig {
///     seed: Some(seed),
///     ..BoardConfig::default()
/// };
///
/// let a = generate_board(&config).unwrap();
/// let b = generate_board(&config).unwrap();
/// assert_eq!(a.to_tree(), b.to_tree());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{:032x}", u128::from_be_bytes(*_0))]
pub struct BoardSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl BoardSeed {
    /// A random number generator seeded with this seed.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

/// Allows generating random `BoardSeed` values with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}

/// Parameters for [`generate_board`].
///
/// Every field has a default, so a partial JSON object such as
/// `{"max_depth": 2}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub max_depth: u8,
    pub size: u32,
    /// Fixed seed; a fresh random seed is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<BoardSeed>,
}

impl BoardConfig {
    pub const DEFAULT_MAX_DEPTH: u8 = 3;
    pub const DEFAULT_SIZE: u32 = 768;
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            size: Self::DEFAULT_SIZE,
            seed: None,
        }
    }
}

/// Generates a random board.
///
/// The root starts as a leaf of a random palette colour. If `max_depth` is
/// positive the root is always subdivided, and each child keeps being
/// subdivided with a probability that decreases with depth (see
/// [`Board::smash`]).
pub fn generate_board(config: &BoardConfig) -> Result<Board, BoardError> {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = seed.rng();
    let board = generate_board_with_rng(config.size, config.max_depth, &mut rng)?;
    tracing::debug!(
        %seed,
        size = config.size,
        max_depth = config.max_depth,
        leaves = board.leaves().len(),
        "generated board"
    );
    Ok(board)
}

/// Like [`generate_board`], but drawing from the given random number generator.
pub fn generate_board_with_rng<R>(size: u32, max_depth: u8, rng: &mut R) -> Result<Board, BoardError>
where
    R: Rng + ?Sized,
{
    let colour: Colour = rng.random();
    let mut board = Board::new_leaf(size, max_depth, colour)?;
    if max_depth > 0 {
        board.subdivide_randomly(board.root(), rng);
    }
    Ok(board)
}
