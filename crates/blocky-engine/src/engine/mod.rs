//! Game actions and board generation.
//!
//! This module builds on the [`core`](crate::core) data structures:
//!
//! - [`Action`] - The moves a player can make on a block
//! - [`Move`] - An action paired with its target block
//! - [`BoardConfig`] - Size, depth and seed of a generated board
//! - [`BoardSeed`] - Seed for deterministic board generation
//! - [`generate_board`] - Random board generation
//!
//! # Example
//!
//! ```
//! use blocky_engine::{Action, BoardConfig, Colour, Move, generate_board};
//!
//! let mut board = generate_board(&BoardConfig::default()).unwrap();
//! let mut rng = rand::rng();
//!
//! // Rotate the whole board; any board of depth > 0 starts out split
//! let mv = Move::new(Action::RotateClockwise, board.root());
//! board.apply(mv, Colour::REAL_RED, &mut rng).unwrap();
//! ```

pub use self::{action::*, board_generator::*};

mod action;
mod board_generator;
