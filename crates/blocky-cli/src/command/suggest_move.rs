use std::path::PathBuf;

use anyhow::Context as _;
use blocky_engine::{Action, BoardSeed, Colour, Move};
use blocky_goal::{Goal, GoalKind, generate_goals};
use blocky_player::{Player, PlayerKind, RandomPlayer, SmartPlayer};
use rand::Rng as _;
use serde::Serialize;

use crate::util::{read_board_file, save_json};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestMoveArg {
    /// Board file written by `generate-board`
    #[arg(long)]
    board: PathBuf,
    /// Player to ask (random or smart)
    #[arg(long, default_value = "smart")]
    player: PlayerKind,
    /// Number of candidate moves a smart player compares
    #[arg(long, default_value_t = 5)]
    difficulty: usize,
    /// Goal kind (perimeter or blob); random with --colour unset as well
    #[arg(long)]
    goal: Option<GoalKind>,
    /// Target colour of the goal
    #[arg(long)]
    colour: Option<Colour>,
    /// 32-digit hex seed for the player's random choices
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BlockSummary {
    position: (u32, u32),
    size: u32,
    level: u8,
}

#[derive(Debug, Serialize)]
struct Suggestion {
    player: String,
    goal: String,
    action: Action,
    block: BlockSummary,
    score_before: usize,
    score_after: usize,
    seed: BoardSeed,
}

pub(crate) fn run(arg: &SuggestMoveArg) -> anyhow::Result<()> {
    let board = read_board_file(&arg.board)?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = seed.rng();

    let goal = match (arg.goal, arg.colour) {
        (None, None) => generate_goals(1, &mut rng)?
            .into_iter()
            .next()
            .context("No goal generated")?,
        (kind, colour) => Goal::new(
            kind.unwrap_or(GoalKind::Blob),
            colour.unwrap_or_else(|| rng.random()),
        ),
    };
    let mut player = match arg.player {
        PlayerKind::Random => Player::from(RandomPlayer::new(0, goal)),
        PlayerKind::Smart => Player::from(SmartPlayer::new(0, goal, arg.difficulty)),
    };
    tracing::info!(%seed, player = %arg.player, %goal, "searching for a move");

    let score_before = goal.score(&board);
    let (mv, score_after) = match player.choose_candidate(&board, &mut rng) {
        Some(candidate) => (candidate.mv(), candidate.score()),
        None => (Move::pass(&board), score_before),
    };

    let target = mv.target();
    let suggestion = Suggestion {
        player: arg.player.to_string(),
        goal: goal.description(),
        action: mv.action(),
        block: BlockSummary {
            position: board.position(target),
            size: board.block_size(target),
            level: board.level(target),
        },
        score_before,
        score_after,
        seed,
    };
    save_json(&suggestion, arg.output.as_deref())?;
    Ok(())
}
