use std::path::PathBuf;

use blocky_engine::{BoardConfig, BoardSeed, generate_board};
use rand::Rng as _;

use crate::util::{read_json_file, save_board};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateBoardArg {
    /// Board configuration file (JSON); flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum depth of the block tree
    #[arg(long)]
    max_depth: Option<u8>,
    /// Side length of the board; must be divisible by 2^max-depth
    #[arg(long)]
    size: Option<u32>,
    /// 32-digit hex seed for reproducible boards
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateBoardArg) -> anyhow::Result<()> {
    let GenerateBoardArg {
        config,
        max_depth,
        size,
        seed,
        output,
    } = arg;

    let mut config: BoardConfig = match config {
        Some(path) => read_json_file("board config", path)?,
        None => BoardConfig::default(),
    };
    if let Some(max_depth) = max_depth {
        config.max_depth = *max_depth;
    }
    if let Some(size) = size {
        config.size = *size;
    }
    // Always fix the seed so the log can reproduce the board
    let seed = seed
        .or(config.seed)
        .unwrap_or_else(|| rand::rng().random());
    config.seed = Some(seed);

    tracing::info!(
        %seed,
        size = config.size,
        max_depth = config.max_depth,
        "generating board"
    );
    let board = generate_board(&config)?;
    save_board(&board, output.as_deref())?;
    Ok(())
}
