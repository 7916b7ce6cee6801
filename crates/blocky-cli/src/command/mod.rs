use clap::{Parser, Subcommand};

use self::{
    generate_board::GenerateBoardArg, score::ScoreArg, suggest_move::SuggestMoveArg,
};

mod generate_board;
mod score;
mod suggest_move;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a random board and write it as JSON
    GenerateBoard(#[clap(flatten)] GenerateBoardArg),
    /// Print a board's unit cells and its goal scores
    Score(#[clap(flatten)] ScoreArg),
    /// Ask a computer player for its next move on a board
    SuggestMove(#[clap(flatten)] SuggestMoveArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::GenerateBoard(arg) => generate_board::run(&arg)?,
        Mode::Score(arg) => score::run(&arg)?,
        Mode::SuggestMove(arg) => suggest_move::run(&arg)?,
    }
    Ok(())
}
