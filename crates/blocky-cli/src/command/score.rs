use std::path::PathBuf;

use blocky_engine::Colour;
use blocky_goal::{Goal, GoalKind};

use crate::util::read_board_file;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Board file written by `generate-board`
    #[arg(long)]
    board: PathBuf,
    /// Colours to score, by palette name or `#rrggbb` (default: the whole palette)
    #[arg(long = "colour")]
    colours: Vec<Colour>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let board = read_board_file(&arg.board)?;
    let grid = board.flatten();

    let colours = if arg.colours.is_empty() {
        Colour::PALETTE.to_vec()
    } else {
        arg.colours.clone()
    };

    print!("{grid}");
    println!();
    println!("{:<18} {:>9} {:>6}", "colour", "perimeter", "blob");
    for colour in colours {
        let perimeter = Goal::new(GoalKind::Perimeter, colour).score_grid(&grid);
        let blob = Goal::new(GoalKind::Blob, colour).score_grid(&grid);
        println!(
            "{:<18} {perimeter:>9} {blob:>6}",
            format!("{} ({})", colour.name(), colour.as_char())
        );
    }
    Ok(())
}
