use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use blocky_engine::{Board, BoardSnapshot};

/// Destination of a command's JSON output: stdout, or a file when a path is given.
pub struct Output {
    writer: Box<dyn Write>,
    label: String,
}

impl Output {
    pub fn new(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                label: "stdout".to_owned(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            label: path.display().to_string(),
        })
    }

    /// Writes `value` as pretty JSON followed by a newline.
    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.label))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to flush output to {}", self.label))
    }
}

pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    Output::new(path)?.write_json(value)
}

/// Saves `board` in the snapshot format read back by [`read_board_file`].
pub fn save_board(board: &Board, path: Option<&Path>) -> anyhow::Result<()> {
    save_json(&board.snapshot(), path)?;
    if let Some(path) = path {
        tracing::info!(path = %path.display(), leaves = board.leaves().len(), "saved board");
    }
    Ok(())
}

pub fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Reads a board written by `generate-board`.
///
/// The snapshot is validated while the board is rebuilt, so a file with a
/// malformed tree is rejected here rather than during play.
pub fn read_board_file(path: &Path) -> anyhow::Result<Board> {
    let snapshot: BoardSnapshot = read_json_file("board", path)?;
    let board = Board::try_from(&snapshot)
        .with_context(|| format!("Invalid board in {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        size = board.size(),
        max_depth = board.max_depth(),
        leaves = board.leaves().len(),
        "loaded board"
    );
    Ok(board)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use blocky_engine::{BlockTree, Colour, generate_board_with_rng};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blocky-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_board_file_round_trip() {
        let mut rng = Pcg32::seed_from_u64(12);
        let board = generate_board_with_rng(64, 3, &mut rng).unwrap();
        let path = temp_path("round-trip.json");

        save_board(&board, Some(path.as_path())).unwrap();
        let loaded = read_board_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.to_tree(), board.to_tree());
        assert_eq!(loaded.size(), 64);
        assert_eq!(loaded.max_depth(), 3);
    }

    #[test]
    fn test_read_board_file_errors() {
        let missing = temp_path("missing.json");
        let err = read_board_file(&missing).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open board file"));

        // Four children on a board that cannot be split
        let snapshot = BoardSnapshot {
            size: 8,
            max_depth: 0,
            tree: BlockTree::split(std::array::from_fn(|_| BlockTree::leaf(Colour::REAL_RED))),
        };
        let path = temp_path("too-deep.json");
        save_json(&snapshot, Some(path.as_path())).unwrap();
        let err = read_board_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("Invalid board in"));
    }
}
