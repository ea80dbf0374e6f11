pub mod analog;
pub mod deck;
pub mod record;
pub mod seed;
pub mod upgrade;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use kings_core::game::record::GameRecord;

pub fn read_game(path: &Path) -> Result<GameRecord> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading game record from {}", path.display()))?;
    GameRecord::from_json(&json)
        .with_context(|| format!("parsing game record in {}", path.display()))
}

/// Write to `path`, or to stdout when no path is given.
pub fn write_game(game: &GameRecord, path: Option<&Path>) -> Result<()> {
    let json = game.to_json().context("serializing game record")?;
    match path {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("writing game record to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("writing game record to stdout")
        }
    }
}
