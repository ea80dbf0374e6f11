use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use super::{read_game, write_game};

/// Attach the shuffle trace to a finished game record.
pub fn run(input: &Path, output: Option<&Path>) -> Result<()> {
    let mut game = read_game(input)?;
    let steps = game
        .attach_seed()
        .with_context(|| format!("computing seed for {}", input.display()))?
        .len();
    info!(cards = game.cards.len(), steps, "attached seed");
    write_game(&game, output)
}

/// Check that a record's stored seed deals its cards.
pub fn verify(input: &Path) -> Result<()> {
    let game = read_game(input)?;
    if game.seed.is_none() {
        bail!("{} has no seed", input.display());
    }
    if !game.verify_seed()? {
        bail!("seed in {} does not deal the recorded cards", input.display());
    }
    println!("ok: seed deals all {} cards", game.cards.len());
    Ok(())
}
