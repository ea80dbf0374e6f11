use std::path::Path;

use anyhow::{Result, bail};
use kings_core::game::record::{CardRecord, GameRecord};
use kings_core::model::deck::{CARDS_PER_SUIT, seat_for_draw};
use kings_core::timeline::TimelineBuilder;
use serde_json::Value;
use tracing::{Level, event, info};

use super::{read_game, write_game};
use crate::config::{self, SessionConfig};

/// Turn a written-down session into a game record, optionally continuing a
/// game the service already holds cards for.
pub fn run(session_path: &Path, existing: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let session: SessionConfig = config::from_path(session_path)?;
    let game = match existing {
        Some(path) => {
            let mut game = read_game(path)?;
            game.cards
                .iter_mut()
                .for_each(CardRecord::normalize_server_chug);
            game
        }
        None => GameRecord::default(),
    };
    let game = record_session(&session, game)?;
    write_game(&game, output)
}

pub fn record_session(session: &SessionConfig, mut game: GameRecord) -> Result<GameRecord> {
    let players = session.players.len();
    if let Some(stats) = game.get("player_stats").and_then(Value::as_array) {
        if stats.len() != players {
            bail!(
                "game has {} players on record but the session lists {players}",
                stats.len()
            );
        }
    }
    session.validate_against(&game.play_order())?;

    let total = CARDS_PER_SUIT * players;
    let mut timeline =
        TimelineBuilder::resume_from(session.resume_from_ms.max(game.last_start_delta_ms()));
    for (card, timing) in session.draws() {
        let seat = seat_for_draw(players, total - game.cards.len());
        let play = timeline.push(card, timing);
        event!(
            target: "kings_cli::record",
            Level::DEBUG,
            player = %session.players[seat],
            card = %card,
            start_delta_ms = play.start_delta_ms,
            chug = play.chug.is_some(),
            "draw recorded"
        );
        game.cards.push(CardRecord::from(play));
    }

    if let Some(description) = session.description.as_ref() {
        game.set("description", description.as_str());
    }
    match game.get("player_stats").and_then(Value::as_array).cloned() {
        Some(stats) => {
            let ids: Vec<Value> = stats.iter().map(|p| p["id"].clone()).collect();
            let names: Vec<Value> = stats.iter().map(|p| p["username"].clone()).collect();
            game.set("player_ids", ids);
            game.set("player_names", names);
        }
        None => game.set("player_names", session.players.clone()),
    }

    if game.cards.len() == total {
        game.has_ended = Some(true);
        game.attach_seed()?;
        info!(cards = total, "game complete, seed attached");
    } else {
        info!(
            cards = game.cards.len(),
            remaining = total - game.cards.len(),
            "game still in progress"
        );
    }
    Ok(game)
}
