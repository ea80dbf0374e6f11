use std::path::Path;

use anyhow::{Context, Result};
use kings_core::game::record::GameRecord;
use kings_core::timeline::ChugInterval;
use serde_json::Value;
use tracing::{debug, info};

use super::{read_game, write_game};
use crate::timestamp::{delta_ms, parse_timestamp};

/// Convert a record from the timestamp-based API into start deltas.
pub fn run(input: &Path, output: &Path) -> Result<()> {
    let mut game = read_game(input)?;
    let upgraded = upgrade_record(&mut game)?;
    info!(upgraded, cards = game.cards.len(), "upgraded legacy record");
    write_game(&game, Some(output))
}

/// Returns the number of cards that were converted. Cards without a
/// `drawn_datetime` are left as they are.
pub fn upgrade_record(game: &mut GameRecord) -> Result<usize> {
    let start = game
        .get("start_datetime")
        .and_then(Value::as_str)
        .context("legacy record has no start_datetime")?;
    let start = parse_timestamp(start)?;

    let mut upgraded = 0;
    for (index, card) in game.cards.iter_mut().enumerate() {
        let Some(drawn) = card.drawn_datetime.as_deref() else {
            continue;
        };
        let drawn = parse_timestamp(drawn).with_context(|| format!("card {index}"))?;
        let start_delta_ms = delta_ms(start, drawn);
        card.start_delta_ms = Some(start_delta_ms);
        if let Some(chug) =
            ChugInterval::legacy(card.card(), start_delta_ms, card.chug_duration_ms)
        {
            card.set_chug(Some(chug));
        }
        debug!(index, start_delta_ms, "converted card");
        upgraded += 1;
    }

    game.has_ended = Some(true);
    Ok(upgraded)
}

#[cfg(test)]
mod tests {
    use super::upgrade_record;
    use kings_core::game::record::GameRecord;

    #[test]
    fn timestamps_become_deltas_with_fixed_chug_latency() {
        let mut game = GameRecord::from_json(
            r#"{
                "start_datetime": "2018-11-02T21:00:00Z",
                "cards": [
                    {"value": 5, "suit": "S", "drawn_datetime": "2018-11-02T21:00:03.5004Z"},
                    {"value": 14, "suit": "C", "drawn_datetime": "2018-11-02T22:00:07+01:00",
                     "chug_duration_ms": 3000},
                    {"value": 14, "suit": "S", "drawn_datetime": "2018-11-02T21:00:09Z",
                     "chug_duration_ms": 0},
                    {"value": 9, "suit": "C", "start_delta_ms": 11000}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(upgrade_record(&mut game).unwrap(), 3);
        assert_eq!(game.cards[0].start_delta_ms, Some(3500));
        assert_eq!(game.cards[1].start_delta_ms, Some(7000));
        assert_eq!(game.cards[1].chug_start_start_delta_ms, Some(9137));
        assert_eq!(game.cards[1].chug_end_start_delta_ms, Some(12137));
        assert_eq!(game.cards[2].chug(), None);
        assert_eq!(game.cards[3].start_delta_ms, Some(11000));
        assert_eq!(game.has_ended, Some(true));
    }

    #[test]
    fn non_ace_keeps_no_chug_after_upgrade() {
        let mut game = GameRecord::from_json(
            r#"{
                "start_datetime": "2018-11-02T21:00:00Z",
                "cards": [
                    {"value": 5, "suit": "S", "drawn_datetime": "2018-11-02T21:00:07Z",
                     "chug_duration_ms": 3000}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(upgrade_record(&mut game).unwrap(), 1);
        assert_eq!(game.cards[0].start_delta_ms, Some(7000));
        assert_eq!(game.cards[0].chug(), None);
    }

    #[test]
    fn missing_start_is_an_error() {
        let mut game = GameRecord::from_json(r#"{"cards": []}"#).unwrap();
        assert!(upgrade_record(&mut game).is_err());
    }
}
