use std::path::Path;

use anyhow::{Context, Result};
use kings_core::game::analog::reconstruct;
use kings_core::game::record::GameRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use super::write_game;
use crate::config::{self, AnalogConfig};

pub fn run(input: &Path, output: Option<&Path>, rng_seed: Option<u64>) -> Result<()> {
    let cfg: AnalogConfig = config::from_path(input)?;
    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = build_game(&cfg, &mut rng)?;
    write_game(&game, output)
}

pub fn build_game(cfg: &AnalogConfig, rng: &mut StdRng) -> Result<GameRecord> {
    let start = cfg.start()?;
    let duration_ms = cfg.duration()?.whole_milliseconds() as i64;
    let events = reconstruct(&cfg.seats(), duration_ms, rng)?;

    let mut game = GameRecord::from_events(events);
    game.set(
        "start_datetime",
        start.format(&Rfc3339).context("formatting start_datetime")?,
    );
    game.set("official", true);
    game.set(
        "player_names",
        cfg.players.iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
    );
    game.set("description", cfg.description.as_str());
    game.has_ended = Some(true);
    game.attach_seed()?;
    info!(
        players = cfg.players.len(),
        cards = game.cards.len(),
        duration_ms,
        "reconstructed offline game"
    );
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::build_game;
    use crate::config::{AnalogConfig, Validate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const YAML: &str = r#"
start_datetime: "2021-06-05T19:30:00+02:00"
duration: "00:07:00"
players:
  - name: "alice"
    values: [14, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]
    chugs_s: [7.5]
  - name: "bob"
    values: [13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 14]
    chugs_s: [12]
"#;

    fn config() -> AnalogConfig {
        let mut cfg: AnalogConfig = serde_yaml::from_str(YAML).expect("parse");
        cfg.validate().expect("valid");
        cfg
    }

    #[test]
    fn offline_game_is_complete_and_verifiable() {
        let game = build_game(&config(), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(game.cards.len(), 26);
        assert_eq!(game.has_ended, Some(true));
        assert_eq!(game.verify_seed(), Ok(true));
        assert_eq!(game.get("official"), Some(&serde_json::json!(true)));
        assert_eq!(
            game.get("start_datetime"),
            Some(&serde_json::json!("2021-06-05T19:30:00+02:00"))
        );
        // 420s over 28 turns.
        assert_eq!(game.cards[0].start_delta_ms, Some(15_000));
        assert_eq!(game.cards[0].chug_start_start_delta_ms, Some(22_500));
        assert_eq!(game.cards[0].chug_end_start_delta_ms, Some(30_000));
        assert_eq!(game.cards[25].chug_end_start_delta_ms, Some(420_000));
    }

    #[test]
    fn same_rng_seed_gives_same_suits() {
        let a = build_game(&config(), &mut StdRng::seed_from_u64(11)).unwrap();
        let b = build_game(&config(), &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a.play_order(), b.play_order());
        assert_eq!(a.seed, b.seed);
    }
}
