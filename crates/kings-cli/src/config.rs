use kings_core::game::analog::AnalogSeat;
use kings_core::model::card::Card;
use kings_core::model::deck::{CARDS_PER_SUIT, Deck, MAX_PLAYERS};
use kings_core::model::rank::Rank;
use kings_core::timeline::RawTiming;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::Level;

use crate::timestamp::{parse_duration, parse_timestamp};

/// A YAML input file that checks itself after parsing.
pub trait Validate {
    fn validate(&mut self) -> Result<(), ValidationError>;
}

/// Load and validate a YAML input file.
pub fn from_path<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Validate,
{
    let path = path.as_ref();
    let path_buf = path.to_path_buf();
    let file = File::open(path).map_err(|source| ConfigError::Read {
        source,
        path: path_buf.clone(),
    })?;
    let reader = BufReader::new(file);
    let mut cfg: T = serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
        source,
        path: path_buf.clone(),
    })?;
    cfg.validate().map_err(|source| ConfigError::Invalid {
        path: path_buf,
        source,
    })?;
    Ok(cfg)
}

/// A live session written down draw by draw, replacing the interactive
/// recorder.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub players: Vec<String>,
    /// Start delta of the last card already on record, if continuing.
    #[serde(default)]
    pub resume_from_ms: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub draws: Vec<DrawConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DrawConfig {
    pub card: String,
    #[serde(default)]
    pub interval_s: f64,
    #[serde(default)]
    pub before_begin_s: Option<f64>,
    #[serde(default)]
    pub chug_s: Option<f64>,
}

impl DrawConfig {
    fn parsed(&self, index: usize) -> Result<Card, ValidationError> {
        self.card
            .parse::<Card>()
            .map_err(|err| ValidationError::InvalidField {
                field: format!("draws[{index}].card"),
                message: err.to_string(),
            })
    }

    pub fn timing(&self) -> RawTiming {
        RawTiming {
            interval_s: self.interval_s,
            before_begin_s: self.before_begin_s,
            chug_s: self.chug_s,
        }
    }
}

impl SessionConfig {
    /// Parsed draws with their timings. Only meaningful after `validate`.
    pub fn draws(&self) -> Vec<(Card, RawTiming)> {
        self.draws
            .iter()
            .filter_map(|d| d.card.parse::<Card>().ok().map(|c| (c, d.timing())))
            .collect()
    }

    /// Check draws against cards already on record for this game.
    pub fn validate_against(&self, recorded: &[Card]) -> Result<(), ValidationError> {
        let mut drawn = recorded.to_vec();
        for (index, draw) in self.draws.iter().enumerate() {
            drawn.push(draw.parsed(index)?);
        }
        Deck::remaining(self.players.len(), &drawn).map_err(|err| {
            ValidationError::InvalidField {
                field: "draws".to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(())
    }
}

impl Validate for SessionConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        validate_players(self.players.iter().map(String::as_str))?;
        for (index, draw) in self.draws.iter().enumerate() {
            for (label, value) in [
                ("interval_s", Some(draw.interval_s)),
                ("before_begin_s", draw.before_begin_s),
                ("chug_s", draw.chug_s),
            ] {
                if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                    return Err(ValidationError::InvalidField {
                        field: format!("draws[{index}].{label}"),
                        message: "seconds must be a non-negative number".to_string(),
                    });
                }
            }
        }
        if self.resume_from_ms < 0 {
            return Err(ValidationError::InvalidField {
                field: "resume_from_ms".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        self.validate_against(&[])
    }
}

/// Notes taken during a game played with a physical deck.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalogConfig {
    pub start_datetime: String,
    pub duration: String,
    pub players: Vec<AnalogPlayerConfig>,
    #[serde(default = "default_analog_description")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalogPlayerConfig {
    pub name: String,
    pub values: Vec<u8>,
    #[serde(default)]
    pub chugs_s: Vec<f64>,
}

impl AnalogConfig {
    pub fn start(&self) -> Result<OffsetDateTime, ValidationError> {
        parse_timestamp(&self.start_datetime).map_err(|err| ValidationError::InvalidField {
            field: "start_datetime".to_string(),
            message: err.to_string(),
        })
    }

    pub fn duration(&self) -> Result<Duration, ValidationError> {
        parse_duration(&self.duration).map_err(|err| ValidationError::InvalidField {
            field: "duration".to_string(),
            message: err.to_string(),
        })
    }

    pub fn seats(&self) -> Vec<AnalogSeat> {
        self.players
            .iter()
            .map(|p| AnalogSeat {
                name: p.name.clone(),
                values: p.values.iter().filter_map(|v| Rank::from_value(*v)).collect(),
                chugs_s: p.chugs_s.clone(),
            })
            .collect()
    }
}

impl Validate for AnalogConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        validate_players(self.players.iter().map(|p| p.name.as_str()))?;
        self.start()?;
        if self.duration()?.is_zero() {
            return Err(ValidationError::InvalidField {
                field: "duration".to_string(),
                message: "duration must be greater than zero".to_string(),
            });
        }
        for player in &self.players {
            if player.values.len() != CARDS_PER_SUIT {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].values", player.name),
                    message: format!(
                        "expected {CARDS_PER_SUIT} card values, found {}",
                        player.values.len()
                    ),
                });
            }
            if let Some(bad) = player.values.iter().find(|v| Rank::from_value(**v).is_none()) {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].values", player.name),
                    message: format!("card value {bad} is outside 2..=14"),
                });
            }
            let aces = player.values.iter().filter(|v| **v == 14).count();
            if aces != player.chugs_s.len() {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].chugs_s", player.name),
                    message: format!("{aces} aces but {} chug times", player.chugs_s.len()),
                });
            }
            if player.chugs_s.iter().any(|s| !s.is_finite()) {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].chugs_s", player.name),
                    message: "chug times must be finite numbers of seconds".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn default_analog_description() -> String {
    "Offline game".to_string()
}

fn validate_players<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }
        if !seen.insert(name.to_string()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player '{name}' listed more than once"),
            });
        }
    }
    if seen.is_empty() || seen.len() > MAX_PLAYERS {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!("between 1 and {MAX_PLAYERS} players are required"),
        });
    }
    Ok(())
}

/// Logging options taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub tracing_level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid input in {path}: {source}")]
    Invalid {
        #[source]
        source: ValidationError,
        path: PathBuf,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::{AnalogConfig, SessionConfig, Validate, ValidationError};
    use kings_core::model::card::Card;

    const SESSION_YAML: &str = r#"
players: ["alice", "bob"]
resume_from_ms: 1500
draws:
  - card: "14S"
    interval_s: 2.0
    before_begin_s: 1.0
    chug_s: 6.5
  - card: "3C"
    interval_s: 4.25
"#;

    const ANALOG_YAML: &str = r#"
start_datetime: "2021-06-05T19:30:00+02:00"
duration: "00:45:00"
players:
  - name: "alice"
    values: [14, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]
    chugs_s: [7.5]
"#;

    #[test]
    fn parses_session_config() {
        let mut cfg: SessionConfig = serde_yaml::from_str(SESSION_YAML).expect("parse");
        cfg.validate().expect("valid");
        let draws = cfg.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].0, "14S".parse::<Card>().unwrap());
        assert_eq!(draws[0].1.chug_s, Some(6.5));
        assert_eq!(cfg.resume_from_ms, 1500);
        assert_eq!(cfg.description, None);
    }

    #[test]
    fn rejects_duplicate_draws() {
        let yaml = SESSION_YAML.replace("\"3C\"", "\"14S\"");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("duplicate card");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "draws"
        ));
    }

    #[test]
    fn rejects_suits_beyond_the_table() {
        let yaml = SESSION_YAML.replace("\"3C\"", "\"3H\"");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unparseable_cards_and_negative_times() {
        let yaml = SESSION_YAML.replace("\"3C\"", "\"three\"");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("bad card");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "draws[1].card"
        ));

        let yaml = SESSION_YAML.replace("interval_s: 4.25", "interval_s: -1");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("negative interval");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "draws[1].interval_s"
        ));
    }

    #[test]
    fn rejects_duplicate_or_missing_players() {
        let yaml = SESSION_YAML.replace("\"bob\"", "\"alice\"");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());

        let yaml = SESSION_YAML.replace("[\"alice\", \"bob\"]", "[]");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parses_analog_config() {
        let mut cfg: AnalogConfig = serde_yaml::from_str(ANALOG_YAML).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.description, "Offline game");
        assert_eq!(cfg.duration().unwrap().whole_seconds(), 2700);
        assert_eq!(cfg.start().unwrap().offset().whole_hours(), 2);
        let seats = cfg.seats();
        assert_eq!(seats[0].values.len(), 13);
    }

    #[test]
    fn rejects_missing_chug_times() {
        let yaml = ANALOG_YAML.replace("    chugs_s: [7.5]\n", "");
        let mut cfg: AnalogConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("chug count");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "players[alice].chugs_s"
        ));
    }

    #[test]
    fn rejects_non_finite_chug_times() {
        let yaml = ANALOG_YAML.replace("chugs_s: [7.5]", "chugs_s: [.nan]");
        let mut cfg: AnalogConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("nan chug");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "players[alice].chugs_s"
        ));

        let yaml = ANALOG_YAML.replace("chugs_s: [7.5]", "chugs_s: [0]");
        let mut cfg: AnalogConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("zero chug means nobody chugged");
    }

    #[test]
    fn rejects_short_value_lists() {
        let yaml = ANALOG_YAML.replace(", 13]", "]");
        let mut cfg: AnalogConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("twelve values");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "players[alice].values"
        ));
    }
}
