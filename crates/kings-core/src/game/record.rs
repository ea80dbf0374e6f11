use crate::error::ShuffleError;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::shuffle::{ShuffleTrace, encode_trace, verify};
use crate::timeline::{ChugInterval, PlayEvent};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One card as the game service stores it. Fields this crate does not
/// interpret are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub value: Rank,
    pub suit: Suit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_delta_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chug_start_start_delta_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chug_end_start_delta_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chug_duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawn_datetime: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardRecord {
    pub fn card(&self) -> Card {
        Card::new(self.value, self.suit)
    }

    pub fn chug(&self) -> Option<ChugInterval> {
        match (self.chug_start_start_delta_ms, self.chug_end_start_delta_ms) {
            (Some(start_ms), Some(end_ms)) => Some(ChugInterval { start_ms, end_ms }),
            _ => None,
        }
    }

    pub fn set_chug(&mut self, chug: Option<ChugInterval>) {
        self.chug_start_start_delta_ms = chug.map(|c| c.start_ms);
        self.chug_end_start_delta_ms = chug.map(|c| c.end_ms);
    }

    /// Cards fetched from the service store a chug start plus a duration.
    /// Derive the end from them, or drop the interval when nobody chugged
    /// or the card is not an ace.
    pub fn normalize_server_chug(&mut self) {
        match (self.chug_start_start_delta_ms, self.chug_duration_ms) {
            (Some(start), Some(duration)) if duration > 0 && self.value.is_ace() => {
                self.chug_end_start_delta_ms = Some(start.saturating_add(duration));
            }
            _ => self.set_chug(None),
        }
    }

    pub fn play_event(&self) -> Option<PlayEvent> {
        Some(PlayEvent {
            card: self.card(),
            start_delta_ms: self.start_delta_ms?,
            chug: self.chug(),
        })
    }
}

impl From<PlayEvent> for CardRecord {
    fn from(play: PlayEvent) -> Self {
        let mut record = CardRecord {
            value: play.card.rank,
            suit: play.card.suit,
            start_delta_ms: Some(play.start_delta_ms),
            chug_start_start_delta_ms: None,
            chug_end_start_delta_ms: None,
            chug_duration_ms: None,
            drawn_datetime: None,
            extra: Map::new(),
        };
        record.set_chug(play.chug);
        record
    }
}

/// A game as submitted to the service: the played cards, the shuffle trace
/// under its wire name `seed`, and whatever else the service attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub cards: Vec<CardRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<ShuffleTrace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_ended: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameRecord {
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = PlayEvent>,
    {
        Self {
            cards: events.into_iter().map(CardRecord::from).collect(),
            ..Self::default()
        }
    }

    pub fn play_order(&self) -> Vec<Card> {
        self.cards.iter().map(CardRecord::card).collect()
    }

    /// Last recorded start delta, the base for any further draws.
    pub fn last_start_delta_ms(&self) -> i64 {
        self.cards
            .iter()
            .rev()
            .find_map(|c| c.start_delta_ms)
            .unwrap_or(0)
    }

    pub fn attach_seed(&mut self) -> Result<&ShuffleTrace, ShuffleError> {
        let trace = encode_trace(&self.play_order())?;
        Ok(&*self.seed.insert(trace))
    }

    /// Whether the stored seed deals the stored cards. A missing seed never
    /// verifies.
    pub fn verify_seed(&self) -> Result<bool, ShuffleError> {
        match self.seed.as_ref() {
            Some(trace) => verify(&self.play_order(), trace),
            None => Ok(false),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.extra.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
