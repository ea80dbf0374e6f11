use crate::model::card::Card;
use thiserror::Error;

/// Failures while parsing card notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("rank value {0} is outside 2..=14")]
    InvalidRank(u8),
    #[error("unknown suit symbol '{0}'")]
    InvalidSuit(String),
    #[error("cannot parse card '{0}' (expected e.g. 14S)")]
    InvalidCard(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("player count {count} is outside 1..={max}")]
    InvalidPlayerCount { count: usize, max: usize },
    #[error("card {0} is not part of the deck or was drawn twice")]
    UnknownDraw(Card),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuffleError {
    #[error("play order of {len} cards is not a whole deck of 13 per player")]
    InvalidPlayOrder { len: usize },
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("card {card} at position {position} is duplicated or not in the deck")]
    CardNotFound { card: Card, position: usize },
    #[error("shuffle trace is malformed: {message}")]
    InvalidTrace { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalogError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("{seat} lists {found} card values, expected 13")]
    ValueCount { seat: String, found: usize },
    #[error("{seat} lists {found} chug times for {aces} aces")]
    ChugCount {
        seat: String,
        aces: usize,
        found: usize,
    },
    #[error("no card of value {value} left for {seat}")]
    Exhausted { seat: String, value: u8 },
    #[error("game duration must be positive")]
    Duration,
}
