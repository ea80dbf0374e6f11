use crate::error::ModelError;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One suit per seat. The catalog order is significant: seat `i` owns the
/// `i`-th suit and the canonical deck lists suits in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    #[serde(rename = "S")]
    Spades = 0,
    #[serde(rename = "C")]
    Clubs = 1,
    #[serde(rename = "H")]
    Hearts = 2,
    #[serde(rename = "D")]
    Diamonds = 3,
    #[serde(rename = "A")]
    Carls = 4,
    #[serde(rename = "I")]
    Heineken = 5,
}

impl Suit {
    pub const CATALOG: [Suit; 6] = [
        Suit::Spades,
        Suit::Clubs,
        Suit::Hearts,
        Suit::Diamonds,
        Suit::Carls,
        Suit::Heineken,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "S",
            Suit::Clubs => "C",
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
            Suit::Carls => "A",
            Suit::Heineken => "I",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Carls => "Carls",
            Suit::Heineken => "Heineken",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, ModelError> {
        Self::CATALOG
            .iter()
            .copied()
            .find(|suit| suit.symbol().eq_ignore_ascii_case(symbol))
            .ok_or_else(|| ModelError::InvalidSuit(symbol.to_string()))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
