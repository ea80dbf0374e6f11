use crate::error::ModelError;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_ace(self) -> bool {
        self.rank.is_ace()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.value(), self.suit)
    }
}

/// Parses the compact `<value><symbol>` notation, e.g. `14S` or `7h`.
impl FromStr for Card {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| ModelError::InvalidCard(s.to_string()))?;
        let (digits, symbol) = trimmed.split_at(split);
        let value: u8 = digits
            .parse()
            .map_err(|_| ModelError::InvalidCard(s.to_string()))?;
        Ok(Card::new(Rank::try_from(value)?, Suit::from_symbol(symbol)?))
    }
}
