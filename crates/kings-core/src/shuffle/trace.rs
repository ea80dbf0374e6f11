//! Shuffle traces: the swap targets a descending Fisher–Yates pass over the
//! canonical deck must pick to deal a given play order.
//!
//! Forward, step `k` (for `i = L-1` down to `1`, `k = L-1-i`) swaps `deck[i]`
//! with `deck[trace[k]]`, `trace[k] <= i`. After the last step the deck *is*
//! the play order. The encoder runs the same swaps, choosing each target by
//! locating the card that must land at `i`.

use crate::error::ShuffleError;
use crate::model::card::Card;
use crate::model::deck::{CARDS_PER_SUIT, Deck};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Swap targets in the order they are applied. Serialised as the `seed`
/// array the game service expects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShuffleTrace(Vec<usize>);

impl ShuffleTrace {
    pub fn new(steps: Vec<usize>) -> Self {
        Self(steps)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for ShuffleTrace {
    fn from(steps: Vec<usize>) -> Self {
        Self(steps)
    }
}

/// Player count implied by a play order of `len` cards.
pub fn player_count_for(len: usize) -> Result<usize, ShuffleError> {
    if len == 0 || len % CARDS_PER_SUIT != 0 {
        return Err(ShuffleError::InvalidPlayOrder { len });
    }
    Ok(len / CARDS_PER_SUIT)
}

/// Recover the trace that deals `play_order` from the canonical deck.
///
/// The whole order must be supplied; there is no partial result. A card that
/// is foreign to the table or appears twice yields `CardNotFound`.
pub fn encode_trace(play_order: &[Card]) -> Result<ShuffleTrace, ShuffleError> {
    let player_count = player_count_for(play_order.len())?;
    let mut deck = Deck::canonical(player_count)?.into_cards();
    let mut steps = Vec::with_capacity(deck.len() - 1);

    for i in (1..deck.len()).rev() {
        let card = play_order[i];
        // Positions above `i` are already dealt and must not match again.
        let j = deck[..=i]
            .iter()
            .position(|c| *c == card)
            .ok_or(ShuffleError::CardNotFound { card, position: i })?;
        steps.push(j);
        deck.swap(i, j);
    }

    // The loop never inspects the first card; whatever is left must be it.
    if deck[0] != play_order[0] {
        return Err(ShuffleError::CardNotFound {
            card: play_order[0],
            position: 0,
        });
    }

    event!(
        target: "kings_core::shuffle",
        Level::DEBUG,
        player_count,
        steps = steps.len(),
        "encoded shuffle trace"
    );
    Ok(ShuffleTrace(steps))
}

/// Deal the canonical deck for `player_count` through `trace`.
pub fn replay(player_count: usize, trace: &ShuffleTrace) -> Result<Vec<Card>, ShuffleError> {
    let mut deck = Deck::canonical(player_count)?.into_cards();
    let expected = deck.len() - 1;
    if trace.len() != expected {
        return Err(ShuffleError::InvalidTrace {
            message: format!("expected {expected} steps, found {}", trace.len()),
        });
    }

    for (k, &j) in trace.as_slice().iter().enumerate() {
        let i = expected - k;
        if j > i {
            return Err(ShuffleError::InvalidTrace {
                message: format!("step {k} targets {j}, bound is {i}"),
            });
        }
        deck.swap(i, j);
    }
    Ok(deck)
}

/// Whether `trace` deals exactly `play_order`.
pub fn verify(play_order: &[Card], trace: &ShuffleTrace) -> Result<bool, ShuffleError> {
    let player_count = player_count_for(play_order.len())?;
    match replay(player_count, trace) {
        Ok(dealt) => Ok(dealt == play_order),
        Err(ShuffleError::InvalidTrace { .. }) => Ok(false),
        Err(other) => Err(other),
    }
}
