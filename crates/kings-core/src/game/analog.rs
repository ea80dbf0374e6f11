//! Reconstruction of games played with a physical deck, where only each
//! player's sequence of card values, the total duration and the chug times
//! were written down. Suits are assigned at random among those still left,
//! and draws are spread evenly over the game.

use crate::error::AnalogError;
use crate::model::card::Card;
use crate::model::deck::{CARDS_PER_SUIT, Deck};
use crate::model::rank::Rank;
use crate::timeline::{ChugInterval, PlayEvent, seconds_to_ms};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// What was noted for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogSeat {
    pub name: String,
    /// Card values in the order this player drew them.
    pub values: Vec<Rank>,
    /// Chug duration in seconds for each ace, in draw order.
    pub chugs_s: Vec<f64>,
}

impl AnalogSeat {
    fn check(&self) -> Result<(), AnalogError> {
        if self.values.len() != CARDS_PER_SUIT {
            return Err(AnalogError::ValueCount {
                seat: self.name.clone(),
                found: self.values.len(),
            });
        }
        let aces = self.values.iter().filter(|r| r.is_ace()).count();
        if aces != self.chugs_s.len() {
            return Err(AnalogError::ChugCount {
                seat: self.name.clone(),
                aces,
                found: self.chugs_s.len(),
            });
        }
        Ok(())
    }
}

/// Lay the seats' draws out over `duration_ms`. Every draw and every chug
/// takes one turn of `duration / (cards + players)`; a chug ends at the end
/// of its turn.
pub fn reconstruct<R: Rng + ?Sized>(
    seats: &[AnalogSeat],
    duration_ms: i64,
    rng: &mut R,
) -> Result<Vec<PlayEvent>, AnalogError> {
    if duration_ms <= 0 {
        return Err(AnalogError::Duration);
    }
    let mut left: Vec<Card> = Deck::canonical(seats.len())?.into_cards();
    for seat in seats {
        seat.check()?;
    }

    let turn_ms = duration_ms as f64 / (left.len() + seats.len()) as f64;
    let mut cursor = 0.0_f64;
    let mut chug_cursors = vec![0usize; seats.len()];
    let mut events = Vec::with_capacity(left.len());

    for round in 0..CARDS_PER_SUIT {
        for (index, seat) in seats.iter().enumerate() {
            cursor += turn_ms;
            let rank = seat.values[round];
            let candidates: Vec<usize> = left
                .iter()
                .enumerate()
                .filter(|(_, c)| c.rank == rank)
                .map(|(i, _)| i)
                .collect();
            let picked = *candidates.choose(rng).ok_or_else(|| AnalogError::Exhausted {
                seat: seat.name.clone(),
                value: rank.value(),
            })?;
            let card = left.remove(picked);
            let start_delta_ms = cursor.round() as i64;

            let chug = if card.is_ace() {
                cursor += turn_ms;
                let chug_s = seat.chugs_s[chug_cursors[index]];
                chug_cursors[index] += 1;
                let end_ms = cursor.round() as i64;
                let duration_ms = if chug_s.is_finite() {
                    seconds_to_ms(chug_s)
                } else {
                    0
                };
                let start_ms = end_ms
                    .saturating_sub(duration_ms.max(0))
                    .clamp(start_delta_ms, end_ms);
                // A chug that took no time is not recorded at all.
                (duration_ms > 0 && start_ms < end_ms)
                    .then_some(ChugInterval { start_ms, end_ms })
            } else {
                None
            };

            events.push(PlayEvent {
                card,
                start_delta_ms,
                chug,
            });
        }
    }

    event!(
        target: "kings_core::analog",
        Level::DEBUG,
        players = seats.len(),
        turn_ms,
        "reconstructed analog game"
    );
    Ok(events)
}
